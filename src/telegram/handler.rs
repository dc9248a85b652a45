use crate::api::WordApi;
use crate::error::HandlerError;
use crate::telegram::commands::Command;
use std::sync::Arc;
use teloxide::prelude::*;

pub const GREETING: &str = "Bonjour je suis Haddock, capitaine de ce navire.";
pub const HELP: &str = "Bonjour je suis Haddock, capitaine de ce navire. Utilisez les commandes /vocabulaire et /insultes.";

pub async fn answer(
    bot: Bot,
    msg: Message,
    cmd: Command,
    api: Arc<WordApi>,
) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;
    match cmd {
        Command::Start => {
            bot.send_message(chat_id, GREETING).await?;
        }
        Command::Help => {
            bot.send_message(chat_id, HELP).await?;
        }
        Command::Vocabulaire => {
            let word = api.vocabulary().await?;
            bot.send_message(chat_id, word).await?;
        }
        Command::Insultes => {
            let insult = api.insults().await?;
            bot.send_message(chat_id, insult).await?;
        }
    }
    Ok(())
}
