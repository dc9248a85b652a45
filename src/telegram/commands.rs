use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Commandes disponibles :")]
pub enum Command {
    #[command(description = "salut du capitaine.")]
    Start,

    #[command(description = "affiche l'aide.")]
    Help,

    #[command(description = "un mot du vocabulaire du capitaine.")]
    Vocabulaire,

    #[command(description = "une insulte du capitaine.")]
    Insultes,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT_NAME: &str = "haddockbot";

    #[test]
    fn parses_all_four_commands() {
        assert_eq!(Command::parse("/start", BOT_NAME).unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", BOT_NAME).unwrap(), Command::Help);
        assert_eq!(
            Command::parse("/vocabulaire", BOT_NAME).unwrap(),
            Command::Vocabulaire
        );
        assert_eq!(
            Command::parse("/insultes", BOT_NAME).unwrap(),
            Command::Insultes
        );
    }

    #[test]
    fn parses_command_addressed_to_this_bot() {
        assert_eq!(
            Command::parse("/vocabulaire@haddockbot", BOT_NAME).unwrap(),
            Command::Vocabulaire
        );
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(Command::parse("/meteo", BOT_NAME).is_err());
    }

    #[test]
    fn rejects_plain_text() {
        assert!(Command::parse("mille sabords", BOT_NAME).is_err());
    }

    #[test]
    fn descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        for command in ["/start", "/help", "/vocabulaire", "/insultes"] {
            assert!(descriptions.contains(command), "missing {command}");
        }
    }
}
