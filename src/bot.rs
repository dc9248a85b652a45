use crate::api::WordApi;
use crate::config::Config;
use crate::error::BotError;
use crate::telegram::commands::Command;
use crate::telegram::handler;
use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt};
use teloxide::dptree;
use teloxide::prelude::*;
use tokio_util::sync::CancellationToken;

pub async fn run_bot(config: Config) -> anyhow::Result<()> {
    let bot = Bot::new(&config.token);

    let me = bot.get_me().await.map_err(BotError::Transport)?;
    tracing::info!(username = me.username(), "Bot account grabbed");

    let api = Arc::new(WordApi::new());
    let cancel_token = CancellationToken::new();

    spawn_signal_handler(cancel_token.clone());

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handler::answer);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![api])
        .error_handler(LoggingErrorHandler::with_custom_text("Command handler error"))
        .enable_ctrlc_handler()
        .build();

    tracing::info!("Bot started. Polling for updates...");

    tokio::select! {
        () = dispatcher.dispatch() => {
            tracing::info!("Telegram dispatcher stopped");
        }
        () = cancel_token.cancelled() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn spawn_signal_handler(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();
        #[cfg(unix)]
        {
            let mut sigterm =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("Failed to register SIGTERM handler");
            tokio::select! {
                () = async { ctrl_c.await.expect("ctrl_c failed"); } => {
                    tracing::info!("Received SIGINT, shutting down...");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, shutting down...");
                }
            }
        }
        #[cfg(not(unix))]
        {
            ctrl_c.await.expect("Failed to register Ctrl+C handler");
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        cancel_token.cancel();
    });
}
