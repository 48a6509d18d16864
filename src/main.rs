mod bot;
mod chat;
mod config;
mod prompt;
mod store;
mod telegram;
mod types;

use anyhow::Result;
use bot::{BotState, CommandSet, Router};
use config::Config;
use std::sync::Arc;
use store::EventStore;
use teloxide::prelude::*;
use telegram::{to_incoming, BotIdentity, TelegramSender};
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("event_bot=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
    debug!("Tracing subscriber initialized");

    let run_id = format!("run_{}", uuid::Uuid::new_v4());
    let version = env!("CARGO_PKG_VERSION");
    info!(run_id = %run_id, "event-bot v{}", version);
    debug!(config = %config, "Config loaded from environment");

    let store = EventStore::new(&config.events_path);
    if store.ensure_file().await? {
        info!(path = %store.path().display(), "Created empty event store");
    }

    let bot = Bot::new(&config.telegram_bot_token);
    let identity = BotIdentity::fetch(&bot).await?;
    info!("Logged in as {}", identity.display_name());

    let commands = CommandSet::standard(config.command_prefix);
    let state = Arc::new(BotState::new(store, config));
    let sender = Arc::new(TelegramSender::new(bot.clone()));
    let router = Arc::new(Router::new(commands, state, sender));

    let handler = Update::filter_message().endpoint(move |msg: Message| {
        let router = Arc::clone(&router);
        let identity = identity.clone();
        async move {
            if let Some(incoming) = to_incoming(&msg, &identity) {
                router.accept(incoming);
            }
            respond(())
        }
    });

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build();

    info!("Bot connected. Press Ctrl+C to stop.");
    debug!("Starting Telegram dispatcher loop");

    tokio::select! {
        _ = dispatcher.dispatch() => {
            info!("Dispatcher stopped");
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    info!("Shutdown complete.");
    Ok(())
}
