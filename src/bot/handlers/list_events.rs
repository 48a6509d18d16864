//! !list_events command handler

use crate::bot::BotState;
use crate::chat::{ChatSender, IncomingMessage};
use crate::types::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub async fn handle_list_events(
    sender: Arc<dyn ChatSender>,
    msg: IncomingMessage,
    state: Arc<BotState>,
) -> Result<()> {
    debug!(
        channel = %msg.channel,
        sender_id = msg.author.0,
        "Handling !list_events"
    );
    info!(path = %state.store.path().display(), "Listing events");

    let listing = state.store.list().await?;
    debug!(count = listing.len(), "Events retrieved");

    sender.send_text(msg.channel, &listing.render()).await
}
