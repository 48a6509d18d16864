//! !ping command handler

use crate::bot::BotState;
use crate::chat::{ChatSender, IncomingMessage};
use crate::types::error::Result;
use std::sync::Arc;
use tracing::debug;

pub const PONG: &str = "Pong!";

pub async fn handle_ping(
    sender: Arc<dyn ChatSender>,
    msg: IncomingMessage,
    _state: Arc<BotState>,
) -> Result<()> {
    debug!(
        channel = %msg.channel,
        sender_id = msg.author.0,
        "Handling !ping"
    );

    sender.send_text(msg.channel, PONG).await
}
