//! Mention handler
//!
//! Mentioning the bot anywhere in a message gets the command list back.
//! The list is generated from the router's command table.

use crate::bot::CommandSet;
use crate::chat::{ChatSender, IncomingMessage};
use crate::types::error::Result;
use std::sync::Arc;
use tracing::debug;

pub async fn handle_mention(
    sender: Arc<dyn ChatSender>,
    msg: &IncomingMessage,
    commands: &CommandSet,
) -> Result<()> {
    debug!(
        channel = %msg.channel,
        sender_id = msg.author.0,
        "Handling mention"
    );

    sender.send_text(msg.channel, &commands.help_text()).await
}
