//! !add_event command handler
//!
//! Asks for a name, then a `MM-DD-YYYY` date (re-asking until it is valid or the
//! user quits), then stores the event.

use crate::bot::BotState;
use crate::chat::{ChatSender, IncomingMessage};
use crate::prompt::{drive, ChatConversation, Commit, Conversation, FlowState};
use crate::types::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

fn format_added(name: &str, date: &str) -> String {
    format!("Added event: {} - {}", name, date)
}

pub async fn handle_add_event(
    sender: Arc<dyn ChatSender>,
    msg: IncomingMessage,
    state: Arc<BotState>,
) -> Result<()> {
    debug!(
        channel = %msg.channel,
        sender_id = msg.author.0,
        "Handling !add_event"
    );

    let conversation = ChatConversation::new(
        sender,
        state.prompts.clone(),
        msg.channel,
        msg.author,
        state.config.prompt_timeout,
    );

    match drive(&conversation, FlowState::add_event()).await? {
        FlowState::Committed(Commit::Add { name, date }) => {
            info!(name = %name, date = %date, "Adding event");
            state.store.add(&name, &date).await?;
            conversation.say(&format_added(&name, &date)).await?;
        }
        other => {
            debug!(end_state = ?other, "add_event ended without a change");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_added() {
        assert_eq!(
            format_added("Gala", "January 5, 2025"),
            "Added event: Gala - January 5, 2025"
        );
    }
}
