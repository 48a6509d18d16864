//! !remove_event command handler
//!
//! Shows the current list, asks for the leftmost index, and removes that entry.
//! A non-integer answer is asked again; an integer outside the list ends the
//! command.

use crate::bot::BotState;
use crate::chat::{ChatSender, IncomingMessage};
use crate::prompt::flow::REJECTED_INDEX;
use crate::prompt::{drive, ChatConversation, Commit, Conversation, FlowState};
use crate::types::error::{EventBotError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

fn format_removed(name: &str) -> String {
    format!("Removed event: {}", name)
}

pub async fn handle_remove_event(
    sender: Arc<dyn ChatSender>,
    msg: IncomingMessage,
    state: Arc<BotState>,
) -> Result<()> {
    debug!(
        channel = %msg.channel,
        sender_id = msg.author.0,
        "Handling !remove_event"
    );

    let listing = state.store.list().await?;
    sender.send_text(msg.channel, &listing.render()).await?;

    let Some(start) = FlowState::remove_event(listing.len()) else {
        info!("No events found.");
        return Ok(());
    };

    let conversation = ChatConversation::new(
        sender,
        state.prompts.clone(),
        msg.channel,
        msg.author,
        state.config.prompt_timeout,
    );

    match drive(&conversation, start).await? {
        FlowState::Committed(Commit::Remove { index }) => {
            // The index refers to the list shown above; the store may have
            // changed since then.
            match state.store.remove_by_index(index).await {
                Ok(removed) => {
                    info!(index = index, name = %removed.name, "Removed event");
                    conversation.say(&format_removed(&removed.name)).await?;
                }
                Err(EventBotError::OutOfRange { index, count }) => {
                    warn!(
                        index = index,
                        count = count,
                        "Event list shrank before removal"
                    );
                    conversation.say(REJECTED_INDEX).await?;
                }
                Err(e) => return Err(e),
            }
        }
        other => {
            debug!(end_state = ?other, "remove_event ended without a change");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_removed() {
        assert_eq!(format_removed("Gala"), "Removed event: Gala");
    }
}
