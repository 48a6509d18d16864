//! !events command handler

use crate::bot::BotState;
use crate::chat::{ChatSender, IncomingMessage};
use crate::types::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Usage for the event sub-commands.
fn format_events_help(prefix: char) -> String {
    format!(
        "`{p}list_events`: Lists all events.\n\
         `{p}add_event`: Add event.\n\
         `{p}remove_event`: Remove event.",
        p = prefix
    )
}

pub async fn handle_events(
    sender: Arc<dyn ChatSender>,
    msg: IncomingMessage,
    state: Arc<BotState>,
) -> Result<()> {
    debug!(
        channel = %msg.channel,
        sender_id = msg.author.0,
        "Handling !events"
    );

    let help_text = format_events_help(state.config.command_prefix);
    sender.send_text(msg.channel, &help_text).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_events_help() {
        let help = format_events_help('!');

        assert_eq!(
            help,
            "`!list_events`: Lists all events.\n`!add_event`: Add event.\n`!remove_event`: Remove event."
        );
    }

    #[test]
    fn test_format_events_help_custom_prefix() {
        let help = format_events_help('?');

        assert!(help.contains("`?add_event`"));
        assert!(!help.contains('!'));
    }
}
