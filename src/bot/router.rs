//! Command Router
//!
//! Every inbound message goes through [`Router::accept`]:
//! 1. messages from the bot itself are dropped;
//! 2. a reply some prompt is waiting for is handed to that prompt;
//! 3. every message then runs on its own task: mention help first, then command
//!    dispatch on the first token. A prompt reply goes through this step too, so
//!    answering a prompt with `@bot` or a command still gets a response.

use crate::bot::handlers::{
    handle_add_event, handle_events, handle_list_events, handle_mention, handle_ping,
    handle_remove_event,
};
use crate::bot::{BotState, CommandKind, CommandSet};
use crate::chat::{ChatSender, IncomingMessage};
use crate::types::error::{EventBotError, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

/// Sent when a command cannot read or write the event file.
pub const STORAGE_NOTICE: &str = "Could not access the event list.";

pub struct Router {
    commands: CommandSet,
    state: Arc<BotState>,
    sender: Arc<dyn ChatSender>,
}

impl Router {
    pub fn new(commands: CommandSet, state: Arc<BotState>, sender: Arc<dyn ChatSender>) -> Self {
        Self {
            commands,
            state,
            sender,
        }
    }

    /// Take an inbound message from the session.
    ///
    /// Returns the handle of the spawned command task, or `None` when the message
    /// came from the bot itself.
    pub fn accept(self: &Arc<Self>, msg: IncomingMessage) -> Option<JoinHandle<()>> {
        if msg.from_self {
            trace!(channel = %msg.channel, "Ignoring own message");
            return None;
        }

        if self.state.prompts.offer(&msg) {
            trace!(channel = %msg.channel, sender_id = msg.author.0, "Delivered prompt reply");
        }

        let router = Arc::clone(self);
        Some(tokio::spawn(async move { router.process(msg).await }))
    }

    async fn process(&self, msg: IncomingMessage) {
        let channel = msg.channel;
        let sender_id = msg.author.0;

        let Err(e) = self.handle_message(msg).await else {
            return;
        };

        if e.is_user_error() {
            warn!(channel = %channel, sender_id = sender_id, error = %e, "Command ended early");
        } else {
            error!(channel = %channel, sender_id = sender_id, error = ?e, "Error handling message");
        }

        if let Some(notice) = user_notice(&e) {
            if let Err(send_err) = self.sender.send_text(channel, notice).await {
                error!(channel = %channel, error = ?send_err, "Failed to send error notice");
            }
        }
    }

    /// Mention help and command dispatch for one message, run to completion.
    pub async fn handle_message(&self, msg: IncomingMessage) -> Result<()> {
        if msg.from_self {
            return Ok(());
        }

        if msg.mentions_bot {
            handle_mention(Arc::clone(&self.sender), &msg, &self.commands).await?;
        }

        let Some(command) = self.commands.parse(&msg.text) else {
            if msg.text.trim_start().starts_with(self.commands.prefix()) {
                debug!(
                    channel = %msg.channel,
                    token = msg.text.split_whitespace().next().unwrap_or_default(),
                    "Ignoring unknown command"
                );
            }
            return Ok(());
        };

        debug!(
            channel = %msg.channel,
            sender_id = msg.author.0,
            command = command.name,
            "Dispatching command"
        );

        let sender = Arc::clone(&self.sender);
        let state = Arc::clone(&self.state);
        match command.kind {
            CommandKind::Ping => handle_ping(sender, msg, state).await,
            CommandKind::Events => handle_events(sender, msg, state).await,
            CommandKind::ListEvents => handle_list_events(sender, msg, state).await,
            CommandKind::AddEvent => handle_add_event(sender, msg, state).await,
            CommandKind::RemoveEvent => handle_remove_event(sender, msg, state).await,
        }
    }
}

fn user_notice(err: &EventBotError) -> Option<&'static str> {
    match err {
        EventBotError::StorageError { .. } => Some(STORAGE_NOTICE),
        _ => None,
    }
}
