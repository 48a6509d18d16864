use super::flow::FlowState;
use super::registry::PromptRegistry;
use crate::chat::{ChannelId, ChatSender, UserId};
use crate::types::error::{EventBotError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One user's side of a multi-turn exchange.
#[async_trait]
pub trait Conversation: Send + Sync {
    /// Send a message without waiting for anything.
    async fn say(&self, text: &str) -> Result<()>;

    /// Send `prompt` and wait for the user's reply. Fails with `PromptTimeout`
    /// when no reply arrives in time.
    async fn ask(&self, prompt: &str) -> Result<String>;
}

/// Conversation with the user who invoked a command, in the channel they used.
pub struct ChatConversation {
    sender: Arc<dyn ChatSender>,
    prompts: PromptRegistry,
    channel: ChannelId,
    user: UserId,
    timeout: Duration,
}

impl ChatConversation {
    pub fn new(
        sender: Arc<dyn ChatSender>,
        prompts: PromptRegistry,
        channel: ChannelId,
        user: UserId,
        timeout: Duration,
    ) -> Self {
        Self {
            sender,
            prompts,
            channel,
            user,
            timeout,
        }
    }
}

#[async_trait]
impl Conversation for ChatConversation {
    async fn say(&self, text: &str) -> Result<()> {
        self.sender.send_text(self.channel, text).await
    }

    async fn ask(&self, prompt: &str) -> Result<String> {
        // Register first so a fast reply cannot slip past the wait.
        let pending = self.prompts.expect_reply(self.channel, self.user);
        self.sender.send_text(self.channel, prompt).await?;
        pending.recv(self.timeout).await
    }
}

/// Run a flow until it reaches a terminal state.
///
/// Notices produced by transitions are sent as they happen. A timeout moves the
/// flow to `TimedOut`; any other error ends the flow and is returned.
pub async fn drive(conversation: &dyn Conversation, start: FlowState) -> Result<FlowState> {
    let mut state = start;

    while let Some(prompt) = state.prompt() {
        let transition = match conversation.ask(prompt).await {
            Ok(reply) => state.on_reply(&reply),
            Err(EventBotError::PromptTimeout { timeout }) => {
                debug!(timeout_ms = timeout.as_millis() as u64, "Prompt timed out");
                state.on_timeout()
            }
            Err(e) => return Err(e),
        };

        if let Some(notice) = transition.notice {
            conversation.say(notice).await?;
        }
        state = transition.next;
    }

    Ok(state)
}

#[cfg(test)]
mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Conversation that answers prompts from a script. An exhausted script
    /// behaves like a timeout.
    pub struct ScriptedConversation {
        replies: Mutex<VecDeque<String>>,
        transcript: Mutex<Vec<String>>,
    }

    impl ScriptedConversation {
        pub fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                transcript: Mutex::new(Vec::new()),
            }
        }

        pub fn transcript(&self) -> Vec<String> {
            self.transcript.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Conversation for ScriptedConversation {
        async fn say(&self, text: &str) -> Result<()> {
            self.transcript.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn ask(&self, prompt: &str) -> Result<String> {
            self.transcript.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| EventBotError::prompt_timeout(Duration::from_secs(60)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedConversation;
    use super::*;
    use crate::chat::testing::{message, RecordingSender};
    use crate::prompt::flow::{
        Commit, ABORTED, ASK_DATE, ASK_INDEX, ASK_NAME, INVALID_DATE, INVALID_INDEX,
        REJECTED_INDEX, TIMED_OUT,
    };

    #[tokio::test]
    async fn test_add_flow_with_retry() {
        let conversation =
            ScriptedConversation::new(&["Gala", "2025-01-05", "02-30-2025", "01-05-2025"]);

        let end = drive(&conversation, FlowState::add_event()).await.unwrap();

        assert_eq!(
            end,
            FlowState::Committed(Commit::Add {
                name: "Gala".to_string(),
                date: "January 5, 2025".to_string(),
            })
        );
        assert_eq!(
            conversation.transcript(),
            vec![
                ASK_NAME,
                ASK_DATE,
                INVALID_DATE,
                ASK_DATE,
                INVALID_DATE,
                ASK_DATE
            ]
        );
    }

    #[tokio::test]
    async fn test_add_flow_quit() {
        let conversation = ScriptedConversation::new(&["Gala", "q"]);

        let end = drive(&conversation, FlowState::add_event()).await.unwrap();

        assert_eq!(end, FlowState::Aborted);
        assert_eq!(conversation.transcript(), vec![ASK_NAME, ASK_DATE, ABORTED]);
    }

    #[tokio::test]
    async fn test_add_flow_timeout() {
        let conversation = ScriptedConversation::new(&["Gala"]);

        let end = drive(&conversation, FlowState::add_event()).await.unwrap();

        assert_eq!(end, FlowState::TimedOut);
        assert_eq!(conversation.transcript(), vec![ASK_NAME, ASK_DATE, TIMED_OUT]);
    }

    #[tokio::test]
    async fn test_remove_flow_retry_then_reject() {
        let conversation = ScriptedConversation::new(&["first", "5"]);

        let start = FlowState::remove_event(2).unwrap();
        let end = drive(&conversation, start).await.unwrap();

        assert_eq!(end, FlowState::Rejected);
        assert_eq!(
            conversation.transcript(),
            vec![ASK_INDEX, INVALID_INDEX, ASK_INDEX, REJECTED_INDEX]
        );
    }

    #[tokio::test]
    async fn test_chat_conversation_round_trip() {
        let sender = Arc::new(RecordingSender::new());
        let prompts = PromptRegistry::new();
        let channel = ChannelId::new(-100, Some(4));
        let conversation = ChatConversation::new(
            sender.clone(),
            prompts.clone(),
            channel,
            UserId(7),
            Duration::from_secs(2),
        );

        let answer = tokio::spawn({
            let prompts = prompts.clone();
            let sender = sender.clone();
            async move {
                sender.wait_for(1).await;
                assert!(prompts.offer(&message(channel, 7, "Gala")));
            }
        });

        let reply = conversation.ask(ASK_NAME).await.unwrap();
        answer.await.unwrap();

        assert_eq!(reply, "Gala");
        assert_eq!(sender.sent(), vec![(channel, ASK_NAME.to_string())]);
    }

    #[tokio::test]
    async fn test_chat_conversation_timeout() {
        let sender = Arc::new(RecordingSender::new());
        let prompts = PromptRegistry::new();
        let conversation = ChatConversation::new(
            sender.clone(),
            prompts.clone(),
            ChannelId::new(-100, None),
            UserId(7),
            Duration::from_millis(20),
        );

        let err = conversation.ask(ASK_NAME).await.unwrap_err();

        assert!(matches!(err, EventBotError::PromptTimeout { .. }));
        assert_eq!(prompts.pending_count(), 0);
    }
}
