//! Platform-neutral chat types.
//!
//! The router and prompt flows only see [`IncomingMessage`] and talk back through
//! [`ChatSender`]; the Telegram session converts to and from these.

use crate::types::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Where a message was posted: a chat, optionally narrowed to a forum topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId {
    pub chat: i64,
    pub thread: Option<i32>,
}

impl ChannelId {
    pub fn new(chat: i64, thread: Option<i32>) -> Self {
        Self { chat, thread }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.thread {
            Some(thread) => write!(f, "{}/{}", self.chat, thread),
            None => write!(f, "{}", self.chat),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

/// An inbound text message.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub channel: ChannelId,
    pub author: UserId,
    pub text: String,
    /// The message references the bot's own identity.
    pub mentions_bot: bool,
    /// The message was authored by the bot itself.
    pub from_self: bool,
}

/// Outbound side of the chat session.
#[async_trait]
pub trait ChatSender: Send + Sync + 'static {
    async fn send_text(&self, channel: ChannelId, text: &str) -> Result<()>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_display() {
        assert_eq!(ChannelId::new(-100123, None).to_string(), "-100123");
        assert_eq!(ChannelId::new(-100123, Some(7)).to_string(), "-100123/7");
    }

    #[test]
    fn test_channels_differ_by_thread() {
        assert_ne!(ChannelId::new(1, None), ChannelId::new(1, Some(2)));
    }
}
