//! Telegram side of the bot session: identity, inbound conversion, outbound sends.

use super::format::{split_message, to_telegram_html, TELEGRAM_MAX_MESSAGE_LENGTH};
use crate::chat::{ChannelId, ChatSender, IncomingMessage, UserId};
use crate::types::error::{EventBotError, Result};
use async_trait::async_trait;
use teloxide::adaptors::throttle::Limits;
use teloxide::adaptors::Throttle;
use teloxide::prelude::*;
use teloxide::types::{MessageEntityKind, MessageId, ParseMode, ThreadId};
use tracing::debug;

/// Who the bot is, resolved once at startup with `getMe`.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub user_id: u64,
    pub username: Option<String>,
}

impl BotIdentity {
    pub async fn fetch(bot: &Bot) -> Result<Self> {
        let me = bot
            .get_me()
            .await
            .map_err(|e| EventBotError::chat_error(e.to_string()))?;

        Ok(Self {
            user_id: me.user.id.0,
            username: me.user.username.clone(),
        })
    }

    pub fn display_name(&self) -> String {
        match &self.username {
            Some(username) => format!("@{}", username),
            None => format!("user {}", self.user_id),
        }
    }

    /// True when `mention` (an `@username` entity) names this bot.
    pub fn is_mentioned_as(&self, mention: &str) -> bool {
        let Some(username) = &self.username else {
            return false;
        };
        mention
            .strip_prefix('@')
            .is_some_and(|name| name.eq_ignore_ascii_case(username))
    }
}

fn mentions_bot(msg: &Message, identity: &BotIdentity) -> bool {
    msg.parse_entities()
        .unwrap_or_default()
        .iter()
        .any(|entity| match entity.kind() {
            MessageEntityKind::Mention => identity.is_mentioned_as(entity.text()),
            MessageEntityKind::TextMention { user } => user.id.0 == identity.user_id,
            _ => false,
        })
}

/// Convert a Telegram message into the router's view of it.
///
/// Messages without text or without a sender (channel posts) yield `None`.
pub fn to_incoming(msg: &Message, identity: &BotIdentity) -> Option<IncomingMessage> {
    let text = msg.text()?;
    let author = msg.from.as_ref()?;

    Some(IncomingMessage {
        channel: ChannelId::new(msg.chat.id.0, msg.thread_id.map(|t| t.0 .0)),
        author: UserId(author.id.0),
        text: text.to_string(),
        mentions_bot: mentions_bot(msg, identity),
        from_self: author.id.0 == identity.user_id,
    })
}

/// Sends bot text to Telegram as HTML, splitting long messages.
///
/// Requests go through teloxide's throttle adaptor so a long list split into
/// several messages stays inside Telegram's per-chat rate limits.
pub struct TelegramSender {
    bot: Throttle<Bot>,
}

impl TelegramSender {
    /// Must be called inside a tokio runtime; the throttle worker is spawned here.
    pub fn new(bot: Bot) -> Self {
        Self {
            bot: bot.throttle(Limits::default()),
        }
    }
}

#[async_trait]
impl ChatSender for TelegramSender {
    async fn send_text(&self, channel: ChannelId, text: &str) -> Result<()> {
        for part in split_message(text, TELEGRAM_MAX_MESSAGE_LENGTH) {
            let mut request = self
                .bot
                .send_message(ChatId(channel.chat), to_telegram_html(&part))
                .parse_mode(ParseMode::Html);
            if let Some(thread) = channel.thread {
                request = request.message_thread_id(ThreadId(MessageId(thread)));
            }

            request
                .await
                .map_err(|e| EventBotError::chat_error(e.to_string()))?;
        }

        debug!(channel = %channel, len = text.len(), "Message sent");
        Ok(())
    }
}
