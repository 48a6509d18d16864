//! Pending-prompt registry.
//!
//! A flow that asks a question registers a waiter for `(channel, user)` *before*
//! sending the prompt. The session offers every inbound message here first; the
//! first message from that user in that channel resolves the waiter and is not
//! routed further. Waiters are removed when they resolve, time out, or are dropped,
//! so a stale wait can never catch a later message.

use crate::chat::{ChannelId, IncomingMessage, UserId};
use crate::types::error::{EventBotError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, trace};

type PromptKey = (ChannelId, UserId);

struct Waiter {
    ticket: u64,
    reply_tx: oneshot::Sender<String>,
}

#[derive(Clone, Default)]
pub struct PromptRegistry {
    pending: Arc<Mutex<HashMap<PromptKey, Waiter>>>,
    next_ticket: Arc<AtomicU64>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in the next message from `user` in `channel`.
    ///
    /// A newer registration for the same key replaces the older one; the older
    /// [`PendingReply`] then resolves to `PromptCancelled`.
    pub fn expect_reply(&self, channel: ChannelId, user: UserId) -> PendingReply {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, reply_rx) = oneshot::channel();

        let replaced = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((channel, user), Waiter { ticket, reply_tx });
        if replaced.is_some() {
            debug!(channel = %channel, user_id = user.0, "Replaced pending prompt");
        }
        trace!(channel = %channel, user_id = user.0, ticket = ticket, "Prompt registered");

        PendingReply {
            registry: self.clone(),
            key: (channel, user),
            ticket,
            reply_rx: Some(reply_rx),
        }
    }

    /// Hand `msg` to a waiting prompt. Returns true when the message was consumed.
    pub fn offer(&self, msg: &IncomingMessage) -> bool {
        let waiter = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(msg.channel, msg.author));

        match waiter {
            Some(waiter) => {
                let delivered = waiter.reply_tx.send(msg.text.clone()).is_ok();
                debug!(
                    channel = %msg.channel,
                    user_id = msg.author.0,
                    delivered = delivered,
                    "Reply offered to pending prompt"
                );
                delivered
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn release(&self, key: &PromptKey, ticket: u64) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.get(key).is_some_and(|w| w.ticket == ticket) {
            pending.remove(key);
            trace!(ticket = ticket, "Prompt released");
        }
    }
}

/// A registered wait for one reply.
pub struct PendingReply {
    registry: PromptRegistry,
    key: PromptKey,
    ticket: u64,
    reply_rx: Option<oneshot::Receiver<String>>,
}

impl PendingReply {
    /// Wait up to `timeout` for the reply text.
    pub async fn recv(mut self, timeout: Duration) -> Result<String> {
        let reply_rx = self
            .reply_rx
            .take()
            .ok_or_else(|| EventBotError::prompt_cancelled("reply already consumed"))?;

        match tokio::time::timeout(timeout, reply_rx).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(_)) => Err(EventBotError::prompt_cancelled(
                "superseded by a newer prompt",
            )),
            Err(_) => Err(EventBotError::prompt_timeout(timeout)),
        }
        // `self` drops here and releases the registration if it is still ours.
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        self.registry.release(&self.key, self.ticket);
    }
}
