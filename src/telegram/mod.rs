pub mod format;
mod session;

pub use session::{to_incoming, BotIdentity, TelegramSender};
