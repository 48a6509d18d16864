mod commands;
pub mod handlers;
mod router;
mod state;

pub use commands::{CommandKind, CommandSet};
pub use router::Router;
pub use state::BotState;
