pub mod add_event;
pub mod events;
pub mod help;
pub mod list_events;
pub mod ping;
pub mod remove_event;

pub use add_event::handle_add_event;
pub use events::handle_events;
pub use help::handle_mention;
pub use list_events::handle_list_events;
pub use ping::handle_ping;
pub use remove_event::handle_remove_event;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::BotState;
    use crate::chat::{ChatSender, IncomingMessage};
    use std::sync::Arc;

    #[test]
    fn test_handler_signatures_compile() {
        let _: fn(Arc<dyn ChatSender>, IncomingMessage, Arc<BotState>) -> _ = handle_ping;
        let _: fn(Arc<dyn ChatSender>, IncomingMessage, Arc<BotState>) -> _ = handle_events;
        let _: fn(Arc<dyn ChatSender>, IncomingMessage, Arc<BotState>) -> _ = handle_list_events;
        let _: fn(Arc<dyn ChatSender>, IncomingMessage, Arc<BotState>) -> _ = handle_add_event;
        let _: fn(Arc<dyn ChatSender>, IncomingMessage, Arc<BotState>) -> _ = handle_remove_event;
    }
}
