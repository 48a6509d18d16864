mod conversation;
pub mod flow;
mod registry;

pub use conversation::{drive, ChatConversation, Conversation};
pub use flow::{Commit, FlowState};
pub use registry::PromptRegistry;
