use crate::config::Config;
use crate::prompt::PromptRegistry;
use crate::store::EventStore;
use std::sync::Arc;

pub struct BotState {
    pub store: Arc<EventStore>,
    pub prompts: PromptRegistry,
    pub config: Arc<Config>,
}

impl BotState {
    pub fn new(store: EventStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            prompts: PromptRegistry::new(),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bot_state_construction() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");
        let config = test_config(&path);

        let state = BotState::new(EventStore::new(&config.events_path), config);

        assert_eq!(state.store.path(), path.as_path());
        assert_eq!(state.config.command_prefix, '!');
        assert_eq!(state.prompts.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_bot_state_config_is_arc() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path().join("events.json"));

        let state = BotState::new(EventStore::new(&config.events_path), config);

        let config_clone = Arc::clone(&state.config);
        assert_eq!(config_clone.prompt_timeout, state.config.prompt_timeout);
    }
}
