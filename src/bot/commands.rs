/// What a command does. The router maps each kind to its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Ping,
    Events,
    ListEvents,
    AddEvent,
    RemoveEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Name as typed after the prefix. Matched exactly, case-sensitive.
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
}

impl CommandDescriptor {
    pub const fn new(name: &'static str, description: &'static str, kind: CommandKind) -> Self {
        Self {
            name,
            description,
            kind,
        }
    }
}

/// Commands the bot answers to, plus the prefix that marks them.
#[derive(Debug, Clone)]
pub struct CommandSet {
    prefix: char,
    commands: Vec<CommandDescriptor>,
}

impl CommandSet {
    pub fn new(prefix: char, commands: Vec<CommandDescriptor>) -> Self {
        Self { prefix, commands }
    }

    /// The bot's full command table.
    pub fn standard(prefix: char) -> Self {
        Self::new(
            prefix,
            vec![
                CommandDescriptor::new("ping", "Test to see if bot is working.", CommandKind::Ping),
                CommandDescriptor::new(
                    "events",
                    "Lists help menu for all events functions.",
                    CommandKind::Events,
                ),
                CommandDescriptor::new(
                    "list_events",
                    "Lists all saved events.",
                    CommandKind::ListEvents,
                ),
                CommandDescriptor::new("add_event", "Add an event.", CommandKind::AddEvent),
                CommandDescriptor::new(
                    "remove_event",
                    "Removes an event.",
                    CommandKind::RemoveEvent,
                ),
            ],
        )
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter()
    }

    /// Resolve the first whitespace-delimited token of `text` to a command.
    ///
    /// Returns `None` when the token lacks the prefix or names no known command.
    pub fn parse(&self, text: &str) -> Option<&CommandDescriptor> {
        let token = text.split_whitespace().next()?;
        let name = token.strip_prefix(self.prefix)?;
        self.iter().find(|command| command.name == name)
    }

    /// Help text sent when the bot is mentioned.
    pub fn help_text(&self) -> String {
        let mut lines = vec!["COMMANDS:".to_string(), "-----".to_string()];
        lines.extend(self.iter().map(|command| {
            format!("`{}{}`: {}", self.prefix, command.name, command.description)
        }));
        lines.join("\n")
    }
}
