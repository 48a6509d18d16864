//! State machines for the multi-turn `add_event` and `remove_event` commands.
//!
//! Transitions are pure: a state plus a reply (or a timeout) yields the next
//! state and an optional notice for the user. Driving the machine against a
//! real conversation lives in [`super::conversation`].

use crate::store::dates::reformat_event_date;

pub const ASK_NAME: &str = "Name this event?:";
pub const ASK_DATE: &str = "When is the event? `MM-DD-YYYY` or `q` to quit:";
pub const ASK_INDEX: &str = "Which event to delete? Enter the Leftmost number:";

pub const INVALID_DATE: &str = "Invalid input; Please enter date in `MM-DD-YYYY` format.";
pub const INVALID_INDEX: &str = "Invalid input; please input an integer.";
pub const REJECTED_INDEX: &str = "Invalid number; operation aborted.";
pub const ABORTED: &str = "Aborted operation.";
pub const TIMED_OUT: &str = "Timed out waiting for a reply; operation cancelled.";

/// Reply that abandons the add flow at the date prompt.
pub const QUIT: &str = "q";

/// Store mutation a flow settled on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    Add { name: String, date: String },
    Remove { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    AskName,
    AskDate { name: String },
    AskIndex { count: usize },
    Committed(Commit),
    Aborted,
    Rejected,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: FlowState,
    pub notice: Option<&'static str>,
}

impl Transition {
    fn to(next: FlowState) -> Self {
        Self { next, notice: None }
    }

    fn with_notice(next: FlowState, notice: &'static str) -> Self {
        Self {
            next,
            notice: Some(notice),
        }
    }
}

impl FlowState {
    pub fn add_event() -> Self {
        Self::AskName
    }

    /// Start state for removal over a list of `count` events. An empty list has
    /// nothing to ask about.
    pub fn remove_event(count: usize) -> Option<Self> {
        (count > 0).then_some(Self::AskIndex { count })
    }

    /// Prompt for ask-states; `None` for terminal states.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Self::AskName => Some(ASK_NAME),
            Self::AskDate { .. } => Some(ASK_DATE),
            Self::AskIndex { .. } => Some(ASK_INDEX),
            Self::Committed(_) | Self::Aborted | Self::Rejected | Self::TimedOut => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.prompt().is_none()
    }

    pub fn on_reply(self, reply: &str) -> Transition {
        match self {
            Self::AskName => Transition::to(Self::AskDate {
                name: reply.to_string(),
            }),
            Self::AskDate { name } => {
                if reply == QUIT {
                    return Transition::with_notice(Self::Aborted, ABORTED);
                }
                match reformat_event_date(reply) {
                    Some(date) => Transition::to(Self::Committed(Commit::Add { name, date })),
                    None => Transition::with_notice(Self::AskDate { name }, INVALID_DATE),
                }
            }
            Self::AskIndex { count } => match leading_integer(reply) {
                Some(index) if index >= 0 && (index as u64) < count as u64 => Transition::to(
                    Self::Committed(Commit::Remove {
                        index: index as usize,
                    }),
                ),
                Some(_) => Transition::with_notice(Self::Rejected, REJECTED_INDEX),
                None => Transition::with_notice(Self::AskIndex { count }, INVALID_INDEX),
            },
            terminal => Transition::to(terminal),
        }
    }

    pub fn on_timeout(self) -> Transition {
        if self.is_terminal() {
            Transition::to(self)
        } else {
            Transition::with_notice(Self::TimedOut, TIMED_OUT)
        }
    }
}

/// Integer at the start of `reply`, read the way people type numbers in chat:
/// leading whitespace and a sign are allowed and anything after the digits is
/// ignored, so `" 1"`, `"1."` and `"2abc"` all count. `None` when no digit
/// leads the reply. A digit run too long for `i64` saturates, which keeps it
/// out of range instead of turning it into a non-number.
fn leading_integer(reply: &str) -> Option<i64> {
    let trimmed = reply.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }

    let magnitude = unsigned[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
