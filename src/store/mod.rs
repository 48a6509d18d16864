pub mod dates;
mod events;

pub use events::EventStore;
