pub mod message;
mod sequencer;

pub use message::{Message, MessageTone};
pub use sequencer::NotificationSequencer;
