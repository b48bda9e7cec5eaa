//! # Check-in Desk Core Library
//!
//! Business logic of an event check-in desk: attendees register with a name
//! and a team, the desk keeps per-team counts, celebrates milestones and the
//! capacity goal, and persists its state to a local key-value store.
//!
//! Front ends stay thin. They implement [`UiPort`] to render, supply a
//! [`KvStore`], and forward time through [`CheckinDesk::tick`].
//!
//! ## Architecture
//!
//! - **Registry / Tally**: ordered de-duplicated attendees and team counts
//! - **Desk**: validation, commit, classification, persistence, rendering
//! - **Notifications**: generation-tokened message sequences, tick-driven
//! - **Storage**: SQLite key-value store and TOML configuration
//!
//! ## Key Components
//!
//! - [`CheckinDesk`]: check-in orchestrator
//! - [`PersistenceGateway`]: state document load/save
//! - [`NotificationSequencer`]: timed greeting-display stages
//! - [`Config`]: desk configuration

pub mod demo;
pub mod desk;
pub mod error;
pub mod events;
pub mod notify;
pub mod outcome;
pub mod progress;
pub mod registry;
pub mod storage;
pub mod tally;
pub mod team;
pub mod ui;

pub use desk::{CheckinDesk, CheckinReceipt, EventState};
pub use error::{CheckinError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{Message, MessageTone, NotificationSequencer};
pub use outcome::{CheckinOutcome, TeamStatus};
pub use progress::{Progress, ProgressBand};
pub use registry::{Attendee, AttendeeRegistry};
pub use storage::{Config, Database, KvStore, MemoryStore, PersistedState, PersistenceGateway};
pub use tally::TeamTally;
pub use team::{Team, TeamInfo};
pub use ui::{NullUi, RecordingUi, UiPort};
