//! Persistence gateway: check-in state to and from a key-value store.
//!
//! The whole state is one JSON document under one key. Writes overwrite;
//! reads never fail and fall back to the empty state.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::KvStore;
use crate::error::StorageError;
use crate::registry::Attendee;
use crate::tally::TeamTally;

/// Default key the state document is stored under.
pub const DEFAULT_STATE_KEY: &str = "intelEventData";

/// Serialized form of the check-in state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub total_attendees: u32,
    #[serde(default)]
    pub team_counts: TeamTally,
    #[serde(default)]
    pub attendee_list: Vec<Attendee>,
}

impl PersistedState {
    /// Counters agree with the attendee list.
    pub fn is_consistent(&self) -> bool {
        let len = self.attendee_list.len();
        self.total_attendees as usize == len
            && self.team_counts == TeamTally::from_teams(self.attendee_list.iter().map(|a| a.team))
    }

    /// Recount both counters from the attendee list.
    pub fn repaired(mut self) -> Self {
        self.team_counts = TeamTally::from_teams(self.attendee_list.iter().map(|a| a.team));
        self.total_attendees = u32::try_from(self.attendee_list.len()).unwrap_or(u32::MAX);
        self
    }
}

pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: KvStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STATE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Overwrite the stored state.
    ///
    /// # Errors
    /// Returns an error if encoding or the store write fails.
    pub fn save(&mut self, state: &PersistedState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        self.store.set(&self.key, &json)?;
        debug!(
            key = %self.key,
            total = state.total_attendees,
            "check-in state saved"
        );
        Ok(())
    }

    /// Read the stored state, or the empty state if it is absent or unreadable.
    pub fn load(&self) -> PersistedState {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return PersistedState::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read check-in state, starting empty");
                return PersistedState::default();
            }
        };

        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(state) if state.is_consistent() => state,
            Ok(state) => {
                warn!(
                    key = %self.key,
                    stored_total = state.total_attendees,
                    listed = state.attendee_list.len(),
                    "stored counters disagree with attendee list, recounting"
                );
                state.repaired()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "malformed check-in state, starting empty");
                PersistedState::default()
            }
        }
    }

    /// Remove the stored state.
    ///
    /// # Errors
    /// Returns an error if the store delete fails.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}
