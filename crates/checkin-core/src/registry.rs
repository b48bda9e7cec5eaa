//! Ordered, de-duplicated list of checked-in attendees.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::CheckinError;
use crate::team::Team;

/// Default event capacity.
pub const DEFAULT_CAPACITY: usize = 50;

/// One check-in record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub name: String,
    pub team: Team,
    /// Local wall-clock time, e.g. `9:05:03 AM`.
    pub check_in_time: String,
    /// Local date, e.g. `10/16/2026`.
    pub check_in_date: String,
    /// 1-based position in check-in order.
    pub attendee_number: u32,
}

impl Attendee {
    pub fn new(name: &str, team: Team, attendee_number: u32, at: DateTime<Local>) -> Self {
        Self {
            name: name.trim().to_string(),
            team,
            check_in_time: at.format("%-I:%M:%S %p").to_string(),
            check_in_date: at.format("%-m/%-d/%Y").to_string(),
            attendee_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeRegistry {
    attendees: Vec<Attendee>,
    capacity: usize,
}

impl AttendeeRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            attendees: Vec::new(),
            capacity,
        }
    }

    /// Wrap an already-recorded list (e.g. loaded from storage).
    pub fn from_attendees(attendees: Vec<Attendee>, capacity: usize) -> Self {
        Self {
            attendees,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn count(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_full(&self) -> bool {
        self.attendees.len() >= self.capacity
    }

    /// Case-insensitive match of `name` (trimmed) against every stored name.
    pub fn is_duplicate(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.attendees
            .iter()
            .any(|a| a.name.to_lowercase() == needle)
    }

    /// Append a new attendee, numbered after the current last one.
    pub fn add(
        &mut self,
        name: &str,
        team: Team,
        at: DateTime<Local>,
    ) -> Result<&Attendee, CheckinError> {
        if self.is_duplicate(name) {
            return Err(CheckinError::DuplicateName {
                name: name.trim().to_string(),
            });
        }
        if self.is_full() {
            return Err(CheckinError::CapacityReached {
                capacity: self.capacity,
            });
        }
        let number = u32::try_from(self.attendees.len() + 1).unwrap_or(u32::MAX);
        self.attendees.push(Attendee::new(name, team, number, at));
        Ok(&self.attendees[self.attendees.len() - 1])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attendee> {
        self.attendees.iter()
    }

    pub fn as_slice(&self) -> &[Attendee] {
        &self.attendees
    }

    pub fn last(&self) -> Option<&Attendee> {
        self.attendees.last()
    }
}

impl Default for AttendeeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
