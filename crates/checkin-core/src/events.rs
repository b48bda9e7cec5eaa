//! Desk events, serialized as JSON with a `type` tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CheckinError;
use crate::progress::ProgressBand;
use crate::registry::Attendee;
use crate::tally::TeamTally;
use crate::team::Team;

/// Every state change of the desk produces an Event.
/// The CLI prints them as JSON; front ends may log or forward them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CheckedIn {
        attendee: Attendee,
        at: DateTime<Utc>,
    },
    MilestoneReached {
        count: usize,
        name: String,
        team: Team,
        at: DateTime<Utc>,
    },
    GoalReached {
        capacity: usize,
        name: String,
        team: Team,
        leader: Team,
        leader_count: u32,
        at: DateTime<Utc>,
    },
    /// A team got its first member or a multiple of five.
    TeamStatus {
        team: Team,
        count: u32,
        announcement: String,
        at: DateTime<Utc>,
    },
    CheckinRejected {
        reason: String,
        at: DateTime<Utc>,
    },
    StateReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        total_attendees: usize,
        capacity: usize,
        team_counts: TeamTally,
        leader: Option<Team>,
        progress_pct: f64,
        band: ProgressBand,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn rejected(error: &CheckinError) -> Self {
        Event::CheckinRejected {
            reason: error.to_string(),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_carries_the_alert_text() {
        let err = CheckinError::DuplicateName { name: "Ada".into() };
        let json = serde_json::to_value(Event::rejected(&err)).unwrap();
        assert_eq!(json["type"], "CheckinRejected");
        assert_eq!(json["reason"], "Ada has already checked in!");
    }

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::StateReset { at: Utc::now() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "StateReset");

        let back: Event = serde_json::from_value(json).unwrap();
        assert!(matches!(back, Event::StateReset { .. }));
    }
}
