//! Texts shown on the greeting display.

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::team::Team;

/// Styling hint for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTone {
    Idle,
    Success,
    Milestone,
    Celebration,
    Leader,
    Farewell,
}

impl MessageTone {
    /// Text colour the browser widget used for this tone.
    pub fn color(self) -> Option<&'static str> {
        match self {
            MessageTone::Idle => None,
            MessageTone::Success => Some("#10b981"),
            MessageTone::Milestone => Some("#8b5cf6"),
            MessageTone::Celebration => Some("#dc2626"),
            MessageTone::Leader => Some("#059669"),
            MessageTone::Farewell => Some("#7c3aed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub tone: MessageTone,
}

impl Message {
    pub fn new(text: impl Into<String>, tone: MessageTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

pub fn idle_greeting(event_name: &str, now: DateTime<Local>) -> Message {
    let part_of_day = match now.hour() {
        h if h < 12 => "morning",
        h if h < 18 => "afternoon",
        _ => "evening",
    };
    Message::new(
        format!("Good {part_of_day}! Welcome to the {event_name}."),
        MessageTone::Idle,
    )
}

pub fn success(name: &str, team: Team, event_name: &str) -> Message {
    Message::new(
        format!(
            "{} Welcome {name}! You have successfully checked in to {}. Thank you for joining our {}!",
            team.emoji(),
            team.display_name(),
            event_name,
        ),
        MessageTone::Success,
    )
}

pub fn milestone(count: usize) -> Message {
    Message::new(
        format!("🎉 MILESTONE REACHED! We now have {count} attendees! 🎉"),
        MessageTone::Milestone,
    )
}

pub fn personal_thanks(name: &str, team: Team, count: usize) -> Message {
    Message::new(
        format!(
            "{} Welcome {name}! You helped us reach {count} attendees for {}!",
            team.emoji(),
            team.display_name()
        ),
        MessageTone::Success,
    )
}

pub fn goal(capacity: usize) -> Message {
    Message::new(
        format!("🎉🏆 GOAL REACHED! All {capacity} spots filled! 🏆🎉"),
        MessageTone::Celebration,
    )
}

pub fn leader(team: Team, count: u32) -> Message {
    Message::new(
        format!(
            "🏆 Congratulations {}! You lead with {count} attendees! 🏆",
            team.display_name()
        ),
        MessageTone::Leader,
    )
}

pub fn final_thanks(name: &str, team: Team) -> Message {
    Message::new(
        format!(
            "Thank you {name} for completing our event! Welcome to {}!",
            team.display_name()
        ),
        MessageTone::Farewell,
    )
}

pub fn test_celebration() -> Message {
    Message::new("🎉 TEST CELEBRATION MESSAGE! 🎉", MessageTone::Milestone)
}

/// Announcement for a team's first member or every fifth member.
pub fn team_status(team: Team, count: u32) -> String {
    if count == 1 {
        format!("{} now has their first member!", team.display_name())
    } else {
        format!("{} has reached {count} members!", team.display_name())
    }
}
