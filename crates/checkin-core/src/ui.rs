//! Rendering port.
//!
//! The desk never touches a concrete display. Front ends implement
//! [`UiPort`]; the CLI renders to the terminal, tests record calls.

use crate::error::CheckinError;
use crate::notify::Message;
use crate::outcome::TeamStatus;
use crate::progress::Progress;
use crate::registry::Attendee;
use crate::tally::TeamTally;
use crate::team::Team;

/// Shown in place of an empty attendee list.
pub const EMPTY_LIST_TEXT: &str = "No attendees yet. Be the first to check in!";

pub trait UiPort {
    fn render_counts(&mut self, total: usize, capacity: usize, tally: &TeamTally);

    fn render_progress(&mut self, progress: &Progress);

    /// `None` when nobody has checked in yet.
    fn render_team_highlight(&mut self, leader: Option<Team>);

    fn render_attendee_list(&mut self, attendees: &[Attendee]);

    /// Replace the text of the shared greeting display.
    fn render_message(&mut self, message: &Message);

    /// Blocking notice for a rejected submission.
    fn alert(&mut self, _error: &CheckinError) {}

    /// Team milestone announcement.
    fn announce(&mut self, _status: &TeamStatus) {}
}

/// One attendee list row: `#3 Ada 🌊 Team Water Wise 9:05:03 AM`.
pub fn attendee_line(attendee: &Attendee) -> String {
    format!(
        "#{} {} {} {} {}",
        attendee.attendee_number,
        attendee.name,
        attendee.team.emoji(),
        attendee.team.display_name(),
        attendee.check_in_time
    )
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUi;

impl UiPort for NullUi {
    fn render_counts(&mut self, _total: usize, _capacity: usize, _tally: &TeamTally) {}
    fn render_progress(&mut self, _progress: &Progress) {}
    fn render_team_highlight(&mut self, _leader: Option<Team>) {}
    fn render_attendee_list(&mut self, _attendees: &[Attendee]) {}
    fn render_message(&mut self, _message: &Message) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    Counts { total: usize, capacity: usize, tally: TeamTally },
    Progress(Progress),
    Highlight(Option<Team>),
    AttendeeList(Vec<String>),
    Message(Message),
    Alert(CheckinError),
    Announce(TeamStatus),
}

/// Keeps every call, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingUi {
    pub calls: Vec<UiCall>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&Message> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                UiCall::Message(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages().last().copied()
    }

    pub fn alerts(&self) -> Vec<&CheckinError> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                UiCall::Alert(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    pub fn announcements(&self) -> Vec<&TeamStatus> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                UiCall::Announce(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl UiPort for RecordingUi {
    fn render_counts(&mut self, total: usize, capacity: usize, tally: &TeamTally) {
        self.calls.push(UiCall::Counts {
            total,
            capacity,
            tally: *tally,
        });
    }

    fn render_progress(&mut self, progress: &Progress) {
        self.calls.push(UiCall::Progress(*progress));
    }

    fn render_team_highlight(&mut self, leader: Option<Team>) {
        self.calls.push(UiCall::Highlight(leader));
    }

    fn render_attendee_list(&mut self, attendees: &[Attendee]) {
        self.calls
            .push(UiCall::AttendeeList(attendees.iter().map(attendee_line).collect()));
    }

    fn render_message(&mut self, message: &Message) {
        self.calls.push(UiCall::Message(message.clone()));
    }

    fn alert(&mut self, error: &CheckinError) {
        self.calls.push(UiCall::Alert(error.clone()));
    }

    fn announce(&mut self, status: &TeamStatus) {
        self.calls.push(UiCall::Announce(*status));
    }
}
