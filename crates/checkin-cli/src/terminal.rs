//! Terminal rendering of the desk displays.
//!
//! Displays go to stderr so stdout stays machine-readable JSON.

use checkin_core::ui::{attendee_line, EMPTY_LIST_TEXT};
use checkin_core::{Attendee, CheckinError, Message, Progress, Team, TeamStatus, TeamTally, UiPort};

const BAR_WIDTH: usize = 25;

#[derive(Debug, Default)]
pub struct TerminalUi {
    /// Swallow output, e.g. while the desk renders its initial state.
    pub muted: bool,
}

impl TerminalUi {
    pub fn muted() -> Self {
        Self { muted: true }
    }

    fn line(&self, text: &str) {
        if !self.muted {
            eprintln!("{text}");
        }
    }
}

pub fn progress_bar(progress: &Progress) -> String {
    let filled = ((progress.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}] {:.0}% ({})",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.percentage,
        progress.band.label()
    )
}

impl UiPort for TerminalUi {
    fn render_counts(&mut self, total: usize, capacity: usize, tally: &TeamTally) {
        self.line(&format!("Attendance: {total}/{capacity}"));
        for team in Team::ALL {
            self.line(&format!(
                "  {} {:<16} {}",
                team.emoji(),
                team.display_name(),
                tally.get(team)
            ));
        }
    }

    fn render_progress(&mut self, progress: &Progress) {
        self.line(&progress_bar(progress));
    }

    fn render_team_highlight(&mut self, leader: Option<Team>) {
        if let Some(team) = leader {
            self.line(&format!("Leading: {} {}", team.emoji(), team.display_name()));
        }
    }

    fn render_attendee_list(&mut self, attendees: &[Attendee]) {
        if attendees.is_empty() {
            self.line(EMPTY_LIST_TEXT);
        }
        for attendee in attendees {
            self.line(&attendee_line(attendee));
        }
    }

    fn render_message(&mut self, message: &Message) {
        self.line(&format!("» {}", message.text));
    }

    fn alert(&mut self, error: &CheckinError) {
        self.line(&format!("⚠ {error}"));
    }

    fn announce(&mut self, status: &TeamStatus) {
        self.line(&status.announcement());
    }
}
