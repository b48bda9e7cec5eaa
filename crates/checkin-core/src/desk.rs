//! Check-in orchestration.
//!
//! [`CheckinDesk`] owns the event state and drives one submission through
//! validation, commit, classification, persistence, display refresh and
//! the notification sequence. It is synchronous; the caller forwards time
//! through [`CheckinDesk::tick`] for the delayed notification stages.
//!
//! ```text
//! submit -> validate -> duplicate? -> full? -> commit -> classify
//!        -> team status -> save -> refresh displays -> notify
//! ```

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CheckinError, StorageError, ValidationError};
use crate::events::Event;
use crate::notify::{Message, NotificationSequencer};
use crate::outcome::{CheckinOutcome, TeamStatus};
use crate::progress::Progress;
use crate::registry::{Attendee, AttendeeRegistry};
use crate::storage::{Config, KvStore, PersistedState, PersistenceGateway};
use crate::tally::TeamTally;
use crate::team::Team;
use crate::ui::UiPort;

/// Registry and tally, mutated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventState {
    registry: AttendeeRegistry,
    tally: TeamTally,
}

impl EventState {
    pub fn new(capacity: usize) -> Self {
        Self {
            registry: AttendeeRegistry::new(capacity),
            tally: TeamTally::new(),
        }
    }

    pub fn from_persisted(state: PersistedState, capacity: usize) -> Self {
        Self {
            tally: state.team_counts,
            registry: AttendeeRegistry::from_attendees(state.attendee_list, capacity),
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            total_attendees: u32::try_from(self.registry.count()).unwrap_or(u32::MAX),
            team_counts: self.tally,
            attendee_list: self.registry.as_slice().to_vec(),
        }
    }

    pub fn registry(&self) -> &AttendeeRegistry {
        &self.registry
    }

    pub fn tally(&self) -> &TeamTally {
        &self.tally
    }

    pub fn total(&self) -> usize {
        self.registry.count()
    }

    pub fn capacity(&self) -> usize {
        self.registry.capacity()
    }

    /// Add the attendee and count them for their team.
    ///
    /// The registry is the only fallible step, so on error neither side has
    /// changed.
    fn commit(
        &mut self,
        name: &str,
        team: Team,
        now: DateTime<Local>,
    ) -> Result<(Attendee, u32), CheckinError> {
        let attendee = self.registry.add(name, team, now)?.clone();
        let team_count = self.tally.increment(team);
        Ok((attendee, team_count))
    }
}

/// Result of a successful check-in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckinReceipt {
    pub attendee: Attendee,
    pub outcome: CheckinOutcome,
    pub team_status: Option<TeamStatus>,
    /// First message of the notification sequence, already displayed.
    pub message: Message,
    /// False when the state could not be written; the check-in still counts.
    pub persisted: bool,
}

impl CheckinReceipt {
    pub fn events(&self) -> Vec<Event> {
        let at = Utc::now();
        let mut events = vec![Event::CheckedIn {
            attendee: self.attendee.clone(),
            at,
        }];
        match &self.outcome {
            CheckinOutcome::Regular { .. } => {}
            CheckinOutcome::Milestone { count, name, team } => {
                events.push(Event::MilestoneReached {
                    count: *count,
                    name: name.clone(),
                    team: *team,
                    at,
                });
            }
            CheckinOutcome::GoalReached {
                name,
                team,
                capacity,
                leader,
                leader_count,
            } => {
                events.push(Event::GoalReached {
                    capacity: *capacity,
                    name: name.clone(),
                    team: *team,
                    leader: *leader,
                    leader_count: *leader_count,
                    at,
                });
            }
        }
        if let Some(status) = &self.team_status {
            events.push(Event::TeamStatus {
                team: status.team,
                count: status.count,
                announcement: status.announcement(),
                at,
            });
        }
        events
    }
}

pub struct CheckinDesk<S, U> {
    state: EventState,
    gateway: PersistenceGateway<S>,
    sequencer: NotificationSequencer,
    milestones: Vec<usize>,
    ui: U,
}

impl<S: KvStore, U: UiPort> CheckinDesk<S, U> {
    /// Load the stored state and render every display.
    pub fn open(store: S, ui: U, config: &Config) -> Self {
        Self::open_at(store, ui, config, Local::now())
    }

    pub fn open_at(store: S, ui: U, config: &Config, now: DateTime<Local>) -> Self {
        let gateway = PersistenceGateway::with_key(store, config.storage.state_key.clone());
        let state = EventState::from_persisted(gateway.load(), config.event.capacity);
        info!(
            total = state.total(),
            capacity = state.capacity(),
            "check-in state loaded"
        );

        let mut desk = Self {
            state,
            gateway,
            sequencer: NotificationSequencer::new(
                config.event.name.clone(),
                config.notifications.clone(),
            ),
            milestones: config.event.milestones.clone(),
            ui,
        };
        let greeting = desk.sequencer.idle_greeting(now);
        desk.ui.render_message(&greeting);
        desk.refresh_all();
        desk
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &EventState {
        &self.state
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.state.total(), self.state.capacity())
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn sequencer(&self) -> &NotificationSequencer {
        &self.sequencer
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn snapshot(&self) -> Event {
        let progress = self.progress();
        Event::StateSnapshot {
            total_attendees: self.state.total(),
            capacity: self.state.capacity(),
            team_counts: *self.state.tally(),
            leader: self.state.tally().highlighted(),
            progress_pct: progress.percentage,
            band: progress.band,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn check_in(&mut self, name: &str, team: &str) -> Result<CheckinReceipt, CheckinError> {
        self.check_in_at(name, team, Local::now())
    }

    /// Process one submission. Rejections are shown through
    /// [`UiPort::alert`] and leave the state untouched.
    pub fn check_in_at(
        &mut self,
        name: &str,
        team: &str,
        now: DateTime<Local>,
    ) -> Result<CheckinReceipt, CheckinError> {
        match self.try_check_in(name, team, now) {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                info!(name = name.trim(), reason = %err, "check-in rejected");
                self.ui.alert(&err);
                Err(err)
            }
        }
    }

    fn try_check_in(
        &mut self,
        name: &str,
        team: &str,
        now: DateTime<Local>,
    ) -> Result<CheckinReceipt, CheckinError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let team: Team = team.parse()?;

        let (attendee, team_count) = self.state.commit(name, team, now)?;
        info!(
            number = attendee.attendee_number,
            name = %attendee.name,
            team = %team,
            time = %attendee.check_in_time,
            "attendee checked in"
        );

        let outcome = CheckinOutcome::classify(
            self.state.total(),
            self.state.capacity(),
            &self.milestones,
            &attendee.name,
            team,
            self.state.tally(),
        );
        let team_status = TeamStatus::for_count(team, team_count);

        let persisted = self.persist();
        self.refresh_all();

        let message = self.sequencer.start(&outcome, now);
        self.ui.render_message(&message);
        if let Some(status) = &team_status {
            info!(team = %status.team, count = status.count, "{}", status.announcement());
            self.ui.announce(status);
        }

        Ok(CheckinReceipt {
            attendee,
            outcome,
            team_status,
            message,
            persisted,
        })
    }

    /// Forward notification stages due at `now` to the display.
    /// Returns how many messages were shown.
    pub fn tick(&mut self, now: DateTime<Local>) -> usize {
        let shown = self.sequencer.tick(now);
        for message in &shown {
            self.ui.render_message(message);
        }
        shown.len()
    }

    /// Re-render counts, progress, highlight and attendee list.
    pub fn refresh_all(&mut self) {
        let tally = *self.state.tally();
        let progress = self.progress();
        self.ui
            .render_counts(self.state.total(), self.state.capacity(), &tally);
        self.ui.render_progress(&progress);
        self.ui.render_team_highlight(tally.highlighted());
        self.ui.render_attendee_list(self.state.registry().as_slice());
    }

    /// Show `message` right away, reverting to the greeting after `hold_secs`.
    pub fn flash_at(&mut self, message: Message, hold_secs: u64, now: DateTime<Local>) {
        let message = self.sequencer.flash(message, hold_secs, now);
        self.ui.render_message(&message);
    }

    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.reset_at(Local::now())
    }

    /// Drop every check-in, in memory and in the store.
    ///
    /// # Errors
    /// Returns an error if the stored state cannot be removed; in-memory
    /// state is reset regardless.
    pub fn reset_at(&mut self, now: DateTime<Local>) -> Result<(), StorageError> {
        let cleared = self.gateway.clear();
        self.state = EventState::new(self.state.capacity());
        self.sequencer.cancel();
        self.refresh_all();
        let greeting = self.sequencer.idle_greeting(now);
        self.ui.render_message(&greeting);
        info!("check-in state reset");
        cleared
    }

    /// Record an attendee without notifications or saving. Used to
    /// synthesize attendees; call [`CheckinDesk::persist`] afterwards.
    pub(crate) fn seed(
        &mut self,
        name: &str,
        team: Team,
        now: DateTime<Local>,
    ) -> Result<Attendee, CheckinError> {
        self.state.commit(name, team, now).map(|(a, _)| a)
    }

    /// Start the notification sequence for `outcome` as if it had just happened.
    pub(crate) fn celebrate(&mut self, outcome: &CheckinOutcome, now: DateTime<Local>) -> Message {
        let message = self.sequencer.start(outcome, now);
        self.ui.render_message(&message);
        message
    }

    /// Write the current state through the gateway.
    ///
    /// # Errors
    /// Returns an error if encoding or the store write fails.
    pub fn save(&mut self) -> Result<(), StorageError> {
        self.gateway.save(&self.state.to_persisted())
    }

    /// Save the current state. A failed write is logged and reported as
    /// `false`; the store is a local cache, not the system of record.
    fn persist(&mut self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save check-in state");
                false
            }
        }
    }
}
