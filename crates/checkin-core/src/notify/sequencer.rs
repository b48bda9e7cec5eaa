//! Timed message sequences on the shared greeting display.
//!
//! The sequencer is driven from outside: stages are stored
//! with their due time and handed out by `tick()`. There are no threads.
//!
//! Every `start()` opens a new generation. Stages left over from an older
//! generation are dropped when they fall due, so a sequence can never
//! overwrite a newer one.
//!
//! ```text
//! Regular:   success ─4s─> idle
//! Milestone: milestone ─3s─> thanks ─3s─> idle
//! Goal:      goal ─4s─> leader ─4s─> final thanks ─4s─> idle
//! ```

use chrono::{DateTime, Local, TimeDelta};
use tracing::debug;

use super::message::{self, Message};
use crate::outcome::CheckinOutcome;
use crate::storage::NotificationsConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
enum StageContent {
    Show(Message),
    /// Rendered when due, since the greeting depends on the hour.
    IdleGreeting,
}

#[derive(Debug, Clone)]
struct PendingStage {
    generation: u64,
    due: DateTime<Local>,
    content: StageContent,
}

#[derive(Debug, Clone)]
pub struct NotificationSequencer {
    event_name: String,
    timings: NotificationsConfig,
    generation: u64,
    /// Sorted by due time; equal due times keep insertion order.
    pending: Vec<PendingStage>,
}

/// Longest single stage; anything above is clamped.
const MAX_STAGE_SECS: u64 = 86_400;

fn delta(secs: u64) -> TimeDelta {
    TimeDelta::try_seconds(secs.min(MAX_STAGE_SECS) as i64).unwrap_or_else(TimeDelta::zero)
}

impl NotificationSequencer {
    pub fn new(event_name: impl Into<String>, timings: NotificationsConfig) -> Self {
        Self {
            event_name: event_name.into(),
            timings,
            generation: 0,
            pending: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// No stage of the current generation is waiting.
    pub fn is_idle(&self) -> bool {
        !self.pending.iter().any(|s| s.generation == self.generation)
    }

    /// Due time of the earliest waiting stage, stale ones included.
    pub fn next_due(&self) -> Option<DateTime<Local>> {
        self.pending.first().map(|s| s.due)
    }

    pub fn idle_greeting(&self, now: DateTime<Local>) -> Message {
        message::idle_greeting(&self.event_name, now)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the sequence for `outcome` and return its first message,
    /// which should be displayed immediately.
    pub fn start(&mut self, outcome: &CheckinOutcome, now: DateTime<Local>) -> Message {
        self.generation += 1;
        let (first, rest, step) = match outcome {
            CheckinOutcome::Regular { name, team } => (
                message::success(name, *team, &self.event_name),
                vec![],
                self.timings.regular_stage_secs,
            ),
            CheckinOutcome::Milestone { count, name, team } => (
                message::milestone(*count),
                vec![message::personal_thanks(name, *team, *count)],
                self.timings.milestone_stage_secs,
            ),
            CheckinOutcome::GoalReached {
                name,
                team,
                capacity,
                leader,
                leader_count,
            } => (
                message::goal(*capacity),
                vec![
                    message::leader(*leader, *leader_count),
                    message::final_thanks(name, *team),
                ],
                self.timings.goal_stage_secs,
            ),
        };

        let mut due = now;
        for msg in rest {
            due += delta(step);
            self.schedule(due, StageContent::Show(msg));
        }
        self.schedule(due + delta(step), StageContent::IdleGreeting);

        debug!(
            generation = self.generation,
            stages = self.pending.len(),
            "notification sequence started"
        );
        first
    }

    /// Show a single message, reverting to the greeting after `hold_secs`.
    pub fn flash(&mut self, msg: Message, hold_secs: u64, now: DateTime<Local>) -> Message {
        self.generation += 1;
        self.schedule(now + delta(hold_secs), StageContent::IdleGreeting);
        msg
    }

    /// Invalidate every waiting stage without starting a new sequence.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Release every stage due at `now`, oldest first.
    ///
    /// Stages from a superseded generation are discarded.
    pub fn tick(&mut self, now: DateTime<Local>) -> Vec<Message> {
        let split = self.pending.partition_point(|s| s.due <= now);
        let due: Vec<PendingStage> = self.pending.drain(..split).collect();

        let mut shown = Vec::new();
        for stage in due {
            if stage.generation != self.generation {
                debug!(
                    stale = stage.generation,
                    current = self.generation,
                    "dropping superseded notification stage"
                );
                continue;
            }
            shown.push(match stage.content {
                StageContent::Show(msg) => msg,
                StageContent::IdleGreeting => self.idle_greeting(now),
            });
        }
        shown
    }

    fn schedule(&mut self, due: DateTime<Local>, content: StageContent) {
        let at = self.pending.partition_point(|s| s.due <= due);
        self.pending.insert(
            at,
            PendingStage {
                generation: self.generation,
                due,
                content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MessageTone;
    use crate::tally::TeamTally;
    use crate::team::Team;
    use chrono::TimeZone;

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap()
    }

    fn secs(s: i64) -> TimeDelta {
        TimeDelta::try_seconds(s).unwrap()
    }

    fn sequencer() -> NotificationSequencer {
        NotificationSequencer::new("Intel Sustainability Summit", NotificationsConfig::default())
    }

    fn regular(name: &str) -> CheckinOutcome {
        CheckinOutcome::Regular {
            name: name.into(),
            team: Team::Water,
        }
    }

    fn goal() -> CheckinOutcome {
        let tally = TeamTally {
            water: 20,
            zero: 20,
            power: 10,
        };
        CheckinOutcome::classify(50, 50, &[10, 25, 40], "Final Winner", Team::Power, &tally)
    }

    #[test]
    fn regular_reverts_after_four_seconds() {
        let mut seq = sequencer();
        let first = seq.start(&regular("Ada"), t0());
        assert_eq!(first.tone, MessageTone::Success);
        assert!(seq.tick(t0() + secs(3)).is_empty());
        let shown = seq.tick(t0() + secs(4));
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].tone, MessageTone::Idle);
        assert!(seq.is_idle());
    }

    #[test]
    fn milestone_runs_two_stages() {
        let mut seq = sequencer();
        let outcome = CheckinOutcome::Milestone {
            count: 10,
            name: "Ada".into(),
            team: Team::Zero,
        };
        let first = seq.start(&outcome, t0());
        assert!(first.text.contains("MILESTONE REACHED"));

        let second = seq.tick(t0() + secs(3));
        assert_eq!(second.len(), 1);
        assert!(second[0].text.contains("You helped us reach 10 attendees"));

        let third = seq.tick(t0() + secs(6));
        assert_eq!(third[0].tone, MessageTone::Idle);
        assert_eq!(seq.next_due(), None);
    }

    #[test]
    fn goal_runs_three_stages_in_order() {
        let mut seq = sequencer();
        let first = seq.start(&goal(), t0());
        assert!(first.text.contains("GOAL REACHED"));

        let leader = seq.tick(t0() + secs(4));
        assert_eq!(
            leader[0].text,
            "🏆 Congratulations Team Water Wise! You lead with 20 attendees! 🏆"
        );
        let farewell = seq.tick(t0() + secs(8));
        assert_eq!(farewell[0].tone, MessageTone::Farewell);
        assert!(farewell[0].text.contains("Final Winner"));
        let idle = seq.tick(t0() + secs(12));
        assert_eq!(idle[0].tone, MessageTone::Idle);
    }

    #[test]
    fn late_tick_releases_all_due_stages_in_order() {
        let mut seq = sequencer();
        seq.start(&goal(), t0());
        let shown = seq.tick(t0() + secs(60));
        let tones: Vec<_> = shown.iter().map(|m| m.tone).collect();
        assert_eq!(
            tones,
            [MessageTone::Leader, MessageTone::Farewell, MessageTone::Idle]
        );
    }

    #[test]
    fn newer_sequence_supersedes_pending_stages() {
        let mut seq = sequencer();
        seq.start(&goal(), t0());
        // Second check-in two seconds later.
        seq.start(&regular("Grace"), t0() + secs(2));

        // Goal's leader stage (t+4) must not overwrite Grace's welcome.
        assert!(seq.tick(t0() + secs(4)).is_empty());
        let shown = seq.tick(t0() + secs(6));
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].tone, MessageTone::Idle);
        assert!(seq.tick(t0() + secs(20)).is_empty());
    }

    #[test]
    fn cancel_drops_everything_pending() {
        let mut seq = sequencer();
        seq.start(&regular("Ada"), t0());
        let before = seq.generation();
        seq.cancel();
        assert!(seq.generation() > before);
        assert!(seq.is_idle());
        assert!(seq.tick(t0() + secs(10)).is_empty());
    }

    #[test]
    fn flash_reverts_after_hold() {
        let mut seq = sequencer();
        let msg = seq.flash(message::test_celebration(), 5, t0());
        assert!(msg.text.contains("TEST CELEBRATION"));
        assert!(seq.tick(t0() + secs(4)).is_empty());
        assert_eq!(seq.tick(t0() + secs(5))[0].tone, MessageTone::Idle);
    }

    #[test]
    fn stage_durations_follow_config() {
        let timings = NotificationsConfig {
            regular_stage_secs: 1,
            ..NotificationsConfig::default()
        };
        let mut seq = NotificationSequencer::new("Expo", timings);
        seq.start(&regular("Ada"), t0());
        assert_eq!(seq.next_due(), Some(t0() + secs(1)));
        assert_eq!(
            seq.tick(t0() + secs(1))[0].text,
            "Good morning! Welcome to the Expo."
        );
    }
}
