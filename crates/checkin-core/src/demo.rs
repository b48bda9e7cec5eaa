//! Manual test entry points.
//!
//! These drive the desk into celebration states without typing fifty names.
//! They are not part of normal check-in flow.

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::info;

use crate::desk::{CheckinDesk, CheckinReceipt};
use crate::error::CoreError;
use crate::notify::{message, Message};
use crate::outcome::CheckinOutcome;
use crate::storage::KvStore;
use crate::team::Team;
use crate::ui::UiPort;

/// How long the forced celebration stays up.
pub const CELEBRATION_HOLD_SECS: u64 = 5;

/// Deterministic generator when `seed` is given, random otherwise.
pub fn demo_rng(seed: Option<u64>) -> Pcg64 {
    Pcg64::seed_from_u64(seed.unwrap_or_else(rand::random))
}

fn test_user(i: usize) -> String {
    format!("Test User {i}")
}

/// Force the celebration text onto the display.
pub fn force_celebration<S: KvStore, U: UiPort>(desk: &mut CheckinDesk<S, U>, now: DateTime<Local>) {
    info!("showing test celebration");
    desk.flash_at(message::test_celebration(), CELEBRATION_HOLD_SECS, now);
}

/// Replace the state with `count` synthetic attendees on random teams.
///
/// # Errors
/// Fails if `count` exceeds the capacity, or if the store cannot be
/// cleared or written.
fn synthesize<S: KvStore, U: UiPort, R: Rng>(
    desk: &mut CheckinDesk<S, U>,
    count: usize,
    rng: &mut R,
    now: DateTime<Local>,
) -> Result<(), CoreError> {
    desk.reset_at(now)?;
    for i in 1..=count {
        let team = *Team::ALL.choose(rng).unwrap_or(&Team::Water);
        desk.seed(&test_user(i), team, now)?;
    }
    desk.save()?;
    desk.refresh_all();
    info!(count, "synthesized test attendees");
    Ok(())
}

/// Reset, synthesize `count` attendees and play the milestone sequence
/// for `count`, credited to the last test user on team water.
///
/// # Errors
/// Fails if `count` is zero or exceeds the capacity, or if the store
/// cannot be cleared.
pub fn simulate_milestone<S: KvStore, U: UiPort, R: Rng>(
    desk: &mut CheckinDesk<S, U>,
    count: usize,
    rng: &mut R,
    now: DateTime<Local>,
) -> Result<Message, CoreError> {
    let capacity = desk.state().capacity();
    if count == 0 || count > capacity {
        return Err(CoreError::Custom(format!(
            "milestone count must be between 1 and {capacity}, got {count}"
        )));
    }
    synthesize(desk, count, rng, now)?;
    let outcome = CheckinOutcome::Milestone {
        count,
        name: test_user(count),
        team: Team::Water,
    };
    Ok(desk.celebrate(&outcome, now))
}

/// Reset, synthesize one attendee short of capacity, then check in
/// "Final Winner" on team water through the normal path.
///
/// # Errors
/// Fails if the store cannot be cleared or the final check-in is rejected.
pub fn simulate_goal<S: KvStore, U: UiPort, R: Rng>(
    desk: &mut CheckinDesk<S, U>,
    rng: &mut R,
    now: DateTime<Local>,
) -> Result<CheckinReceipt, CoreError> {
    let prior = desk.state().capacity().saturating_sub(1);
    synthesize(desk, prior, rng, now)?;
    Ok(desk.check_in_at("Final Winner", "water", now)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::notify::MessageTone;
    use crate::storage::{Config, MemoryStore};
    use crate::ui::RecordingUi;
    use chrono::TimeZone;

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, 19, 0, 0).unwrap()
    }

    fn desk() -> CheckinDesk<MemoryStore, RecordingUi> {
        CheckinDesk::open_at(MemoryStore::new(), RecordingUi::new(), &Config::default(), t0())
    }

    #[test]
    fn celebration_is_displayed() {
        let mut desk = desk();
        force_celebration(&mut desk, t0());
        assert!(desk
            .ui()
            .last_message()
            .unwrap()
            .text
            .contains("TEST CELEBRATION"));
    }

    #[test]
    fn milestone_simulation_replaces_state() {
        let mut desk = desk();
        desk.check_in_at("Someone Else", "power", t0()).unwrap();
        let mut rng = demo_rng(Some(7));

        let msg = simulate_milestone(&mut desk, 25, &mut rng, t0()).unwrap();

        assert_eq!(msg.tone, MessageTone::Milestone);
        assert_eq!(desk.state().total(), 25);
        assert_eq!(desk.state().tally().total(), 25);
        assert!(!desk.state().registry().is_duplicate("Someone Else"));
        assert_eq!(desk.state().registry().last().unwrap().name, "Test User 25");
        assert_eq!(desk.gateway().load().total_attendees, 25);
    }

    #[test]
    fn milestone_simulation_beyond_capacity_fails() {
        let mut desk = desk();
        let mut rng = demo_rng(Some(1));
        assert!(simulate_milestone(&mut desk, 51, &mut rng, t0()).is_err());
        assert!(simulate_milestone(&mut desk, 0, &mut rng, t0()).is_err());
    }

    /// Store that can be cleared but refuses writes.
    struct WriteFailingStore;

    impl KvStore for WriteFailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Locked)
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn milestone_simulation_reports_failed_write() {
        let mut desk =
            CheckinDesk::open_at(WriteFailingStore, RecordingUi::new(), &Config::default(), t0());
        let mut rng = demo_rng(Some(5));

        let err = simulate_milestone(&mut desk, 10, &mut rng, t0()).unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::Locked)));
    }

    #[test]
    fn goal_simulation_fills_the_event() {
        let mut desk = desk();
        let mut rng = demo_rng(Some(42));
        let receipt = simulate_goal(&mut desk, &mut rng, t0()).unwrap();

        assert_eq!(desk.state().total(), 50);
        assert_eq!(receipt.attendee.name, "Final Winner");
        assert_eq!(receipt.attendee.attendee_number, 50);
        assert!(matches!(receipt.outcome, CheckinOutcome::GoalReached { .. }));
        assert_eq!(receipt.message.tone, MessageTone::Celebration);
    }

    #[test]
    fn same_seed_same_teams() {
        let teams = |seed| {
            let mut desk = desk();
            let mut rng = demo_rng(Some(seed));
            simulate_milestone(&mut desk, 10, &mut rng, t0()).unwrap();
            desk.state()
                .registry()
                .iter()
                .map(|a| a.team)
                .collect::<Vec<_>>()
        };
        assert_eq!(teams(3), teams(3));
    }
}
