//! Classification of a committed check-in.

use serde::{Deserialize, Serialize};

use crate::tally::TeamTally;
use crate::team::Team;

/// Which celebration a check-in earns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckinOutcome {
    Regular {
        name: String,
        team: Team,
    },
    Milestone {
        count: usize,
        name: String,
        team: Team,
    },
    GoalReached {
        name: String,
        team: Team,
        capacity: usize,
        leader: Team,
        leader_count: u32,
    },
}

impl CheckinOutcome {
    /// Classify the check-in that brought the event to `total` attendees.
    ///
    /// Goal beats milestone beats regular.
    pub fn classify(
        total: usize,
        capacity: usize,
        milestones: &[usize],
        name: &str,
        team: Team,
        tally: &TeamTally,
    ) -> Self {
        let name = name.to_string();
        if total == capacity {
            let leader = tally.leader();
            CheckinOutcome::GoalReached {
                name,
                team,
                capacity,
                leader,
                leader_count: tally.get(leader),
            }
        } else if milestones.contains(&total) {
            CheckinOutcome::Milestone {
                count: total,
                name,
                team,
            }
        } else {
            CheckinOutcome::Regular { name, team }
        }
    }
}

/// Secondary announcement when a team gets its first or every fifth member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatus {
    pub team: Team,
    pub count: u32,
}

impl TeamStatus {
    pub fn for_count(team: Team, count: u32) -> Option<Self> {
        (count == 1 || (count > 0 && count % 5 == 0)).then_some(Self { team, count })
    }

    pub fn announcement(&self) -> String {
        crate::notify::message::team_status(self.team, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILESTONES: [usize; 3] = [10, 25, 40];

    fn classify(total: usize) -> CheckinOutcome {
        let tally = TeamTally {
            water: 3,
            zero: 5,
            power: 2,
        };
        CheckinOutcome::classify(total, 50, &MILESTONES, "Ada", Team::Power, &tally)
    }

    #[test]
    fn tenth_is_a_milestone() {
        assert_eq!(
            classify(10),
            CheckinOutcome::Milestone {
                count: 10,
                name: "Ada".into(),
                team: Team::Power
            }
        );
    }

    #[test]
    fn fiftieth_reaches_the_goal_with_leader() {
        assert_eq!(
            classify(50),
            CheckinOutcome::GoalReached {
                name: "Ada".into(),
                team: Team::Power,
                capacity: 50,
                leader: Team::Zero,
                leader_count: 5,
            }
        );
    }

    #[test]
    fn twelfth_is_regular() {
        assert!(matches!(classify(12), CheckinOutcome::Regular { .. }));
        assert!(matches!(classify(49), CheckinOutcome::Regular { .. }));
    }

    #[test]
    fn goal_wins_over_a_milestone_at_the_same_count() {
        let outcome =
            CheckinOutcome::classify(10, 10, &[10], "Ada", Team::Water, &TeamTally::new());
        assert!(matches!(outcome, CheckinOutcome::GoalReached { .. }));
    }

    #[test]
    fn team_status_fires_on_first_and_every_fifth() {
        for count in [1, 5, 10, 15, 50] {
            assert!(TeamStatus::for_count(Team::Zero, count).is_some(), "{count}");
        }
        for count in [0, 2, 3, 4, 6, 7, 11] {
            assert!(TeamStatus::for_count(Team::Zero, count).is_none(), "{count}");
        }
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let json = serde_json::to_value(classify(25)).unwrap();
        assert_eq!(json["kind"], "milestone");
        assert_eq!(json["count"], 25);
    }
}
