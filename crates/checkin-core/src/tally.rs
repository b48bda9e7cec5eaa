//! Per-team attendance counters.

use serde::{Deserialize, Serialize};

use crate::team::Team;

/// Running per-team counts.
///
/// Serializes as `{"water": n, "zero": n, "power": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTally {
    #[serde(default)]
    pub water: u32,
    #[serde(default)]
    pub zero: u32,
    #[serde(default)]
    pub power: u32,
}

impl TeamTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::Water => self.water,
            Team::Zero => self.zero,
            Team::Power => self.power,
        }
    }

    fn slot_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::Water => &mut self.water,
            Team::Zero => &mut self.zero,
            Team::Power => &mut self.power,
        }
    }

    /// Add one member to `team` and return the team's new count.
    pub fn increment(&mut self, team: Team) -> u32 {
        let slot = self.slot_mut(team);
        *slot = slot.saturating_add(1);
        *slot
    }

    pub fn total(&self) -> u32 {
        self.water + self.zero + self.power
    }

    /// Team with the strictly highest count.
    ///
    /// Water leads by default; a later team only takes over with a strictly
    /// greater count, checked in the order water, zero, power.
    pub fn leader(&self) -> Team {
        let mut leader = Team::Water;
        for team in [Team::Zero, Team::Power] {
            if self.get(team) > self.get(leader) {
                leader = team;
            }
        }
        leader
    }

    /// The leader, if anybody has checked in yet.
    pub fn highlighted(&self) -> Option<Team> {
        let leader = self.leader();
        (self.get(leader) > 0).then_some(leader)
    }

    /// Rebuild counts from a sequence of teams.
    pub fn from_teams(teams: impl IntoIterator<Item = Team>) -> Self {
        let mut tally = Self::new();
        for team in teams {
            tally.increment(team);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(water: u32, zero: u32, power: u32) -> TeamTally {
        TeamTally { water, zero, power }
    }

    #[test]
    fn increment_returns_new_count() {
        let mut t = TeamTally::new();
        assert_eq!(t.increment(Team::Zero), 1);
        assert_eq!(t.increment(Team::Zero), 2);
        assert_eq!(t.get(Team::Zero), 2);
        assert_eq!(t.total(), 2);
    }

    #[test]
    fn leader_defaults_to_water_when_all_equal() {
        assert_eq!(tally(0, 0, 0).leader(), Team::Water);
        assert_eq!(tally(4, 4, 4).leader(), Team::Water);
    }

    #[test]
    fn leader_tie_keeps_earlier_team() {
        assert_eq!(tally(2, 2, 0).leader(), Team::Water);
        assert_eq!(tally(2, 3, 3).leader(), Team::Zero);
    }

    #[test]
    fn leader_takes_strictly_greater() {
        assert_eq!(tally(1, 0, 2).leader(), Team::Power);
        assert_eq!(tally(1, 5, 2).leader(), Team::Zero);
    }

    #[test]
    fn highlight_requires_a_member() {
        assert_eq!(tally(0, 0, 0).highlighted(), None);
        assert_eq!(tally(0, 0, 1).highlighted(), Some(Team::Power));
    }

    #[test]
    fn from_teams_counts_each_entry() {
        let t = TeamTally::from_teams([Team::Water, Team::Power, Team::Water]);
        assert_eq!(t, tally(2, 0, 1));
    }

    #[test]
    fn missing_fields_deserialize_as_zero() {
        let t: TeamTally = serde_json::from_str(r#"{"zero": 3}"#).unwrap();
        assert_eq!(t, tally(0, 3, 0));
    }
}
