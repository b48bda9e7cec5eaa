//! The three competing teams.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the three event teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Water,
    Zero,
    Power,
}

/// Display metadata for a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamInfo {
    pub key: &'static str,
    pub display_name: &'static str,
    pub emoji: &'static str,
}

impl Team {
    /// All teams in tie-break priority order.
    pub const ALL: [Team; 3] = [Team::Water, Team::Zero, Team::Power];

    pub const fn info(self) -> TeamInfo {
        match self {
            Team::Water => TeamInfo {
                key: "water",
                display_name: "Team Water Wise",
                emoji: "🌊",
            },
            Team::Zero => TeamInfo {
                key: "zero",
                display_name: "Team Net Zero",
                emoji: "🌿",
            },
            Team::Power => TeamInfo {
                key: "power",
                display_name: "Team Renewables",
                emoji: "⚡",
            },
        }
    }

    pub const fn key(self) -> &'static str {
        self.info().key
    }

    pub const fn display_name(self) -> &'static str {
        self.info().display_name
    }

    pub const fn emoji(self) -> &'static str {
        self.info().emoji
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Team {
    type Err = ValidationError;

    /// Parses a team key, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingTeam);
        }
        Team::ALL
            .into_iter()
            .find(|team| team.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownTeam(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_case_insensitively() {
        assert_eq!("water".parse::<Team>().unwrap(), Team::Water);
        assert_eq!(" ZERO ".parse::<Team>().unwrap(), Team::Zero);
        assert_eq!("Power".parse::<Team>().unwrap(), Team::Power);
    }

    #[test]
    fn empty_team_is_missing() {
        assert_eq!("  ".parse::<Team>(), Err(ValidationError::MissingTeam));
    }

    #[test]
    fn unknown_team_is_rejected() {
        assert_eq!(
            "fire".parse::<Team>(),
            Err(ValidationError::UnknownTeam("fire".to_string()))
        );
    }

    #[test]
    fn serializes_as_lowercase_key() {
        assert_eq!(serde_json::to_string(&Team::Zero).unwrap(), "\"zero\"");
        let team: Team = serde_json::from_str("\"power\"").unwrap();
        assert_eq!(team, Team::Power);
    }

    #[test]
    fn info_table_covers_every_team() {
        for team in Team::ALL {
            let info = team.info();
            assert_eq!(info.key, team.to_string());
            assert!(info.display_name.starts_with("Team "));
            assert!(!info.emoji.is_empty());
        }
    }
}
