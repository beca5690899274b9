use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the club's squads. A player may belong to several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamSide {
    #[serde(rename = "team1", alias = "A")]
    A,
    #[serde(rename = "team2", alias = "B")]
    B,
    #[serde(rename = "ff17", alias = "C")]
    C,
}

impl TeamSide {
    pub const ALL: [TeamSide; 3] = [TeamSide::A, TeamSide::B, TeamSide::C];

    /// Storage key used for this side.
    pub fn key(&self) -> &'static str {
        match self {
            TeamSide::A => "team1",
            TeamSide::B => "team2",
            TeamSide::C => "ff17",
        }
    }

    /// Accepts either the storage key or the single-letter name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "team1" | "A" | "a" => Some(TeamSide::A),
            "team2" | "B" | "b" => Some(TeamSide::B),
            "ff17" | "C" | "c" => Some(TeamSide::C),
            _ => None,
        }
    }

    /// Sides whose fixtures take part in the coach rotation.
    pub fn is_rotated(&self) -> bool {
        matches!(self, TeamSide::A | TeamSide::B)
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(alias = "Gardien")]
    Goalkeeper,
    #[serde(alias = "Défenseur")]
    Defender,
    #[serde(alias = "Milieu")]
    Midfielder,
    #[serde(alias = "Attaquant")]
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    pub fn label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub birth_year: u16,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub teams: BTreeSet<TeamSide>,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position, birth_year: u16) -> Self {
        Self {
            id: super::new_id(),
            name: name.into(),
            position,
            birth_year,
            phone: None,
            notes: None,
            teams: BTreeSet::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn plays_for(&self, side: TeamSide) -> bool {
        self.teams.contains(&side)
    }

    pub fn is_unassigned(&self) -> bool {
        self.teams.is_empty()
    }

    /// Age reached during `year`.
    pub fn age_in(&self, year: i32) -> i32 {
        year - i32::from(self.birth_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_accepts_storage_key_and_letter() {
        let a: TeamSide = serde_json::from_str("\"team1\"").unwrap();
        let c: TeamSide = serde_json::from_str("\"C\"").unwrap();
        assert_eq!(a, TeamSide::A);
        assert_eq!(c, TeamSide::C);
        assert_eq!(serde_json::to_string(&TeamSide::B).unwrap(), "\"team2\"");
        assert_eq!(TeamSide::parse("ff17"), Some(TeamSide::C));
        assert_eq!(TeamSide::parse("both"), None);
    }

    #[test]
    fn test_position_accepts_french_labels() {
        let p: Position = serde_json::from_str("\"Gardien\"").unwrap();
        assert_eq!(p, Position::Goalkeeper);
    }

    #[test]
    fn test_player_defaults() {
        let json = r#"{"id":"p1","name":"Alice","position":"Milieu","birth_year":2012}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert!(player.is_unassigned());
        assert_eq!(player.age_in(2026), 14);
    }
}
