//! Club configuration
//!
//! Defaults describe the club the tool was first written for. A JSON file
//! named by `SQUAD_CONFIG_PATH` replaces them; `SQUAD_SAVE_DIR` overrides the
//! save directory on top of either.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, SquadError};
use crate::models::TeamSide;
use crate::rotation::{CoachPair, CoachRoster};

pub const CONFIG_PATH_ENV: &str = "SQUAD_CONFIG_PATH";
pub const SAVE_DIR_ENV: &str = "SQUAD_SAVE_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideLabels {
    pub a: String,
    pub b: String,
    pub c: String,
}

impl SideLabels {
    pub fn label(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::A => &self.a,
            TeamSide::B => &self.b,
            TeamSide::C => &self.c,
        }
    }
}

impl Default for SideLabels {
    fn default() -> Self {
        Self { a: "Meyrin 1".to_string(), b: "Meyrin 2".to_string(), c: "FF17".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadConfig {
    pub club_name: String,
    pub side_labels: SideLabels,
    /// Club team names as they appear in league calendars.
    pub club_teams: Vec<String>,
    pub coaches: Vec<String>,
    /// The pair of coaches never scheduled together.
    pub forbidden_pair: CoachPair,
    /// How many upcoming fixtures to list.
    pub upcoming_limit: usize,
    pub save_dir: PathBuf,
}

impl Default for SquadConfig {
    fn default() -> Self {
        let roster = CoachRoster::default();
        Self {
            club_name: "Meyrin FC".to_string(),
            side_labels: SideLabels::default(),
            club_teams: vec!["Meyrin FC 1".to_string(), "Meyrin FC 2".to_string()],
            coaches: roster.coaches().to_vec(),
            forbidden_pair: roster.forbidden().clone(),
            upcoming_limit: 3,
            save_dir: PathBuf::from("saves"),
        }
    }
}

impl SquadConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SquadError::InvalidParameter(format!("config JSON: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.club_name.trim().is_empty() {
            return Err(SquadError::InvalidParameter("club_name is empty".to_string()));
        }
        if self.upcoming_limit == 0 {
            return Err(SquadError::InvalidParameter("upcoming_limit must be positive".to_string()));
        }
        self.coach_roster().map(|_| ())
    }

    pub fn coach_roster(&self) -> Result<CoachRoster> {
        CoachRoster::new(self.coaches.clone(), self.forbidden_pair.clone())
    }

    /// Defaults, or the file named by `SQUAD_CONFIG_PATH`, then the
    /// `SQUAD_SAVE_DIR` override.
    pub fn load_from_env() -> Result<Self> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let path = path.trim();
                let content = fs::read_to_string(path).map_err(|e| {
                    SquadError::InvalidParameter(format!(
                        "failed to read config from {CONFIG_PATH_ENV}='{path}': {e}"
                    ))
                })?;
                let config = Self::from_json(&content)?;
                log::info!("Config: loaded {}", path);
                config
            }
            _ => Self::default(),
        };

        if let Ok(dir) = env::var(SAVE_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.save_dir = PathBuf::from(dir.trim());
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SquadConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.coach_roster().unwrap().rotation().len(), 5);
        assert_eq!(config.side_labels.label(TeamSide::C), "FF17");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SquadConfig::from_json(r#"{"club_name":"FC Test","upcoming_limit":5}"#).unwrap();
        assert_eq!(config.club_name, "FC Test");
        assert_eq!(config.upcoming_limit, 5);
        assert_eq!(config.coaches.len(), 4);
    }

    #[test]
    fn test_invalid_forbidden_pair_rejected() {
        let json = r#"{"coaches":["A","B","C"],"forbidden_pair":{"first":"A","second":"Q"}}"#;
        let config = SquadConfig::from_json(json).unwrap();
        assert!(matches!(config.validate(), Err(SquadError::NotFound(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(SquadConfig::from_json("{not json").is_err());
    }
}
