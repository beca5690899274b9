//! Small-sided formations and saved tactics.
//!
//! Every formation fields one goalkeeper. Slot ids follow
//! `goalkeeper-0`, `defense-{i}`, `midfield-{i}`, `attack-{i}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SquadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formation {
    #[serde(rename = "3-3-2")]
    F332,
    #[serde(rename = "3-2-3")]
    F323,
    #[serde(rename = "2-4-2")]
    F242,
    #[serde(rename = "2-3-3")]
    F233,
    #[serde(rename = "3-4-1")]
    F341,
    #[serde(rename = "4-2-2")]
    F422,
    #[serde(rename = "2-2-4")]
    F224,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormationTemplate {
    pub defense: u8,
    pub midfield: u8,
    pub attack: u8,
}

impl FormationTemplate {
    pub fn outfield(&self) -> u8 {
        self.defense + self.midfield + self.attack
    }
}

impl Formation {
    pub const ALL: [Formation; 7] = [
        Formation::F332,
        Formation::F323,
        Formation::F242,
        Formation::F233,
        Formation::F341,
        Formation::F422,
        Formation::F224,
    ];

    pub fn template(&self) -> FormationTemplate {
        let (defense, midfield, attack) = match self {
            Formation::F332 => (3, 3, 2),
            Formation::F323 => (3, 2, 3),
            Formation::F242 => (2, 4, 2),
            Formation::F233 => (2, 3, 3),
            Formation::F341 => (3, 4, 1),
            Formation::F422 => (4, 2, 2),
            Formation::F224 => (2, 2, 4),
        };
        FormationTemplate { defense, midfield, attack }
    }

    pub fn name(&self) -> String {
        let t = self.template();
        format!("{}-{}-{}", t.defense, t.midfield, t.attack)
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == s.trim())
    }

    /// Slot ids, goalkeeper first then back to front.
    pub fn slots(&self) -> Vec<String> {
        let t = self.template();
        let mut slots = vec!["goalkeeper-0".to_string()];
        for (line, count) in [("defense", t.defense), ("midfield", t.midfield), ("attack", t.attack)] {
            slots.extend((0..count).map(|i| format!("{line}-{i}")));
        }
        slots
    }

    pub fn has_slot(&self, slot: &str) -> bool {
        self.slots().iter().any(|s| s == slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tactic {
    pub id: String,
    pub name: String,
    pub formation: Formation,
    #[serde(default)]
    pub notes: Option<String>,
    /// Slot id -> player id.
    #[serde(default)]
    pub positions: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl Tactic {
    pub fn new(name: impl Into<String>, formation: Formation) -> Self {
        Self {
            id: crate::models::new_id(),
            name: name.into(),
            formation,
            notes: None,
            positions: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Puts a player in a slot, replacing whoever held it.
    pub fn assign(&mut self, slot: &str, player_id: &str) -> Result<Option<String>> {
        if !self.formation.has_slot(slot) {
            return Err(SquadError::InvalidParameter(format!(
                "formation {} has no slot {slot}",
                self.formation.name()
            )));
        }
        Ok(self.positions.insert(slot.to_string(), player_id.to_string()))
    }

    pub fn clear(&mut self, slot: &str) -> Option<String> {
        self.positions.remove(slot)
    }

    pub fn is_complete(&self) -> bool {
        self.formation.slots().iter().all(|s| self.positions.contains_key(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_formation_fields_eight_outfield_players() {
        for formation in Formation::ALL {
            assert_eq!(formation.template().outfield(), 8, "{}", formation.name());
            assert_eq!(formation.slots().len(), 9);
            assert_eq!(Formation::parse(&formation.name()), Some(formation));
        }
    }

    #[test]
    fn test_serde_uses_dash_names() {
        assert_eq!(serde_json::to_string(&Formation::F341).unwrap(), "\"3-4-1\"");
        let f: Formation = serde_json::from_str("\"2-2-4\"").unwrap();
        assert_eq!(f, Formation::F224);
    }

    #[test]
    fn test_assign_and_clear() {
        let mut tactic = Tactic::new("Pressing", Formation::F341);
        assert_eq!(tactic.assign("attack-0", "p9").unwrap(), None);
        assert_eq!(tactic.assign("attack-0", "p10").unwrap(), Some("p9".to_string()));
        assert!(tactic.assign("attack-1", "p11").is_err());
        assert_eq!(tactic.clear("attack-0"), Some("p10".to_string()));
        assert!(!tactic.is_complete());
    }
}
