// Match sheet: four 20-minute quarters with timed events
use serde::{Deserialize, Serialize};

use crate::error::{Result, SquadError};

pub const QUARTER_COUNT: usize = 4;
pub const QUARTER_MINUTES: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetEventKind {
    Goal,
    Assist,
    #[serde(alias = "yellow")]
    YellowCard,
    #[serde(alias = "red")]
    RedCard,
    #[serde(alias = "sub")]
    Substitution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterEvent {
    /// Minute within the quarter, 1-based.
    pub minute: u8,
    pub kind: SheetEventKind,
    pub player_id: String,
    /// Only meaningful for goals.
    #[serde(default)]
    pub assist_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quarter {
    pub number: u8,
    pub duration_minutes: u8,
    #[serde(default)]
    pub events: Vec<QuarterEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSheet {
    pub quarters: Vec<Quarter>,
    #[serde(default)]
    pub lineup: Vec<String>,
}

impl Default for MatchSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchSheet {
    pub fn new() -> Self {
        let quarters = (1..=QUARTER_COUNT as u8)
            .map(|number| Quarter { number, duration_minutes: QUARTER_MINUTES, events: Vec::new() })
            .collect();
        Self { quarters, lineup: Vec::new() }
    }

    pub fn toggle_lineup(&mut self, player_id: &str) -> bool {
        if let Some(idx) = self.lineup.iter().position(|p| p == player_id) {
            self.lineup.remove(idx);
            false
        } else {
            self.lineup.push(player_id.to_string());
            true
        }
    }

    pub fn add_event(&mut self, quarter: usize, mut event: QuarterEvent) -> Result<()> {
        let q = self.quarter_mut(quarter)?;

        if event.minute < 1 || event.minute > q.duration_minutes {
            return Err(SquadError::InvalidParameter(format!(
                "minute must be between 1 and {}, got {}",
                q.duration_minutes, event.minute
            )));
        }
        if event.player_id.is_empty() {
            return Err(SquadError::InvalidParameter("event needs a player".to_string()));
        }
        if event.kind != SheetEventKind::Goal {
            event.assist_id = None;
        }

        q.events.push(event);
        Ok(())
    }

    pub fn remove_event(&mut self, quarter: usize, index: usize) -> Result<QuarterEvent> {
        let q = self.quarter_mut(quarter)?;
        if index >= q.events.len() {
            return Err(SquadError::NotFound(format!("event {index} in quarter {}", q.number)));
        }
        Ok(q.events.remove(index))
    }

    /// Goals recorded across all quarters.
    pub fn goal_count(&self) -> usize {
        self.events().filter(|e| e.kind == SheetEventKind::Goal).count()
    }

    pub fn events(&self) -> impl Iterator<Item = &QuarterEvent> {
        self.quarters.iter().flat_map(|q| q.events.iter())
    }

    fn quarter_mut(&mut self, quarter: usize) -> Result<&mut Quarter> {
        self.quarters
            .get_mut(quarter)
            .ok_or_else(|| SquadError::InvalidParameter(format!("no quarter at index {quarter}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(minute: u8, kind: SheetEventKind) -> QuarterEvent {
        QuarterEvent { minute, kind, player_id: "p1".to_string(), assist_id: Some("p2".to_string()) }
    }

    #[test]
    fn test_new_sheet_has_four_quarters() {
        let sheet = MatchSheet::new();
        assert_eq!(sheet.quarters.len(), 4);
        assert!(sheet.quarters.iter().all(|q| q.duration_minutes == 20));
        assert_eq!(sheet.quarters[3].number, 4);
    }

    #[test]
    fn test_minute_bounds() {
        let mut sheet = MatchSheet::new();
        assert!(sheet.add_event(0, event(1, SheetEventKind::Goal)).is_ok());
        assert!(sheet.add_event(0, event(20, SheetEventKind::Goal)).is_ok());
        assert!(sheet.add_event(0, event(0, SheetEventKind::Goal)).is_err());
        assert!(sheet.add_event(0, event(21, SheetEventKind::Goal)).is_err());
        assert!(sheet.add_event(4, event(5, SheetEventKind::Goal)).is_err());
        assert_eq!(sheet.goal_count(), 2);
    }

    #[test]
    fn test_assist_only_kept_on_goals() {
        let mut sheet = MatchSheet::new();
        sheet.add_event(1, event(3, SheetEventKind::YellowCard)).unwrap();
        assert_eq!(sheet.quarters[1].events[0].assist_id, None);

        let removed = sheet.remove_event(1, 0).unwrap();
        assert_eq!(removed.kind, SheetEventKind::YellowCard);
        assert!(sheet.remove_event(1, 0).is_err());
    }

    #[test]
    fn test_short_kind_names() {
        let kind: SheetEventKind = serde_json::from_str("\"sub\"").unwrap();
        assert_eq!(kind, SheetEventKind::Substitution);
    }
}
