// Per-fixture lineup, goal and assist tallies
use serde::{Deserialize, Serialize};

use crate::error::{Result, SquadError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTally {
    pub player_id: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    #[serde(default)]
    pub lineup: Vec<String>,
    #[serde(default)]
    pub goals: Vec<PlayerTally>,
    #[serde(default)]
    pub assists: Vec<PlayerTally>,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or removes a player from the lineup. A removed player also loses
    /// their goals and assists for this match. Returns true if now in the lineup.
    pub fn toggle_lineup(&mut self, player_id: &str) -> bool {
        if let Some(idx) = self.lineup.iter().position(|p| p == player_id) {
            self.lineup.remove(idx);
            self.goals.retain(|g| g.player_id != player_id);
            self.assists.retain(|a| a.player_id != player_id);
            false
        } else {
            self.lineup.push(player_id.to_string());
            true
        }
    }

    pub fn add_goal(&mut self, player_id: &str) {
        bump(&mut self.goals, player_id);
    }

    pub fn add_assist(&mut self, player_id: &str) {
        bump(&mut self.assists, player_id);
    }

    pub fn remove_goal(&mut self, index: usize) -> Result<PlayerTally> {
        take(&mut self.goals, index, "goal")
    }

    pub fn remove_assist(&mut self, index: usize) -> Result<PlayerTally> {
        take(&mut self.assists, index, "assist")
    }

    pub fn set_goal_count(&mut self, index: usize, count: u32) -> Result<()> {
        set_count(&mut self.goals, index, count, "goal")
    }

    pub fn set_assist_count(&mut self, index: usize, count: u32) -> Result<()> {
        set_count(&mut self.assists, index, count, "assist")
    }

    pub fn goals_by(&self, player_id: &str) -> u32 {
        self.goals.iter().filter(|g| g.player_id == player_id).fold(0, |acc, g| acc.saturating_add(g.count))
    }

    pub fn total_goals(&self) -> u32 {
        self.goals.iter().fold(0, |acc, g| acc.saturating_add(g.count))
    }
}

fn bump(tallies: &mut Vec<PlayerTally>, player_id: &str) {
    match tallies.iter_mut().find(|t| t.player_id == player_id) {
        Some(tally) => tally.count = tally.count.saturating_add(1),
        None => tallies.push(PlayerTally { player_id: player_id.to_string(), count: 1 }),
    }
}

fn take(tallies: &mut Vec<PlayerTally>, index: usize, what: &str) -> Result<PlayerTally> {
    if index >= tallies.len() {
        return Err(SquadError::NotFound(format!("{what} entry {index}")));
    }
    Ok(tallies.remove(index))
}

fn set_count(tallies: &mut [PlayerTally], index: usize, count: u32, what: &str) -> Result<()> {
    let tally =
        tallies.get_mut(index).ok_or_else(|| SquadError::NotFound(format!("{what} entry {index}")))?;
    tally.count = count;
    Ok(())
}
