//! Training attendance register and rates.
//!
//! Rates are kept as exact fractions and only rounded to a whole percentage
//! for display, so averaging over many players or sessions never compounds
//! rounding error.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use crate::models::{Player, TrainingSession};

/// Exact fraction `numerator / denominator`. A zero denominator reads as 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ratio {
    pub numerator: u64,
    pub denominator: u64,
}

impl Ratio {
    pub const ZERO: Ratio = Ratio { numerator: 0, denominator: 0 };

    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self { numerator, denominator }
    }

    fn normalized(&self) -> (u128, u128) {
        if self.denominator == 0 {
            (0, 1)
        } else {
            (u128::from(self.numerator), u128::from(self.denominator))
        }
    }

    pub fn as_f64(&self) -> f64 {
        let (n, d) = self.normalized();
        n as f64 / d as f64
    }

    /// Whole percentage, halves rounded up.
    pub fn percent(&self) -> u64 {
        let (n, d) = self.normalized();
        ((200 * n + d) / (2 * d)) as u64
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ratio {}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let (an, ad) = self.normalized();
        let (bn, bd) = other.normalized();
        (an * bd).cmp(&(bn * ad))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Session id -> ids of the players who attended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceRegister {
    sessions: BTreeMap<String, BTreeSet<String>>,
}

impl AttendanceRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips one player's presence for a session. Returns the new state.
    pub fn toggle(&mut self, session_id: &str, player_id: &str) -> bool {
        let attendees = self.sessions.entry(session_id.to_string()).or_default();
        if attendees.remove(player_id) {
            false
        } else {
            attendees.insert(player_id.to_string());
            true
        }
    }

    pub fn mark_present(&mut self, session_id: &str, player_id: &str) {
        self.sessions.entry(session_id.to_string()).or_default().insert(player_id.to_string());
    }

    pub fn is_present(&self, session_id: &str, player_id: &str) -> bool {
        self.sessions.get(session_id).is_some_and(|a| a.contains(player_id))
    }

    /// Raw count, dangling ids included.
    pub fn count(&self, session_id: &str) -> usize {
        self.sessions.get(session_id).map_or(0, |a| a.len())
    }

    pub fn attendees(&self, session_id: &str) -> impl Iterator<Item = &str> {
        self.sessions.get(session_id).into_iter().flat_map(|a| a.iter().map(String::as_str))
    }

    pub fn session_ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    pub fn remove_session(&mut self, session_id: &str) -> Option<BTreeSet<String>> {
        self.sessions.remove(session_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub per_player: BTreeMap<String, Ratio>,
    pub per_session: BTreeMap<String, Ratio>,
    /// Mean of the per-session ratios.
    pub average: Ratio,
    #[serde(skip)]
    roster_order: Vec<String>,
}

impl AttendanceSummary {
    /// Players by attendance, best first; ties keep roster order.
    pub fn ranked_players(&self) -> Vec<(&str, Ratio)> {
        let mut ranked: Vec<(&str, Ratio)> = self
            .roster_order
            .iter()
            .filter_map(|id| self.per_player.get(id).map(|r| (id.as_str(), *r)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Attendance rates for `players` over `sessions`.
///
/// Only attendees that are on the roster count towards a session's rate;
/// registered sessions missing from `sessions` are ignored.
pub fn compute_attendance(
    players: &[Player],
    sessions: &[TrainingSession],
    register: &AttendanceRegister,
) -> AttendanceSummary {
    let roster: HashSet<&str> = players.iter().map(|p| p.id.as_str()).collect();
    let player_count = players.len() as u64;
    let session_count = sessions.len() as u64;

    let mut attended: BTreeMap<&str, u64> = roster.iter().map(|id| (*id, 0)).collect();
    let mut per_session = BTreeMap::new();
    let mut total_present = 0u64;

    for session in sessions {
        let mut present = 0u64;
        for player_id in register.attendees(&session.id) {
            match attended.get_mut(player_id) {
                Some(count) => {
                    *count += 1;
                    present += 1;
                }
                None => log::debug!(
                    "Attendance: session {} lists unknown player {}",
                    session.id,
                    player_id
                ),
            }
        }
        total_present += present;
        per_session.insert(session.id.clone(), Ratio::new(present, player_count));
    }

    let per_player = attended
        .into_iter()
        .map(|(id, count)| (id.to_string(), Ratio::new(count, session_count)))
        .collect();

    AttendanceSummary {
        per_player,
        per_session,
        average: Ratio::new(total_present, player_count * session_count),
        roster_order: players.iter().map(|p| p.id.clone()).collect(),
    }
}
