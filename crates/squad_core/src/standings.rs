//! League standings table and ranking.
//!
//! Records are edited by hand column by column; `position` is never stored as
//! authoritative and is recomputed by [`rank_standings`] on every read.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Result, SquadError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team_name: String,
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub goals_for: u32,
    #[serde(default)]
    pub goals_against: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub is_home_club: bool,
    /// 1-based rank, derived.
    #[serde(default)]
    pub position: usize,
}

impl TeamRecord {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
            is_home_club: false,
            position: 0,
        }
    }

    pub fn home_club(mut self) -> Self {
        self.is_home_club = true;
        self
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// Points desc, then goal difference desc, then goals for desc.
pub fn compare_records(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Returns a ranked copy of `records` with `position` filled in.
///
/// The sort is stable, so records with identical keys keep their input order.
pub fn rank_standings(records: &[TeamRecord]) -> Vec<TeamRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(compare_records);

    for (index, record) in ranked.iter_mut().enumerate() {
        record.position = index + 1;
    }

    ranked
}

/// Editable column of a [`TeamRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandingStat {
    Played,
    Wins,
    Draws,
    Losses,
    GoalsFor,
    GoalsAgainst,
    Points,
}

impl StandingStat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "played" => Some(StandingStat::Played),
            "wins" => Some(StandingStat::Wins),
            "draws" => Some(StandingStat::Draws),
            "losses" => Some(StandingStat::Losses),
            "goals_for" => Some(StandingStat::GoalsFor),
            "goals_against" => Some(StandingStat::GoalsAgainst),
            "points" => Some(StandingStat::Points),
            _ => None,
        }
    }
}

/// Standings in entry order, as the user maintains them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsTable {
    pub records: Vec<TeamRecord>,
}

impl Default for StandingsTable {
    fn default() -> Self {
        Self { records: default_standings() }
    }
}

impl StandingsTable {
    pub fn new(records: Vec<TeamRecord>) -> Self {
        Self { records }
    }

    pub fn ranked(&self) -> Vec<TeamRecord> {
        rank_standings(&self.records)
    }

    /// Overwrite one column of the record at `index` (entry order).
    pub fn update_stat(&mut self, index: usize, stat: StandingStat, value: u32) -> Result<()> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or_else(|| SquadError::NotFound(format!("standings row {index} (table has {len})")))?;

        let field = match stat {
            StandingStat::Played => &mut record.played,
            StandingStat::Wins => &mut record.wins,
            StandingStat::Draws => &mut record.draws,
            StandingStat::Losses => &mut record.losses,
            StandingStat::GoalsFor => &mut record.goals_for,
            StandingStat::GoalsAgainst => &mut record.goals_against,
            StandingStat::Points => &mut record.points,
        };
        *field = value;

        log::info!("Standings: {} {:?} = {}", record.team_name, stat, value);
        Ok(())
    }

    pub fn find_index(&self, team_name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.team_name == team_name)
    }
}

/// The league as seeded at the start of the season.
pub fn default_standings() -> Vec<TeamRecord> {
    vec![
        TeamRecord::new("FC Aire-le-Lignon 1"),
        TeamRecord::new("FC Onex 1"),
        TeamRecord::new("Meyrin FC 1").home_club(),
        TeamRecord::new("Meyrin FC 2").home_club(),
        TeamRecord::new("CS Interstar 1"),
        TeamRecord::new("FC Champel 1"),
        TeamRecord::new("FC Veyrier Sports 1"),
        TeamRecord::new("FC Plan-les-Ouates 1"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, points: u32, goals_for: u32, goals_against: u32) -> TeamRecord {
        TeamRecord { points, goals_for, goals_against, ..TeamRecord::new(name) }
    }

    #[test]
    fn test_goal_difference_tie_broken_on_goals_for() {
        let records = vec![
            record("gf4", 6, 4, 2),
            record("gf5", 6, 5, 3),
            record("pts4", 4, 9, 1),
        ];

        let ranked = rank_standings(&records);
        let names: Vec<_> = ranked.iter().map(|r| r.team_name.as_str()).collect();

        assert_eq!(names, vec!["gf5", "gf4", "pts4"]);
        assert_eq!(ranked.iter().map(|r| r.position).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_goal_difference_beats_goals_for() {
        let ranked = rank_standings(&[record("a", 3, 10, 9), record("b", 3, 2, 0)]);
        assert_eq!(ranked[0].team_name, "b");
    }

    #[test]
    fn test_identical_records_keep_input_order() {
        let ranked = rank_standings(&default_standings());
        let names: Vec<_> = ranked.iter().map(|r| r.team_name.clone()).collect();
        let original: Vec<_> = default_standings().into_iter().map(|r| r.team_name).collect();
        assert_eq!(names, original);
    }

    #[test]
    fn test_empty_table() {
        assert!(rank_standings(&[]).is_empty());
    }

    #[test]
    fn test_ranking_does_not_touch_input() {
        let records = vec![record("low", 0, 0, 0), record("high", 3, 1, 0)];
        let _ = rank_standings(&records);
        assert_eq!(records[0].team_name, "low");
        assert_eq!(records[0].position, 0);
    }

    #[test]
    fn test_update_stat() {
        let mut table = StandingsTable::default();
        let idx = table.find_index("FC Onex 1").unwrap();
        table.update_stat(idx, StandingStat::Points, 9).unwrap();
        table.update_stat(idx, StandingStat::GoalsFor, 7).unwrap();

        assert_eq!(table.records[idx].points, 9);
        assert_eq!(table.ranked()[0].team_name, "FC Onex 1");

        let err = table.update_stat(99, StandingStat::Wins, 1).unwrap_err();
        assert!(matches!(err, SquadError::NotFound(_)));
    }

    #[test]
    fn test_stat_names() {
        assert_eq!(StandingStat::parse("goals_against"), Some(StandingStat::GoalsAgainst));
        assert_eq!(StandingStat::parse("goalsAgainst"), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_record() -> impl Strategy<Value = TeamRecord> {
            ("[a-z]{1,8}", 0u32..30, 0u32..40, 0u32..40)
                .prop_map(|(name, pts, gf, ga)| record(&name, pts, gf, ga))
        }

        proptest! {
            /// Ranking an already ranked table changes nothing.
            #[test]
            fn prop_ranking_idempotent(records in prop::collection::vec(arb_record(), 0..20)) {
                let once = rank_standings(&records);
                let twice = rank_standings(&once);
                prop_assert_eq!(once, twice);
            }

            /// Adjacent rows are ordered by (points, goal difference, goals for).
            #[test]
            fn prop_order_consistent_with_keys(records in prop::collection::vec(arb_record(), 0..20)) {
                let ranked = rank_standings(&records);
                prop_assert_eq!(ranked.len(), records.len());
                for pair in ranked.windows(2) {
                    let key = |r: &TeamRecord| (r.points, r.goal_difference(), r.goals_for);
                    prop_assert!(key(&pair[0]) >= key(&pair[1]));
                    prop_assert_eq!(pair[1].position, pair[0].position + 1);
                }
            }
        }
    }
}
