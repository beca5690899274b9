// Season summary for the club
use serde::Serialize;
use std::collections::BTreeMap;

use crate::attendance::Ratio;
use crate::models::MatchOutcome;
use crate::squad::Squad;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamStats {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub attendance: Ratio,
}

impl TeamStats {
    /// Counts every fixture that has a score.
    pub fn compute(squad: &Squad) -> Self {
        let mut stats = TeamStats {
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            attendance: squad.attendance_summary().average,
        };

        for score in squad.fixtures.iter().filter_map(|f| f.score) {
            stats.played += 1;
            stats.goals_for = stats.goals_for.saturating_add(score.home);
            stats.goals_against = stats.goals_against.saturating_add(score.away);
            match score.outcome() {
                MatchOutcome::Win => stats.wins += 1,
                MatchOutcome::Draw => stats.draws += 1,
                MatchOutcome::Loss => stats.losses += 1,
            }
        }

        stats
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    pub fn attendance_percent(&self) -> u64 {
        self.attendance.percent()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scorer {
    pub player_id: String,
    /// Falls back to the id for players no longer on the roster.
    pub name: String,
    pub goals: u32,
}

/// Goal tallies summed over every fixture, most goals first, then by name.
pub fn top_scorers(squad: &Squad, limit: usize) -> Vec<Scorer> {
    let mut totals: BTreeMap<&str, u32> = BTreeMap::new();
    for tally in squad.match_stats.values().flat_map(|s| s.goals.iter()) {
        let total = totals.entry(tally.player_id.as_str()).or_default();
        *total = total.saturating_add(tally.count);
    }

    let mut scorers: Vec<Scorer> = totals
        .into_iter()
        .filter(|(_, goals)| *goals > 0)
        .map(|(id, goals)| Scorer {
            player_id: id.to_string(),
            name: squad.player(id).map_or_else(|| id.to_string(), |p| p.name.clone()),
            goals,
        })
        .collect();

    scorers.sort_by(|a, b| b.goals.cmp(&a.goals).then_with(|| a.name.cmp(&b.name)));
    scorers.truncate(limit);
    scorers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchFixture, Player, Position, TeamSide, TrainingSession, Venue};
    use chrono::{NaiveDate, NaiveTime};

    fn fixture(id: &str, score: Option<(u32, u32)>) -> MatchFixture {
        let fixture = MatchFixture::new(
            Some(TeamSide::A),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            "Étoile Carouge 1",
            Venue::Home,
        )
        .with_id(id);
        match score {
            Some((home, away)) => fixture.with_score(home, away),
            None => fixture,
        }
    }

    #[test]
    fn test_results_and_goals() {
        let mut squad = Squad::new();
        squad.upsert_fixture(fixture("m1", Some((3, 1))));
        squad.upsert_fixture(fixture("m2", Some((2, 2))));
        squad.upsert_fixture(fixture("m3", Some((0, 4))));
        squad.upsert_fixture(fixture("m4", None));

        let stats = TeamStats::compute(&squad);
        assert_eq!((stats.played, stats.wins, stats.draws, stats.losses), (3, 1, 1, 1));
        assert_eq!((stats.goals_for, stats.goals_against), (5, 7));
        assert_eq!(stats.goal_difference(), -2);
        assert_eq!(stats.attendance_percent(), 0);
    }

    #[test]
    fn test_goal_totals_saturate() {
        let mut squad = Squad::new();
        squad.upsert_fixture(fixture("m1", Some((u32::MAX, 0))));
        squad.upsert_fixture(fixture("m2", Some((u32::MAX, u32::MAX))));

        let stats = TeamStats::compute(&squad);
        assert_eq!((stats.goals_for, stats.goals_against), (u32::MAX, u32::MAX));
        assert_eq!(stats.goal_difference(), 0);
    }

    #[test]
    fn test_attendance_average() {
        let mut squad = Squad::new();
        for id in ["p1", "p2"] {
            squad.upsert_player(Player::new(id, Position::Defender, 2012).with_id(id));
        }
        squad.upsert_training(
            TrainingSession::new(
                NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
                NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                90,
                "Stade des Arbères",
            )
            .with_id("s1"),
        );
        squad.toggle_attendance("s1", "p1").unwrap();

        assert_eq!(TeamStats::compute(&squad).attendance_percent(), 50);
    }

    #[test]
    fn test_top_scorers() {
        let mut squad = Squad::new();
        squad.upsert_player(Player::new("Zoé", Position::Forward, 2011).with_id("p1"));
        squad.upsert_player(Player::new("Adam", Position::Forward, 2011).with_id("p2"));
        squad.upsert_fixture(fixture("m1", Some((4, 0))));
        squad.upsert_fixture(fixture("m2", Some((2, 1))));

        let stats = squad.match_stats_mut("m1").unwrap();
        stats.add_goal("p1");
        stats.add_goal("p1");
        stats.add_goal("p2");
        stats.add_goal("ghost");
        squad.match_stats_mut("m2").unwrap().add_goal("p2");

        let scorers = top_scorers(&squad, 2);
        assert_eq!(scorers.len(), 2);
        assert_eq!((scorers[0].name.as_str(), scorers[0].goals), ("Adam", 2));
        assert_eq!((scorers[1].name.as_str(), scorers[1].goals), ("Zoé", 2));

        let all = top_scorers(&squad, 10);
        assert_eq!(all[2].name, "ghost");

        squad.match_stats_mut("m2").unwrap().set_goal_count(0, u32::MAX).unwrap();
        assert_eq!(top_scorers(&squad, 1)[0].goals, u32::MAX);
    }
}
