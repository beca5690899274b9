use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::player::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Venue {
    #[default]
    #[serde(alias = "Domicile")]
    Home,
    #[serde(alias = "Extérieur")]
    Away,
}

impl Venue {
    pub fn label(&self) -> &'static str {
        match self {
            Venue::Home => "Home",
            Venue::Away => "Away",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

/// Final score of a played fixture.
///
/// `home` is always the club's own goals and `away` the opponent's,
/// whatever the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn outcome(&self) -> MatchOutcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFixture {
    pub id: String,
    /// Club side playing this fixture. League fixtures between two other
    /// clubs carry no side.
    #[serde(default)]
    pub team: Option<TeamSide>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub opponent: String,
    #[serde(default)]
    pub venue: Venue,
    pub competition: String,
    /// `None` until the fixture has been played.
    #[serde(default)]
    pub score: Option<Score>,
    #[serde(default)]
    pub match_number: Option<String>,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    #[serde(default)]
    pub tactic_id: Option<String>,
}

impl MatchFixture {
    pub fn new(
        team: Option<TeamSide>,
        date: NaiveDate,
        time: NaiveTime,
        opponent: impl Into<String>,
        venue: Venue,
    ) -> Self {
        Self {
            id: super::new_id(),
            team,
            date,
            time,
            opponent: opponent.into(),
            venue,
            competition: "Championnat".to_string(),
            score: None,
            match_number: None,
            home_team: None,
            away_team: None,
            tactic_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_score(mut self, home: u32, away: u32) -> Self {
        self.score = Some(Score::new(home, away));
        self
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.score.map(|s| s.outcome())
    }

    pub fn kickoff(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Unplayed, on or after `today`, and played by a rotated side.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today && !self.is_played() && self.team.is_some_and(|t| t.is_rotated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_outcome_from_club_perspective() {
        assert_eq!(Score::new(3, 1).outcome(), MatchOutcome::Win);
        assert_eq!(Score::new(2, 2).outcome(), MatchOutcome::Draw);
        assert_eq!(Score::new(0, 1).outcome(), MatchOutcome::Loss);
    }

    #[test]
    fn test_upcoming_filter() {
        let today = date(2026, 3, 10);
        let fixture = MatchFixture::new(Some(TeamSide::A), date(2026, 3, 14), time(9, 0), "Onex", Venue::Away);
        assert!(fixture.is_upcoming(today));

        let played = fixture.clone().with_score(1, 0);
        assert!(!played.is_upcoming(today));

        let past = MatchFixture::new(Some(TeamSide::B), date(2026, 3, 7), time(9, 0), "Onex", Venue::Home);
        assert!(!past.is_upcoming(today));

        let youth = MatchFixture::new(Some(TeamSide::C), date(2026, 3, 14), time(9, 0), "Onex", Venue::Home);
        assert!(!youth.is_upcoming(today));

        let neutral = MatchFixture::new(None, date(2026, 3, 14), time(9, 0), "Onex", Venue::Home);
        assert!(!neutral.is_upcoming(today));
    }

    #[test]
    fn test_unplayed_fixture_deserializes_without_score() {
        let json = r#"{
            "id": "m1",
            "team": "team2",
            "date": "2026-03-07",
            "time": "08:30:00",
            "opponent": "FC Veyrier Sports 1",
            "venue": "Extérieur",
            "competition": "Championnat"
        }"#;
        let fixture: MatchFixture = serde_json::from_str(json).unwrap();
        assert_eq!(fixture.team, Some(TeamSide::B));
        assert_eq!(fixture.venue, Venue::Away);
        assert!(!fixture.is_played());
        assert_eq!(fixture.outcome(), None);
    }
}
