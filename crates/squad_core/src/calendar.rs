// League calendar import
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::models::{new_id, MatchFixture, TeamSide, Venue};
use crate::squad::Squad;

/// One league fixture as published by the federation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    #[serde(deserialize_with = "deserialize_kickoff")]
    pub time: NaiveTime,
    pub home: String,
    pub away: String,
    pub match_number: String,
    /// `team1`, `team2`, `ff17`; anything else (including `both` for a
    /// derby between two club sides) imports without a side.
    #[serde(default)]
    pub team: Option<String>,
}

/// Accepts `HH:MM` as well as `HH:MM:SS`.
pub fn parse_kickoff(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

fn deserialize_kickoff<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_kickoff(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid kickoff time: {raw}")))
}

impl CalendarEntry {
    /// Builds a fixture seen from the club; `club_teams` are the club's own
    /// team names as they appear in the calendar.
    pub fn to_fixture(&self, club_teams: &[String]) -> MatchFixture {
        let club_at_home = club_teams.iter().any(|t| *t == self.home);
        let (opponent, venue) = if club_at_home {
            (self.away.clone(), Venue::Home)
        } else {
            (self.home.clone(), Venue::Away)
        };

        MatchFixture {
            id: new_id(),
            team: self.team.as_deref().and_then(TeamSide::parse),
            date: self.date,
            time: self.time,
            opponent,
            venue,
            competition: "Championnat".to_string(),
            score: None,
            match_number: Some(self.match_number.clone()),
            home_team: Some(self.home.clone()),
            away_team: Some(self.away.clone()),
            tactic_id: None,
        }
    }
}

impl Squad {
    /// Adds every entry whose match number is not already known. Returns the
    /// number of fixtures added.
    pub fn import_calendar(&mut self, entries: &[CalendarEntry], club_teams: &[String]) -> usize {
        let mut known: HashSet<String> =
            self.fixtures.iter().filter_map(|f| f.match_number.clone()).collect();

        let mut imported = 0;
        for entry in entries {
            if !known.insert(entry.match_number.clone()) {
                log::debug!("Calendar: match {} already present", entry.match_number);
                continue;
            }
            self.fixtures.push(entry.to_fixture(club_teams));
            imported += 1;
        }

        log::info!("Calendar: imported {} of {} fixtures", imported, entries.len());
        imported
    }
}
