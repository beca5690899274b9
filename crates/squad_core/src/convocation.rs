// Call-up message for a fixture, ready to paste into a team chat
use serde::Serialize;

use crate::config::SideLabels;
use crate::error::{Result, SquadError};
use crate::squad::Squad;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Convocation {
    pub fixture_id: String,
    pub team_label: String,
    /// Names of the called-up players, in roster order.
    pub players: Vec<String>,
    pub message: String,
}

impl Convocation {
    pub fn build(squad: &Squad, labels: &SideLabels, fixture_id: &str) -> Result<Self> {
        let fixture = squad
            .fixture(fixture_id)
            .ok_or_else(|| SquadError::NotFound(format!("fixture {fixture_id}")))?;

        let team_label = fixture.team.map_or("the team", |side| labels.label(side)).to_string();
        let players: Vec<String> = match fixture.team {
            Some(side) => squad.players_of(side).into_iter().map(|p| p.name.clone()).collect(),
            None => Vec::new(),
        };
        let coaches = squad
            .coaches_for(fixture_id)
            .map_or_else(|| "the coaching staff".to_string(), |pair| pair.names().join(" et "));

        let mut message = format!("Convocation {team_label}\n\n");
        message.push_str(&format!("Date: {}\n", fixture.date.format("%A %d.%m.%Y")));
        message.push_str(&format!("Kickoff: {}\n", fixture.time.format("%H:%M")));
        message.push_str(&format!("Competition: {}\n", fixture.competition));
        message.push_str(&format!("{} match\n", fixture.venue.label()));
        message.push_str(&format!("Opponent: {}\n\n", fixture.opponent));
        message.push_str(&format!("Coaches: {coaches}\n\n"));
        message.push_str("Called up:\n");
        for (i, name) in players.iter().enumerate() {
            message.push_str(&format!("{}. {}\n", i + 1, name));
        }
        message.push_str("\nPlease confirm your attendance!");

        Ok(Self { fixture_id: fixture_id.to_string(), team_label, players, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchFixture, Player, Position, TeamSide, Venue};
    use crate::rotation::CoachPair;
    use chrono::{NaiveDate, NaiveTime};

    fn squad() -> Squad {
        let mut squad = Squad::new();
        let mut alice = Player::new("Alice", Position::Defender, 2011).with_id("p1");
        alice.teams.insert(TeamSide::A);
        let mut bea = Player::new("Bea", Position::Forward, 2011).with_id("p2");
        bea.teams.insert(TeamSide::B);
        squad.upsert_player(alice);
        squad.upsert_player(bea);
        squad.upsert_fixture(
            MatchFixture::new(
                Some(TeamSide::A),
                NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                "CS Interstar 1",
                Venue::Away,
            )
            .with_id("m1"),
        );
        squad
    }

    #[test]
    fn test_lists_side_players_and_coaches() {
        let mut squad = squad();
        squad.assign_coaches_manually("m1", CoachPair::new("André", "Lucas")).unwrap();

        let convocation = Convocation::build(&squad, &SideLabels::default(), "m1").unwrap();
        assert_eq!(convocation.team_label, "Meyrin 1");
        assert_eq!(convocation.players, vec!["Alice".to_string()]);
        assert!(convocation.message.contains("Coaches: André et Lucas"));
        assert!(convocation.message.contains("1. Alice"));
        assert!(convocation.message.contains("Kickoff: 09:00"));
        assert!(convocation.message.contains("Away match"));
        assert!(!convocation.message.contains("Bea"));
    }

    #[test]
    fn test_falls_back_without_coaches() {
        let convocation = Convocation::build(&squad(), &SideLabels::default(), "m1").unwrap();
        assert!(convocation.message.contains("Coaches: the coaching staff"));
    }

    #[test]
    fn test_unknown_fixture() {
        let err = Convocation::build(&squad(), &SideLabels::default(), "zz").unwrap_err();
        assert!(matches!(err, SquadError::NotFound(_)));
    }
}
