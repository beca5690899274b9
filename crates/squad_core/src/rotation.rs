//! Coach rotation across upcoming fixtures.
//!
//! The rotation is every 2-combination of the roster in roster order, minus
//! the forbidden pair. Fixture `i` gets `rotation[i % rotation.len()]`, so the
//! result only depends on the fixture order and never on earlier runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SquadError};
use crate::models::MatchFixture;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoachPair {
    pub first: String,
    pub second: String,
}

impl CoachPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self { first: first.into(), second: second.into() }
    }

    pub fn contains(&self, coach: &str) -> bool {
        self.first == coach || self.second == coach
    }

    /// Same two coaches, in either order.
    pub fn same_coaches(&self, other: &CoachPair) -> bool {
        self.contains(&other.first) && self.contains(&other.second)
    }

    pub fn names(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }
}

impl fmt::Display for CoachPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} + {}", self.first, self.second)
    }
}

/// Fixture id -> coaches on duty.
pub type CoachAssignments = BTreeMap<String, CoachPair>;

/// Serialized form of [`CoachRoster`], validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachRosterRepr {
    pub coaches: Vec<String>,
    pub forbidden: CoachPair,
}

/// Coaching staff plus the one pairing that must never be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CoachRosterRepr", into = "CoachRosterRepr")]
pub struct CoachRoster {
    coaches: Vec<String>,
    forbidden: CoachPair,
}

impl TryFrom<CoachRosterRepr> for CoachRoster {
    type Error = SquadError;

    fn try_from(repr: CoachRosterRepr) -> Result<Self> {
        CoachRoster::new(repr.coaches, repr.forbidden)
    }
}

impl From<CoachRoster> for CoachRosterRepr {
    fn from(roster: CoachRoster) -> Self {
        Self { coaches: roster.coaches, forbidden: roster.forbidden }
    }
}

impl Default for CoachRoster {
    fn default() -> Self {
        Self {
            coaches: ["André", "Lucas", "Aristote", "Patrick"].map(String::from).to_vec(),
            // The two assistants.
            forbidden: CoachPair::new("Aristote", "Patrick"),
        }
    }
}

impl CoachRoster {
    pub fn new(coaches: Vec<String>, forbidden: CoachPair) -> Result<Self> {
        for (i, coach) in coaches.iter().enumerate() {
            if coach.trim().is_empty() {
                return Err(SquadError::InvalidParameter("coach name is empty".to_string()));
            }
            if coaches[..i].contains(coach) {
                return Err(SquadError::DuplicateId(coach.clone()));
            }
        }

        if forbidden.first == forbidden.second {
            return Err(SquadError::InvalidParameter(format!(
                "forbidden pair names the same coach twice: {}",
                forbidden.first
            )));
        }
        for name in forbidden.names() {
            if !coaches.iter().any(|c| c == name) {
                return Err(SquadError::NotFound(format!("coach {name}")));
            }
        }

        let roster = Self { coaches, forbidden };
        if roster.rotation().is_empty() {
            return Err(SquadError::InvalidParameter(
                "roster leaves no allowed coach pair".to_string(),
            ));
        }
        Ok(roster)
    }

    pub fn coaches(&self) -> &[String] {
        &self.coaches
    }

    pub fn forbidden(&self) -> &CoachPair {
        &self.forbidden
    }

    pub fn contains(&self, coach: &str) -> bool {
        self.coaches.iter().any(|c| c == coach)
    }

    pub fn is_forbidden(&self, pair: &CoachPair) -> bool {
        pair.same_coaches(&self.forbidden)
    }

    /// All allowed pairs, in roster order.
    pub fn rotation(&self) -> Vec<CoachPair> {
        let mut pairs = Vec::new();
        for (i, first) in self.coaches.iter().enumerate() {
            for second in &self.coaches[i + 1..] {
                let pair = CoachPair::new(first.clone(), second.clone());
                if !self.is_forbidden(&pair) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }

    /// Checks a hand-picked pair against the roster.
    pub fn validate_pair(&self, pair: &CoachPair) -> Result<()> {
        for name in pair.names() {
            if !self.contains(name) {
                return Err(SquadError::NotFound(format!("coach {name}")));
            }
        }
        if pair.first == pair.second {
            return Err(SquadError::InvalidParameter(format!(
                "coach {} listed twice",
                pair.first
            )));
        }
        if self.is_forbidden(pair) {
            return Err(SquadError::ForbiddenPairing {
                first: pair.first.clone(),
                second: pair.second.clone(),
            });
        }
        Ok(())
    }
}

/// Assigns the rotation over `fixtures`, which the caller has already
/// filtered and sorted by kickoff.
///
/// Returns [`SquadError::NothingToAssign`] for an empty list.
pub fn assign_coach_rotation<'a, I>(fixtures: I, roster: &CoachRoster) -> Result<CoachAssignments>
where
    I: IntoIterator<Item = &'a MatchFixture>,
{
    let rotation = roster.rotation();
    let mut assignments = CoachAssignments::new();

    for (i, fixture) in fixtures.into_iter().enumerate() {
        assignments.insert(fixture.id.clone(), rotation[i % rotation.len()].clone());
    }

    if assignments.is_empty() {
        return Err(SquadError::NothingToAssign);
    }
    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TeamSide, Venue};
    use chrono::{Duration, NaiveDate, NaiveTime};

    fn fixtures(count: usize) -> Vec<MatchFixture> {
        let start = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        (0..count)
            .map(|i| {
                MatchFixture::new(
                    Some(TeamSide::A),
                    start + Duration::days(7 * i as i64),
                    NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                    format!("Opponent {i}"),
                    Venue::Home,
                )
                .with_id(format!("f{}", i + 1))
            })
            .collect()
    }

    fn letters() -> CoachRoster {
        CoachRoster::new(
            ["A", "B", "C", "D"].map(String::from).to_vec(),
            CoachPair::new("C", "D"),
        )
        .unwrap()
    }

    #[test]
    fn test_rotation_has_five_pairs() {
        let rotation = CoachRoster::default().rotation();
        assert_eq!(rotation.len(), 5);
        assert!(rotation.iter().all(|p| !(p.contains("Aristote") && p.contains("Patrick"))));
        assert_eq!(rotation[0], CoachPair::new("André", "Lucas"));
    }

    #[test]
    fn test_seven_fixtures_restart_cycle() {
        let list = fixtures(7);
        let assignments = assign_coach_rotation(&list, &letters()).unwrap();

        let sequence: Vec<String> = (1..=7)
            .map(|i| {
                let pair = &assignments[&format!("f{i}")];
                format!("{}{}", pair.first, pair.second)
            })
            .collect();

        assert_eq!(sequence, vec!["AB", "AC", "AD", "BC", "BD", "AB", "AC"]);
    }

    #[test]
    fn test_empty_list_is_nothing_to_assign() {
        let err = assign_coach_rotation(&Vec::<MatchFixture>::new(), &letters()).unwrap_err();
        assert_eq!(err, SquadError::NothingToAssign);
        assert!(err.is_notice());
    }

    #[test]
    fn test_roster_validation() {
        let dup = CoachRoster::new(
            ["A", "A", "B"].map(String::from).to_vec(),
            CoachPair::new("A", "B"),
        );
        assert!(matches!(dup, Err(SquadError::DuplicateId(_))));

        let stranger = CoachRoster::new(
            ["A", "B", "C"].map(String::from).to_vec(),
            CoachPair::new("A", "Z"),
        );
        assert!(matches!(stranger, Err(SquadError::NotFound(_))));

        // Two coaches who may not work together leave nothing to rotate.
        let only_pair = CoachRoster::new(
            ["A", "B"].map(String::from).to_vec(),
            CoachPair::new("B", "A"),
        );
        assert!(matches!(only_pair, Err(SquadError::InvalidParameter(_))));
    }

    #[test]
    fn test_validate_pair() {
        let roster = letters();
        assert!(roster.validate_pair(&CoachPair::new("B", "D")).is_ok());
        assert!(matches!(
            roster.validate_pair(&CoachPair::new("D", "C")),
            Err(SquadError::ForbiddenPairing { .. })
        ));
        assert!(matches!(
            roster.validate_pair(&CoachPair::new("A", "E")),
            Err(SquadError::NotFound(_))
        ));
        assert!(roster.validate_pair(&CoachPair::new("A", "A")).is_err());
    }

    #[test]
    fn test_roster_serde_revalidates() {
        let json = r#"{"coaches":["A","B","C"],"forbidden":{"first":"A","second":"X"}}"#;
        assert!(serde_json::from_str::<CoachRoster>(json).is_err());

        let roster: CoachRoster = serde_json::from_str(&serde_json::to_string(&letters()).unwrap()).unwrap();
        assert_eq!(roster, letters());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_never_forbidden_and_fair(count in 1usize..60) {
                let roster = CoachRoster::default();
                let list = fixtures(count);
                let assignments = assign_coach_rotation(&list, &roster).unwrap();

                prop_assert_eq!(assignments.len(), count);
                prop_assert!(assignments.values().all(|p| !roster.is_forbidden(p)));

                for pair in roster.rotation() {
                    let seen = assignments.values().filter(|p| **p == pair).count();
                    prop_assert!(seen >= count / 5);
                }
            }

            /// Running twice over the same fixtures gives the same mapping.
            #[test]
            fn prop_recompute_is_stable(count in 1usize..30) {
                let roster = CoachRoster::default();
                let list = fixtures(count);
                prop_assert_eq!(
                    assign_coach_rotation(&list, &roster).unwrap(),
                    assign_coach_rotation(&list, &roster).unwrap()
                );
            }
        }
    }
}
