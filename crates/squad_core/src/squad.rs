//! Club roster aggregate
//!
//! `Squad` owns every collection the club tracks. Callers hold it explicitly
//! and persist it themselves after mutating (see [`crate::store`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::attendance::{compute_attendance, AttendanceRegister, AttendanceSummary};
use crate::error::{Result, SquadError};
use crate::match_sheet::MatchSheet;
use crate::match_stats::MatchStats;
use crate::models::{MatchFixture, Player, Position, Score, TeamSide, TrainingSession};
use crate::rotation::{assign_coach_rotation, CoachAssignments, CoachPair, CoachRoster};
use crate::standings::StandingsTable;
use crate::tactics::Tactic;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub trainings: Vec<TrainingSession>,
    #[serde(default)]
    pub fixtures: Vec<MatchFixture>,
    #[serde(default)]
    pub attendance: AttendanceRegister,
    /// Fixture id -> lineup and tallies.
    #[serde(default)]
    pub match_stats: BTreeMap<String, MatchStats>,
    /// Fixture id -> quarter-by-quarter sheet.
    #[serde(default)]
    pub match_sheets: BTreeMap<String, MatchSheet>,
    #[serde(default)]
    pub tactics: Vec<Tactic>,
    #[serde(default)]
    pub standings: StandingsTable,
    #[serde(default)]
    pub(crate) coach_roster: CoachRoster,
    /// Only pairs the roster accepts; see [`Squad::set_coach_roster`].
    #[serde(default)]
    pub(crate) coach_assignments: CoachAssignments,
}

/// Replace by id or append. Returns true if an existing entry was replaced.
fn upsert<T>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> &str) -> bool {
    let id = id_of(&item).to_string();
    match items.iter().position(|existing| id_of(existing) == id) {
        Some(idx) => {
            items[idx] = item;
            true
        }
        None => {
            items.push(item);
            false
        }
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &str) -> Option<T> {
    let idx = items.iter().position(|item| id_of(item) == id)?;
    Some(items.remove(idx))
}

impl Squad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(coach_roster: CoachRoster) -> Self {
        Self { coach_roster, ..Self::default() }
    }

    // ========================
    // Players
    // ========================

    pub fn upsert_player(&mut self, player: Player) -> bool {
        log::info!("Roster: saving player {} ({})", player.name, player.id);
        upsert(&mut self.players, player, |p| p.id.as_str())
    }

    /// Attendance, stats and tactics keep the id; dangling ids are tolerated.
    pub fn remove_player(&mut self, player_id: &str) -> Option<Player> {
        let removed = remove_by_id(&mut self.players, player_id, |p| p.id.as_str());
        if removed.is_some() {
            log::info!("Roster: removed player {}", player_id);
        }
        removed
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    fn player_mut(&mut self, player_id: &str) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| SquadError::NotFound(format!("player {player_id}")))
    }

    pub fn assign_player_to_team(&mut self, player_id: &str, side: TeamSide) -> Result<()> {
        self.player_mut(player_id)?.teams.insert(side);
        Ok(())
    }

    pub fn assign_player_to_all_teams(&mut self, player_id: &str) -> Result<()> {
        self.player_mut(player_id)?.teams.extend(TeamSide::ALL);
        Ok(())
    }

    pub fn remove_player_from_team(&mut self, player_id: &str, side: TeamSide) -> Result<bool> {
        Ok(self.player_mut(player_id)?.teams.remove(&side))
    }

    pub fn players_of(&self, side: TeamSide) -> Vec<&Player> {
        self.players.iter().filter(|p| p.plays_for(side)).collect()
    }

    pub fn unassigned_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_unassigned()).collect()
    }

    pub fn count_by_position(&self, position: Position) -> usize {
        self.players.iter().filter(|p| p.position == position).count()
    }

    // ========================
    // Trainings & attendance
    // ========================

    pub fn upsert_training(&mut self, session: TrainingSession) -> bool {
        upsert(&mut self.trainings, session, |t| t.id.as_str())
    }

    /// Removing a session also drops its attendance.
    pub fn remove_training(&mut self, session_id: &str) -> Option<TrainingSession> {
        let removed = remove_by_id(&mut self.trainings, session_id, |t| t.id.as_str())?;
        self.attendance.remove_session(session_id);
        log::info!("Trainings: removed session {}", session_id);
        Some(removed)
    }

    pub fn training(&self, session_id: &str) -> Option<&TrainingSession> {
        self.trainings.iter().find(|t| t.id == session_id)
    }

    /// Returns whether the player is now marked present.
    pub fn toggle_attendance(&mut self, session_id: &str, player_id: &str) -> Result<bool> {
        if self.training(session_id).is_none() {
            return Err(SquadError::NotFound(format!("training {session_id}")));
        }
        if self.player(player_id).is_none() {
            return Err(SquadError::NotFound(format!("player {player_id}")));
        }
        Ok(self.attendance.toggle(session_id, player_id))
    }

    pub fn attendance_summary(&self) -> AttendanceSummary {
        compute_attendance(&self.players, &self.trainings, &self.attendance)
    }

    // ========================
    // Fixtures
    // ========================

    pub fn upsert_fixture(&mut self, fixture: MatchFixture) -> bool {
        log::info!("Fixtures: saving {} vs {} on {}", fixture.id, fixture.opponent, fixture.date);
        upsert(&mut self.fixtures, fixture, |f| f.id.as_str())
    }

    /// Drops the fixture along with its coaches, stats and sheet.
    pub fn remove_fixture(&mut self, fixture_id: &str) -> Option<MatchFixture> {
        let removed = remove_by_id(&mut self.fixtures, fixture_id, |f| f.id.as_str())?;
        self.coach_assignments.remove(fixture_id);
        self.match_stats.remove(fixture_id);
        self.match_sheets.remove(fixture_id);
        log::info!("Fixtures: removed {}", fixture_id);
        Some(removed)
    }

    pub fn fixture(&self, fixture_id: &str) -> Option<&MatchFixture> {
        self.fixtures.iter().find(|f| f.id == fixture_id)
    }

    fn fixture_mut(&mut self, fixture_id: &str) -> Result<&mut MatchFixture> {
        self.fixtures
            .iter_mut()
            .find(|f| f.id == fixture_id)
            .ok_or_else(|| SquadError::NotFound(format!("fixture {fixture_id}")))
    }

    pub fn set_fixture_score(&mut self, fixture_id: &str, score: Option<Score>) -> Result<()> {
        self.fixture_mut(fixture_id)?.score = score;
        Ok(())
    }

    pub fn set_fixture_tactic(&mut self, fixture_id: &str, tactic_id: &str) -> Result<()> {
        if self.tactic(tactic_id).is_none() {
            return Err(SquadError::NotFound(format!("tactic {tactic_id}")));
        }
        self.fixture_mut(fixture_id)?.tactic_id = Some(tactic_id.to_string());
        Ok(())
    }

    /// Unplayed side A/B fixtures from `today` on, by kickoff.
    pub fn upcoming_fixtures(&self, today: NaiveDate) -> Vec<&MatchFixture> {
        let mut upcoming: Vec<&MatchFixture> =
            self.fixtures.iter().filter(|f| f.is_upcoming(today)).collect();
        upcoming.sort_by_key(|f| f.kickoff());
        upcoming
    }

    // ========================
    // Coaches
    // ========================

    /// Reassigns coaches over every upcoming fixture, overwriting manual
    /// choices. Returns the number of fixtures assigned.
    pub fn auto_assign_coaches(&mut self, today: NaiveDate) -> Result<usize> {
        let assignments = assign_coach_rotation(self.upcoming_fixtures(today), &self.coach_roster)?;
        let count = assignments.len();
        self.coach_assignments.extend(assignments);

        log::info!("Coaches: rotation assigned to {} fixtures", count);
        Ok(count)
    }

    pub fn assign_coaches_manually(&mut self, fixture_id: &str, pair: CoachPair) -> Result<()> {
        if self.fixture(fixture_id).is_none() {
            return Err(SquadError::NotFound(format!("fixture {fixture_id}")));
        }
        self.coach_roster.validate_pair(&pair)?;

        log::info!("Coaches: {} assigned to {}", pair, fixture_id);
        self.coach_assignments.insert(fixture_id.to_string(), pair);
        Ok(())
    }

    pub fn coaches_for(&self, fixture_id: &str) -> Option<&CoachPair> {
        self.coach_assignments.get(fixture_id)
    }

    pub fn coach_roster(&self) -> &CoachRoster {
        &self.coach_roster
    }

    pub fn coach_assignments(&self) -> &CoachAssignments {
        &self.coach_assignments
    }

    /// Replaces the coaching staff and drops every assignment the new roster
    /// rejects. Returns the number of assignments dropped.
    pub fn set_coach_roster(&mut self, roster: CoachRoster) -> usize {
        if roster != self.coach_roster {
            log::info!("Coaches: roster replaced, forbidden pair {}", roster.forbidden());
            self.coach_roster = roster;
        }
        self.prune_coach_assignments()
    }

    /// Drops assignments for unknown fixtures or pairs the roster rejects.
    pub(crate) fn prune_coach_assignments(&mut self) -> usize {
        let fixture_ids: HashSet<&str> = self.fixtures.iter().map(|f| f.id.as_str()).collect();
        let roster = &self.coach_roster;

        let before = self.coach_assignments.len();
        self.coach_assignments.retain(|fixture_id, pair| {
            fixture_ids.contains(fixture_id.as_str()) && roster.validate_pair(pair).is_ok()
        });
        let dropped = before - self.coach_assignments.len();
        if dropped > 0 {
            log::warn!("Coaches: dropped {} assignments the roster no longer allows", dropped);
        }
        dropped
    }

    // ========================
    // Match stats & sheets
    // ========================

    /// Stats for a fixture, created empty on first access.
    pub fn match_stats_mut(&mut self, fixture_id: &str) -> Result<&mut MatchStats> {
        if self.fixture(fixture_id).is_none() {
            return Err(SquadError::NotFound(format!("fixture {fixture_id}")));
        }
        Ok(self.match_stats.entry(fixture_id.to_string()).or_default())
    }

    /// Sheet for a fixture, created with four empty quarters on first access.
    pub fn match_sheet_mut(&mut self, fixture_id: &str) -> Result<&mut MatchSheet> {
        if self.fixture(fixture_id).is_none() {
            return Err(SquadError::NotFound(format!("fixture {fixture_id}")));
        }
        Ok(self.match_sheets.entry(fixture_id.to_string()).or_default())
    }

    // ========================
    // Tactics
    // ========================

    pub fn upsert_tactic(&mut self, tactic: Tactic) -> bool {
        upsert(&mut self.tactics, tactic, |t| t.id.as_str())
    }

    /// Fixtures that used the tactic lose the reference.
    pub fn remove_tactic(&mut self, tactic_id: &str) -> Option<Tactic> {
        let removed = remove_by_id(&mut self.tactics, tactic_id, |t| t.id.as_str())?;
        for fixture in &mut self.fixtures {
            if fixture.tactic_id.as_deref() == Some(tactic_id) {
                fixture.tactic_id = None;
            }
        }
        Some(removed)
    }

    pub fn tactic(&self, tactic_id: &str) -> Option<&Tactic> {
        self.tactics.iter().find(|t| t.id == tactic_id)
    }
}
