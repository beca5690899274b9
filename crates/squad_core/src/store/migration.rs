use super::error::StoreError;
use super::format::SquadSave;
use super::SAVE_VERSION;
use std::collections::HashSet;

/// Migrate save data from older versions to the current one
pub fn migrate_save(mut save: SquadSave) -> Result<SquadSave, StoreError> {
    let original_version = save.version;

    save = match save.version {
        0 => migrate_v0_to_v1(save),
        SAVE_VERSION => save,
        found => return Err(StoreError::VersionMismatch { found, expected: SAVE_VERSION }),
    };

    save.version = SAVE_VERSION;

    if original_version != SAVE_VERSION {
        save.update_timestamp();
        log::info!("Migrated save from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(save)
}

/// Version 0 never cleaned up after deletions: drop references to fixtures
/// and sessions that no longer exist, and coach pairs the roster rejects.
fn migrate_v0_to_v1(mut save: SquadSave) -> SquadSave {
    log::info!("Migrating save from version 0 to 1");
    let squad = &mut save.squad;

    squad.prune_coach_assignments();

    let fixture_ids: HashSet<String> = squad.fixtures.iter().map(|f| f.id.clone()).collect();
    squad.match_stats.retain(|fixture_id, _| fixture_ids.contains(fixture_id));
    squad.match_sheets.retain(|fixture_id, _| fixture_ids.contains(fixture_id));

    let session_ids: Vec<String> = squad.attendance.session_ids().map(str::to_string).collect();
    for session_id in session_ids {
        if squad.training(&session_id).is_none() {
            log::warn!("Dropped attendance for missing session {}", session_id);
            squad.attendance.remove_session(&session_id);
        }
    }

    let tactic_ids: HashSet<String> = squad.tactics.iter().map(|t| t.id.clone()).collect();
    for fixture in &mut squad.fixtures {
        if fixture.tactic_id.as_ref().is_some_and(|id| !tactic_ids.contains(id)) {
            fixture.tactic_id = None;
        }
    }

    save
}
