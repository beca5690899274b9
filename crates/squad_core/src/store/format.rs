use super::error::StoreError;
use super::SAVE_VERSION;
use crate::squad::Squad;
use serde::{Deserialize, Serialize};

use chrono::Utc;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

const CHECKSUM_LEN: usize = 32;

/// Versioned envelope around the roster aggregate
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SquadSave {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    pub squad: Squad,
}

impl SquadSave {
    pub fn new(squad: Squad) -> Self {
        Self { version: SAVE_VERSION, timestamp: current_timestamp(), squad }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let mut player_ids = HashSet::new();
        for player in &self.squad.players {
            if !player_ids.insert(player.id.as_str()) {
                return Err(StoreError::Corrupted(format!("duplicate player id {}", player.id)));
            }
        }

        let mut fixture_ids = HashSet::new();
        for fixture in &self.squad.fixtures {
            if !fixture_ids.insert(fixture.id.as_str()) {
                return Err(StoreError::Corrupted(format!("duplicate fixture id {}", fixture.id)));
            }
        }

        let roster = self.squad.coach_roster();
        for (fixture_id, pair) in self.squad.coach_assignments() {
            if let Err(e) = roster.validate_pair(pair) {
                return Err(StoreError::Corrupted(format!("coaches of {fixture_id}: {e}")));
            }
        }

        Ok(())
    }
}

/// Serialize and compress a save, appending its SHA-256 checksum
pub fn serialize_and_compress(save: &SquadSave) -> Result<Vec<u8>, StoreError> {
    save.validate()?;

    let msgpack = to_vec_named(save).map_err(StoreError::Serialization)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Verify, decompress and deserialize save data
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<SquadSave, StoreError> {
    // size header + checksum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(StoreError::Corrupted(format!("only {} bytes", bytes.len())));
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(StoreError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| StoreError::Decompression)?;
    let save: SquadSave = from_slice(&msgpack).map_err(StoreError::Deserialization)?;

    if save.version > SAVE_VERSION {
        return Err(StoreError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
