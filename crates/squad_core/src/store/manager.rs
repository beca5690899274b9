use super::error::StoreError;
use super::format::{decompress_and_deserialize, serialize_and_compress, SquadSave};
use super::migration::migrate_save;
use crate::squad::Squad;

use std::fs::{create_dir_all, remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const SAVE_FILE: &str = "squad.dat";

/// File-backed store for one club's roster.
#[derive(Debug, Clone)]
pub struct SquadStore {
    dir: PathBuf,
}

impl SquadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SAVE_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    pub fn save(&self, squad: &Squad) -> Result<(), StoreError> {
        let path = self.path();
        Self::save_to_path(&path, &SquadSave::new(squad.clone()))?;
        log::info!("Squad saved to {:?}", path);
        Ok(())
    }

    pub fn load(&self) -> Result<Squad, StoreError> {
        let save = Self::load_from_path(&self.path())?;
        Ok(save.squad)
    }

    /// The stored roster, or a fresh one when nothing has been saved yet.
    pub fn load_or_default(&self) -> Result<Squad, StoreError> {
        match self.load() {
            Err(e) if e.is_recoverable() => {
                log::info!("{}, starting empty", e);
                Ok(Squad::new())
            }
            other => other,
        }
    }

    pub fn delete(&self) -> Result<(), StoreError> {
        let path = self.path();
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted save {:?}", path);
        }
        Ok(())
    }

    fn save_to_path(path: &Path, save: &SquadSave) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let data = serialize_and_compress(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }

        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<SquadSave, StoreError> {
        if !path.exists() {
            return Err(StoreError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let save = migrate_save(decompress_and_deserialize(&data)?)?;

        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}
