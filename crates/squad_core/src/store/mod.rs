// Persistence for the club roster
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::StoreError;
pub use format::{decompress_and_deserialize, serialize_and_compress, SquadSave};
pub use manager::SquadStore;
pub use migration::migrate_save;

pub const SAVE_VERSION: u32 = 1;
