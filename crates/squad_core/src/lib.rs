//! # squad_core - Youth football club roster management
//!
//! Keeps a club's players, trainings, fixtures and season bookkeeping in one
//! [`Squad`] aggregate owned by the caller.
//!
//! ## Features
//! - League standings ranked by points, goal difference, goals for
//! - Coach-pair rotation over upcoming fixtures with a forbidden pairing
//! - Training attendance rates as exact fractions
//! - Match stats, quarter-by-quarter match sheets, formations and tactics
//! - Versioned, checksummed binary saves

pub mod attendance;
pub mod calendar;
pub mod config;
pub mod convocation;
pub mod error;
pub mod match_sheet;
pub mod match_stats;
pub mod models;
pub mod rotation;
pub mod squad;
pub mod standings;
pub mod stats;
pub mod store;
pub mod tactics;

pub use error::{Result, SquadError};

pub use attendance::{compute_attendance, AttendanceRegister, AttendanceSummary, Ratio};
pub use calendar::CalendarEntry;
pub use config::{SideLabels, SquadConfig};
pub use convocation::Convocation;
pub use match_sheet::{MatchSheet, QuarterEvent, SheetEventKind};
pub use match_stats::{MatchStats, PlayerTally};
pub use models::{MatchFixture, MatchOutcome, Player, Position, Score, TeamSide, TrainingSession, Venue};
pub use rotation::{assign_coach_rotation, CoachAssignments, CoachPair, CoachRoster};
pub use squad::Squad;
pub use standings::{rank_standings, StandingStat, StandingsTable, TeamRecord};
pub use stats::{top_scorers, Scorer, TeamStats};
pub use store::{SquadStore, StoreError};
pub use tactics::{Formation, Tactic};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u32 = store::SAVE_VERSION;
