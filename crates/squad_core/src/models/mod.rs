// Roster entities: players, training sessions and fixtures

pub mod fixture;
pub mod player;
pub mod training;

pub use fixture::{MatchFixture, MatchOutcome, Score, Venue};
pub use player::{Player, Position, TeamSide};
pub use training::TrainingSession;

/// Fresh opaque id for a newly created entity.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
