use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquadError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No upcoming fixture qualified for the coach rotation.
    #[error("No upcoming fixtures to assign coaches to")]
    NothingToAssign,

    #[error("Coaches {first} and {second} may not be paired")]
    ForbiddenPairing { first: String, second: String },

    #[error("Duplicate id: {0}")]
    DuplicateId(String),
}

impl SquadError {
    /// `NothingToAssign` is a notice for the user, not a failure.
    pub fn is_notice(&self) -> bool {
        matches!(self, SquadError::NothingToAssign)
    }
}

pub type Result<T> = std::result::Result<T, SquadError>;
