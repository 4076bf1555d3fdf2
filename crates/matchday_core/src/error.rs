use thiserror::Error;

use crate::engine::MatchPhase;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Squad '{team}' too small: need at least {needed} players, found {found}")]
    SquadTooSmall { team: String, needed: usize, found: usize },

    #[error("Duplicate player id '{player}' in squad '{team}'")]
    DuplicatePlayer { team: String, player: String },

    #[error("Team mismatch: session expects '{expected}', got '{found}'")]
    TeamMismatch { expected: String, found: String },

    #[error("Operation not allowed during {phase:?}")]
    InvalidPhase { phase: MatchPhase },

    #[error("Invalid substitution: {0}")]
    InvalidSubstitution(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl MatchError {
    /// Errors the caller can fix by correcting its input and retrying.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MatchError::SquadTooSmall { .. }
                | MatchError::DuplicatePlayer { .. }
                | MatchError::TeamMismatch { .. }
                | MatchError::InvalidSubstitution(_)
                | MatchError::UnsupportedSchema(_)
                | MatchError::Deserialization(_)
                | MatchError::Config(_)
        )
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            MatchError::Deserialization(err.to_string())
        } else {
            MatchError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
