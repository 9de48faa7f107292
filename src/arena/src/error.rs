use cricket_core::MatchError;
use database::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Roster(#[from] MatchError),
    #[error("user {0} cannot play against themselves")]
    SameOwner(u64),
    #[error("match {0} is already running")]
    DuplicateMatch(String),
    #[error("match {match_id} failed: {reason}")]
    SimulationFailed { match_id: String, reason: String },
}
