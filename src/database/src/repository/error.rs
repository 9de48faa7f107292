use cricket_core::MatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("user {0} not found")]
    UserNotFound(u64),
    #[error("team {team_id} not found for owner {owner_id:?}")]
    TeamNotFound { team_id: u32, owner_id: Option<u64> },
    #[error("user {user_id} has {balance} coins, {requested} required")]
    InsufficientCoins {
        user_id: u64,
        balance: u64,
        requested: u64,
    },
    #[error("league data: {0}")]
    Data(#[from] serde_json::Error),
    #[error(transparent)]
    Roster(#[from] MatchError),
}
