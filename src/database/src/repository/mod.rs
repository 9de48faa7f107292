mod error;
mod memory;

pub use error::*;
pub use memory::*;

use crate::loaders::{PlayerEntity, TeamEntity};
use cricket_core::{PlayerCareerStatistics, PlayerMatchPerformance};

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub player: PlayerEntity,
    pub position: u8,
}

/// A stored team with its player cards resolved, ready for hydration.
#[derive(Debug, Clone)]
pub struct TeamRecord {
    pub team: TeamEntity,
    pub roster: Vec<RosterEntry>,
}

pub trait LeagueRepository: Send + Sync {
    /// When `owner_id` is given the team must belong to that user.
    fn get_team(&self, team_id: u32, owner_id: Option<u64>) -> Result<TeamRecord, RepositoryError>;

    /// Most recently created first.
    fn get_user_teams(&self, owner_id: u64) -> Vec<TeamEntity>;

    fn user_coins(&self, user_id: u64) -> Result<u64, RepositoryError>;

    /// Applies `delta` and returns the new balance. Never goes below zero.
    fn update_user_coins(&self, user_id: u64, delta: i64) -> Result<u64, RepositoryError>;

    /// Returns how many player rows were updated.
    fn update_player_stats_after_match(
        &self,
        user_id: u64,
        performances: &[PlayerMatchPerformance],
        is_winner: bool,
    ) -> Result<usize, RepositoryError>;

    fn player_stats(&self, user_id: u64, player_id: u32) -> Option<PlayerCareerStatistics>;
}
