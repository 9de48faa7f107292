use crate::loaders::{LeagueEntity, LeagueLoader, PlayerEntity, TeamEntity};
use crate::repository::{LeagueRepository, RepositoryError, RosterEntry, TeamRecord};
use cricket_core::{PlayerCareerStatistics, PlayerMatchPerformance};
use log::{debug, info};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

pub struct InMemoryRepository {
    coins: RwLock<HashMap<u64, u64>>,
    players: HashMap<u32, PlayerEntity>,
    teams: HashMap<u32, TeamEntity>,
    player_stats: RwLock<HashMap<(u64, u32), PlayerCareerStatistics>>,
}

impl InMemoryRepository {
    pub fn new(league: LeagueEntity) -> Self {
        info!(
            "league loaded: {} users, {} players, {} teams",
            league.users.len(),
            league.players.len(),
            league.teams.len()
        );

        InMemoryRepository {
            coins: RwLock::new(league.users.into_iter().map(|u| (u.id, u.coins)).collect()),
            players: league.players.into_iter().map(|p| (p.id, p)).collect(),
            teams: league.teams.into_iter().map(|t| (t.id, t)).collect(),
            player_stats: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_static() -> Result<Self, RepositoryError> {
        Ok(Self::new(LeagueLoader::load()?))
    }

    fn resolve_roster(&self, team: &TeamEntity) -> Vec<RosterEntry> {
        team.players
            .iter()
            .filter_map(|entry| match self.players.get(&entry.player_id) {
                Some(player) => Some(RosterEntry {
                    player: player.clone(),
                    position: entry.position,
                }),
                None => {
                    debug!("team {}: unknown player {}", team.id, entry.player_id);
                    None
                }
            })
            .collect()
    }
}

impl LeagueRepository for InMemoryRepository {
    fn get_team(&self, team_id: u32, owner_id: Option<u64>) -> Result<TeamRecord, RepositoryError> {
        let team = self
            .teams
            .get(&team_id)
            .filter(|team| owner_id.is_none_or(|owner| team.owner_id == owner))
            .ok_or(RepositoryError::TeamNotFound { team_id, owner_id })?;

        Ok(TeamRecord {
            roster: self.resolve_roster(team),
            team: team.clone(),
        })
    }

    fn get_user_teams(&self, owner_id: u64) -> Vec<TeamEntity> {
        let mut teams: Vec<TeamEntity> = self
            .teams
            .values()
            .filter(|team| team.owner_id == owner_id)
            .cloned()
            .collect();

        teams.sort_by_key(|team| (Reverse(team.created_at), team.id));
        teams
    }

    fn user_coins(&self, user_id: u64) -> Result<u64, RepositoryError> {
        let coins = self.coins.read().unwrap_or_else(PoisonError::into_inner);

        coins
            .get(&user_id)
            .copied()
            .ok_or(RepositoryError::UserNotFound(user_id))
    }

    fn update_user_coins(&self, user_id: u64, delta: i64) -> Result<u64, RepositoryError> {
        let mut coins = self.coins.write().unwrap_or_else(PoisonError::into_inner);

        let balance = coins
            .get_mut(&user_id)
            .ok_or(RepositoryError::UserNotFound(user_id))?;

        let updated = if delta < 0 {
            balance
                .checked_sub(delta.unsigned_abs())
                .ok_or(RepositoryError::InsufficientCoins {
                    user_id,
                    balance: *balance,
                    requested: delta.unsigned_abs(),
                })?
        } else {
            balance.saturating_add(delta as u64)
        };

        debug!("user {}: coins {} -> {}", user_id, balance, updated);
        *balance = updated;

        Ok(updated)
    }

    fn update_player_stats_after_match(
        &self,
        user_id: u64,
        performances: &[PlayerMatchPerformance],
        is_winner: bool,
    ) -> Result<usize, RepositoryError> {
        self.user_coins(user_id)?;

        let mut stats = self.player_stats.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = 0;

        for performance in performances {
            if !self.players.contains_key(&performance.player_id) {
                debug!("skipping stats for unknown player {}", performance.player_id);
                continue;
            }

            stats
                .entry((user_id, performance.player_id))
                .or_default()
                .record(performance, is_winner);
            updated += 1;
        }

        Ok(updated)
    }

    fn player_stats(&self, user_id: u64, player_id: u32) -> Option<PlayerCareerStatistics> {
        self.player_stats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(user_id, player_id))
            .cloned()
    }
}
