use crate::ArenaError;
use cricket_core::{MatchResult, PlayerMatchPerformance, Side};
use database::LeagueRepository;
use log::{error, info, warn};
use serde::Serialize;

/// A wagered match. The challenger's team always bats first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Challenge {
    pub match_id: String,
    pub challenger_id: u64,
    pub challenger_name: String,
    pub challenger_team_id: u32,
    pub opponent_id: u64,
    pub opponent_name: String,
    pub opponent_team_id: u32,
    pub stake: u64,
}

impl Challenge {
    pub fn new(
        match_id: impl Into<String>,
        (challenger_id, challenger_name, challenger_team_id): (u64, &str, u32),
        (opponent_id, opponent_name, opponent_team_id): (u64, &str, u32),
        stake: u64,
    ) -> Self {
        Challenge {
            match_id: match_id.into(),
            challenger_id,
            challenger_name: challenger_name.to_string(),
            challenger_team_id,
            opponent_id,
            opponent_name: opponent_name.to_string(),
            opponent_team_id,
            stake,
        }
    }

    fn user(&self, side: Side) -> u64 {
        match side {
            Side::Team1 => self.challenger_id,
            Side::Team2 => self.opponent_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub challenger_payout: u64,
    pub opponent_payout: u64,
    pub challenger_balance: u64,
    pub opponent_balance: u64,
    pub stats_updated: usize,
}

pub struct Escrow;

impl Escrow {
    /// Takes the stake from both users. Either both are debited or neither is.
    pub fn hold(repository: &dyn LeagueRepository, challenge: &Challenge) -> Result<(), ArenaError> {
        if challenge.challenger_id == challenge.opponent_id {
            return Err(ArenaError::SameOwner(challenge.challenger_id));
        }

        let stake = challenge.stake as i64;

        repository.update_user_coins(challenge.challenger_id, -stake)?;

        if let Err(error) = repository.update_user_coins(challenge.opponent_id, -stake) {
            warn!(
                "match {}: opponent escrow failed ({}), refunding challenger",
                challenge.match_id, error
            );
            if let Err(rollback) = repository.update_user_coins(challenge.challenger_id, stake) {
                error!(
                    "match {}: challenger {} lost stake {} ({})",
                    challenge.match_id, challenge.challenger_id, stake, rollback
                );
            }
            return Err(error.into());
        }

        Ok(())
    }

    /// Returns the stake to both users.
    pub fn refund(repository: &dyn LeagueRepository, challenge: &Challenge) -> Result<(), ArenaError> {
        let stake = challenge.stake as i64;

        repository.update_user_coins(challenge.challenger_id, stake)?;
        repository.update_user_coins(challenge.opponent_id, stake)?;

        info!("match {}: stakes refunded", challenge.match_id);

        Ok(())
    }

    /// Pays out rewards and records player stats for both users.
    /// A failed opponent payout reverses the challenger payout. Stat failures
    /// are logged and leave the payouts in place.
    pub fn settle(
        repository: &dyn LeagueRepository,
        challenge: &Challenge,
        result: &MatchResult,
        team1: &[PlayerMatchPerformance],
        team2: &[PlayerMatchPerformance],
    ) -> Result<Settlement, ArenaError> {
        let stake = challenge.stake;
        let winner = result.result_type.winner();

        let payout = |side: Side, reward: u32| match winner {
            Some(winner) if winner != side => reward as u64,
            _ => stake + reward as u64,
        };

        let challenger_payout = payout(Side::Team1, result.team1_reward);
        let opponent_payout = payout(Side::Team2, result.team2_reward);

        let challenger_balance =
            repository.update_user_coins(challenge.challenger_id, challenger_payout as i64)?;
        let opponent_balance =
            match repository.update_user_coins(challenge.opponent_id, opponent_payout as i64) {
                Ok(balance) => balance,
                Err(payout_error) => {
                    if let Err(reversal) =
                        repository.update_user_coins(challenge.challenger_id, -(challenger_payout as i64))
                    {
                        error!(
                            "match {}: challenger {} kept payout {} ({})",
                            challenge.match_id, challenge.challenger_id, challenger_payout, reversal
                        );
                    }
                    return Err(payout_error.into());
                }
            };

        let mut stats_updated = 0;
        for (side, performances) in [(Side::Team1, team1), (Side::Team2, team2)] {
            match repository.update_player_stats_after_match(
                challenge.user(side),
                performances,
                winner == Some(side),
            ) {
                Ok(updated) => stats_updated += updated,
                Err(stats_error) => error!(
                    "match {}: stats for user {} not recorded ({})",
                    challenge.match_id,
                    challenge.user(side),
                    stats_error
                ),
            }
        }

        info!(
            "match {} settled: {} +{}, {} +{}",
            challenge.match_id,
            challenge.challenger_name,
            challenger_payout,
            challenge.opponent_name,
            opponent_payout
        );

        Ok(Settlement {
            challenger_payout,
            opponent_payout,
            challenger_balance,
            opponent_balance,
            stats_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_core::{MarginType, PlayerCareerStatistics, PlayerMatchStatistics, PlayerRole, ResultType};
    use database::{InMemoryRepository, RepositoryError, TeamEntity, TeamRecord};

    fn repository() -> InMemoryRepository {
        InMemoryRepository::from_static().unwrap()
    }

    /// Refuses credits to `frozen_user` and optionally every stats write.
    struct FaultyRepository {
        inner: InMemoryRepository,
        frozen_user: Option<u64>,
        reject_stats: bool,
    }

    impl LeagueRepository for FaultyRepository {
        fn get_team(&self, team_id: u32, owner_id: Option<u64>) -> Result<TeamRecord, RepositoryError> {
            self.inner.get_team(team_id, owner_id)
        }

        fn get_user_teams(&self, owner_id: u64) -> Vec<TeamEntity> {
            self.inner.get_user_teams(owner_id)
        }

        fn user_coins(&self, user_id: u64) -> Result<u64, RepositoryError> {
            self.inner.user_coins(user_id)
        }

        fn update_user_coins(&self, user_id: u64, delta: i64) -> Result<u64, RepositoryError> {
            if self.frozen_user == Some(user_id) && delta > 0 {
                return Err(RepositoryError::UserNotFound(user_id));
            }
            self.inner.update_user_coins(user_id, delta)
        }

        fn update_player_stats_after_match(
            &self,
            user_id: u64,
            performances: &[PlayerMatchPerformance],
            is_winner: bool,
        ) -> Result<usize, RepositoryError> {
            if self.reject_stats {
                return Err(RepositoryError::UserNotFound(user_id));
            }
            self.inner.update_player_stats_after_match(user_id, performances, is_winner)
        }

        fn player_stats(&self, user_id: u64, player_id: u32) -> Option<PlayerCareerStatistics> {
            self.inner.player_stats(user_id, player_id)
        }
    }

    fn challenge(opponent_id: u64, stake: u64) -> Challenge {
        Challenge::new("m-1", (1001, "hawks_captain", 1), (opponent_id, "rival", 2), stake)
    }

    fn result(result_type: ResultType, team1_reward: u32, team2_reward: u32) -> MatchResult {
        MatchResult {
            match_id: Some("m-1".to_string()),
            match_type: "challenge".to_string(),
            result_type,
            winner: None,
            winner_id: None,
            winner_owner_id: None,
            margin_type: MarginType::Tie,
            margin: 0,
            team1_id: 1,
            team1_score: 120,
            team1_wickets: 6,
            team1_overs: "20.0".to_string(),
            team2_id: 2,
            team2_score: 120,
            team2_wickets: 8,
            team2_overs: "20.0".to_string(),
            team1_reward,
            team2_reward,
            player_of_the_match: None,
        }
    }

    fn performances(ids: &[u32]) -> Vec<PlayerMatchPerformance> {
        ids.iter()
            .map(|id| PlayerMatchPerformance::new(*id, "Card", PlayerRole::Bowler, &PlayerMatchStatistics::default()))
            .collect()
    }

    #[test]
    fn test_escrow_debits_both() {
        let repository = repository();

        Escrow::hold(&repository, &challenge(1002, 100)).unwrap();

        assert_eq!(repository.user_coins(1001).unwrap(), 2400);
        assert_eq!(repository.user_coins(1002).unwrap(), 1700);
    }

    #[test]
    fn test_escrow_rolls_back_when_opponent_is_short() {
        let repository = repository();

        let error = Escrow::hold(&repository, &challenge(1003, 100)).unwrap_err();

        assert!(matches!(
            error,
            ArenaError::Repository(RepositoryError::InsufficientCoins { user_id: 1003, .. })
        ));
        assert_eq!(repository.user_coins(1001).unwrap(), 2500);
        assert_eq!(repository.user_coins(1003).unwrap(), 60);
    }

    #[test]
    fn test_escrow_rejects_same_owner() {
        let repository = repository();

        assert!(matches!(
            Escrow::hold(&repository, &challenge(1001, 100)),
            Err(ArenaError::SameOwner(1001))
        ));
        assert_eq!(repository.user_coins(1001).unwrap(), 2500);
    }

    #[test]
    fn test_refund_restores_balances() {
        let repository = repository();
        let challenge = challenge(1002, 250);

        Escrow::hold(&repository, &challenge).unwrap();
        Escrow::refund(&repository, &challenge).unwrap();

        assert_eq!(repository.user_coins(1001).unwrap(), 2500);
        assert_eq!(repository.user_coins(1002).unwrap(), 1800);
    }

    #[test]
    fn test_settle_decisive() {
        let repository = repository();
        let challenge = challenge(1002, 100);
        Escrow::hold(&repository, &challenge).unwrap();

        let mut result = result(ResultType::Team2WinWickets, 550, 1200);
        result.team2_score = 121;

        let settlement = Escrow::settle(
            &repository,
            &challenge,
            &result,
            &performances(&[1, 2]),
            &performances(&[12, 13, 14]),
        )
        .unwrap();

        assert_eq!(settlement.challenger_payout, 550);
        assert_eq!(settlement.opponent_payout, 1300);
        assert_eq!(settlement.challenger_balance, 2950);
        assert_eq!(settlement.opponent_balance, 3000);
        assert_eq!(settlement.stats_updated, 5);

        assert_eq!(repository.player_stats(1002, 12).unwrap().matches_won, 1);
        assert_eq!(repository.player_stats(1001, 1).unwrap().matches_won, 0);
    }

    #[test]
    fn test_settle_tie() {
        let repository = repository();
        let challenge = challenge(1002, 100);
        Escrow::hold(&repository, &challenge).unwrap();

        let settlement = Escrow::settle(
            &repository,
            &challenge,
            &result(ResultType::Tie, 800, 800),
            &performances(&[1]),
            &performances(&[12]),
        )
        .unwrap();

        assert_eq!(settlement.challenger_payout, 900);
        assert_eq!(settlement.opponent_payout, 900);
        assert_eq!(repository.player_stats(1001, 1).unwrap().matches_won, 0);
        assert_eq!(repository.player_stats(1002, 12).unwrap().matches_won, 0);
    }

    #[test]
    fn test_escrow_reports_opponent_error_when_rollback_fails() {
        let repository = FaultyRepository {
            inner: repository(),
            frozen_user: Some(1001),
            reject_stats: false,
        };

        let error = Escrow::hold(&repository, &challenge(1003, 100)).unwrap_err();

        assert!(matches!(
            error,
            ArenaError::Repository(RepositoryError::InsufficientCoins { user_id: 1003, .. })
        ));
        assert_eq!(repository.user_coins(1001).unwrap(), 2400);
    }

    #[test]
    fn test_settle_reverses_challenger_payout_when_opponent_missing() {
        let repository = repository();

        let error = Escrow::settle(
            &repository,
            &challenge(9999, 100),
            &result(ResultType::Team1Win, 1200, 550),
            &performances(&[1]),
            &performances(&[12]),
        )
        .unwrap_err();

        assert!(matches!(
            error,
            ArenaError::Repository(RepositoryError::UserNotFound(9999))
        ));
        assert_eq!(repository.user_coins(1001).unwrap(), 2500);
        assert!(repository.player_stats(1001, 1).is_none());
    }

    #[test]
    fn test_settle_keeps_payouts_when_stats_fail() {
        let repository = FaultyRepository {
            inner: repository(),
            frozen_user: None,
            reject_stats: true,
        };
        let challenge = challenge(1002, 100);
        Escrow::hold(&repository, &challenge).unwrap();

        let settlement = Escrow::settle(
            &repository,
            &challenge,
            &result(ResultType::Tie, 800, 800),
            &performances(&[1]),
            &performances(&[12]),
        )
        .unwrap();

        assert_eq!(settlement.challenger_balance, 3300);
        assert_eq!(settlement.opponent_balance, 2600);
        assert_eq!(settlement.stats_updated, 0);
        assert!(repository.player_stats(1001, 1).is_none());
    }
}
