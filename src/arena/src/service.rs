use crate::{ArenaConfig, ArenaError, Challenge, ChannelSink, Escrow, MatchRegistry, Settlement};
use cricket_core::{CricketMatch, MatchResult, PlayerMatchPerformance, Team};
use database::{LeagueRepository, TeamHydrator};
use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ChallengeOutcome {
    pub result: MatchResult,
    pub settlement: Settlement,
}

struct PlayedMatch {
    result: MatchResult,
    team1: Vec<PlayerMatchPerformance>,
    team2: Vec<PlayerMatchPerformance>,
}

#[derive(Clone)]
pub struct ArenaService {
    repository: Arc<dyn LeagueRepository>,
    registry: MatchRegistry,
    config: ArenaConfig,
}

impl ArenaService {
    pub fn new(repository: Arc<dyn LeagueRepository>, config: ArenaConfig) -> Self {
        ArenaService {
            repository,
            registry: MatchRegistry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    pub fn repository(&self) -> &dyn LeagueRepository {
        self.repository.as_ref()
    }

    /// Escrows the stakes, plays the match off the async runtime and settles.
    /// Any failure after escrow refunds both users.
    pub async fn play_challenge(
        &self,
        challenge: Challenge,
        sink: ChannelSink,
    ) -> Result<ChallengeOutcome, ArenaError> {
        Escrow::hold(self.repository(), &challenge)?;

        let (team1, team2) = match self.hydrate_teams(&challenge) {
            Ok(teams) => teams,
            Err(error) => {
                self.refund(&challenge);
                return Err(error);
            }
        };

        if let Err(error) = self.registry.register(challenge.clone()).await {
            self.refund(&challenge);
            return Err(error);
        }

        info!(
            "match {} started: {} ({}) v {} ({}), stake {}",
            challenge.match_id,
            challenge.challenger_name,
            team1.name,
            challenge.opponent_name,
            team2.name,
            challenge.stake
        );

        let match_config = self.config.match_config(&challenge.match_id);

        let played = tokio::task::spawn_blocking(move || {
            let mut cricket_match = CricketMatch::with_sink(team1, team2, match_config, sink);
            let result = cricket_match.simulate_match();
            let (team1, team2) = cricket_match.performances();

            PlayedMatch { result, team1, team2 }
        })
        .await;

        // A match missing from the registry was cancelled and refunded by `shutdown`.
        if self.registry.remove(&challenge.match_id).await.is_none() {
            warn!("match {} was cancelled while running, skipping settlement", challenge.match_id);
            return Err(ArenaError::SimulationFailed {
                match_id: challenge.match_id,
                reason: "cancelled".to_string(),
            });
        }

        match played {
            Ok(played) => Escrow::settle(
                self.repository(),
                &challenge,
                &played.result,
                &played.team1,
                &played.team2,
            )
            .map(|settlement| ChallengeOutcome {
                result: played.result,
                settlement,
            }),
            Err(join_error) => {
                error!("match {} aborted: {}", challenge.match_id, join_error);
                self.refund(&challenge);
                Err(ArenaError::SimulationFailed {
                    match_id: challenge.match_id.clone(),
                    reason: join_error.to_string(),
                })
            }
        }
    }

    /// Drains the registry and refunds every match that was still running.
    pub async fn shutdown(&self) -> usize {
        let cancelled = self.registry.cancel_all().await;

        for active in &cancelled {
            self.refund(&active.challenge);
        }

        cancelled.len()
    }

    pub fn hydrate_teams(&self, challenge: &Challenge) -> Result<(Team, Team), ArenaError> {
        let mut rng = StdRng::seed_from_u64(self.config.match_seed.unwrap_or_else(rand::random));

        let hydrate = |team_id, owner_id, rng: &mut StdRng| -> Result<Team, ArenaError> {
            let record = self.repository.get_team(team_id, Some(owner_id))?;
            let team = TeamHydrator::hydrate(&record, rng)?;
            team.validate_roster()?;
            Ok(team)
        };

        let team1 = hydrate(challenge.challenger_team_id, challenge.challenger_id, &mut rng)?;
        let team2 = hydrate(challenge.opponent_team_id, challenge.opponent_id, &mut rng)?;

        Ok((team1, team2))
    }

    fn refund(&self, challenge: &Challenge) {
        if let Err(error) = Escrow::refund(self.repository(), challenge) {
            warn!("match {}: refund failed: {}", challenge.match_id, error);
        }
    }
}
