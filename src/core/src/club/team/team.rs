use crate::club::team::builder::TeamBuilder;
use crate::club::{ChemistryRating, Player, RoleComposition, TeamChemistry, TeamStrategy};
use crate::error::MatchError;
use crate::utils::format_overs;
use itertools::Itertools;
use log::warn;
use std::cmp::Reverse;

const UNSET_POSITION: u8 = 0;
const POSITION_SENTINEL: u16 = 999;
const FULL_SIDE: usize = 11;

#[derive(Debug, Clone)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub owner_id: u64,
    pub description: String,

    pub players: Vec<Player>,

    pub score: u32,
    pub wickets: u32,
    pub overs: u32,
    /// Legal deliveries faced in the current innings.
    pub balls: u32,

    pub chemistry: f32,
    pub strategy: TeamStrategy,
}

impl Team {
    pub fn builder() -> TeamBuilder {
        TeamBuilder::new()
    }

    /// Roster indices in batting order: explicit position, then role, then batting rating.
    pub fn batting_order_indices(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .sorted_by_key(|(_, player)| {
                let position = if player.position > UNSET_POSITION {
                    player.position as u16
                } else {
                    POSITION_SENTINEL
                };

                (
                    position,
                    player.role.batting_priority(),
                    Reverse(player.batting_ovr),
                )
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn get_batting_order(&self) -> Vec<&Player> {
        self.batting_order_indices()
            .into_iter()
            .map(|idx| &self.players[idx])
            .collect()
    }

    /// Bowlers and all-rounders by bowling rating. Empty when the side has neither.
    pub fn bowling_order_indices(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, player)| player.role.is_bowling_option())
            .sorted_by_key(|(_, player)| Reverse(player.bowling_ovr))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn get_bowling_order(&self) -> Vec<&Player> {
        self.bowling_order_indices()
            .into_iter()
            .map(|idx| &self.players[idx])
            .collect()
    }

    pub fn calculate_chemistry(&mut self) -> f32 {
        self.chemistry = TeamChemistry::calculate(&self.players);
        self.chemistry
    }

    pub fn chemistry_rating(&self) -> ChemistryRating {
        ChemistryRating::from_value(self.chemistry)
    }

    pub fn role_composition(&self) -> RoleComposition {
        RoleComposition::from_players(&self.players)
    }

    pub fn reset_match_stats(&mut self) {
        self.score = 0;
        self.wickets = 0;
        self.overs = 0;
        self.balls = 0;

        for player in self.players.iter_mut() {
            player.reset_match_stats();
        }
    }

    pub fn overs_display(&self) -> String {
        format_overs(self.balls)
    }

    /// Rejects rosters the engine cannot field at all. Short sides are only logged.
    pub fn validate_roster(&self) -> Result<(), MatchError> {
        if self.players.is_empty() {
            return Err(MatchError::InvalidRoster {
                team: self.name.clone(),
                reason: "no players".to_string(),
            });
        }

        if self.players.len() < FULL_SIDE {
            warn!(
                "team {} fields {} players, chemistry and batting depth will suffer",
                self.name,
                self.players.len()
            );
        }

        Ok(())
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }
}
