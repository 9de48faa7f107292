use crate::club::Team;
use crate::r#match::{FallOfWicket, Side};
use crate::utils::format_overs;
use rand::Rng;
use serde::Serialize;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Team1Win,
    Team2WinWickets,
    Team2WinRuns,
    Tie,
}

impl ResultType {
    pub fn winner(&self) -> Option<Side> {
        match self {
            ResultType::Team1Win => Some(Side::Team1),
            ResultType::Team2WinWickets | ResultType::Team2WinRuns => Some(Side::Team2),
            ResultType::Tie => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginType {
    Runs,
    Wickets,
    Tie,
}

/// Team figures frozen when an innings ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InningsSummary {
    pub team_id: u32,
    pub team: String,
    pub score: u32,
    pub wickets: u32,
    pub balls: u32,
    pub overs: String,
    pub fall_of_wickets: Vec<FallOfWicket>,
}

impl InningsSummary {
    pub fn from_team(team: &Team, fall_of_wickets: Vec<FallOfWicket>) -> Self {
        InningsSummary {
            team_id: team.id,
            team: team.name.clone(),
            score: team.score,
            wickets: team.wickets,
            balls: team.balls,
            overs: format_overs(team.balls),
            fall_of_wickets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardRanges {
    pub winner: RangeInclusive<u32>,
    pub loser: RangeInclusive<u32>,
    pub tie: RangeInclusive<u32>,
}

impl Default for RewardRanges {
    fn default() -> Self {
        RewardRanges {
            winner: 1000..=1500,
            loser: 500..=600,
            tie: 700..=1000,
        }
    }
}

impl RewardRanges {
    /// `(team1_reward, team2_reward)`. Both sides share one draw on a tie.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, result_type: ResultType) -> (u32, u32) {
        match result_type.winner() {
            Some(Side::Team1) => (
                rng.random_range(self.winner.clone()),
                rng.random_range(self.loser.clone()),
            ),
            Some(Side::Team2) => {
                let winner = rng.random_range(self.winner.clone());
                (rng.random_range(self.loser.clone()), winner)
            }
            None => {
                let reward = rng.random_range(self.tie.clone());
                (reward, reward)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub match_id: Option<String>,
    pub match_type: String,
    pub result_type: ResultType,

    pub winner: Option<String>,
    pub winner_id: Option<u32>,
    pub winner_owner_id: Option<u64>,
    pub margin_type: MarginType,
    pub margin: u32,

    pub team1_id: u32,
    pub team1_score: u32,
    pub team1_wickets: u32,
    pub team1_overs: String,
    pub team2_id: u32,
    pub team2_score: u32,
    pub team2_wickets: u32,
    pub team2_overs: String,

    pub team1_reward: u32,
    pub team2_reward: u32,
    pub player_of_the_match: Option<String>,
}

impl MatchResult {
    /// Decides the match from both innings. Rewards are filled in by the caller.
    pub fn decide(team1: &Team, team2: &Team, first: &InningsSummary, second: &InningsSummary) -> Self {
        let (result_type, margin_type, margin, winner) = if first.score > second.score {
            (
                ResultType::Team1Win,
                MarginType::Runs,
                first.score - second.score,
                Some(team1),
            )
        } else if second.score > first.score {
            (
                ResultType::Team2WinWickets,
                MarginType::Wickets,
                10u32.saturating_sub(second.wickets),
                Some(team2),
            )
        } else {
            (ResultType::Tie, MarginType::Tie, 0, None)
        };

        MatchResult {
            match_id: None,
            match_type: String::new(),
            result_type,
            winner: winner.map(|team| team.name.clone()),
            winner_id: winner.map(|team| team.id),
            winner_owner_id: winner.map(|team| team.owner_id),
            margin_type,
            margin,
            team1_id: team1.id,
            team1_score: first.score,
            team1_wickets: first.wickets,
            team1_overs: first.overs.clone(),
            team2_id: team2.id,
            team2_score: second.score,
            team2_wickets: second.wickets,
            team2_overs: second.overs.clone(),
            team1_reward: 0,
            team2_reward: 0,
            player_of_the_match: None,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.result_type == ResultType::Tie
    }

    pub fn summary(&self) -> String {
        match (&self.winner, self.margin_type) {
            (Some(winner), MarginType::Runs) => format!("{} won by {} runs", winner, self.margin),
            (Some(winner), MarginType::Wickets) => {
                format!("{} won by {} wickets", winner, self.margin)
            }
            _ => format!("Match tied at {}", self.team1_score),
        }
    }
}
