use crate::club::{Player, PlayerRole};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleComposition {
    pub batsmen: usize,
    pub bowlers: usize,
    pub all_rounders: usize,
    pub wicket_keepers: usize,
    pub total: usize,
}

impl RoleComposition {
    pub fn from_players(players: &[Player]) -> Self {
        players
            .iter()
            .fold(RoleComposition::default(), |mut composition, player| {
                match player.role {
                    PlayerRole::Batsman => composition.batsmen += 1,
                    PlayerRole::Bowler => composition.bowlers += 1,
                    PlayerRole::AllRounder => composition.all_rounders += 1,
                    PlayerRole::WicketKeeper => composition.wicket_keepers += 1,
                }
                composition.total += 1;
                composition
            })
    }

    fn is_ideal(&self) -> bool {
        (4..=5).contains(&self.batsmen)
            && (4..=5).contains(&self.bowlers)
            && (1..=2).contains(&self.all_rounders)
            && self.wicket_keepers == 1
            && self.total == 11
    }
}

/// Role-balance multiplier applied to every player's skill on the ball.
pub struct TeamChemistry;

impl TeamChemistry {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 1.5;

    const MIN_PLAYERS: usize = 5;
    const FULL_SIDE: usize = 11;

    pub fn calculate(players: &[Player]) -> f32 {
        let composition = RoleComposition::from_players(players);

        if composition.total < Self::MIN_PLAYERS {
            return Self::MIN;
        }

        let mut chemistry = 1.0;

        chemistry -= Self::specialist_penalty(composition.batsmen);
        chemistry -= Self::specialist_penalty(composition.bowlers);

        chemistry -= match composition.wicket_keepers {
            0 => 0.30,
            n if n > 2 => 0.10 * (n - 2) as f32,
            _ => 0.0,
        };

        chemistry -= match composition.all_rounders {
            0 => 0.15,
            n if n > 3 => 0.10 * (n - 3) as f32,
            _ => 0.0,
        };

        chemistry -= 0.10 * composition.total.abs_diff(Self::FULL_SIDE) as f32;

        if composition.is_ideal() {
            chemistry += 0.10;
        }

        chemistry.clamp(Self::MIN, Self::MAX)
    }

    fn specialist_penalty(count: usize) -> f32 {
        match count {
            n if n < 3 => 0.20,
            n if n > 6 => 0.15 * (n - 6) as f32,
            _ => 0.0,
        }
    }

    /// Pre-match balance summary shown with the match start event.
    pub fn commentary(team1: &str, chemistry1: f32, team2: &str, chemistry2: f32) -> String {
        format!(
            "Team Chemistry Analysis\n{}: {} team balance (Factor: {:.2})\n{}: {} team balance (Factor: {:.2})",
            team1,
            ChemistryRating::from_value(chemistry1),
            chemistry1,
            team2,
            ChemistryRating::from_value(chemistry2),
            chemistry2
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChemistryRating {
    Excellent,
    Good,
    Poor,
}

impl ChemistryRating {
    pub fn from_value(chemistry: f32) -> Self {
        if chemistry > 1.1 {
            ChemistryRating::Excellent
        } else if chemistry > 1.0 {
            ChemistryRating::Good
        } else {
            ChemistryRating::Poor
        }
    }
}

impl std::fmt::Display for ChemistryRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChemistryRating::Excellent => "Excellent",
            ChemistryRating::Good => "Good",
            ChemistryRating::Poor => "Poor",
        };
        write!(f, "{}", label)
    }
}
