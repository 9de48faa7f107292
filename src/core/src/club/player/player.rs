use crate::club::player::builder::PlayerBuilder;
use crate::club::{
    BattingAttributes, BowlingAttributes, Dismissal, DismissalKind, PlayerMatchPerformance,
    PlayerMatchStatistics, PlayerRole, PlayerTier,
};
use crate::utils::FloatUtils;
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub role: PlayerRole,
    pub team: String,
    pub batting_style: String,
    pub bowling_style: String,

    pub tier: PlayerTier,
    pub batting_ovr: u8,
    pub bowling_ovr: u8,
    pub total_ovr: u8,

    pub batting: BattingAttributes,
    pub bowling: BowlingAttributes,

    /// Batting-order hint, 0 when unset.
    pub position: u8,

    pub statistics: PlayerMatchStatistics,
}

impl Player {
    pub fn builder() -> PlayerBuilder {
        PlayerBuilder::new()
    }

    pub fn reset_match_stats(&mut self) {
        self.statistics = PlayerMatchStatistics::default();
    }

    pub fn add_ball(&mut self) {
        self.statistics.balls_faced += 1;
        self.update_strike_rate();
    }

    pub fn add_runs(&mut self, runs: u32) {
        self.statistics.runs += runs;

        match runs {
            4 => self.statistics.fours += 1,
            6 => self.statistics.sixes += 1,
            _ => {}
        }

        self.update_strike_rate();
    }

    pub fn dismiss(&mut self, kind: DismissalKind, bowler: &str, fielder: Option<String>) {
        self.statistics.is_out = true;
        self.statistics.dismissal = Some(Dismissal {
            kind,
            bowler: bowler.to_string(),
            fielder,
        });
    }

    pub fn strike_rate(&self) -> f32 {
        self.statistics.strike_rate
    }

    fn update_strike_rate(&mut self) {
        self.statistics.strike_rate = if self.statistics.balls_faced == 0 {
            0.0
        } else {
            FloatUtils::round2(
                self.statistics.runs as f32 / self.statistics.balls_faced as f32 * 100.0,
            )
        };
    }

    #[inline]
    pub fn batting_skill(&self) -> f32 {
        self.batting.skill()
    }

    #[inline]
    pub fn bowling_skill(&self) -> f32 {
        self.bowling.skill()
    }

    #[inline]
    pub fn is_out(&self) -> bool {
        self.statistics.is_out
    }

    pub fn performance(&self) -> PlayerMatchPerformance {
        PlayerMatchPerformance::new(self.id, &self.name, self.role, &self.statistics)
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} ({}, {})", self.name, self.role, self.total_ovr)
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
