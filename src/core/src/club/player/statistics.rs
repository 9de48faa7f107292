use crate::club::PlayerRole;
use crate::utils::FloatUtils;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalKind {
    Bowled,
    Caught,
    Lbw,
    Stumped,
    CaughtBehind,
}

impl DismissalKind {
    pub const ALL: [DismissalKind; 5] = [
        DismissalKind::Bowled,
        DismissalKind::Caught,
        DismissalKind::Lbw,
        DismissalKind::Stumped,
        DismissalKind::CaughtBehind,
    ];

    /// Dismissals that credit a fielder from the bowling side.
    pub fn involves_fielder(&self) -> bool {
        matches!(
            self,
            DismissalKind::Caught | DismissalKind::CaughtBehind | DismissalKind::Stumped
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Caught => "caught",
            DismissalKind::Lbw => "lbw",
            DismissalKind::Stumped => "stumped",
            DismissalKind::CaughtBehind => "caught_behind",
        }
    }
}

impl Display for DismissalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dismissal {
    pub kind: DismissalKind,
    pub bowler: String,
    pub fielder: Option<String>,
}

/// Counters for the match in progress. Cleared by `Player::reset_match_stats`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerMatchStatistics {
    pub runs: u32,
    pub balls_faced: u32,
    pub is_out: bool,
    pub dismissal: Option<Dismissal>,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f32,

    pub wickets: u32,
    pub balls_bowled: u32,
    pub runs_conceded: u32,
    pub overs_bowled: u32,
    pub maidens: u32,
    pub consecutive_overs: u32,
}

impl PlayerMatchStatistics {
    pub fn economy(&self) -> f32 {
        FloatUtils::round2(FloatUtils::guarded_ratio(
            self.runs_conceded as f32,
            self.balls_bowled as f32,
        ) * 6.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMatchPerformance {
    pub player_id: u32,
    pub name: String,
    pub is_batsman: bool,
    pub is_bowler: bool,
    pub runs: u32,
    pub balls_faced: u32,
    pub is_out: bool,
    pub fours: u32,
    pub sixes: u32,
    pub wickets: u32,
    pub overs_bowled: u32,
    pub balls_bowled: u32,
    pub runs_conceded: u32,
    pub maidens: u32,
    pub is_potm: bool,
}

impl PlayerMatchPerformance {
    pub fn new(player_id: u32, name: &str, role: PlayerRole, stats: &PlayerMatchStatistics) -> Self {
        PlayerMatchPerformance {
            player_id,
            name: name.to_string(),
            is_batsman: true,
            is_bowler: role.is_bowling_option() || stats.balls_bowled > 0,
            runs: stats.runs,
            balls_faced: stats.balls_faced,
            is_out: stats.is_out,
            fours: stats.fours,
            sixes: stats.sixes,
            wickets: stats.wickets,
            overs_bowled: stats.overs_bowled,
            balls_bowled: stats.balls_bowled,
            runs_conceded: stats.runs_conceded,
            maidens: stats.maidens,
            is_potm: false,
        }
    }

    /// Match rating on a 1.0 - 10.0 scale. `team_won` is `None` for a tie.
    pub fn match_rating(&self, team_won: Option<bool>) -> f32 {
        let mut rating = 6.0;

        // Batting
        rating += (self.runs as f32 / 20.0).min(3.0);
        rating += (self.fours as f32 * 0.05 + self.sixes as f32 * 0.1).min(0.5);

        if self.balls_faced >= 10 {
            let strike_rate = self.runs as f32 / self.balls_faced as f32 * 100.0;
            rating += ((strike_rate - 120.0) / 100.0).clamp(-0.4, 0.5);
        }

        if self.is_out && self.runs == 0 && self.balls_faced > 0 {
            rating -= 0.5;
        }

        // Bowling
        if self.balls_bowled > 0 {
            rating += (self.wickets as f32 * 0.8).min(3.0);
            rating += (self.maidens as f32 * 0.3).min(0.6);

            if self.balls_bowled >= 6 {
                let economy = self.runs_conceded as f32 / self.balls_bowled as f32 * 6.0;
                rating += ((8.0 - economy) * 0.1).clamp(-0.5, 0.5);
            }
        }

        match team_won {
            Some(true) => rating += 0.3,
            Some(false) => rating -= 0.2,
            None => {}
        }

        rating.clamp(1.0, 10.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BestBowling {
    pub wickets: u32,
    pub runs: u32,
}

impl BestBowling {
    pub fn is_bettered_by(&self, wickets: u32, runs: u32) -> bool {
        wickets > self.wickets || (wickets == self.wickets && runs < self.runs)
    }
}

impl Display for BestBowling {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}/{}", self.wickets, self.runs)
    }
}

/// Career aggregates for one owned player card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerCareerStatistics {
    pub matches_played: u32,
    pub matches_won: u32,
    pub player_of_match: u32,

    pub batting_innings: u32,
    pub batting_runs: u32,
    pub batting_balls: u32,
    pub not_outs: u32,
    pub fours: u32,
    pub sixes: u32,
    pub fifties: u32,
    pub hundreds: u32,
    pub highest_score: u32,
    pub batting_average: f32,
    pub batting_strike_rate: f32,

    pub bowling_innings: u32,
    pub bowling_overs: u32,
    pub bowling_balls: u32,
    pub bowling_runs: u32,
    pub bowling_wickets: u32,
    pub bowling_maidens: u32,
    pub three_wicket_hauls: u32,
    pub five_wicket_hauls: u32,
    pub best_bowling: BestBowling,
    pub bowling_average: f32,
    pub bowling_strike_rate: f32,
    pub bowling_economy: f32,
}

impl PlayerCareerStatistics {
    pub fn record(&mut self, performance: &PlayerMatchPerformance, is_winner: bool) {
        self.matches_played += 1;
        if is_winner {
            self.matches_won += 1;
        }
        if performance.is_potm {
            self.player_of_match += 1;
        }

        if performance.is_batsman {
            self.record_batting(performance);
        }

        if performance.is_bowler {
            self.record_bowling(performance);
        }
    }

    fn record_batting(&mut self, performance: &PlayerMatchPerformance) {
        self.batting_innings += 1;
        self.batting_runs += performance.runs;
        self.batting_balls += performance.balls_faced;
        self.fours += performance.fours;
        self.sixes += performance.sixes;

        if !performance.is_out {
            self.not_outs += 1;
        }

        match performance.runs {
            100.. => self.hundreds += 1,
            50..=99 => self.fifties += 1,
            _ => {}
        }

        self.highest_score = self.highest_score.max(performance.runs);

        let dismissals = self.batting_innings.saturating_sub(self.not_outs);
        self.batting_average = FloatUtils::round2(FloatUtils::guarded_ratio(
            self.batting_runs as f32,
            dismissals as f32,
        ));
        self.batting_strike_rate = FloatUtils::round2(
            FloatUtils::guarded_ratio(self.batting_runs as f32, self.batting_balls as f32) * 100.0,
        );
    }

    fn record_bowling(&mut self, performance: &PlayerMatchPerformance) {
        self.bowling_innings += 1;
        self.bowling_overs += performance.overs_bowled;
        self.bowling_balls += performance.balls_bowled;
        self.bowling_runs += performance.runs_conceded;
        self.bowling_wickets += performance.wickets;
        self.bowling_maidens += performance.maidens;

        match performance.wickets {
            5.. => self.five_wicket_hauls += 1,
            3..=4 => self.three_wicket_hauls += 1,
            _ => {}
        }

        if self
            .best_bowling
            .is_bettered_by(performance.wickets, performance.runs_conceded)
        {
            self.best_bowling = BestBowling {
                wickets: performance.wickets,
                runs: performance.runs_conceded,
            };
        }

        let wickets = self.bowling_wickets as f32;
        self.bowling_average =
            FloatUtils::round2(FloatUtils::guarded_ratio(self.bowling_runs as f32, wickets));
        self.bowling_strike_rate =
            FloatUtils::round2(FloatUtils::guarded_ratio(self.bowling_balls as f32, wickets));
        self.bowling_economy = FloatUtils::round2(
            FloatUtils::guarded_ratio(self.bowling_runs as f32, self.bowling_balls as f32) * 6.0,
        );
    }
}
