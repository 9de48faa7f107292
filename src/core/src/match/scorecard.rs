use crate::club::{DismissalKind, Player};
use crate::utils::FloatUtils;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterCard {
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f32,
    pub is_out: bool,
    pub out_method: Option<DismissalKind>,
    pub bowler: Option<String>,
    pub fielder: Option<String>,
    pub is_batting: bool,
}

impl BatterCard {
    pub fn from_player(player: &Player, is_batting: bool) -> Self {
        let stats = &player.statistics;
        let dismissal = stats.dismissal.as_ref();

        BatterCard {
            name: player.name.clone(),
            runs: stats.runs,
            balls: stats.balls_faced,
            fours: stats.fours,
            sixes: stats.sixes,
            strike_rate: stats.strike_rate,
            is_out: stats.is_out,
            out_method: dismissal.map(|d| d.kind),
            bowler: dismissal.map(|d| d.bowler.clone()),
            fielder: dismissal.and_then(|d| d.fielder.clone()),
            is_batting: is_batting && !stats.is_out,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlerCard {
    pub name: String,
    pub overs: u32,
    pub balls: u32,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f32,
    pub is_bowling: bool,
}

impl BowlerCard {
    pub fn from_player(player: &Player, is_bowling: bool) -> Self {
        let stats = &player.statistics;

        BowlerCard {
            name: player.name.clone(),
            overs: stats.overs_bowled,
            balls: stats.balls_bowled,
            maidens: stats.maidens,
            runs: stats.runs_conceded,
            wickets: stats.wickets,
            economy: stats.economy(),
            is_bowling,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartnershipCard {
    pub runs: u32,
    pub balls: u32,
    pub run_rate: f32,
}

impl PartnershipCard {
    pub fn new(runs: u32, balls: u32) -> Self {
        PartnershipCard {
            runs,
            balls,
            run_rate: FloatUtils::round2(FloatUtils::guarded_ratio(runs as f32, balls as f32) * 6.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallOfWicket {
    pub score: u32,
    pub wicket: u32,
    pub overs: String,
    pub player_out: String,
    pub bowler: String,
    pub dismissal_type: DismissalKind,
    pub partnership: u32,
    pub partnership_balls: u32,
}

/// Snapshot of the innings in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scorecard {
    pub innings: u8,
    pub batting_team: String,
    pub bowling_team: String,
    pub score: u32,
    pub wickets: u32,
    pub overs: String,
    pub required_run_rate: f32,
    pub current_run_rate: f32,
    pub target: Option<u32>,
    pub batsmen: Vec<BatterCard>,
    pub bowlers: Vec<BowlerCard>,
    pub current_batsmen: Vec<BatterCard>,
    pub current_bowler: Option<BowlerCard>,
    pub current_partnership: PartnershipCard,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub detailed: bool,
}

impl Scorecard {
    /// Runs per six legal balls, with at least one over in the denominator.
    pub fn current_run_rate(score: u32, balls: u32) -> f32 {
        FloatUtils::round2(FloatUtils::guarded_ratio(score as f32, balls as f32 / 6.0))
    }

    pub fn required_run_rate(target: Option<u32>, score: u32, balls_left: u32) -> f32 {
        match target {
            Some(target) => FloatUtils::round2(FloatUtils::guarded_ratio(
                target.saturating_sub(score) as f32,
                balls_left as f32 / 6.0,
            )),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::builder()
            .id(1)
            .name("Babar Azam")
            .role("Batsman")
            .team("Pakistan")
            .batting_style("Right-handed")
            .bowling_style("Right-arm offbreak")
            .build()
            .unwrap()
    }

    #[test]
    fn test_run_rates() {
        assert_eq!(Scorecard::current_run_rate(45, 36), 7.5);
        assert_eq!(Scorecard::current_run_rate(4, 2), 4.0);
        assert_eq!(Scorecard::current_run_rate(0, 0), 0.0);

        assert_eq!(Scorecard::required_run_rate(Some(121), 60, 60), 6.1);
        assert_eq!(Scorecard::required_run_rate(Some(50), 30, 3), 20.0);
        assert_eq!(Scorecard::required_run_rate(Some(50), 60, 6), 0.0);
        assert_eq!(Scorecard::required_run_rate(None, 60, 60), 0.0);
    }

    #[test]
    fn test_partnership_rate() {
        assert_eq!(PartnershipCard::new(0, 0).run_rate, 0.0);
        assert_eq!(PartnershipCard::new(10, 4).run_rate, 15.0);
    }

    #[test]
    fn test_batter_card_dismissal() {
        let mut player = player();
        player.add_ball();
        player.add_runs(4);
        player.dismiss(DismissalKind::Stumped, "Rashid", Some("Gurbaz".to_string()));

        let card = BatterCard::from_player(&player, true);

        assert!(card.is_out);
        assert!(!card.is_batting);
        assert_eq!(card.out_method, Some(DismissalKind::Stumped));
        assert_eq!(card.bowler.as_deref(), Some("Rashid"));
        assert_eq!(card.fielder.as_deref(), Some("Gurbaz"));
        assert_eq!(card.strike_rate, 400.0);
    }

    #[test]
    fn test_bowler_card_economy() {
        let mut player = player();
        player.statistics.balls_bowled = 18;
        player.statistics.runs_conceded = 25;
        player.statistics.overs_bowled = 3;

        let card = BowlerCard::from_player(&player, false);

        assert_eq!(card.overs, 3);
        assert_eq!(card.economy, 8.33);
    }
}
