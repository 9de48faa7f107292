use crate::club::{Player, PlayerMatchPerformance, Team, TeamChemistry};
use crate::error::MatchError;
use crate::r#match::{
    BallEvent, BallOutcome, BallSampler, BatterCard, BowlerCard, Commentary, FallOfWicket,
    InningsSummary, MatchConfig, MatchEvent, MatchPhase, MatchResult, MatchSink, MatchState,
    NoopSink, OutcomeKind, PartnershipCard, RewardRanges, Scorecard, StateManager,
};
use crate::utils::format_overs;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::thread;

const MAX_WICKETS: u32 = 10;
const BALLS_PER_OVER: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }

    /// `(batting, bowling)` when `self` is the batting side.
    pub fn split<'a>(self, team1: &'a mut Team, team2: &'a mut Team) -> (&'a mut Team, &'a mut Team) {
        match self {
            Side::Team1 => (team1, team2),
            Side::Team2 => (team2, team1),
        }
    }
}

/// One two-innings match. Owns both rosters for its lifetime; hydrate fresh
/// teams for every match that may run concurrently.
pub struct CricketMatch<S: MatchSink = NoopSink> {
    pub team1: Team,
    pub team2: Team,
    pub config: MatchConfig,

    sink: S,
    rng: StdRng,

    state: MatchState,
    current_innings: u8,
    batting_side: Side,
    current_batsmen: Vec<usize>,
    current_bowler: Option<usize>,
    target: Option<u32>,
    partnership_runs: u32,
    partnership_balls: u32,
    fall_of_wickets: Vec<FallOfWicket>,

    team1_innings: Option<InningsSummary>,
    team2_innings: Option<InningsSummary>,
    result_sent: bool,
}

impl CricketMatch<NoopSink> {
    pub fn new(team1: Team, team2: Team, config: MatchConfig) -> Self {
        Self::with_sink(team1, team2, config, NoopSink)
    }
}

impl<S: MatchSink> CricketMatch<S> {
    pub fn with_sink(team1: Team, team2: Team, config: MatchConfig, sink: S) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);

        CricketMatch {
            team1,
            team2,
            config,
            sink,
            rng: StdRng::seed_from_u64(seed),
            state: MatchState::NotStarted,
            current_innings: 0,
            batting_side: Side::Team1,
            current_batsmen: Vec::with_capacity(2),
            current_bowler: None,
            target: None,
            partnership_runs: 0,
            partnership_balls: 0,
            fall_of_wickets: Vec::new(),
            team1_innings: None,
            team2_innings: None,
            result_sent: false,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn current_innings(&self) -> u8 {
        self.current_innings
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn batting_team(&self) -> &Team {
        match self.batting_side {
            Side::Team1 => &self.team1,
            Side::Team2 => &self.team2,
        }
    }

    pub fn bowling_team(&self) -> &Team {
        match self.batting_side {
            Side::Team1 => &self.team2,
            Side::Team2 => &self.team1,
        }
    }

    fn batting_team_mut(&mut self) -> &mut Team {
        match self.batting_side {
            Side::Team1 => &mut self.team1,
            Side::Team2 => &mut self.team2,
        }
    }

    fn bowling_team_mut(&mut self) -> &mut Team {
        match self.batting_side {
            Side::Team1 => &mut self.team2,
            Side::Team2 => &mut self.team1,
        }
    }

    pub fn current_batsmen(&self) -> Vec<&Player> {
        let batting = self.batting_team();

        self.current_batsmen
            .iter()
            .filter_map(|idx| batting.players.get(*idx))
            .collect()
    }

    pub fn current_bowler(&self) -> Option<&Player> {
        self.current_bowler
            .and_then(|idx| self.bowling_team().players.get(idx))
    }

    pub fn fall_of_wickets(&self) -> &[FallOfWicket] {
        &self.fall_of_wickets
    }

    pub fn innings_summary(&self, side: Side) -> Option<&InningsSummary> {
        match side {
            Side::Team1 => self.team1_innings.as_ref(),
            Side::Team2 => self.team2_innings.as_ref(),
        }
    }

    pub fn reset_match_stats(&mut self) {
        self.team1.reset_match_stats();
        self.team2.reset_match_stats();

        self.state = MatchState::NotStarted;
        self.current_innings = 0;
        self.batting_side = Side::Team1;
        self.current_batsmen.clear();
        self.current_bowler = None;
        self.target = None;
        self.partnership_runs = 0;
        self.partnership_balls = 0;
        self.fall_of_wickets.clear();
        self.team1_innings = None;
        self.team2_innings = None;
        self.result_sent = false;
    }

    pub fn get_match_phase(&self, over: u32) -> MatchPhase {
        MatchPhase::from_over(over, self.config.total_overs)
    }

    /// Openers come from the top of the batting order; the first bowling
    /// option (or anyone, for a side without bowlers) takes the new ball.
    pub fn setup_innings(&mut self, batting_side: Side, innings: u8) {
        self.current_innings = innings;
        self.batting_side = batting_side;
        self.partnership_runs = 0;
        self.partnership_balls = 0;
        self.fall_of_wickets.clear();

        self.current_batsmen = self
            .batting_team()
            .batting_order_indices()
            .into_iter()
            .take(2)
            .collect();

        let bowling = self.bowling_team();
        let opener = bowling
            .bowling_order_indices()
            .first()
            .copied()
            .or_else(|| (!bowling.players.is_empty()).then_some(0));
        self.current_bowler = opener;

        for player in self.bowling_team_mut().players.iter_mut() {
            player.statistics.consecutive_overs = 0;
        }

        debug!(
            "innings {}: {} batting, {} bowling",
            innings,
            self.batting_team().name,
            self.bowling_team().name
        );
    }

    /// Samples one delivery to the striker and applies it to the batsman's
    /// figures. Team, partnership and bowler totals are applied by the innings loop.
    pub fn simulate_ball(&mut self) -> Result<BallEvent, MatchError> {
        let striker = match self.current_batsmen.first() {
            Some(idx) if *idx < self.batting_team().players.len() => *idx,
            _ => {
                return Err(MatchError::NoBatsmanAvailable {
                    team: self.batting_team().name.clone(),
                });
            }
        };

        let bowler_idx = match self.current_bowler {
            Some(idx) if idx < self.bowling_team().players.len() => idx,
            _ => {
                return Err(MatchError::NoBowlerAvailable {
                    team: self.bowling_team().name.clone(),
                });
            }
        };

        let phase = self.get_match_phase(self.batting_team().balls / BALLS_PER_OVER);

        let (batting, bowling) = self.batting_side.split(&mut self.team1, &mut self.team2);
        let rng = &mut self.rng;

        let bowler = &bowling.players[bowler_idx];
        let probabilities =
            BallSampler::probabilities(&batting.players[striker], bowler, batting, bowling, phase);

        let roll: f32 = rng.random();

        let outcome = match probabilities.resolve(roll) {
            OutcomeKind::Dot => BallOutcome::Dot,
            OutcomeKind::Runs(runs) => BallOutcome::Runs(runs),
            OutcomeKind::Four => BallOutcome::Four,
            OutcomeKind::Six => BallOutcome::Six,
            OutcomeKind::Wicket => {
                let kind = BallSampler::dismissal_kind(rng, bowler);
                let fielder = if kind.involves_fielder() {
                    BallSampler::fielder(rng, bowling, bowler_idx)
                } else {
                    None
                };

                BallOutcome::Wicket { kind, fielder }
            }
        };

        let bowler_name = bowler.name.clone();
        let batsman = &mut batting.players[striker];

        batsman.add_ball();

        match &outcome {
            BallOutcome::Wicket { kind, fielder } => {
                batsman.dismiss(*kind, &bowler_name, fielder.clone())
            }
            BallOutcome::Dot => {}
            scoring => batsman.add_runs(scoring.runs()),
        }

        let commentary = Commentary::for_outcome(rng, &outcome, &batsman.name, &bowler_name);

        Ok(BallEvent::new(outcome, &batsman.name, &bowler_name, commentary))
    }

    pub fn simulate_innings(&mut self, target: Option<u32>) {
        self.target = target;

        if self.batting_team().players.is_empty()
            || self.bowling_team().players.is_empty()
            || self.current_batsmen.is_empty()
            || self.current_bowler.is_none()
        {
            let message = format!(
                "not enough players for innings {}: {} ({}) v {} ({})",
                self.current_innings,
                self.batting_team().name,
                self.batting_team().players.len(),
                self.bowling_team().name,
                self.bowling_team().players.len()
            );
            warn!("{}", message);
            self.emit(MatchEvent::Error { message });
            return;
        }

        self.emit_scorecard(false);

        let mut innings_over = false;

        for over in 0..self.config.total_overs {
            self.batting_team_mut().overs = over;

            if over > 0 {
                self.rotate_bowler();
            }

            let Some(bowler_idx) = self.current_bowler else {
                break;
            };

            let (bowler_name, over_start_runs) = {
                let bowler = &self.bowling_team().players[bowler_idx];
                (bowler.name.clone(), bowler.statistics.runs_conceded)
            };

            self.emit(MatchEvent::OverStart {
                innings: self.current_innings,
                over: over + 1,
                bowler: bowler_name.clone(),
                commentary: Commentary::over_start(over + 1, &bowler_name),
            });

            let mut balls_in_over = 0;

            for ball in 1..=BALLS_PER_OVER {
                let mut event = match self.simulate_ball() {
                    Ok(event) => event,
                    Err(error) => {
                        warn!("innings {} stopped: {}", self.current_innings, error);
                        self.emit(MatchEvent::Error {
                            message: error.to_string(),
                        });
                        innings_over = true;
                        break;
                    }
                };

                balls_in_over += 1;

                let runs = event.runs;
                let is_wicket = event.outcome.is_wicket();

                let (score, wickets, balls) = {
                    let (batting, bowling) =
                        self.batting_side.split(&mut self.team1, &mut self.team2);

                    batting.balls += 1;
                    batting.score += runs;

                    let bowler = &mut bowling.players[bowler_idx].statistics;
                    bowler.balls_bowled += 1;
                    bowler.runs_conceded += runs;

                    if is_wicket {
                        batting.wickets += 1;
                        bowler.wickets += 1;
                    }

                    (batting.score, batting.wickets, batting.balls)
                };

                self.partnership_runs += runs;
                self.partnership_balls += 1;

                event.innings = self.current_innings;
                event.over = over;
                event.ball = ball;
                event.score = format!("{}/{}", score, wickets);
                event.overs = format_overs(balls);

                if let Some(target) = target {
                    event.target = Some(target);
                    event.needed = Some(target.saturating_sub(score));
                    event.balls_left = Some(self.config.total_balls().saturating_sub(balls));
                }

                let player_out = event.batsman.clone();
                let dismissal = event.dismissal;

                self.emit(MatchEvent::Ball(event));

                if is_wicket {
                    if let Some(dismissal_type) = dismissal {
                        debug!(
                            "wicket: {} {} b {} at {}/{}",
                            player_out, dismissal_type, bowler_name, score, wickets
                        );

                        self.fall_of_wickets.push(FallOfWicket {
                            score,
                            wicket: wickets,
                            overs: format_overs(balls),
                            player_out,
                            bowler: bowler_name.clone(),
                            dismissal_type,
                            partnership: self.partnership_runs,
                            partnership_balls: self.partnership_balls,
                        });
                    }

                    if wickets >= MAX_WICKETS || !self.replace_dismissed_batsman() {
                        let team = self.batting_team().name.clone();
                        self.emit(MatchEvent::AllOut {
                            commentary: format!(
                                "{} are all out for {} in {} overs!",
                                team,
                                score,
                                format_overs(balls)
                            ),
                            team,
                            score,
                            overs: format_overs(balls),
                        });
                        innings_over = true;
                        break;
                    }

                    self.partnership_runs = 0;
                    self.partnership_balls = 0;
                } else if runs % 2 == 1 {
                    self.swap_strike();
                }

                if let Some(target) = target
                    && score >= target
                {
                    let team = self.batting_team().name.clone();
                    let balls_left = self.config.total_balls().saturating_sub(balls);
                    self.emit(MatchEvent::TargetReached {
                        commentary: format!(
                            "{} reached the target of {} with {} wickets and {} balls remaining!",
                            team,
                            target,
                            MAX_WICKETS.saturating_sub(wickets),
                            balls_left
                        ),
                        team,
                        score,
                        wickets,
                        overs: format_overs(balls),
                    });
                    innings_over = true;
                    break;
                }

                if !self.config.delay_between_balls.is_zero() {
                    thread::sleep(self.config.delay_between_balls);
                }
            }

            if balls_in_over == BALLS_PER_OVER {
                let bowler = &mut self.bowling_team_mut().players[bowler_idx].statistics;
                bowler.overs_bowled += 1;
                if bowler.runs_conceded == over_start_runs {
                    bowler.maidens += 1;
                }
            }

            if let Some(detailed) = self.config.scorecard_due(over) {
                self.emit_scorecard(detailed);
            }

            if innings_over {
                break;
            }

            self.swap_strike();
        }

        let batting = self.batting_team_mut();
        batting.overs = batting.balls / BALLS_PER_OVER;

        debug!(
            "innings {} complete: {} {}/{} ({} overs)",
            self.current_innings,
            self.batting_team().name,
            self.batting_team().score,
            self.batting_team().wickets,
            self.batting_team().overs_display()
        );
    }

    pub fn simulate_match(&mut self) -> MatchResult {
        self.reset_match_stats();
        self.team1.calculate_chemistry();
        self.team2.calculate_chemistry();

        info!(
            "match {} started: {} v {} ({} overs)",
            self.config.match_id.as_deref().unwrap_or("-"),
            self.team1.name,
            self.team2.name,
            self.config.total_overs
        );

        let mut state_manager = StateManager::new();

        while let Some(state) = state_manager.next() {
            self.state = state;
            self.play_state(state);
            StateManager::handle_state_finish(self, state);
        }

        self.complete_match()
    }

    fn play_state(&mut self, state: MatchState) {
        match state {
            MatchState::FirstInnings => {
                self.setup_innings(Side::Team1, 1);
                self.emit_match_start();
                self.simulate_innings(None);
            }
            MatchState::InningsBreak => {
                let summary = self
                    .team1_innings
                    .clone()
                    .unwrap_or_else(|| InningsSummary::from_team(&self.team1, Vec::new()));

                self.emit(MatchEvent::InningsBreak {
                    commentary: format!(
                        "End of {}'s innings! They scored {}/{} in {} overs.",
                        summary.team, summary.score, summary.wickets, summary.overs
                    ),
                    team: summary.team,
                    score: summary.score,
                    wickets: summary.wickets,
                    overs: summary.overs,
                });
            }
            MatchState::SecondInnings => {
                self.setup_innings(Side::Team2, 2);

                let first_innings_score = self
                    .team1_innings
                    .as_ref()
                    .map_or(self.team1.score, |summary| summary.score);
                let target = first_innings_score + 1;

                self.emit(MatchEvent::InningsStart {
                    team: self.team2.name.clone(),
                    target,
                    commentary: format!(
                        "{} need {} runs from {} overs to win.",
                        self.team2.name, target, self.config.total_overs
                    ),
                });

                self.simulate_innings(Some(target));
            }
            MatchState::NotStarted | MatchState::Complete => {}
        }
    }

    /// Freezes the figures of `side` once its innings is over.
    pub fn record_innings(&mut self, side: Side) {
        let team = match side {
            Side::Team1 => &self.team1,
            Side::Team2 => &self.team2,
        };

        let summary = InningsSummary::from_team(team, self.fall_of_wickets.clone());

        match side {
            Side::Team1 => self.team1_innings = Some(summary),
            Side::Team2 => self.team2_innings = Some(summary),
        }
    }

    pub fn get_match_result(&self) -> MatchResult {
        let first = self
            .team1_innings
            .clone()
            .unwrap_or_else(|| InningsSummary::from_team(&self.team1, Vec::new()));
        let second = self
            .team2_innings
            .clone()
            .unwrap_or_else(|| InningsSummary::from_team(&self.team2, Vec::new()));

        let mut result = MatchResult::decide(&self.team1, &self.team2, &first, &second);
        result.match_id = self.config.match_id.clone();
        result.match_type = self.config.match_type.clone();

        result
    }

    /// Draws rewards and notifies `match_end`. The sink hears about a given
    /// simulation once, however often this is called.
    pub fn complete_match(&mut self) -> MatchResult {
        let mut result = self.get_match_result();

        let (team1_reward, team2_reward) =
            RewardRanges::default().draw(&mut self.rng, result.result_type);
        result.team1_reward = team1_reward;
        result.team2_reward = team2_reward;

        let (team1, team2) = self.performances();
        result.player_of_the_match = team1
            .iter()
            .chain(team2.iter())
            .find(|performance| performance.is_potm)
            .map(|performance| performance.name.clone());

        self.state = MatchState::Complete;

        if !self.result_sent {
            self.result_sent = true;
            info!(
                "match {} complete: {}",
                result.match_id.as_deref().unwrap_or("-"),
                result.summary()
            );
            self.sink.match_end(&result);
        }

        result
    }

    /// Per-player figures for both sides, with the best-rated player flagged.
    pub fn performances(&self) -> (Vec<PlayerMatchPerformance>, Vec<PlayerMatchPerformance>) {
        let winner = self.get_match_result().result_type.winner();
        let won = |side: Side| winner.map(|winner| winner == side);

        let mut team1: Vec<PlayerMatchPerformance> =
            self.team1.players.iter().map(Player::performance).collect();
        let mut team2: Vec<PlayerMatchPerformance> =
            self.team2.players.iter().map(Player::performance).collect();

        let best = team1
            .iter()
            .enumerate()
            .map(|(idx, p)| (Side::Team1, idx, p.match_rating(won(Side::Team1))))
            .chain(
                team2
                    .iter()
                    .enumerate()
                    .map(|(idx, p)| (Side::Team2, idx, p.match_rating(won(Side::Team2)))),
            )
            .fold(None, |best: Option<(Side, usize, f32)>, candidate| match best {
                Some(current) if current.2 >= candidate.2 => Some(current),
                _ => Some(candidate),
            });

        if let Some((side, idx, _)) = best {
            match side {
                Side::Team1 => team1[idx].is_potm = true,
                Side::Team2 => team2[idx].is_potm = true,
            }
        }

        (team1, team2)
    }

    pub fn scorecard(&self, detailed: bool) -> Scorecard {
        let batting = self.batting_team();
        let bowling = self.bowling_team();

        let active: Vec<usize> = self
            .current_batsmen
            .iter()
            .copied()
            .filter(|idx| batting.players.get(*idx).is_some_and(|p| !p.is_out()))
            .collect();

        let batsmen = batting
            .players
            .iter()
            .enumerate()
            .filter(|(idx, p)| p.statistics.balls_faced > 0 || active.contains(idx))
            .map(|(idx, p)| BatterCard::from_player(p, active.contains(&idx)))
            .collect();

        let bowlers = bowling
            .players
            .iter()
            .enumerate()
            .filter(|(idx, p)| p.statistics.balls_bowled > 0 || self.current_bowler == Some(*idx))
            .map(|(idx, p)| BowlerCard::from_player(p, self.current_bowler == Some(idx)))
            .collect();

        let balls_left = self.config.total_balls().saturating_sub(batting.balls);

        Scorecard {
            innings: self.current_innings,
            batting_team: batting.name.clone(),
            bowling_team: bowling.name.clone(),
            score: batting.score,
            wickets: batting.wickets,
            overs: format_overs(batting.balls),
            required_run_rate: Scorecard::required_run_rate(self.target, batting.score, balls_left),
            current_run_rate: Scorecard::current_run_rate(batting.score, batting.balls),
            target: self.target,
            batsmen,
            bowlers,
            current_batsmen: active
                .iter()
                .map(|idx| BatterCard::from_player(&batting.players[*idx], true))
                .collect(),
            current_bowler: self.current_bowler().map(|p| BowlerCard::from_player(p, true)),
            current_partnership: PartnershipCard::new(self.partnership_runs, self.partnership_balls),
            fall_of_wickets: self.fall_of_wickets.clone(),
            detailed,
        }
    }

    fn rotate_bowler(&mut self) {
        let previous = self.current_bowler;
        let bowling = self.bowling_team();

        let mut candidates: Vec<usize> = bowling
            .players
            .iter()
            .enumerate()
            .filter(|(idx, p)| p.role.is_bowling_option() && Some(*idx) != previous)
            .map(|(idx, _)| idx)
            .collect();

        if candidates.is_empty() {
            candidates = (0..bowling.players.len())
                .filter(|idx| Some(*idx) != previous)
                .collect();
        }

        let next = candidates
            .choose(&mut self.rng)
            .copied()
            .or(previous);

        if let Some(next) = next {
            let stats = &mut self.bowling_team_mut().players[next].statistics;
            stats.consecutive_overs = if Some(next) == previous {
                stats.consecutive_overs + 1
            } else {
                0
            };
        }

        self.current_bowler = next;
    }

    /// Sends in the next unused batsman. `false` when nobody is left.
    fn replace_dismissed_batsman(&mut self) -> bool {
        let batting = self.batting_team();
        let order = batting.batting_order_indices();

        let out_slot = self
            .current_batsmen
            .iter()
            .position(|idx| batting.players[*idx].is_out());

        let next = order.iter().enumerate().find(|(_, idx)| {
            !batting.players[**idx].is_out() && !self.current_batsmen.contains(*idx)
        });

        let (Some(slot), Some((position, &incoming))) = (out_slot, next) else {
            return false;
        };

        let name = batting.players[incoming].name.clone();
        self.current_batsmen[slot] = incoming;

        self.emit(MatchEvent::NewBatsman {
            commentary: Commentary::new_batsman(&name, position + 1),
            batsman: name,
            position: position + 1,
        });

        true
    }

    fn swap_strike(&mut self) {
        if self.current_batsmen.len() == 2 {
            self.current_batsmen.swap(0, 1);
        }
    }

    fn emit(&mut self, event: MatchEvent) {
        self.sink.send_message(&event);
    }

    fn emit_scorecard(&mut self, detailed: bool) {
        let scorecard = self.scorecard(detailed);
        self.sink.update_scorecard(&scorecard);
    }

    fn emit_match_start(&mut self) {
        let (team1, team2) = (&self.team1, &self.team2);

        let event = MatchEvent::MatchStart {
            team1: team1.name.clone(),
            team2: team2.name.clone(),
            overs: self.config.total_overs,
            team1_chemistry: team1.chemistry,
            team2_chemistry: team2.chemistry,
            team1_chemistry_rating: team1.chemistry_rating(),
            team2_chemistry_rating: team2.chemistry_rating(),
            commentary: format!(
                "Welcome to the match between {} and {}! {} will bat first.\n\n{}",
                team1.name,
                team2.name,
                team1.name,
                TeamChemistry::commentary(&team1.name, team1.chemistry, &team2.name, team2.chemistry)
            ),
        };

        self.emit(event);
    }
}
