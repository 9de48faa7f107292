use crate::club::{DismissalKind, Player, StrategyFocus, Team};
use crate::r#match::MatchPhase;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;
use serde::{Serialize, Serializer};

const DOT_RANGE: (f32, f32) = (0.20, 0.60);
const RUNS_RANGE: (f32, f32) = (0.25, 0.50);
const FOUR_RANGE: (f32, f32) = (0.05, 0.20);
const SIX_RANGE: (f32, f32) = (0.01, 0.15);
const WICKET_RANGE: (f32, f32) = (0.02, 0.15);

const FALLBACK_RUN_WEIGHTS: [f32; 3] = [0.70, 0.25, 0.05];

const ATTRIBUTE_THRESHOLD: u8 = 70;

/// Per-ball outcome distribution. `runs` is the combined 1-3 band; `singles`,
/// `doubles` and `triples` only carry the split inside that band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeProbabilities {
    pub dot: f32,
    pub runs: f32,
    pub four: f32,
    pub six: f32,
    pub wicket: f32,

    pub singles: f32,
    pub doubles: f32,
    pub triples: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Dot,
    Runs(u32),
    Four,
    Six,
    Wicket,
}

impl OutcomeProbabilities {
    pub fn base(skill_diff: f32) -> Self {
        let singles = 0.25;
        let doubles = 0.12;
        let triples = 0.03;

        OutcomeProbabilities {
            dot: 0.40 - skill_diff * 0.003,
            runs: singles + doubles + triples,
            four: 0.10 + skill_diff * 0.002,
            six: 0.05 + skill_diff * 0.002,
            wicket: 0.05 - skill_diff * 0.001,
            singles,
            doubles,
            triples,
        }
    }

    pub fn compute(
        skill_diff: f32,
        phase: MatchPhase,
        batting_focus: StrategyFocus,
        bowling_focus: StrategyFocus,
    ) -> Self {
        let mut probabilities = Self::base(skill_diff);

        probabilities.apply_phase(phase);
        probabilities.apply_batting_focus(batting_focus);
        probabilities.apply_bowling_focus(bowling_focus);
        probabilities.clamp();
        probabilities.normalize();

        probabilities
    }

    pub fn apply_phase(&mut self, phase: MatchPhase) {
        match phase {
            MatchPhase::Powerplay => {
                self.dot -= 0.05;
                self.four += 0.08;
                self.six += 0.02;
                self.wicket += 0.01;
            }
            MatchPhase::MiddleOvers => {
                self.singles += 0.05;
                self.doubles += 0.02;
                self.four -= 0.03;
                self.six -= 0.02;
            }
            MatchPhase::DeathOvers => {
                self.dot -= 0.10;
                self.singles -= 0.05;
                self.four += 0.05;
                self.six += 0.08;
                self.wicket += 0.02;
            }
        }

        self.runs = self.singles + self.doubles + self.triples;
    }

    pub fn apply_batting_focus(&mut self, focus: StrategyFocus) {
        match focus {
            StrategyFocus::Attacking => {
                self.dot -= 0.10;
                self.runs -= 0.05;
                self.four += 0.08;
                self.six += 0.07;
                self.wicket += 0.03;
            }
            StrategyFocus::Defensive => {
                self.dot += 0.10;
                self.runs += 0.05;
                self.four -= 0.05;
                self.six -= 0.05;
                self.wicket -= 0.02;
            }
            _ => {}
        }
    }

    pub fn apply_bowling_focus(&mut self, focus: StrategyFocus) {
        match focus {
            StrategyFocus::WicketTaking => {
                self.wicket += 0.05;
                self.dot -= 0.03;
                self.four += 0.02;
                self.six += 0.01;
            }
            StrategyFocus::Economy => {
                self.wicket -= 0.02;
                self.dot += 0.08;
                self.four -= 0.04;
                self.six -= 0.02;
            }
            _ => {}
        }
    }

    pub fn clamp(&mut self) {
        self.dot = self.dot.clamp(DOT_RANGE.0, DOT_RANGE.1);
        self.runs = self.runs.clamp(RUNS_RANGE.0, RUNS_RANGE.1);
        self.four = self.four.clamp(FOUR_RANGE.0, FOUR_RANGE.1);
        self.six = self.six.clamp(SIX_RANGE.0, SIX_RANGE.1);
        self.wicket = self.wicket.clamp(WICKET_RANGE.0, WICKET_RANGE.1);
    }

    pub fn normalize(&mut self) {
        let total = self.total();
        if total <= 0.0 {
            return;
        }

        self.dot /= total;
        self.runs /= total;
        self.four /= total;
        self.six /= total;
        self.wicket /= total;
    }

    pub fn total(&self) -> f32 {
        self.dot + self.runs + self.four + self.six + self.wicket
    }

    /// Relative weights of 1, 2 and 3 runs inside the runs band.
    pub fn run_weights(&self) -> [f32; 3] {
        let total = self.singles + self.doubles + self.triples;
        if total <= 0.0 {
            return FALLBACK_RUN_WEIGHTS;
        }

        [self.singles / total, self.doubles / total, self.triples / total]
    }

    /// Maps one uniform roll in `[0, 1)` onto the cumulative thresholds
    /// dot, runs, four, six, wicket. A roll inside the runs band is rescaled
    /// to pick 1, 2 or 3 runs.
    pub fn resolve(&self, roll: f32) -> OutcomeKind {
        let mut threshold = self.dot;
        if roll < threshold {
            return OutcomeKind::Dot;
        }

        if roll < threshold + self.runs {
            let position = (roll - threshold) / self.runs.max(f32::EPSILON);
            return OutcomeKind::Runs(self.runs_from_position(position));
        }
        threshold += self.runs;

        threshold += self.four;
        if roll < threshold {
            return OutcomeKind::Four;
        }

        threshold += self.six;
        if roll < threshold {
            return OutcomeKind::Six;
        }

        OutcomeKind::Wicket
    }

    fn runs_from_position(&self, position: f32) -> u32 {
        let [single, double, _] = self.run_weights();

        if position < single {
            1
        } else if position < single + double {
            2
        } else {
            3
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BallOutcome {
    Dot,
    Runs(u32),
    Four,
    Six,
    Wicket {
        kind: DismissalKind,
        fielder: Option<String>,
    },
}

impl BallOutcome {
    pub fn runs(&self) -> u32 {
        match self {
            BallOutcome::Runs(runs) => *runs,
            BallOutcome::Four => 4,
            BallOutcome::Six => 6,
            _ => 0,
        }
    }

    pub fn is_wicket(&self) -> bool {
        matches!(self, BallOutcome::Wicket { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            BallOutcome::Dot => "dot",
            BallOutcome::Runs(_) => "runs",
            BallOutcome::Four => "boundary_4",
            BallOutcome::Six => "boundary_6",
            BallOutcome::Wicket { .. } => "wicket",
        }
    }
}

impl Serialize for BallOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

pub struct BallSampler;

impl BallSampler {
    pub fn batsman_confidence(batsman: &Player) -> f32 {
        let stats = &batsman.statistics;
        (1.0 + stats.runs as f32 / stats.balls_faced.max(1) as f32 * 0.1).min(1.5)
    }

    pub fn batsman_fatigue(batsman: &Player) -> f32 {
        (1.0 - batsman.statistics.balls_faced as f32 * 0.005).max(0.7)
    }

    pub fn bowler_fatigue(bowler: &Player) -> f32 {
        (1.0 - bowler.statistics.consecutive_overs as f32 * 0.05).max(0.8)
    }

    /// Effective batting skill minus effective bowling skill.
    pub fn skill_diff(batsman: &Player, bowler: &Player, batting: &Team, bowling: &Team) -> f32 {
        let batting_skill = batsman.batting_skill()
            * batting.chemistry
            * batting.strategy.batting_aggression
            * Self::batsman_confidence(batsman)
            * Self::batsman_fatigue(batsman);

        let bowling_skill = bowler.bowling_skill()
            * bowling.chemistry
            * bowling.strategy.bowling_aggression
            * Self::bowler_fatigue(bowler);

        batting_skill - bowling_skill
    }

    pub fn probabilities(
        batsman: &Player,
        bowler: &Player,
        batting: &Team,
        bowling: &Team,
        phase: MatchPhase,
    ) -> OutcomeProbabilities {
        OutcomeProbabilities::compute(
            Self::skill_diff(batsman, bowler, batting, bowling),
            phase,
            batting.strategy.batting_focus,
            bowling.strategy.bowling_focus,
        )
    }

    /// Weights in `DismissalKind::ALL` order.
    pub fn dismissal_weights(bowler: &Player) -> [f32; 5] {
        if bowler.bowling.accuracy > ATTRIBUTE_THRESHOLD {
            [0.40, 0.20, 0.30, 0.05, 0.05]
        } else if bowler.bowling.variation > ATTRIBUTE_THRESHOLD {
            [0.20, 0.40, 0.10, 0.15, 0.15]
        } else {
            [0.30, 0.30, 0.20, 0.10, 0.10]
        }
    }

    pub fn dismissal_kind<R: Rng + ?Sized>(rng: &mut R, bowler: &Player) -> DismissalKind {
        WeightedIndex::new(Self::dismissal_weights(bowler))
            .map(|weights| DismissalKind::ALL[weights.sample(rng)])
            .unwrap_or(DismissalKind::ALL[0])
    }

    /// Any bowling-side player other than the bowler. `None` for a one-man attack.
    pub fn fielder<R: Rng + ?Sized>(rng: &mut R, bowling: &Team, bowler_idx: usize) -> Option<String> {
        let fielders: Vec<&Player> = bowling
            .players
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != bowler_idx)
            .map(|(_, player)| player)
            .collect();

        fielders.choose(rng).map(|player| player.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::TeamStrategy;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const PHASES: [MatchPhase; 3] = [
        MatchPhase::Powerplay,
        MatchPhase::MiddleOvers,
        MatchPhase::DeathOvers,
    ];

    const FOCUSES: [StrategyFocus; 5] = [
        StrategyFocus::Balanced,
        StrategyFocus::Attacking,
        StrategyFocus::Defensive,
        StrategyFocus::WicketTaking,
        StrategyFocus::Economy,
    ];

    fn player(id: u32, role: &str, accuracy: u8, variation: u8) -> Player {
        Player::builder()
            .id(id)
            .name(format!("P{}", id))
            .role(role)
            .team("Test")
            .batting_style("Right-handed")
            .bowling_style("Right-arm medium")
            .batting(60, 60, 60)
            .bowling(60, variation, accuracy)
            .build()
            .unwrap()
    }

    fn team(players: Vec<Player>) -> Team {
        let mut team = Team::builder().id(1).name("T").players(players).build().unwrap();
        team.chemistry = 1.0;
        team
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        for skill_diff in [-120.0, -40.0, -5.0, 0.0, 5.0, 40.0, 120.0] {
            for phase in PHASES {
                for batting in FOCUSES {
                    for bowling in FOCUSES {
                        let p = OutcomeProbabilities::compute(skill_diff, phase, batting, bowling);

                        assert!((p.total() - 1.0).abs() < 1e-5);
                        assert!(p.dot > 0.0 && p.runs > 0.0 && p.four > 0.0);
                        assert!(p.six > 0.0 && p.wicket > 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_clamp_bands() {
        let mut p = OutcomeProbabilities::base(500.0);
        p.clamp();

        assert_eq!(p.dot, 0.20);
        assert_eq!(p.four, 0.20);
        assert_eq!(p.six, 0.15);
        assert_eq!(p.wicket, 0.02);

        let mut p = OutcomeProbabilities::base(-500.0);
        p.clamp();

        assert_eq!(p.dot, 0.60);
        assert_eq!(p.four, 0.05);
        assert_eq!(p.six, 0.01);
        assert_eq!(p.wicket, 0.15);
    }

    #[test]
    fn test_phase_deltas() {
        let mut middle = OutcomeProbabilities::base(0.0);
        middle.apply_phase(MatchPhase::MiddleOvers);
        assert!((middle.runs - 0.47).abs() < 1e-6);
        assert!((middle.four - 0.07).abs() < 1e-6);

        let mut death = OutcomeProbabilities::base(0.0);
        death.apply_phase(MatchPhase::DeathOvers);
        assert!((death.runs - 0.35).abs() < 1e-6);
        assert!((death.dot - 0.30).abs() < 1e-6);
        assert!((death.six - 0.13).abs() < 1e-6);
    }

    #[test]
    fn test_focus_applied_after_phase() {
        let mut p = OutcomeProbabilities::base(0.0);
        p.apply_phase(MatchPhase::DeathOvers);
        p.apply_batting_focus(StrategyFocus::Attacking);

        assert!((p.runs - 0.30).abs() < 1e-6);
        assert!((p.dot - 0.20).abs() < 1e-6);
    }

    #[test]
    fn test_resolve_thresholds() {
        let p = OutcomeProbabilities::compute(
            0.0,
            MatchPhase::MiddleOvers,
            StrategyFocus::Balanced,
            StrategyFocus::Balanced,
        );

        assert_eq!(p.resolve(0.0), OutcomeKind::Dot);
        assert_eq!(p.resolve(p.dot + 0.0001), OutcomeKind::Runs(1));
        assert_eq!(p.resolve(p.dot + p.runs * 0.999), OutcomeKind::Runs(3));
        assert_eq!(p.resolve(p.dot + p.runs + 0.0001), OutcomeKind::Four);
        assert_eq!(p.resolve(p.dot + p.runs + p.four + 0.0001), OutcomeKind::Six);
        assert_eq!(p.resolve(0.99999), OutcomeKind::Wicket);
    }

    #[test]
    fn test_run_weights_follow_phase() {
        let mut p = OutcomeProbabilities::base(0.0);
        p.apply_phase(MatchPhase::MiddleOvers);
        let [single, double, triple] = p.run_weights();

        assert!((single + double + triple - 1.0).abs() < 1e-6);
        assert!((single - 0.30 / 0.47).abs() < 1e-6);
        assert!(single > double && double > triple);
    }

    #[test]
    fn test_run_weights_fallback() {
        let mut p = OutcomeProbabilities::base(0.0);
        p.singles = 0.0;
        p.doubles = 0.0;
        p.triples = 0.0;

        assert_eq!(p.run_weights(), [0.70, 0.25, 0.05]);
    }

    #[test]
    fn test_fatigue_and_confidence_bounds() {
        let mut batsman = player(1, "Batsman", 50, 50);
        assert_eq!(BallSampler::batsman_confidence(&batsman), 1.0);
        assert_eq!(BallSampler::batsman_fatigue(&batsman), 1.0);

        batsman.statistics.runs = 300;
        batsman.statistics.balls_faced = 80;
        assert_eq!(BallSampler::batsman_confidence(&batsman), 1.375);
        assert_eq!(BallSampler::batsman_fatigue(&batsman), 0.7);

        batsman.statistics.balls_faced = 20;
        assert_eq!(BallSampler::batsman_confidence(&batsman), 1.5);

        let mut bowler = player(2, "Bowler", 50, 50);
        bowler.statistics.consecutive_overs = 2;
        assert!((BallSampler::bowler_fatigue(&bowler) - 0.9).abs() < 1e-6);
        bowler.statistics.consecutive_overs = 10;
        assert_eq!(BallSampler::bowler_fatigue(&bowler), 0.8);
    }

    #[test]
    fn test_skill_diff_uses_strategy() {
        let batsman = player(1, "Batsman", 60, 60);
        let bowler = player(2, "Bowler", 60, 60);
        let mut batting = team(vec![batsman.clone()]);
        let bowling = team(vec![bowler.clone()]);

        assert_eq!(BallSampler::skill_diff(&batsman, &bowler, &batting, &bowling), 0.0);

        batting.strategy = TeamStrategy::aggressive();
        let diff = BallSampler::skill_diff(&batsman, &bowler, &batting, &bowling);
        assert!((diff - 18.0).abs() < 1e-3);
    }

    #[test]
    fn test_dismissal_weights() {
        assert_eq!(
            BallSampler::dismissal_weights(&player(1, "Bowler", 80, 80)),
            [0.40, 0.20, 0.30, 0.05, 0.05]
        );
        assert_eq!(
            BallSampler::dismissal_weights(&player(1, "Bowler", 60, 80)),
            [0.20, 0.40, 0.10, 0.15, 0.15]
        );
        assert_eq!(
            BallSampler::dismissal_weights(&player(1, "Bowler", 70, 70)),
            [0.30, 0.30, 0.20, 0.10, 0.10]
        );
    }

    #[test]
    fn test_dismissal_kind_follows_weights() {
        let bowler = player(1, "Bowler", 80, 80);
        let mut rng = StdRng::seed_from_u64(9);
        let mut counts = [0u32; 5];

        for _ in 0..5000 {
            let kind = BallSampler::dismissal_kind(&mut rng, &bowler);
            let idx = DismissalKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[idx] += 1;
        }

        assert!(counts.iter().all(|count| *count > 0));
        assert!(counts[0] > counts[1]);
        assert!(counts[2] > counts[3] + counts[4]);
    }

    #[test]
    fn test_fielder_never_bowler() {
        let bowling = team(vec![player(1, "Bowler", 50, 50), player(2, "Batsman", 50, 50)]);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            assert_eq!(BallSampler::fielder(&mut rng, &bowling, 0).as_deref(), Some("P2"));
        }

        let lone = team(vec![player(1, "Bowler", 50, 50)]);
        assert_eq!(BallSampler::fielder(&mut rng, &lone, 0), None);
    }

    #[test]
    fn test_ball_outcome_names() {
        assert_eq!(BallOutcome::Four.runs(), 4);
        assert_eq!(BallOutcome::Runs(3).name(), "runs");
        assert_eq!(BallOutcome::Six.name(), "boundary_6");
        assert!(BallOutcome::Wicket { kind: DismissalKind::Lbw, fielder: None }.is_wicket());
    }
}
