use crate::club::{ChemistryRating, DismissalKind};
use crate::r#match::{BallOutcome, MatchResult, Scorecard};
use serde::Serialize;

/// One delivery, enriched with the running score once the innings loop has applied it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallEvent {
    pub innings: u8,
    /// 0-indexed over and 1-indexed ball within it.
    pub over: u32,
    pub ball: u32,
    pub outcome: BallOutcome,
    pub runs: u32,
    pub batsman: String,
    pub bowler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissal: Option<DismissalKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fielder: Option<String>,
    pub commentary: String,

    pub score: String,
    pub overs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balls_left: Option<u32>,
}

impl BallEvent {
    pub fn new(outcome: BallOutcome, batsman: &str, bowler: &str, commentary: String) -> Self {
        let (dismissal, fielder) = match &outcome {
            BallOutcome::Wicket { kind, fielder } => (Some(*kind), fielder.clone()),
            _ => (None, None),
        };

        BallEvent {
            innings: 0,
            over: 0,
            ball: 0,
            runs: outcome.runs(),
            outcome,
            batsman: batsman.to_string(),
            bowler: bowler.to_string(),
            dismissal,
            fielder,
            commentary,
            score: String::new(),
            overs: String::new(),
            target: None,
            needed: None,
            balls_left: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    MatchStart {
        team1: String,
        team2: String,
        overs: u32,
        team1_chemistry: f32,
        team2_chemistry: f32,
        team1_chemistry_rating: ChemistryRating,
        team2_chemistry_rating: ChemistryRating,
        commentary: String,
    },
    OverStart {
        innings: u8,
        over: u32,
        bowler: String,
        commentary: String,
    },
    Ball(BallEvent),
    NewBatsman {
        batsman: String,
        position: usize,
        commentary: String,
    },
    AllOut {
        team: String,
        score: u32,
        overs: String,
        commentary: String,
    },
    TargetReached {
        team: String,
        score: u32,
        wickets: u32,
        overs: String,
        commentary: String,
    },
    InningsBreak {
        team: String,
        score: u32,
        wickets: u32,
        overs: String,
        commentary: String,
    },
    InningsStart {
        team: String,
        target: u32,
        commentary: String,
    },
    Error {
        message: String,
    },
}

impl MatchEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::MatchStart { .. } => "match_start",
            MatchEvent::OverStart { .. } => "over_start",
            MatchEvent::Ball(_) => "ball",
            MatchEvent::NewBatsman { .. } => "new_batsman",
            MatchEvent::AllOut { .. } => "all_out",
            MatchEvent::TargetReached { .. } => "target_reached",
            MatchEvent::InningsBreak { .. } => "innings_break",
            MatchEvent::InningsStart { .. } => "innings_start",
            MatchEvent::Error { .. } => "error",
        }
    }

    pub fn commentary(&self) -> Option<&str> {
        match self {
            MatchEvent::MatchStart { commentary, .. }
            | MatchEvent::OverStart { commentary, .. }
            | MatchEvent::NewBatsman { commentary, .. }
            | MatchEvent::AllOut { commentary, .. }
            | MatchEvent::TargetReached { commentary, .. }
            | MatchEvent::InningsBreak { commentary, .. }
            | MatchEvent::InningsStart { commentary, .. } => Some(commentary),
            MatchEvent::Ball(ball) => Some(&ball.commentary),
            MatchEvent::Error { message } => Some(message),
        }
    }
}

/// Receives the match output synchronously, in emission order.
pub trait MatchSink {
    fn send_message(&mut self, _event: &MatchEvent) {}

    fn update_scorecard(&mut self, _scorecard: &Scorecard) {}

    fn match_end(&mut self, _result: &MatchResult) {}
}

impl<S: MatchSink + ?Sized> MatchSink for &mut S {
    fn send_message(&mut self, event: &MatchEvent) {
        (**self).send_message(event)
    }

    fn update_scorecard(&mut self, scorecard: &Scorecard) {
        (**self).update_scorecard(scorecard)
    }

    fn match_end(&mut self, result: &MatchResult) {
        (**self).match_end(result)
    }
}

impl<S: MatchSink + ?Sized> MatchSink for Box<S> {
    fn send_message(&mut self, event: &MatchEvent) {
        (**self).send_message(event)
    }

    fn update_scorecard(&mut self, scorecard: &Scorecard) {
        (**self).update_scorecard(scorecard)
    }

    fn match_end(&mut self, result: &MatchResult) {
        (**self).match_end(result)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl MatchSink for NoopSink {}

type Callback<T> = Option<Box<dyn FnMut(&T) + Send>>;

/// Adapts up to three closures. Missing slots are skipped.
#[derive(Default)]
pub struct CallbackSink {
    send_message: Callback<MatchEvent>,
    update_scorecard: Callback<Scorecard>,
    match_end: Callback<MatchResult>,
}

impl CallbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_message(mut self, callback: impl FnMut(&MatchEvent) + Send + 'static) -> Self {
        self.send_message = Some(Box::new(callback));
        self
    }

    pub fn on_scorecard(mut self, callback: impl FnMut(&Scorecard) + Send + 'static) -> Self {
        self.update_scorecard = Some(Box::new(callback));
        self
    }

    pub fn on_match_end(mut self, callback: impl FnMut(&MatchResult) + Send + 'static) -> Self {
        self.match_end = Some(Box::new(callback));
        self
    }
}

impl MatchSink for CallbackSink {
    fn send_message(&mut self, event: &MatchEvent) {
        if let Some(callback) = self.send_message.as_mut() {
            callback(event);
        }
    }

    fn update_scorecard(&mut self, scorecard: &Scorecard) {
        if let Some(callback) = self.update_scorecard.as_mut() {
            callback(scorecard);
        }
    }

    fn match_end(&mut self, result: &MatchResult) {
        if let Some(callback) = self.match_end.as_mut() {
            callback(result);
        }
    }
}

/// Keeps everything it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<MatchEvent>,
    pub scorecards: Vec<Scorecard>,
    pub results: Vec<MatchResult>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balls(&self) -> impl Iterator<Item = &BallEvent> {
        self.events.iter().filter_map(|event| match event {
            MatchEvent::Ball(ball) => Some(ball),
            _ => None,
        })
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|event| event.name() == name).count()
    }
}

impl MatchSink for RecordingSink {
    fn send_message(&mut self, event: &MatchEvent) {
        self.events.push(event.clone());
    }

    fn update_scorecard(&mut self, scorecard: &Scorecard) {
        self.scorecards.push(scorecard.clone());
    }

    fn match_end(&mut self, result: &MatchResult) {
        self.results.push(result.clone());
    }
}
