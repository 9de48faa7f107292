use std::time::Duration;

pub const DEFAULT_TOTAL_OVERS: u32 = 20;
pub const DEFAULT_MATCH_TYPE: &str = "friendly";

#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub total_overs: u32,
    pub chat_id: Option<i64>,
    pub match_id: Option<String>,
    pub match_type: String,
    /// Throttle between deliveries for live commentary. Zero disables it.
    pub delay_between_balls: Duration,
    /// Fixed seed for reproducible matches, otherwise seeded from entropy.
    pub seed: Option<u64>,
    pub detailed_scorecard_every: u32,
    pub scorecard_every: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            total_overs: DEFAULT_TOTAL_OVERS,
            chat_id: None,
            match_id: None,
            match_type: DEFAULT_MATCH_TYPE.to_string(),
            delay_between_balls: Duration::ZERO,
            seed: None,
            detailed_scorecard_every: 3,
            scorecard_every: 2,
        }
    }
}

impl MatchConfig {
    pub fn new(total_overs: u32) -> Self {
        MatchConfig {
            total_overs,
            ..Default::default()
        }
    }

    pub fn with_total_overs(mut self, total_overs: u32) -> Self {
        self.total_overs = total_overs;
        self
    }

    pub fn with_chat_id(mut self, chat_id: i64) -> Self {
        self.chat_id = Some(chat_id);
        self
    }

    pub fn with_match_id(mut self, match_id: impl Into<String>) -> Self {
        self.match_id = Some(match_id.into());
        self
    }

    pub fn with_match_type(mut self, match_type: impl Into<String>) -> Self {
        self.match_type = match_type.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_between_balls = delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_scorecard_cadence(mut self, detailed_every: u32, light_every: u32) -> Self {
        self.detailed_scorecard_every = detailed_every;
        self.scorecard_every = light_every;
        self
    }

    /// `Some(detailed)` when a scorecard is due after `over` (0-indexed) completes.
    pub fn scorecard_due(&self, over: u32) -> Option<bool> {
        let completed = over + 1;

        if self.detailed_scorecard_every > 0 && completed % self.detailed_scorecard_every == 0 {
            Some(true)
        } else if self.scorecard_every > 0 && completed % self.scorecard_every == 0 {
            Some(false)
        } else {
            None
        }
    }

    pub fn total_balls(&self) -> u32 {
        self.total_overs * 6
    }
}
