use serde::Serialize;

const POWERPLAY_OVERS: u32 = 6;
const DEATH_OVERS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Powerplay,
    MiddleOvers,
    DeathOvers,
}

impl MatchPhase {
    /// `over` is 0-indexed. Powerplay wins over death overs in short formats.
    pub fn from_over(over: u32, total_overs: u32) -> Self {
        if over < POWERPLAY_OVERS {
            MatchPhase::Powerplay
        } else if over >= total_overs.saturating_sub(DEATH_OVERS) {
            MatchPhase::DeathOvers
        } else {
            MatchPhase::MiddleOvers
        }
    }
}
