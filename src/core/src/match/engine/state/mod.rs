pub mod manager;

pub use manager::*;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    NotStarted,
    FirstInnings,
    InningsBreak,
    SecondInnings,
    Complete,
}

impl MatchState {
    /// Innings number while an innings is in play.
    pub fn innings(&self) -> Option<u8> {
        match self {
            MatchState::FirstInnings => Some(1),
            MatchState::SecondInnings => Some(2),
            _ => None,
        }
    }
}
