use crate::r#match::{CricketMatch, MatchSink, MatchState, Side};

pub struct StateManager {
    current_state: MatchState,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    pub fn new() -> Self {
        StateManager {
            current_state: MatchState::NotStarted,
        }
    }

    pub fn current(&self) -> MatchState {
        self.current_state
    }

    pub fn next(&mut self) -> Option<MatchState> {
        let next_state: MatchState = Self::get_next_state(self.current_state);

        match next_state {
            MatchState::Complete => {
                self.current_state = MatchState::Complete;
                None
            }
            _ => {
                self.current_state = next_state;
                Some(self.current_state)
            }
        }
    }

    fn get_next_state(current_state: MatchState) -> MatchState {
        match current_state {
            MatchState::NotStarted => MatchState::FirstInnings,
            MatchState::FirstInnings => MatchState::InningsBreak,
            MatchState::InningsBreak => MatchState::SecondInnings,
            MatchState::SecondInnings => MatchState::Complete,
            MatchState::Complete => MatchState::Complete,
        }
    }

    pub fn handle_state_finish<S: MatchSink>(cricket_match: &mut CricketMatch<S>, state: MatchState) {
        match state {
            MatchState::FirstInnings => cricket_match.record_innings(Side::Team1),
            MatchState::SecondInnings => cricket_match.record_innings(Side::Team2),
            _ => {}
        }
    }
}
