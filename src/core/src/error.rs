use thiserror::Error;

/// Failure kinds surfaced by roster construction and the match engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown player role: {0}")]
    UnknownRole(String),

    #[error("unknown strategy focus: {0}")]
    UnknownFocus(String),

    #[error("invalid roster for team {team}: {reason}")]
    InvalidRoster { team: String, reason: String },

    #[error("no bowler available for team {team}")]
    NoBowlerAvailable { team: String },

    #[error("no batsman available for team {team}")]
    NoBatsmanAvailable { team: String },
}

pub trait RosterResultExt<T> {
    /// Attaches the team name to roster-level failures.
    fn for_team(self, team: &str) -> Result<T, MatchError>;
}

impl<T> RosterResultExt<T> for Result<T, MatchError> {
    fn for_team(self, team: &str) -> Result<T, MatchError> {
        self.map_err(|err| match err {
            MatchError::MissingField(field) => MatchError::InvalidRoster {
                team: team.to_string(),
                reason: format!("{} is required", field),
            },
            MatchError::UnknownRole(role) => MatchError::InvalidRoster {
                team: team.to_string(),
                reason: format!("unknown player role: {}", role),
            },
            other => other,
        })
    }
}
