pub mod club;
pub mod error;
pub mod r#match;
pub mod utils;

pub use error::{MatchError, RosterResultExt};

// Re-export club items
pub use club::{
    // Player exports
    Player, PlayerBuilder, PlayerRole, PlayerTier,
    BattingAttributes, BowlingAttributes,
    PlayerMatchStatistics, PlayerMatchPerformance, PlayerCareerStatistics, BestBowling,
    Dismissal, DismissalKind,
    // Team exports
    Team, TeamBuilder, TeamStrategy, StrategyFocus, FieldPlacement,
    RoleComposition, TeamChemistry, ChemistryRating,
};

// Re-export match items
pub use r#match::{
    CricketMatch, MatchConfig, MatchState, StateManager, Side,
    MatchPhase, OutcomeProbabilities, OutcomeKind, BallOutcome, BallSampler, Commentary,
    MatchEvent, BallEvent, MatchSink, NoopSink, CallbackSink, RecordingSink,
    Scorecard, BatterCard, BowlerCard, PartnershipCard, FallOfWicket,
    MatchResult, ResultType, MarginType, RewardRanges, InningsSummary,
};

pub use utils::*;
