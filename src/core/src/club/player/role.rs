use crate::error::MatchError;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

impl PlayerRole {
    /// Tie-breaker used by the batting order: specialists first, then all-rounders.
    pub fn batting_priority(&self) -> u8 {
        match self {
            PlayerRole::Batsman => 0,
            PlayerRole::AllRounder => 1,
            _ => 2,
        }
    }

    pub fn is_bowling_option(&self) -> bool {
        matches!(self, PlayerRole::Bowler | PlayerRole::AllRounder)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerRole::Batsman => "Batsman",
            PlayerRole::Bowler => "Bowler",
            PlayerRole::AllRounder => "All-rounder",
            PlayerRole::WicketKeeper => "Wicket-keeper",
        }
    }
}

impl FromStr for PlayerRole {
    type Err = MatchError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "batsman" | "batter" | "bat" => Ok(PlayerRole::Batsman),
            "bowler" | "bowl" => Ok(PlayerRole::Bowler),
            "all-rounder" | "all rounder" | "allrounder" | "ar" => Ok(PlayerRole::AllRounder),
            "wicket-keeper" | "wicket keeper" | "wicketkeeper" | "keeper" | "wk" => {
                Ok(PlayerRole::WicketKeeper)
            }
            _ => Err(MatchError::UnknownRole(value.to_string())),
        }
    }
}

impl Display for PlayerRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.as_str())
    }
}

/// Card rarity. Has no effect on the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PlayerTier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Heroic,
    Icons,
}

impl PlayerTier {
    /// Lenient parse; unrecognised labels fall back to Bronze.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "silver" => PlayerTier::Silver,
            "gold" => PlayerTier::Gold,
            "platinum" => PlayerTier::Platinum,
            "heroic" | "heroes" => PlayerTier::Heroic,
            "icons" | "icon" => PlayerTier::Icons,
            _ => PlayerTier::Bronze,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_synonyms() {
        assert_eq!("Batter".parse::<PlayerRole>(), Ok(PlayerRole::Batsman));
        assert_eq!("BATSMAN".parse::<PlayerRole>(), Ok(PlayerRole::Batsman));
        assert_eq!("all rounder".parse::<PlayerRole>(), Ok(PlayerRole::AllRounder));
        assert_eq!("AllRounder".parse::<PlayerRole>(), Ok(PlayerRole::AllRounder));
        assert_eq!("Wicketkeeper".parse::<PlayerRole>(), Ok(PlayerRole::WicketKeeper));
        assert_eq!(" keeper ".parse::<PlayerRole>(), Ok(PlayerRole::WicketKeeper));
        assert_eq!("WK".parse::<PlayerRole>(), Ok(PlayerRole::WicketKeeper));
    }

    #[test]
    fn test_unknown_role() {
        assert_eq!(
            "umpire".parse::<PlayerRole>(),
            Err(MatchError::UnknownRole("umpire".to_string()))
        );
    }

    #[test]
    fn test_batting_priority() {
        assert!(PlayerRole::Batsman.batting_priority() < PlayerRole::AllRounder.batting_priority());
        assert_eq!(PlayerRole::Bowler.batting_priority(), PlayerRole::WicketKeeper.batting_priority());
    }

    #[test]
    fn test_tier_from_label() {
        assert_eq!(PlayerTier::from_label("Icons"), PlayerTier::Icons);
        assert_eq!(PlayerTier::from_label("mythic"), PlayerTier::Bronze);
    }
}
