use crate::error::MatchError;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyFocus {
    #[default]
    Balanced,
    Attacking,
    Defensive,
    WicketTaking,
    Economy,
}

impl StrategyFocus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyFocus::Balanced => "balanced",
            StrategyFocus::Attacking => "attacking",
            StrategyFocus::Defensive => "defensive",
            StrategyFocus::WicketTaking => "wicket-taking",
            StrategyFocus::Economy => "economy",
        }
    }
}

impl FromStr for StrategyFocus {
    type Err = MatchError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "balanced" => Ok(StrategyFocus::Balanced),
            "attacking" => Ok(StrategyFocus::Attacking),
            "defensive" => Ok(StrategyFocus::Defensive),
            "wicket-taking" | "wicket taking" | "wicket_taking" => Ok(StrategyFocus::WicketTaking),
            "economy" => Ok(StrategyFocus::Economy),
            _ => Err(MatchError::UnknownFocus(value.to_string())),
        }
    }
}

impl Display for StrategyFocus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cosmetic, reported with the strategy but never read by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPlacement {
    #[default]
    Standard,
    Attacking,
    Defensive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStrategy {
    pub name: String,
    pub batting_aggression: f32,
    pub bowling_aggression: f32,
    pub batting_focus: StrategyFocus,
    pub bowling_focus: StrategyFocus,
    pub field_placement: FieldPlacement,
}

impl TeamStrategy {
    pub const BALANCED: &'static str = "Balanced";
    pub const AGGRESSIVE: &'static str = "Aggressive";
    pub const DEFENSIVE: &'static str = "Defensive";
    pub const BATTING_FOCUS: &'static str = "Batting Focus";
    pub const BOWLING_FOCUS: &'static str = "Bowling Focus";

    fn preset(
        name: &str,
        batting_aggression: f32,
        bowling_aggression: f32,
        batting_focus: StrategyFocus,
        bowling_focus: StrategyFocus,
        field_placement: FieldPlacement,
    ) -> Self {
        TeamStrategy {
            name: name.to_string(),
            batting_aggression,
            bowling_aggression,
            batting_focus,
            bowling_focus,
            field_placement,
        }
    }

    pub fn balanced() -> Self {
        Self::preset(
            Self::BALANCED,
            1.0,
            1.0,
            StrategyFocus::Balanced,
            StrategyFocus::Balanced,
            FieldPlacement::Standard,
        )
    }

    pub fn aggressive() -> Self {
        Self::preset(
            Self::AGGRESSIVE,
            1.3,
            1.2,
            StrategyFocus::Attacking,
            StrategyFocus::WicketTaking,
            FieldPlacement::Attacking,
        )
    }

    pub fn defensive() -> Self {
        Self::preset(
            Self::DEFENSIVE,
            0.7,
            0.8,
            StrategyFocus::Defensive,
            StrategyFocus::Economy,
            FieldPlacement::Defensive,
        )
    }

    pub fn batting_focus() -> Self {
        Self::preset(
            Self::BATTING_FOCUS,
            1.4,
            0.9,
            StrategyFocus::Attacking,
            StrategyFocus::Balanced,
            FieldPlacement::Standard,
        )
    }

    pub fn bowling_focus() -> Self {
        Self::preset(
            Self::BOWLING_FOCUS,
            0.9,
            1.4,
            StrategyFocus::Balanced,
            StrategyFocus::WicketTaking,
            FieldPlacement::Attacking,
        )
    }

    pub fn presets() -> Vec<TeamStrategy> {
        vec![
            Self::balanced(),
            Self::aggressive(),
            Self::defensive(),
            Self::batting_focus(),
            Self::bowling_focus(),
        ]
    }

    /// Case-insensitive preset lookup.
    pub fn by_name(name: &str) -> Option<TeamStrategy> {
        Self::presets()
            .into_iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for TeamStrategy {
    fn default() -> Self {
        Self::balanced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_balanced() {
        let strategy = TeamStrategy::default();

        assert_eq!(strategy.name, "Balanced");
        assert_eq!(strategy.batting_aggression, 1.0);
        assert_eq!(strategy.bowling_aggression, 1.0);
        assert_eq!(strategy.batting_focus, StrategyFocus::Balanced);
    }

    #[test]
    fn test_by_name() {
        let strategy = TeamStrategy::by_name("bowling focus").unwrap();

        assert_eq!(strategy.bowling_aggression, 1.4);
        assert_eq!(strategy.bowling_focus, StrategyFocus::WicketTaking);
        assert!(TeamStrategy::by_name("Park the bus").is_none());
    }

    #[test]
    fn test_focus_parse() {
        assert_eq!("Wicket-Taking".parse::<StrategyFocus>(), Ok(StrategyFocus::WicketTaking));
        assert_eq!(
            "reckless".parse::<StrategyFocus>(),
            Err(MatchError::UnknownFocus("reckless".to_string()))
        );
    }

    #[test]
    fn test_presets_distinct() {
        let presets = TeamStrategy::presets();

        assert_eq!(presets.len(), 5);
        assert_eq!(presets[2].batting_focus, StrategyFocus::Defensive);
        assert_eq!(presets[2].bowling_focus, StrategyFocus::Economy);
    }
}
