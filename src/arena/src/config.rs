use cricket_core::MatchConfig;
use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaMode {
    Challenge,
    Calibrate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArenaConfig {
    pub mode: ArenaMode,
    pub match_overs: u32,
    pub match_stake: u64,
    pub ball_delay: Duration,
    pub match_seed: Option<u64>,
    pub calibration_runs: u32,
    pub team1_id: u32,
    pub team2_id: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            mode: ArenaMode::Challenge,
            match_overs: 5,
            match_stake: 100,
            ball_delay: Duration::ZERO,
            match_seed: None,
            calibration_runs: 200,
            team1_id: 1,
            team2_id: 2,
        }
    }
}

impl ArenaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ArenaConfig::default();

        let mode = match lookup("MODE").as_deref().map(str::trim) {
            None | Some("") => defaults.mode,
            Some(value) if value.eq_ignore_ascii_case("CHALLENGE") => ArenaMode::Challenge,
            Some(value) if value.eq_ignore_ascii_case("CALIBRATE") => ArenaMode::Calibrate,
            Some(value) => {
                warn!("unknown MODE '{}', using CHALLENGE", value);
                defaults.mode
            }
        };

        ArenaConfig {
            mode,
            match_overs: parse_or(&lookup, "MATCH_OVERS", defaults.match_overs),
            match_stake: parse_or(&lookup, "MATCH_STAKE", defaults.match_stake),
            ball_delay: Duration::from_millis(parse_or(&lookup, "BALL_DELAY_MS", 0)),
            match_seed: lookup("MATCH_SEED").and_then(|value| parse_value("MATCH_SEED", &value)),
            calibration_runs: parse_or(&lookup, "CALIBRATION_RUNS", defaults.calibration_runs),
            team1_id: parse_or(&lookup, "TEAM1_ID", defaults.team1_id),
            team2_id: parse_or(&lookup, "TEAM2_ID", defaults.team2_id),
        }
    }

    pub fn match_config(&self, match_id: &str) -> MatchConfig {
        let config = MatchConfig::new(self.match_overs)
            .with_match_id(match_id)
            .with_match_type("challenge")
            .with_delay(self.ball_delay);

        match self.match_seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|value| parse_value(key, &value))
        .unwrap_or(default)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("invalid {} '{}', using default", key, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ArenaConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        ArenaConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), ArenaConfig::default());
    }

    #[test]
    fn test_reads_values() {
        let config = config(&[
            ("MODE", "calibrate"),
            ("MATCH_OVERS", "20"),
            ("MATCH_STAKE", "250"),
            ("BALL_DELAY_MS", "1500"),
            ("MATCH_SEED", "42"),
            ("TEAM2_ID", "4"),
        ]);

        assert_eq!(config.mode, ArenaMode::Calibrate);
        assert_eq!(config.match_overs, 20);
        assert_eq!(config.match_stake, 250);
        assert_eq!(config.ball_delay, Duration::from_millis(1500));
        assert_eq!(config.match_seed, Some(42));
        assert_eq!(config.team1_id, 1);
        assert_eq!(config.team2_id, 4);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config(&[("MODE", "ONESHOT"), ("MATCH_OVERS", "five"), ("MATCH_SEED", "-1")]);

        assert_eq!(config.mode, ArenaMode::Challenge);
        assert_eq!(config.match_overs, 5);
        assert_eq!(config.match_seed, None);
    }

    #[test]
    fn test_match_config() {
        let match_config = config(&[("MATCH_SEED", "7")]).match_config("m-1");

        assert_eq!(match_config.total_overs, 5);
        assert_eq!(match_config.seed, Some(7));
        assert_eq!(match_config.match_id.as_deref(), Some("m-1"));
        assert_eq!(match_config.match_type, "challenge");
    }
}
