use cricket_core::{CricketMatch, FloatUtils, MatchConfig, MatchResult, ResultType, Team};
use log::info;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesReport {
    pub runs: u32,
    pub average_first_innings: f32,
    pub average_second_innings: f32,
    pub average_first_innings_wickets: f32,
    pub average_second_innings_wickets: f32,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub ties: u32,
}

impl SeriesReport {
    fn from_results(results: &[MatchResult]) -> Self {
        let runs = results.len() as u32;
        let average = |value: fn(&MatchResult) -> u32| {
            FloatUtils::round2(results.iter().map(value).sum::<u32>() as f32 / runs.max(1) as f32)
        };
        let count = |kind: fn(&ResultType) -> bool| {
            results.iter().filter(|result| kind(&result.result_type)).count() as u32
        };

        SeriesReport {
            runs,
            average_first_innings: average(|r| r.team1_score),
            average_second_innings: average(|r| r.team2_score),
            average_first_innings_wickets: average(|r| r.team1_wickets),
            average_second_innings_wickets: average(|r| r.team2_wickets),
            team1_wins: count(|t| *t == ResultType::Team1Win),
            team2_wins: count(|t| matches!(t, ResultType::Team2WinWickets | ResultType::Team2WinRuns)),
            ties: count(|t| *t == ResultType::Tie),
        }
    }
}

/// Unseeded series draw a fresh base seed.
fn series_seed(config: &MatchConfig) -> u64 {
    config.seed.unwrap_or_else(rand::random)
}

/// Plays `runs` matches in parallel. Match `i` is seeded with the base seed plus `i`.
pub fn simulate_series(team_a: &Team, team_b: &Team, config: &MatchConfig, runs: u32) -> SeriesReport {
    let base_seed = series_seed(config);
    let started = Instant::now();

    let results: Vec<MatchResult> = (0..runs)
        .into_par_iter()
        .map(|index| {
            let config = config
                .clone()
                .with_delay(std::time::Duration::ZERO)
                .with_seed(base_seed.wrapping_add(index as u64));

            CricketMatch::new(team_a.clone(), team_b.clone(), config).simulate_match()
        })
        .collect();

    let report = SeriesReport::from_results(&results);

    info!(
        "series of {} between {} and {} played in {} ms",
        runs,
        team_a.name,
        team_b.name,
        started.elapsed().as_millis()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{InMemoryRepository, LeagueRepository, TeamHydrator};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn team(team_id: u32) -> Team {
        let repository = InMemoryRepository::from_static().unwrap();
        let record = repository.get_team(team_id, None).unwrap();

        TeamHydrator::hydrate(&record, &mut StdRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn test_series_counts_add_up() {
        let report = simulate_series(&team(1), &team(2), &MatchConfig::new(5).with_seed(100), 24);

        assert_eq!(report.runs, 24);
        assert_eq!(report.team1_wins + report.team2_wins + report.ties, 24);
        assert!(report.average_first_innings > 0.0);
        assert!(report.average_first_innings_wickets <= 10.0);
    }

    #[test]
    fn test_series_is_reproducible() {
        let config = MatchConfig::new(5).with_seed(3);

        assert_eq!(
            simulate_series(&team(1), &team(4), &config, 12),
            simulate_series(&team(1), &team(4), &config, 12)
        );
    }

    #[test]
    fn test_series_seed() {
        assert_eq!(series_seed(&MatchConfig::new(5).with_seed(42)), 42);

        let unseeded = MatchConfig::new(5);
        let seeds: HashSet<u64> = (0..8).map(|_| series_seed(&unseeded)).collect();
        assert!(seeds.len() > 1);
    }

    #[test]
    fn test_unseeded_series_plays_every_run() {
        let report = simulate_series(&team(1), &team(2), &MatchConfig::new(2), 6);

        assert_eq!(report.runs, 6);
        assert_eq!(report.team1_wins + report.team2_wins + report.ties, 6);
    }

    #[test]
    fn test_empty_series() {
        let report = simulate_series(&team(1), &team(2), &MatchConfig::default(), 0);

        assert_eq!(report, SeriesReport::default());
    }
}
