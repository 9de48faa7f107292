use arena::{ArenaConfig, ArenaMessage, ArenaMode, ArenaService, Challenge, ChannelSink, simulate_series};
use chrono::Utc;
use cricket_core::MatchEvent;
use database::{InMemoryRepository, LeagueRepository};
use env_logger::Env;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ArenaConfig::from_env();

    let started = Instant::now();
    let repository = Arc::new(InMemoryRepository::from_static()?);
    info!("league loaded: {} ms", started.elapsed().as_millis());

    let service = ArenaService::new(repository, config.clone());

    match config.mode {
        ArenaMode::Challenge => play_challenge(&service, &config).await,
        ArenaMode::Calibrate => calibrate(&service, &config),
    }
}

async fn play_challenge(service: &ArenaService, config: &ArenaConfig) -> color_eyre::Result<()> {
    let team1 = service.repository().get_team(config.team1_id, None)?;
    let team2 = service.repository().get_team(config.team2_id, None)?;

    let challenge = Challenge::new(
        format!("{}-{}-{}", team1.team.id, team2.team.id, Utc::now().timestamp_millis()),
        (team1.team.owner_id, &team1.team.name, team1.team.id),
        (team2.team.owner_id, &team2.team.name, team2.team.id),
        config.match_stake,
    );

    let (sink, mut receiver) = ChannelSink::channel();

    let commentary = tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            match message {
                ArenaMessage::Event(MatchEvent::Error { message }) => warn!("{}", message),
                ArenaMessage::Event(event) => {
                    if let Some(text) = event.commentary() {
                        info!("{}", text);
                    }
                }
                ArenaMessage::Scorecard(scorecard) => debug!(
                    "{} {}/{} ({} ov)",
                    scorecard.batting_team, scorecard.score, scorecard.wickets, scorecard.overs
                ),
                ArenaMessage::Finished(result) => info!("{}", result.summary()),
            }
        }
    });

    let outcome = service.play_challenge(challenge, sink).await?;
    commentary.await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}

fn calibrate(service: &ArenaService, config: &ArenaConfig) -> color_eyre::Result<()> {
    let team1 = service.repository().get_team(config.team1_id, None)?;
    let team2 = service.repository().get_team(config.team2_id, None)?;

    let challenge = Challenge::new(
        "calibration",
        (team1.team.owner_id, &team1.team.name, team1.team.id),
        (team2.team.owner_id, &team2.team.name, team2.team.id),
        0,
    );
    let (team_a, team_b) = service.hydrate_teams(&challenge)?;

    let match_config = config.match_config("calibration");
    let report = simulate_series(&team_a, &team_b, &match_config, config.calibration_runs);

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
