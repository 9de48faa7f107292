use chrono::NaiveDateTime;
use serde::Deserialize;

const STATIC_LEAGUE_JSON: &str = include_str!("../../data/league.json");

#[derive(Debug, Clone, Deserialize)]
pub struct UserEntity {
    pub id: u64,
    pub username: String,
    pub coins: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEntity {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub batting_style: String,
    pub bowling_style: String,
    #[serde(default)]
    pub tier: String,
    pub batting_ovr: u8,
    pub bowling_ovr: u8,
    pub total_ovr: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamPlayerEntity {
    pub player_id: u32,
    pub position: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamEntity {
    pub id: u32,
    pub owner_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub strategy: String,
    pub players: Vec<TeamPlayerEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueEntity {
    pub users: Vec<UserEntity>,
    pub players: Vec<PlayerEntity>,
    pub teams: Vec<TeamEntity>,
}

pub struct LeagueLoader;

impl LeagueLoader {
    pub fn load() -> Result<LeagueEntity, serde_json::Error> {
        Self::from_json(STATIC_LEAGUE_JSON)
    }

    pub fn from_json(json: &str) -> Result<LeagueEntity, serde_json::Error> {
        serde_json::from_str(json)
    }
}
