use crate::club::{Player, TeamStrategy};
use crate::error::MatchError;
use crate::Team;

#[derive(Default)]
pub struct TeamBuilder {
    id: Option<u32>,
    name: Option<String>,
    owner_id: Option<u64>,
    description: Option<String>,
    players: Option<Vec<Player>>,
    strategy: Option<TeamStrategy>,
}

impl TeamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn owner_id(mut self, owner_id: u64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn players(mut self, players: Vec<Player>) -> Self {
        self.players = Some(players);
        self
    }

    pub fn strategy(mut self, strategy: TeamStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn build(self) -> Result<Team, MatchError> {
        let name = self.name.ok_or(MatchError::MissingField("name"))?;

        let mut team = Team {
            id: self.id.ok_or(MatchError::MissingField("id"))?,
            description: self
                .description
                .unwrap_or_else(|| format!("{} team", name)),
            name,
            owner_id: self.owner_id.unwrap_or_default(),
            players: self.players.unwrap_or_default(),
            score: 0,
            wickets: 0,
            overs: 0,
            balls: 0,
            chemistry: 1.0,
            strategy: self.strategy.unwrap_or_default(),
        };

        team.calculate_chemistry();

        Ok(team)
    }
}
