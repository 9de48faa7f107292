use crate::club::player::skills::default_attribute;
use crate::club::{
    BattingAttributes, BowlingAttributes, PlayerMatchStatistics, PlayerRole, PlayerTier,
};
use crate::error::MatchError;
use crate::Player;
use rand::Rng;

const DEFAULT_OVR: u8 = 50;

// Builder for Player
#[derive(Default)]
pub struct PlayerBuilder {
    id: Option<u32>,
    name: Option<String>,
    role: Option<String>,
    team: Option<String>,
    batting_style: Option<String>,
    bowling_style: Option<String>,
    tier: Option<PlayerTier>,
    batting_ovr: Option<u8>,
    bowling_ovr: Option<u8>,
    total_ovr: Option<u8>,
    batting_timing: Option<u8>,
    batting_technique: Option<u8>,
    batting_power: Option<u8>,
    bowling_pace: Option<u8>,
    bowling_variation: Option<u8>,
    bowling_accuracy: Option<u8>,
    position: Option<u8>,
}

impl PlayerBuilder {
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

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn batting_style(mut self, batting_style: impl Into<String>) -> Self {
        self.batting_style = Some(batting_style.into());
        self
    }

    pub fn bowling_style(mut self, bowling_style: impl Into<String>) -> Self {
        self.bowling_style = Some(bowling_style.into());
        self
    }

    pub fn tier(mut self, tier: PlayerTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn batting_ovr(mut self, batting_ovr: u8) -> Self {
        self.batting_ovr = Some(batting_ovr);
        self
    }

    pub fn bowling_ovr(mut self, bowling_ovr: u8) -> Self {
        self.bowling_ovr = Some(bowling_ovr);
        self
    }

    pub fn total_ovr(mut self, total_ovr: u8) -> Self {
        self.total_ovr = Some(total_ovr);
        self
    }

    pub fn batting(mut self, timing: u8, technique: u8, power: u8) -> Self {
        self.batting_timing = Some(timing);
        self.batting_technique = Some(technique);
        self.batting_power = Some(power);
        self
    }

    pub fn bowling(mut self, pace: u8, variation: u8, accuracy: u8) -> Self {
        self.bowling_pace = Some(pace);
        self.bowling_variation = Some(variation);
        self.bowling_accuracy = Some(accuracy);
        self
    }

    pub fn batting_timing(mut self, value: u8) -> Self {
        self.batting_timing = Some(value);
        self
    }

    pub fn batting_technique(mut self, value: u8) -> Self {
        self.batting_technique = Some(value);
        self
    }

    pub fn batting_power(mut self, value: u8) -> Self {
        self.batting_power = Some(value);
        self
    }

    pub fn bowling_pace(mut self, value: u8) -> Self {
        self.bowling_pace = Some(value);
        self
    }

    pub fn bowling_variation(mut self, value: u8) -> Self {
        self.bowling_variation = Some(value);
        self
    }

    pub fn bowling_accuracy(mut self, value: u8) -> Self {
        self.bowling_accuracy = Some(value);
        self
    }

    pub fn position(mut self, position: u8) -> Self {
        self.position = Some(position);
        self
    }

    pub fn build(self) -> Result<Player, MatchError> {
        self.build_with_rng(&mut rand::rng())
    }

    /// Sub-attributes left unset are drawn from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Player, MatchError> {
        let name = self.name.ok_or(MatchError::MissingField("name"))?;
        let role: PlayerRole = self.role.ok_or(MatchError::MissingField("role"))?.parse()?;
        let team = self.team.ok_or(MatchError::MissingField("team"))?;
        let batting_style = self
            .batting_style
            .ok_or(MatchError::MissingField("batting_style"))?;
        let bowling_style = self
            .bowling_style
            .ok_or(MatchError::MissingField("bowling_style"))?;

        let batting_ovr = self.batting_ovr.unwrap_or(DEFAULT_OVR);
        let bowling_ovr = self.bowling_ovr.unwrap_or(DEFAULT_OVR);
        let total_ovr = self
            .total_ovr
            .unwrap_or(((batting_ovr as u16 + bowling_ovr as u16) / 2) as u8);

        let batting = BattingAttributes::new(
            self.batting_timing.unwrap_or_else(|| default_attribute(rng)),
            self.batting_technique.unwrap_or_else(|| default_attribute(rng)),
            self.batting_power.unwrap_or_else(|| default_attribute(rng)),
        );
        let bowling = BowlingAttributes::new(
            self.bowling_pace.unwrap_or_else(|| default_attribute(rng)),
            self.bowling_variation.unwrap_or_else(|| default_attribute(rng)),
            self.bowling_accuracy.unwrap_or_else(|| default_attribute(rng)),
        );

        Ok(Player {
            id: self.id.unwrap_or_default(),
            name,
            role,
            team,
            batting_style,
            bowling_style,
            tier: self.tier.unwrap_or_default(),
            batting_ovr,
            bowling_ovr,
            total_ovr,
            batting,
            bowling,
            position: self.position.unwrap_or_default(),
            statistics: PlayerMatchStatistics::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn complete() -> PlayerBuilder {
        PlayerBuilder::new()
            .id(1)
            .name("Jasprit Bumrah")
            .role("bowler")
            .team("India")
            .batting_style("Right-handed")
            .bowling_style("Right-arm fast")
    }

    #[test]
    fn test_build_missing_name() {
        let result = PlayerBuilder::new()
            .role("Bowler")
            .team("India")
            .batting_style("Right-handed")
            .bowling_style("Right-arm fast")
            .build();

        assert_eq!(result.unwrap_err(), MatchError::MissingField("name"));
    }

    #[test]
    fn test_build_missing_bowling_style() {
        let result = PlayerBuilder::new()
            .name("Jasprit Bumrah")
            .role("Bowler")
            .team("India")
            .batting_style("Right-handed")
            .build();

        assert_eq!(result.unwrap_err(), MatchError::MissingField("bowling_style"));
    }

    #[test]
    fn test_build_unknown_role() {
        let result = complete().role("twelfth man").build();

        assert_eq!(
            result.unwrap_err(),
            MatchError::UnknownRole("twelfth man".to_string())
        );
    }

    #[test]
    fn test_build_defaults_sub_attributes_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let player = complete().batting_timing(95).build_with_rng(&mut rng).unwrap();

        assert_eq!(player.role, PlayerRole::Bowler);
        assert_eq!(player.batting.timing, 95);
        for value in [
            player.batting.technique,
            player.batting.power,
            player.bowling.pace,
            player.bowling.variation,
            player.bowling.accuracy,
        ] {
            assert!((30..=70).contains(&value));
        }
    }

    #[test]
    fn test_build_seeded_is_reproducible() {
        let a = complete().build_with_rng(&mut StdRng::seed_from_u64(9)).unwrap();
        let b = complete().build_with_rng(&mut StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(a.batting, b.batting);
        assert_eq!(a.bowling, b.bowling);
    }

    #[test]
    fn test_build_total_ovr_default() {
        let player = complete()
            .batting_ovr(60)
            .bowling_ovr(91)
            .build()
            .unwrap();

        assert_eq!(player.total_ovr, 75);
        assert_eq!(player.tier, PlayerTier::Bronze);
        assert_eq!(player.position, 0);
    }
}
