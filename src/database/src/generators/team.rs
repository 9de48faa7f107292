use crate::repository::{RepositoryError, TeamRecord};
use cricket_core::{Player, PlayerTier, RosterResultExt, Team, TeamStrategy};
use log::debug;
use rand::Rng;

const OVR_SPREAD: i16 = 5;
const MAX_SUB_ATTRIBUTE: i16 = 99;

/// Turns stored cards into a fresh match-ready `Team`.
pub struct TeamHydrator;

impl TeamHydrator {
    pub fn hydrate<R: Rng + ?Sized>(record: &TeamRecord, rng: &mut R) -> Result<Team, RepositoryError> {
        let team_name = record.team.name.clone();

        let players = record
            .roster
            .iter()
            .map(|entry| {
                let card = &entry.player;

                let batting = Self::sub_attributes(rng, card.batting_ovr);
                let bowling = Self::sub_attributes(rng, card.bowling_ovr);

                Player::builder()
                    .id(card.id)
                    .name(card.name.clone())
                    .role(card.role.clone())
                    .team(team_name.clone())
                    .batting_style(card.batting_style.clone())
                    .bowling_style(card.bowling_style.clone())
                    .tier(PlayerTier::from_label(&card.tier))
                    .batting_ovr(card.batting_ovr)
                    .bowling_ovr(card.bowling_ovr)
                    .total_ovr(card.total_ovr)
                    .batting(batting[0], batting[1], batting[2])
                    .bowling(bowling[0], bowling[1], bowling[2])
                    .position(entry.position)
                    .build_with_rng(rng)
                    .for_team(&team_name)
            })
            .collect::<Result<Vec<Player>, _>>()?;

        let strategy = TeamStrategy::by_name(&record.team.strategy).unwrap_or_else(|| {
            debug!(
                "team {}: unknown strategy '{}', using balanced",
                record.team.id, record.team.strategy
            );
            TeamStrategy::balanced()
        });

        let mut builder = Team::builder()
            .id(record.team.id)
            .name(team_name)
            .owner_id(record.team.owner_id)
            .players(players)
            .strategy(strategy);

        if let Some(description) = &record.team.description {
            builder = builder.description(description.clone());
        }

        Ok(builder.build()?)
    }

    /// Three values within five points of `ovr`, capped at 99.
    fn sub_attributes<R: Rng + ?Sized>(rng: &mut R, ovr: u8) -> [u8; 3] {
        std::array::from_fn(|_| {
            let value = ovr as i16 + rng.random_range(-OVR_SPREAD..=OVR_SPREAD);
            value.clamp(1, MAX_SUB_ATTRIBUTE) as u8
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryRepository, LeagueRepository};
    use cricket_core::{MatchError, PlayerRole, StrategyFocus};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hydrate(team_id: u32, seed: u64) -> Team {
        let repository = InMemoryRepository::from_static().unwrap();
        let record = repository.get_team(team_id, None).unwrap();

        TeamHydrator::hydrate(&record, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_hydrated_attributes_stay_near_ovr() {
        let team = hydrate(1, 7);

        assert_eq!(team.players.len(), 11);
        assert_eq!(team.owner_id, 1001);

        for player in &team.players {
            for value in [player.batting.timing, player.batting.technique, player.batting.power] {
                assert!((value as i16 - player.batting_ovr as i16).abs() <= 5);
                assert!(value <= 99);
            }
            for value in [player.bowling.pace, player.bowling.variation, player.bowling.accuracy] {
                assert!((value as i16 - player.bowling_ovr as i16).abs() <= 5);
                assert!(value >= 1);
            }
        }
    }

    #[test]
    fn test_roster_positions_and_roles() {
        let team = hydrate(1, 1);

        let keeper = team.player_by_name("Dinesh Perera").unwrap();
        assert_eq!(keeper.role, PlayerRole::WicketKeeper);
        assert_eq!(keeper.position, 5);
        assert_eq!(team.get_batting_order()[0].name, "Arjun Mehta");
        assert!(team.chemistry >= 1.0);
    }

    #[test]
    fn test_strategy_lookup() {
        assert_eq!(hydrate(2, 1).strategy.bowling_focus, StrategyFocus::WicketTaking);
        assert_eq!(hydrate(4, 1).strategy.name, TeamStrategy::AGGRESSIVE);
        assert_eq!(hydrate(5, 1).strategy, TeamStrategy::balanced());
    }

    #[test]
    fn test_missing_description_gets_default() {
        assert_eq!(hydrate(3, 1).description, "Old Town Owls team");
        assert_eq!(hydrate(1, 1).description, "Top-order heavy side built around Qadir");
    }

    #[test]
    fn test_unknown_role_names_the_team() {
        let repository = InMemoryRepository::from_static().unwrap();
        let mut record = repository.get_team(1, None).unwrap();
        record.roster[0].player.role = "Twelfth man".to_string();

        let error = TeamHydrator::hydrate(&record, &mut StdRng::seed_from_u64(1)).unwrap_err();

        assert!(matches!(
            error,
            RepositoryError::Roster(MatchError::InvalidRoster { ref team, .. }) if team == "Harbour Hawks"
        ));
    }

    #[test]
    fn test_same_seed_same_team() {
        let a = hydrate(2, 99);
        let b = hydrate(2, 99);

        let attributes = |team: &Team| {
            team.players
                .iter()
                .map(|p| (p.batting.power, p.bowling.accuracy))
                .collect::<Vec<_>>()
        };

        assert_eq!(attributes(&a), attributes(&b));
    }
}
