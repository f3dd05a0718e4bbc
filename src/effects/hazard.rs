//! Hazard timing and effects.

use smallvec::smallvec;

use crate::cards::HazardCard;
use crate::core::GameState;
use crate::encounter::Phase;
use crate::powers::WarpReason;

use super::{Effect, Effects};

impl HazardCard {
    /// Phase in which the hazard fires.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            HazardCard::IonStorm | HazardCard::CosmicQuake => Phase::Destiny,
            HazardCard::GravityRift => Phase::Launch,
            HazardCard::PowerFailure => Phase::Reveal,
        }
    }

    #[must_use]
    pub fn effects(self, state: &GameState) -> Effects {
        let encounter = &state.encounter;
        match self {
            HazardCard::IonStorm => smallvec![Effect::LoseShips {
                player: encounter.offense,
                count: 1,
                reason: WarpReason::Hazard,
            }],
            HazardCard::CosmicQuake => state
                .players
                .player_ids()
                .map(|player| Effect::DrawCards { player, count: 1 })
                .collect(),
            HazardCard::GravityRift => {
                let (Some(defense), Some(target)) = (encounter.defense, state.gate.target()) else {
                    return Effects::new();
                };
                let homes: Vec<_> = state.home_planets(defense).collect();
                homes
                    .iter()
                    .position(|planet| *planet == target)
                    .map(|i| homes[(i + 1) % homes.len()])
                    .filter(|planet| *planet != target)
                    .map(|planet| smallvec![Effect::ReaimGate(planet)])
                    .unwrap_or_default()
            }
            HazardCard::PowerFailure => encounter
                .defense
                .into_iter()
                .chain(std::iter::once(encounter.offense))
                .map(Effect::ZapPlayerPowers)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Decks;
    use crate::core::{GameConfig, GameRng, PlanetId, PlayerId};

    fn state() -> GameState {
        let config = GameConfig::new(3);
        let mut rng = GameRng::new(17);
        let decks = Decks::build(&config, Vec::new(), &mut rng);
        let mut state = GameState::new(config, decks, rng);
        state.encounter.defense = Some(PlayerId::new(2));
        state
    }

    #[test]
    fn test_phases() {
        assert_eq!(HazardCard::IonStorm.phase(), Phase::Destiny);
        assert_eq!(HazardCard::GravityRift.phase(), Phase::Launch);
        assert_eq!(HazardCard::PowerFailure.phase(), Phase::Reveal);
    }

    #[test]
    fn test_gravity_rift_moves_to_next_defender_planet() {
        let mut state = state();
        // Player 2 owns planets 10..15.
        state.gate.aim(PlanetId::new(14));
        assert_eq!(
            HazardCard::GravityRift.effects(&state).as_slice(),
            &[Effect::ReaimGate(PlanetId::new(10))]
        );
    }

    #[test]
    fn test_cosmic_quake_hits_everyone() {
        let state = state();
        assert_eq!(HazardCard::CosmicQuake.effects(&state).len(), 3);
    }

    #[test]
    fn test_power_failure_zaps_main_players() {
        let state = state();
        assert_eq!(
            HazardCard::PowerFailure.effects(&state).as_slice(),
            &[
                Effect::ZapPlayerPowers(PlayerId::new(2)),
                Effect::ZapPlayerPowers(PlayerId::new(0)),
            ]
        );
    }
}
