//! Standing combat bonuses from researched tech and stations.

use crate::core::GameState;
use crate::powers::Side;

use super::{BonusSource, Effect, Effects};

/// Tech and station bonuses for both sides, as `AddBonus` effects.
///
/// Tech helps the main player of either side. A station helps the defense
/// when the gate is aimed at the station's planet.
#[must_use]
pub fn standing_bonuses(state: &GameState) -> Effects {
    let mut effects = Effects::new();
    for side in [Side::Offense, Side::Defense] {
        let Some(main) = state.encounter.main_player(side) else {
            continue;
        };
        let tech = state.players[main]
            .tech
            .as_ref()
            .map_or(0, |tech| tech.combat_bonus());
        if tech != 0 {
            effects.push(Effect::AddBonus {
                side,
                source: BonusSource::Tech,
                amount: tech,
            });
        }
    }

    if let (Some(defense), Some(target)) = (state.encounter.defense, state.gate.target()) {
        if let Some(station) = state.players[defense].station {
            if station.planet == target {
                effects.push(Effect::AddBonus {
                    side: Side::Defense,
                    source: BonusSource::Station,
                    amount: station.defense_bonus,
                });
            }
        }
    }
    effects
}
