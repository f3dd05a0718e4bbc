//! Flare tiers, timing and effects.

use smallvec::smallvec;

use crate::cards::{FlareCard, FlareEffect};
use crate::core::{GameState, PlayerId};
use crate::encounter::Phase;
use crate::powers::{PowerId, PowerTable};

use super::{BonusSource, Effect, Effects};

/// The flare shuffled into the main deck for `power`.
///
/// Wild and super effects cycle through the effect kinds by power id.
#[must_use]
pub fn flare_for(power: PowerId) -> FlareCard {
    let (wild, super_effect) = match power.index() % 4 {
        0 => (FlareEffect::CombatBonus(2), FlareEffect::CombatBonus(5)),
        1 => (FlareEffect::DrawCards(1), FlareEffect::DrawCards(3)),
        2 => (FlareEffect::RetrieveShips(1), FlareEffect::RetrieveShips(4)),
        _ => (FlareEffect::CombatBonus(1), FlareEffect::ZapOpponent),
    };
    FlareCard {
        power,
        wild,
        super_effect,
    }
}

impl FlareCard {
    /// Tier `player` may use: super for the active holder, wild for anyone
    /// not holding the power, nothing for a holder whose power is off.
    #[must_use]
    pub fn tier(&self, state: &GameState, powers: &PowerTable, player: PlayerId) -> Option<FlareEffect> {
        if state.players[player].has_power(self.power) {
            powers.is_active(state, self.power).then_some(self.super_effect)
        } else {
            Some(self.wild)
        }
    }
}

impl FlareEffect {
    #[must_use]
    pub const fn phases(self) -> &'static [Phase] {
        match self {
            FlareEffect::CombatBonus(_) => &[Phase::Reveal],
            FlareEffect::DrawCards(_) => &[Phase::Regroup, Phase::Planning],
            FlareEffect::RetrieveShips(_) => &[Phase::Regroup],
            FlareEffect::ZapOpponent => &[Phase::Planning, Phase::Reveal],
        }
    }

    #[must_use]
    pub fn is_playable(self, state: &GameState, player: PlayerId) -> bool {
        if !self.phases().contains(&state.phase) {
            return false;
        }
        let encounter = &state.encounter;
        match self {
            FlareEffect::CombatBonus(_) => encounter.side_of(player).is_some(),
            FlareEffect::DrawCards(_) => true,
            FlareEffect::RetrieveShips(_) => state.players[player].ships_in_warp > 0,
            FlareEffect::ZapOpponent => encounter
                .opponent_of(player)
                .is_some_and(|opponent| !state.players[opponent].powers.is_empty()),
        }
    }

    #[must_use]
    pub fn effects(self, state: &GameState, player: PlayerId) -> Effects {
        let encounter = &state.encounter;
        match self {
            FlareEffect::CombatBonus(amount) => encounter
                .side_of(player)
                .map(|side| {
                    smallvec![Effect::AddBonus {
                        side,
                        source: BonusSource::Flare,
                        amount,
                    }]
                })
                .unwrap_or_default(),
            FlareEffect::DrawCards(count) => smallvec![Effect::DrawCards { player, count }],
            FlareEffect::RetrieveShips(count) => smallvec![Effect::RetrieveShips { player, count }],
            FlareEffect::ZapOpponent => encounter
                .opponent_of(player)
                .map(|opponent| smallvec![Effect::ZapPlayerPowers(opponent)])
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Decks;
    use crate::core::{GameConfig, GameRng};
    use crate::powers::{PowerInstance, PowerRegistry, Side};

    fn setup() -> (GameState, PowerTable) {
        let config = GameConfig::new(3);
        let mut rng = GameRng::new(13);
        let decks = Decks::build(&config, Vec::new(), &mut rng);
        let mut state = GameState::new(config, decks, rng);
        state.encounter.defense = Some(PlayerId::new(1));

        let registry = PowerRegistry::with_builtin();
        let (id, power) = registry.create_by_name("Warrior").unwrap();
        state.players[PlayerId::new(0)].powers.push(id);
        let table = PowerTable::new(vec![PowerInstance {
            id,
            owner: PlayerId::new(0),
            power,
        }]);
        (state, table)
    }

    #[test]
    fn test_tiers() {
        let (mut state, table) = setup();
        let flare = flare_for(table.iter().next().unwrap().id);

        assert_eq!(flare.tier(&state, &table, PlayerId::new(0)), Some(flare.super_effect));
        assert_eq!(flare.tier(&state, &table, PlayerId::new(2)), Some(flare.wild));

        state.players[PlayerId::new(0)].power_active = false;
        assert_eq!(flare.tier(&state, &table, PlayerId::new(0)), None);
    }

    #[test]
    fn test_combat_bonus_goes_to_player_side() {
        let (mut state, _) = setup();
        state.phase = Phase::Reveal;
        let bonus = FlareEffect::CombatBonus(3);

        assert!(bonus.is_playable(&state, PlayerId::new(1)));
        assert!(!bonus.is_playable(&state, PlayerId::new(2)));
        assert_eq!(
            bonus.effects(&state, PlayerId::new(1)).as_slice(),
            &[Effect::AddBonus { side: Side::Defense, source: BonusSource::Flare, amount: 3 }]
        );
    }

    #[test]
    fn test_zap_opponent() {
        let (mut state, _) = setup();
        state.phase = Phase::Planning;
        let zap = FlareEffect::ZapOpponent;
        assert!(zap.is_playable(&state, PlayerId::new(1)));
        assert!(!zap.is_playable(&state, PlayerId::new(0)));
        assert_eq!(
            zap.effects(&state, PlayerId::new(1)).as_slice(),
            &[Effect::ZapPlayerPowers(PlayerId::new(0))]
        );
    }

    #[test]
    fn test_flare_cycle() {
        assert_eq!(flare_for(PowerId::new(0)).super_effect, FlareEffect::CombatBonus(5));
        assert_eq!(flare_for(PowerId::new(7)).super_effect, FlareEffect::ZapOpponent);
    }
}
