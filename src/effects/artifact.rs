//! Artifact timing and effects.

use smallvec::smallvec;

use crate::cards::ArtifactKind;
use crate::core::{GameState, PlayerId};
use crate::encounter::Phase;
use crate::powers::PowerId;

use super::{Effect, Effects};

impl ArtifactKind {
    /// Phases in which the artifact may be played.
    #[must_use]
    pub const fn phases(self) -> &'static [Phase] {
        match self {
            ArtifactKind::CosmicZap => &[Phase::Launch, Phase::Alliance, Phase::Planning, Phase::Reveal],
            ArtifactKind::ForceField => &[Phase::Alliance, Phase::Planning, Phase::Reveal],
            ArtifactKind::MobiusTubes => &[Phase::Regroup],
            ArtifactKind::EmotionControl => &[Phase::Reveal],
        }
    }

    /// Whether `player` could play it right now.
    #[must_use]
    pub fn is_playable(self, state: &GameState, player: PlayerId) -> bool {
        if !self.phases().contains(&state.phase) {
            return false;
        }
        let encounter = &state.encounter;
        match self {
            ArtifactKind::CosmicZap => zap_target(state, player).is_some(),
            ArtifactKind::ForceField => encounter.defense.is_some() && !encounter.cancelled,
            ArtifactKind::MobiusTubes => {
                player == encounter.offense && state.players[player].ships_in_warp > 0
            }
            ArtifactKind::EmotionControl => {
                !encounter.attacks_negotiate
                    && encounter
                        .cards
                        .iter()
                        .any(|(_, card)| matches!(card, Some(c) if c.attack_value().is_some()))
            }
        }
    }

    /// What playing it does.
    #[must_use]
    pub fn effects(self, state: &GameState, player: PlayerId) -> Effects {
        match self {
            ArtifactKind::CosmicZap => zap_target(state, player)
                .map(|id| smallvec![Effect::ZapPower(id)])
                .unwrap_or_default(),
            ArtifactKind::ForceField => smallvec![Effect::CancelEncounter],
            ArtifactKind::MobiusTubes => smallvec![Effect::RetrieveShips {
                player,
                count: state.players[player].ships_in_warp,
            }],
            ArtifactKind::EmotionControl => smallvec![Effect::ConvertAttacksToNegotiate],
        }
    }
}

/// First unzapped power of the main player opposing `player`.
/// Bystanders aim at the offense.
fn zap_target(state: &GameState, player: PlayerId) -> Option<PowerId> {
    let encounter = &state.encounter;
    let target = encounter.opponent_of(player).or_else(|| {
        (encounter.side_of(player).is_none() && encounter.defense.is_some()).then_some(encounter.offense)
    })?;
    let holder = &state.players[target];
    if !holder.power_active {
        return None;
    }
    holder
        .powers
        .iter()
        .copied()
        .find(|id| !encounter.zapped.contains(id))
}
