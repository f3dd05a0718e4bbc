//! Card lists for the standard decks.

use crate::core::PlayerId;

use super::{ArtifactKind, Card, DestinyCard, FlareCard, HazardCard, TechCard};

const ATTACK_VALUES: [u32; 25] = [
    0, 1, 4, 4, 5, 6, 6, 7, 8, 8, 9, 10, 10, 11, 12, 12, 13, 14, 14, 15, 20, 20, 23, 30, 40,
];
const NEGOTIATES: usize = 15;
const REINFORCEMENTS: [u32; 7] = [2, 2, 3, 3, 3, 5, 5];
const KICKERS: [u32; 3] = [2, 2, 3];

/// The main deck: encounter cards, reinforcements, kickers, artifacts and
/// one flare per power in play.
#[must_use]
pub fn main_deck(flares: Vec<FlareCard>) -> Vec<Card> {
    let mut cards: Vec<Card> = ATTACK_VALUES.iter().map(|&v| Card::Attack(v)).collect();
    cards.extend(std::iter::repeat(Card::Negotiate).take(NEGOTIATES));
    cards.push(Card::Morph);
    cards.extend(REINFORCEMENTS.iter().map(|&v| Card::Reinforcement(v)));
    cards.extend(KICKERS.iter().map(|&v| Card::Kicker(v)));
    cards.extend(
        [
            ArtifactKind::CosmicZap,
            ArtifactKind::CosmicZap,
            ArtifactKind::ForceField,
            ArtifactKind::MobiusTubes,
            ArtifactKind::EmotionControl,
        ]
        .into_iter()
        .map(Card::Artifact),
    );
    cards.extend(flares.into_iter().map(Card::Flare));
    cards
}

/// Rewards for defensive allies: stronger attacks and boosts.
#[must_use]
pub fn rewards_deck() -> Vec<Card> {
    let mut cards: Vec<Card> = [15, 18, 20, 22, 25, 25, 30]
        .into_iter()
        .map(Card::Attack)
        .collect();
    cards.extend([4, 4, 6, 6].into_iter().map(Card::Reinforcement));
    cards.extend([2, 3, 4].into_iter().map(Card::Kicker));
    cards.push(Card::Morph);
    cards.push(Card::Artifact(ArtifactKind::CosmicZap));
    cards
}

/// Three colour cards per player plus two wilds.
///
/// With hazards enabled the last colour card of each player carries a
/// hazard warning.
#[must_use]
pub fn destiny_deck(player_count: usize, hazards: bool) -> Vec<DestinyCard> {
    let mut cards = Vec::with_capacity(player_count * 3 + 2);
    for player in PlayerId::all(player_count) {
        cards.push(DestinyCard::player(player));
        cards.push(DestinyCard::player(player));
        let last = DestinyCard::player(player);
        cards.push(if hazards { last.with_hazard() } else { last });
    }
    cards.push(DestinyCard::wild());
    cards.push(DestinyCard::wild());
    cards
}

#[must_use]
pub fn tech_deck() -> Vec<TechCard> {
    vec![
        TechCard::new("Warpstream Generator", 3, 2),
        TechCard::new("Plasma Lance", 4, 3),
        TechCard::new("Cloaking Device", 2, 1),
        TechCard::new("Genesis Bomb", 6, 5),
        TechCard::new("Omega Missile", 5, 4),
        TechCard::new("Energy Cloak", 3, 2),
    ]
}

#[must_use]
pub fn hazard_deck() -> Vec<HazardCard> {
    [
        HazardCard::IonStorm,
        HazardCard::CosmicQuake,
        HazardCard::GravityRift,
        HazardCard::PowerFailure,
    ]
    .into_iter()
    .flat_map(|hazard| std::iter::repeat(hazard).take(3))
    .collect()
}
