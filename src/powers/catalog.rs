//! Built-in powers.
//!
//! Registration order here is fold order in every game that uses
//! `PowerRegistry::with_builtin`.

use smallvec::smallvec;

use crate::core::PlayerId;
use crate::effects::{Effect, Effects};

use super::power::{Power, PowerContext, PowerFlags, Role, Side, WarpReason};
use super::registry::PowerFactory;

pub const BUILTIN: &[PowerFactory] = &[
    || Box::new(Machine),
    || Box::new(Pacifist),
    || Box::new(Void),
    || Box::new(Loser),
    || Box::new(AntiMatter),
    || Box::new(Macron),
    || Box::new(Virus),
    || Box::new(Warrior),
    || Box::new(Zombie),
    || Box::new(Parasite),
    || Box::new(Oracle),
    || Box::new(Masochist),
    || Box::new(Guardian),
    || Box::new(Survivor),
    || Box::new(Filch),
];

/// May keep taking encounters.
#[derive(Debug)]
pub struct Machine;

impl Power for Machine {
    fn name(&self) -> &'static str {
        "Machine"
    }

    fn flags(&self) -> PowerFlags {
        PowerFlags {
            grants_repeat_encounters: true,
            ..PowerFlags::default()
        }
    }
}

/// Negotiate beats attack.
#[derive(Debug)]
pub struct Pacifist;

impl Power for Pacifist {
    fn name(&self) -> &'static str {
        "Pacifist"
    }

    fn flags(&self) -> PowerFlags {
        PowerFlags {
            wins_negotiate_vs_attack: true,
            ..PowerFlags::default()
        }
    }
}

/// Beaten ships are destroyed.
#[derive(Debug)]
pub struct Void;

impl Power for Void {
    fn name(&self) -> &'static str {
        "Void"
    }

    fn flags(&self) -> PowerFlags {
        PowerFlags {
            destroys_instead_of_warp: true,
            ..PowerFlags::default()
        }
    }
}

/// Lower total wins.
#[derive(Debug)]
pub struct Loser;

impl Power for Loser {
    fn name(&self) -> &'static str {
        "Loser"
    }

    fn flags(&self) -> PowerFlags {
        PowerFlags {
            reverses_outcome: true,
            ..PowerFlags::default()
        }
    }
}

/// Lower total wins.
#[derive(Debug)]
pub struct AntiMatter;

impl Power for AntiMatter {
    fn name(&self) -> &'static str {
        "Anti-Matter"
    }

    fn flags(&self) -> PowerFlags {
        PowerFlags {
            reverses_outcome: true,
            ..PowerFlags::default()
        }
    }
}

/// Each of the holder's own ships counts as four.
#[derive(Debug)]
pub struct Macron;

impl Power for Macron {
    fn name(&self) -> &'static str {
        "Macron"
    }

    fn modify_ship_count(&self, ctx: &PowerContext<'_>, value: i32, side: Side) -> i32 {
        if ctx.role.side() == Some(side) {
            value + 3 * ctx.own_ships() as i32
        } else {
            value
        }
    }
}

/// Multiplies the card value by the holder's ships.
#[derive(Debug)]
pub struct Virus;

impl Power for Virus {
    fn name(&self) -> &'static str {
        "Virus"
    }

    fn modify_attack_value(&self, ctx: &PowerContext<'_>, value: i32, side: Side) -> i32 {
        if ctx.role.is_main_of(side) {
            value * ctx.own_ships().max(1) as i32
        } else {
            value
        }
    }
}

/// +2 to its side's total.
#[derive(Debug)]
pub struct Warrior;

impl Power for Warrior {
    fn name(&self) -> &'static str {
        "Warrior"
    }

    fn modify_total(&self, ctx: &PowerContext<'_>, value: i32, side: Side) -> i32 {
        if ctx.role.is_main_of(side) {
            value + 2
        } else {
            value
        }
    }
}

/// Ships never go to the warp.
#[derive(Debug)]
pub struct Zombie;

impl Power for Zombie {
    fn name(&self) -> &'static str {
        "Zombie"
    }

    fn on_ships_to_warp(&self, _ctx: &PowerContext<'_>, _count: u32, _reason: WarpReason) -> u32 {
        0
    }
}

/// Joins alliances uninvited.
#[derive(Debug)]
pub struct Parasite;

impl Power for Parasite {
    fn name(&self) -> &'static str {
        "Parasite"
    }

    fn flags(&self) -> PowerFlags {
        PowerFlags {
            self_qualifies_as_ally: true,
            ..PowerFlags::default()
        }
    }
}

/// Draws a card at planning when a main player.
#[derive(Debug)]
pub struct Oracle;

impl Power for Oracle {
    fn name(&self) -> &'static str {
        "Oracle"
    }

    fn on_planning(&self, ctx: &PowerContext<'_>) -> Effects {
        if ctx.role.is_main() {
            smallvec![Effect::DrawCards {
                player: ctx.owner,
                count: 1,
            }]
        } else {
            Effects::new()
        }
    }
}

/// Wins with no ships left on any planet.
#[derive(Debug)]
pub struct Masochist;

impl Power for Masochist {
    fn name(&self) -> &'static str {
        "Masochist"
    }

    fn has_won(&self, ctx: &PowerContext<'_>) -> bool {
        ctx.state.ships_on_planets(ctx.owner) == 0
    }
}

/// Defense wins ties. Optional.
#[derive(Debug)]
pub struct Guardian;

impl Power for Guardian {
    fn name(&self) -> &'static str {
        "Guardian"
    }

    fn is_optional(&self) -> bool {
        true
    }

    fn should_use(&self, ctx: &PowerContext<'_>) -> bool {
        ctx.role == Role::Defense
    }

    fn flags(&self) -> PowerFlags {
        PowerFlags {
            favors_defense_on_tie: true,
            ..PowerFlags::default()
        }
    }
}

/// Keeps its power with fewer home colonies.
#[derive(Debug)]
pub struct Survivor;

impl Power for Survivor {
    fn name(&self) -> &'static str {
        "Survivor"
    }

    fn flags(&self) -> PowerFlags {
        PowerFlags {
            ignores_home_colony_rule: true,
            ..PowerFlags::default()
        }
    }
}

/// As offense, attacks whoever holds the most cards.
#[derive(Debug)]
pub struct Filch;

impl Power for Filch {
    fn name(&self) -> &'static str {
        "Filch"
    }

    fn on_destiny(&self, ctx: &PowerContext<'_>, defense: PlayerId) -> Option<PlayerId> {
        if ctx.role != Role::Offense {
            return None;
        }
        let richest = ctx
            .state
            .players
            .iter()
            .filter(|(id, _)| *id != ctx.owner)
            .max_by(|(a_id, a), (b_id, b)| a.hand.len().cmp(&b.hand.len()).then(b_id.cmp(a_id)))
            .map(|(id, _)| id)?;
        (richest != defense).then_some(richest)
    }
}
