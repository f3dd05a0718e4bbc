//! Builder for a ready-to-run `Game`.

use crate::cards::Decks;
use crate::core::{EngineError, GameConfig, GameRng, GameState, PlayerId, PlayerMap, Result};
use crate::effects::flare_for;
use crate::powers::{PowerId, PowerInstance, PowerRegistry, PowerTable};
use crate::strategy::Strategy;

use super::engine::Game;

/// Builder for creating a `Game`.
///
/// ```
/// use rust_cosmic::core::GameConfig;
/// use rust_cosmic::game::GameBuilder;
/// use rust_cosmic::strategy::BasicStrategy;
///
/// let mut builder = GameBuilder::new(GameConfig::new(3)).seed(7).power(0, "Machine");
/// for seat in 0..3 {
///     builder = builder.strategy(seat, BasicStrategy::new());
/// }
/// let game = builder.build().unwrap();
/// assert_eq!(game.state().player_count(), 3);
/// ```
pub struct GameBuilder {
    config: GameConfig,
    seed: u64,
    registry: PowerRegistry,
    powers: Vec<(PlayerId, String)>,
    random_powers: bool,
    strategies: Vec<(PlayerId, Box<dyn Strategy>)>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            seed: 0,
            registry: PowerRegistry::with_builtin(),
            powers: Vec::new(),
            random_powers: false,
            strategies: Vec::new(),
        }
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use a custom registry instead of the built-in powers.
    #[must_use]
    pub fn registry(mut self, registry: PowerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Give seat `player` the named power. A second call for the same seat
    /// fills the dual-power slot.
    #[must_use]
    pub fn power(mut self, player: u8, name: &str) -> Self {
        self.powers.push((PlayerId::new(player), name.to_string()));
        self
    }

    /// Deal unused powers at random to seats with free slots.
    #[must_use]
    pub fn random_powers(mut self) -> Self {
        self.random_powers = true;
        self
    }

    #[must_use]
    pub fn strategy(mut self, player: u8, strategy: impl Strategy + 'static) -> Self {
        self.strategies.push((PlayerId::new(player), Box::new(strategy)));
        self
    }

    /// Build the game: validate, assign powers, build decks, seed strategies
    /// and deal opening hands.
    pub fn build(self) -> Result<Game> {
        self.config.validate()?;
        let player_count = self.config.player_count;
        let slots = if self.config.variants.dual_powers { 2 } else { 1 };
        let mut rng = GameRng::new(self.seed);

        let mut assigned: PlayerMap<Vec<PowerId>> = PlayerMap::with_default(player_count);
        let mut instances = Vec::new();
        for (player, name) in &self.powers {
            if player.index() >= player_count {
                return Err(EngineError::InvalidConfig(format!("{player} is not seated")));
            }
            let (id, power) = self.registry.create_by_name(name)?;
            if instances.iter().any(|instance: &PowerInstance| instance.id == id) {
                return Err(EngineError::InvalidConfig(format!("power `{name}` dealt twice")));
            }
            if assigned[*player].len() >= slots {
                return Err(EngineError::InvalidConfig(format!("{player} has no free power slot")));
            }
            assigned[*player].push(id);
            instances.push(PowerInstance {
                id,
                owner: *player,
                power,
            });
        }

        if self.random_powers {
            let mut pool: Vec<PowerId> = self
                .registry
                .ids()
                .filter(|id| !instances.iter().any(|instance| instance.id == *id))
                .collect();
            rng.shuffle(&mut pool);
            for player in PlayerId::all(player_count) {
                while assigned[player].len() < slots {
                    let Some(id) = pool.pop() else {
                        break;
                    };
                    let Some(power) = self.registry.create(id) else {
                        continue;
                    };
                    assigned[player].push(id);
                    instances.push(PowerInstance {
                        id,
                        owner: player,
                        power,
                    });
                }
            }
        }

        let flares = if self.config.variants.flares {
            let mut ids: Vec<PowerId> = instances.iter().map(|instance| instance.id).collect();
            ids.sort();
            ids.into_iter().map(flare_for).collect()
        } else {
            Vec::new()
        };
        let decks = Decks::build(&self.config, flares, &mut rng);

        let mut seats: Vec<Option<Box<dyn Strategy>>> = (0..player_count).map(|_| None).collect();
        for (player, strategy) in self.strategies {
            if let Some(seat) = seats.get_mut(player.index()) {
                *seat = Some(strategy);
            }
        }
        let strategies = PlayerMap::try_new(player_count, |player| -> Result<Box<dyn Strategy>> {
            let mut strategy = seats[player.index()]
                .take()
                .ok_or(EngineError::MissingStrategy(player))?;
            strategy.seed(rng.fork());
            Ok(strategy)
        })?;

        let mut state = GameState::new(self.config, decks, rng);
        for (player, ids) in assigned.iter() {
            state.players[player].powers = ids.iter().copied().collect();
        }

        let mut game = Game::new(state, PowerTable::new(instances), strategies);
        game.start()?;
        log::info!(
            "game built: {} players, seed {}, {} powers",
            player_count,
            self.seed,
            game.powers().len()
        );
        Ok(game)
    }
}
