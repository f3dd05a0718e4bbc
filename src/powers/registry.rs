//! Power registry: name → factory, with ids in registration order.

use rustc_hash::FxHashMap;

use crate::core::{EngineError, Result};

use super::catalog;
use super::power::{Power, PowerId};

/// Creates a fresh power instance.
pub type PowerFactory = fn() -> Box<dyn Power>;

/// Registry of available powers.
///
/// Built once and handed to the game builder. The id a power receives here
/// fixes its place in every modifier fold.
///
/// ```
/// use rust_cosmic::powers::{PowerId, PowerRegistry};
///
/// let registry = PowerRegistry::with_builtin();
/// assert_eq!(registry.id("Machine"), Some(PowerId::new(0)));
///
/// let (id, power) = registry.create_by_name("Pacifist").unwrap();
/// assert_eq!(power.name(), "Pacifist");
/// assert_eq!(id, PowerId::new(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PowerRegistry {
    factories: Vec<(&'static str, PowerFactory)>,
    by_name: FxHashMap<&'static str, PowerId>,
}

impl PowerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in powers.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for factory in catalog::BUILTIN {
            registry.register(*factory);
        }
        registry
    }

    /// Register a power and return its id.
    ///
    /// Panics if a power with the same name is already registered.
    pub fn register(&mut self, factory: PowerFactory) -> PowerId {
        let name = factory().name();
        if self.by_name.contains_key(name) {
            panic!("Power {name:?} already registered");
        }
        let id = PowerId::new(self.factories.len() as u16);
        self.factories.push((name, factory));
        self.by_name.insert(name, id);
        id
    }

    /// Id of the named power.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<PowerId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn name(&self, id: PowerId) -> Option<&'static str> {
        self.factories.get(id.index()).map(|(name, _)| *name)
    }

    /// Instantiate a registered power.
    #[must_use]
    pub fn create(&self, id: PowerId) -> Option<Box<dyn Power>> {
        self.factories.get(id.index()).map(|(_, factory)| factory())
    }

    /// Instantiate a power by name.
    pub fn create_by_name(&self, name: &str) -> Result<(PowerId, Box<dyn Power>)> {
        let id = self
            .id(name)
            .ok_or_else(|| EngineError::UnknownPower(name.to_string()))?;
        let power = self
            .create(id)
            .ok_or_else(|| EngineError::UnknownPower(name.to_string()))?;
        Ok((id, power))
    }

    /// All ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = PowerId> {
        (0..self.factories.len() as u16).map(PowerId::new)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Blank;

    impl Power for Blank {
        fn name(&self) -> &'static str {
            "Blank"
        }
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut registry = PowerRegistry::new();
        assert!(registry.is_empty());
        let id = registry.register(|| Box::new(Blank));
        assert_eq!(id, PowerId::new(0));
        assert_eq!(registry.name(id), Some("Blank"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration() {
        let mut registry = PowerRegistry::new();
        registry.register(|| Box::new(Blank));
        registry.register(|| Box::new(Blank));
    }

    #[test]
    fn test_unknown_power() {
        let registry = PowerRegistry::with_builtin();
        assert_eq!(
            registry.create_by_name("Nobody").unwrap_err(),
            EngineError::UnknownPower("Nobody".to_string())
        );
    }

    #[test]
    fn test_builtin_order() {
        let registry = PowerRegistry::with_builtin();
        let names: Vec<_> = registry.ids().filter_map(|id| registry.name(id)).collect();
        assert_eq!(names.first(), Some(&"Machine"));
        assert_eq!(names.last(), Some(&"Filch"));
        assert_eq!(names.len(), 15);
    }
}
