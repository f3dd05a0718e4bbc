//! Encounter log.
//!
//! One `EncounterRecord` per resolved encounter. The log uses `im::Vector`
//! so snapshots of the state share it cheaply, and encodes to bincode for
//! byte-level determinism checks.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::player::{PlanetId, PlayerId};
use crate::encounter::{Outcome, Phase};

/// What happened in one encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub turn: u32,
    /// 1 for the first encounter of a turn.
    pub number: u32,
    pub offense: PlayerId,
    pub defense: Option<PlayerId>,
    pub target: Option<PlanetId>,
    pub offensive_allies: Vec<PlayerId>,
    pub defensive_allies: Vec<PlayerId>,
    /// Phases entered, in order.
    pub phases: Vec<Phase>,
    pub outcome: Outcome,
    /// Final (offense, defense) totals when attack cards were compared.
    pub totals: Option<(i32, i32)>,
}

/// Persistent list of encounter records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    records: Vector<EncounterRecord>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: EncounterRecord) {
        self.records.push_back(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EncounterRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&EncounterRecord> {
        self.records.last()
    }

    /// bincode encoding of every record.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.records).map_err(|e| EngineError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(turn: u32, outcome: Outcome) -> EncounterRecord {
        EncounterRecord {
            turn,
            number: 1,
            offense: PlayerId::new(0),
            defense: Some(PlayerId::new(1)),
            target: Some(PlanetId::new(5)),
            offensive_allies: Vec::new(),
            defensive_allies: vec![PlayerId::new(2)],
            phases: vec![Phase::Regroup, Phase::Destiny],
            outcome,
            totals: Some((18, 12)),
        }
    }

    #[test]
    fn test_record_and_iterate() {
        let mut log = GameLog::new();
        assert!(log.is_empty());
        log.record(record(1, Outcome::OffenseWon));
        log.record(record(2, Outcome::DealFailed));
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|r| r.turn), Some(2));
    }

    #[test]
    fn test_bytes_are_stable() {
        let mut a = GameLog::new();
        let mut b = GameLog::new();
        for log in [&mut a, &mut b] {
            log.record(record(1, Outcome::Tie));
        }
        assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());

        b.record(record(2, Outcome::Cancelled));
        assert_ne!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    }
}
