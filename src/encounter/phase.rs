//! Encounter phases in their fixed order.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    StartTurn,
    Regroup,
    Destiny,
    Launch,
    Alliance,
    Planning,
    Reveal,
    Resolution,
    End,
}

impl Phase {
    /// Phases of one encounter, after the start of the turn.
    pub const ENCOUNTER: [Phase; 8] = [
        Phase::Regroup,
        Phase::Destiny,
        Phase::Launch,
        Phase::Alliance,
        Phase::Planning,
        Phase::Reveal,
        Phase::Resolution,
        Phase::End,
    ];

    /// Following phase. `End` has none.
    #[must_use]
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::StartTurn => Some(Phase::Regroup),
            Phase::Regroup => Some(Phase::Destiny),
            Phase::Destiny => Some(Phase::Launch),
            Phase::Launch => Some(Phase::Alliance),
            Phase::Alliance => Some(Phase::Planning),
            Phase::Planning => Some(Phase::Reveal),
            Phase::Reveal => Some(Phase::Resolution),
            Phase::Resolution => Some(Phase::End),
            Phase::End => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::StartTurn => "start of turn",
            Phase::Regroup => "regroup",
            Phase::Destiny => "destiny",
            Phase::Launch => "launch",
            Phase::Alliance => "alliance",
            Phase::Planning => "planning",
            Phase::Reveal => "reveal",
            Phase::Resolution => "resolution",
            Phase::End => "end",
        };
        f.write_str(name)
    }
}
