//! Match phase flow: FirstHalf → HalfTime → SecondHalf → FullTime.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum MatchPhase {
    #[default]
    FirstHalf,
    HalfTime,
    SecondHalf,
    FullTime,
}

impl MatchPhase {
    /// Whether minutes are played in this phase.
    pub fn is_playing(&self) -> bool {
        matches!(self, MatchPhase::FirstHalf | MatchPhase::SecondHalf)
    }

    /// Last regular minute of the half, after which added time starts.
    pub fn regulation_end(&self) -> Option<u8> {
        match self {
            MatchPhase::FirstHalf => Some(45),
            MatchPhase::SecondHalf => Some(90),
            _ => None,
        }
    }
}

/// Advance to the next phase. FullTime is terminal.
pub fn next_phase(current: MatchPhase) -> MatchPhase {
    match current {
        MatchPhase::FirstHalf => MatchPhase::HalfTime,
        MatchPhase::HalfTime => MatchPhase::SecondHalf,
        MatchPhase::SecondHalf => MatchPhase::FullTime,
        MatchPhase::FullTime => MatchPhase::FullTime,
    }
}
