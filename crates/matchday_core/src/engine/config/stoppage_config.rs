use serde::{Deserialize, Serialize};

/// Upper bound on any drawn added time, so the clock stays well inside `u8`.
pub const MAX_ADDED_MINUTES: u8 = 30;

/// Inclusive ranges added time is drawn from, per half.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoppageConfig {
    pub first_half: (u8, u8),
    pub second_half: (u8, u8),
}

impl Default for StoppageConfig {
    fn default() -> Self {
        Self { first_half: (1, 3), second_half: (2, 6) }
    }
}

impl StoppageConfig {
    /// Range with its bounds ordered, so `(3, 1)` still draws from 1..=3.
    /// Both bounds are capped at [`MAX_ADDED_MINUTES`].
    pub fn range(bounds: (u8, u8)) -> std::ops::RangeInclusive<u8> {
        let (lo, hi) = (bounds.0.min(MAX_ADDED_MINUTES), bounds.1.min(MAX_ADDED_MINUTES));
        lo.min(hi)..=lo.max(hi)
    }
}
