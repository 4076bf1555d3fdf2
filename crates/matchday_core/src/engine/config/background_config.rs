use serde::{Deserialize, Serialize};

/// Coarse random walk used for the other fixtures of the round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Scores are only touched every this many minutes.
    pub interval_minutes: u8,
    /// Chance a goal is scored in a fixture at each update.
    pub goal_probability: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self { interval_minutes: 5, goal_probability: 0.06 }
    }
}
