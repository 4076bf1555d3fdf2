use serde::{Deserialize, Serialize};

/// Automatic substitution policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// AI replaces its most tired starter only below this stamina.
    pub tired_threshold: f32,
    /// Chance per minute that a tired AI starter is replaced.
    pub ai_probability: f64,
    /// Squad slot kept free for emergency cover when a starter is injured.
    pub emergency_slot: usize,
    /// Substitutions allowed per side, forced ones included.
    pub max_substitutions: u8,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self { tired_threshold: 40.0, ai_probability: 0.05, emergency_slot: 12, max_substitutions: 5 }
    }
}
