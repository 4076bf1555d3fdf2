use serde::{Deserialize, Serialize};

/// Stamina drained per simulated minute from each outfield starter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StaminaConfig {
    /// All Out Attack mentality or a Gegenpress style (default: 0.6)
    pub intense_drain: f32,
    /// Park the Bus mentality (default: 0.2)
    pub low_block_drain: f32,
    /// Everything else (default: 0.4)
    pub default_drain: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self { intense_drain: 0.6, low_block_drain: 0.2, default_drain: 0.4 }
    }
}
