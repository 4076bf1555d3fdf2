//! # Session configuration
//!
//! Tuning knobs of the match loop (stamina drain, substitution policy, added
//! time, background fixtures). The per-minute resolver thresholds are fixed
//! constants in `engine::resolver` and are not configurable.
//!
//! ```rust
//! use matchday_core::engine::config::SimulationConfig;
//!
//! let config = SimulationConfig::default();
//! assert_eq!(config.stoppage.first_half, (1, 3));
//! ```

mod background_config;
mod stamina_config;
mod stoppage_config;
mod substitution_config;

pub use background_config::BackgroundConfig;
pub use stamina_config::StaminaConfig;
pub use stoppage_config::{StoppageConfig, MAX_ADDED_MINUTES};
pub use substitution_config::SubstitutionConfig;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub stamina: StaminaConfig,
    pub substitutions: SubstitutionConfig,
    pub stoppage: StoppageConfig,
    pub background: BackgroundConfig,
}

impl SimulationConfig {
    /// Load from YAML; missing sections keep their defaults.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: SimulationConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> crate::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// No AI tiredness substitutions and a fixed one-minute added time per half.
    pub fn deterministic_test() -> Self {
        let mut cfg = Self::default();
        cfg.substitutions.ai_probability = 0.0;
        cfg.stoppage.first_half = (1, 1);
        cfg.stoppage.second_half = (1, 1);
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.stamina.default_drain, 0.4);
        assert_eq!(cfg.substitutions.tired_threshold, 40.0);
        assert_eq!(cfg.substitutions.emergency_slot, 12);
        assert_eq!(cfg.stoppage.second_half, (2, 6));
        assert_eq!(cfg.background.interval_minutes, 5);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "stamina:\n  intense_drain: 0.9\nsubstitutions:\n  max_substitutions: 3\n";
        let cfg = SimulationConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.stamina.intense_drain, 0.9);
        assert_eq!(cfg.stamina.low_block_drain, 0.2);
        assert_eq!(cfg.substitutions.max_substitutions, 3);
        assert_eq!(cfg.stoppage, StoppageConfig::default());
    }

    #[test]
    fn test_yaml_round_trip() {
        let cfg = SimulationConfig::deterministic_test();
        let yaml = cfg.to_yaml().unwrap();
        assert_eq!(SimulationConfig::from_yaml(&yaml).unwrap(), cfg);
    }

    #[test]
    fn test_bad_yaml_is_config_error() {
        let err = SimulationConfig::from_yaml("stamina: [1, 2").unwrap_err();
        assert!(matches!(err, crate::MatchError::Config(_)));
    }
}
