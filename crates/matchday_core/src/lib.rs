//! # matchday_core - Minute-by-minute football match engine
//!
//! Two squads, their tactics and a live mentality go in; a stream of match
//! events and running statistics comes out, one simulated minute at a time.
//!
//! ## Features
//! - Strength model from ratings, stamina and tactical coherence
//! - Smoothed possession battle with home and formation advantages
//! - Per-minute event resolver (chances, shots, xG, goals, corners, cards, injuries)
//! - Live session state machine with added time, half-time talks and substitutions
//! - Seedable randomness (`ChaCha8Rng`) for reproducible runs
//! - JSON API and parallel batch simulation

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Minute resolution needs both squads, strengths and mentalities
#![allow(clippy::too_many_arguments)]
#![allow(clippy::large_enum_variant)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod tactics;

pub use api::{simulate_batch, simulate_match, simulate_match_json, BatchSummary, MatchRequest, MatchResponse};
pub use engine::{quick_simulate, MatchPhase, MatchSession, SimulationConfig, TeamTalk, TickOutcome};
pub use error::{MatchError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
