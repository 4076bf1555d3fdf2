pub mod background; // Other fixtures of the round (live score ticker)
pub mod config;
pub mod phase;
pub mod possession;
pub mod quick; // Instant results, no live session
pub mod resolver;
pub mod session;
pub mod stamina;
pub mod strength;
pub mod substitutions;

pub use background::BackgroundFixtures;
pub use config::SimulationConfig;
pub use phase::{next_phase, MatchPhase};
pub use quick::quick_simulate;
pub use resolver::{resolve_minute, simulate_chunk, MinuteContext, SimulationResult};
pub use session::{FinalReport, MatchSession, TickOutcome};
pub use stamina::TeamTalk;
pub use strength::{team_strength, TeamStrength};
pub use substitutions::SubstitutionTracker;
