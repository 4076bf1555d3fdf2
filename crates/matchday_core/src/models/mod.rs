pub mod events;
pub mod match_result;
pub mod match_statistics;
pub mod player;
pub mod team;

pub use events::{EventKind, MatchEvent, MatchMinute};
pub use match_result::{Match, MatchResult, StandingsDelta};
pub use match_statistics::{MatchStats, Side, SideStats, StatsDelta};
pub use player::{FormHistory, Player, Position};
pub use team::{Team, TeamData, STARTERS};
