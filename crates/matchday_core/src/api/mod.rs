pub mod batch;
pub mod json_api;

pub use batch::{simulate_batch, simulate_batch_json, BatchSummary};
pub use json_api::{simulate_match, simulate_match_json, FixtureRequest, MatchRequest, MatchResponse};
