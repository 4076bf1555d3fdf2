use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{BackgroundFixtures, MatchSession, SimulationConfig, TeamTalk, TickOutcome};
use crate::error::MatchError;
use crate::models::{Match, MatchEvent, MatchResult, MatchStats, Side, StandingsDelta, Team};
use crate::tactics::Mentality;

pub const SCHEMA_VERSION: u8 = 1;

/// Upper bound on ticks for one match (90 minutes, two notices, two whistles, added time).
const MAX_TICKS: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    #[serde(default = "default_match_id")]
    pub match_id: String,
    #[serde(default = "default_week")]
    pub week: u16,
    pub home_team: Team,
    pub away_team: Team,
    /// Side the user manages: gets `mentality` and `half_time_talk`, no AI substitutions
    #[serde(default)]
    pub user_side: Option<Side>,
    #[serde(default)]
    pub mentality: Mentality,
    #[serde(default)]
    pub half_time_talk: Option<TeamTalk>,
    /// Other fixtures of the round, played as a live score ticker
    #[serde(default)]
    pub background: Vec<FixtureRequest>,
    #[serde(default)]
    pub config: Option<SimulationConfig>,
}

fn default_match_id() -> String {
    "match".to_string()
}

fn default_week() -> u16 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRequest {
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub match_id: String,
    pub seed: u64,
    pub result: MatchResult,
    pub stats: MatchStats,
    pub events: Vec<MatchEvent>,
    pub standings: Vec<StandingsDelta>,
    pub background: Vec<Match>,
    /// Squads after the match: final order, stamina, injuries and form
    pub home_team: Team,
    pub away_team: Team,
}

impl MatchRequest {
    pub fn validate(&self) -> crate::Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(MatchError::UnsupportedSchema(self.schema_version));
        }
        if self.home_team.id == self.away_team.id {
            return Err(MatchError::TeamMismatch {
                expected: "two different teams".to_string(),
                found: self.home_team.id.clone(),
            });
        }
        Ok(())
    }
}

/// Play a full live session for `request`, with its own seed.
pub fn simulate_match(request: &MatchRequest) -> crate::Result<MatchResponse> {
    simulate_with_seed(request, request.seed)
}

pub(crate) fn simulate_with_seed(request: &MatchRequest, seed: u64) -> crate::Result<MatchResponse> {
    request.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let config = request.config.clone().unwrap_or_default();

    let mut home = request.home_team.clone();
    let mut away = request.away_team.clone();
    home.prepare_for_kickoff();
    away.prepare_for_kickoff();

    let fixtures = request
        .background
        .iter()
        .map(|f| Match::scheduled(f.id.clone(), f.home_team_id.clone(), f.away_team_id.clone(), request.week))
        .collect();
    let background = BackgroundFixtures::new(fixtures, config.background.clone());

    let fixture = Match::scheduled(request.match_id.clone(), home.id.clone(), away.id.clone(), request.week);
    let mut session = MatchSession::new(fixture, config).with_background(background);
    if let Some(side) = request.user_side {
        session = session.with_user_side(side);
        session.set_mentality(request.mentality)?;
    }

    for _ in 0..MAX_TICKS {
        match session.tick(&mut home, &mut away, &mut rng)? {
            TickOutcome::HalfTime => session.start_second_half(&mut home, &mut away, request.half_time_talk)?,
            TickOutcome::FullTime(report) => {
                debug!("{} finished after seed {}", request.match_id, seed);
                let background = session.background().map(|b| b.fixtures().to_vec()).unwrap_or_default();
                let fixture = session.into_fixture();
                return Ok(MatchResponse {
                    schema_version: SCHEMA_VERSION,
                    match_id: fixture.id.clone(),
                    seed,
                    result: report.result,
                    stats: fixture.stats().clone(),
                    events: fixture.events().to_vec(),
                    standings: report.standings,
                    background,
                    home_team: home,
                    away_team: away,
                });
            }
            _ => {}
        }
    }
    Err(MatchError::InvalidPhase { phase: session.phase() })
}

/// JSON in, JSON out.
pub fn simulate_match_json(request_json: &str) -> crate::Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = simulate_match(&request)?;
    Ok(serde_json::to_string(&response)?)
}
