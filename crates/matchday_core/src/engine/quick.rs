//! Instant result for fixtures nobody is watching.

use rand::Rng;
use tracing::debug;

use super::phase::MatchPhase;
use super::resolver::{resolve_minute, MinuteContext};
use crate::error::MatchError;
use crate::models::{Match, MatchMinute, MatchResult, Team};
use crate::tactics::Mentality;

pub const QUICK_SIM_MINUTES: u8 = 90;

/// Resolve minutes 1–90 in one go with Balanced mentalities and freeze the result.
///
/// No stamina drain, substitutions or added time; squads are only read.
pub fn quick_simulate<R: Rng + ?Sized>(
    fixture: &mut Match,
    home: &Team,
    away: &Team,
    rng: &mut R,
) -> crate::Result<MatchResult> {
    if fixture.played {
        return Err(MatchError::InvalidPhase { phase: MatchPhase::FullTime });
    }
    for (expected, team) in [(&fixture.home_team_id, home), (&fixture.away_team_id, away)] {
        if expected != &team.id {
            return Err(MatchError::TeamMismatch { expected: expected.clone(), found: team.id.clone() });
        }
    }

    fixture.reset_for_kickoff();
    let ctx = MinuteContext::new(home, away, Mentality::Balanced, Mentality::Balanced);
    for minute in 1..=QUICK_SIM_MINUTES {
        let (events, delta) = resolve_minute(&ctx, MatchMinute::regular(minute), fixture.stats(), rng);
        fixture.apply(&delta);
        fixture.record(events);
    }
    let result = fixture.finalize();
    debug!("Quick sim {}: {}-{}", fixture.id, result.home_score, result.away_score);
    Ok(result)
}
