//! Player substitutions
//!
//! Three ways a player leaves the pitch:
//! - AI tiredness change: the lowest-stamina starter of a computer side
//! - forced change after an injury (emergency slot first, then the bench in order)
//! - manual change requested by the user
//!
//! A substitution swaps a starter slot with a bench slot. Withdrawn players
//! move to the bench and can never come back on.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::SubstitutionConfig;
use crate::error::MatchError;
use crate::models::{EventKind, MatchEvent, MatchMinute, Player, Team, STARTERS};

/// Substitution bookkeeping for one side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionTracker {
    made: u8,
    withdrawn: HashSet<String>,
}

impl SubstitutionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn made(&self) -> u8 {
        self.made
    }

    pub fn is_withdrawn(&self, player_id: &str) -> bool {
        self.withdrawn.contains(player_id)
    }

    pub fn has_remaining(&self, cfg: &SubstitutionConfig) -> bool {
        self.made < cfg.max_substitutions
    }

    /// Fit and never substituted off.
    pub fn is_eligible(&self, player: &Player) -> bool {
        !player.injured && !self.is_withdrawn(&player.id)
    }

    /// First eligible bench slot, in bench order.
    pub fn first_eligible(&self, team: &Team) -> Option<usize> {
        team.bench()
            .iter()
            .position(|p| self.is_eligible(p))
            .map(|i| i + STARTERS)
    }

    /// Emergency slot when it holds an eligible player, otherwise the first eligible one.
    pub fn injury_cover(&self, team: &Team, cfg: &SubstitutionConfig) -> Option<usize> {
        let emergency = cfg.emergency_slot;
        let emergency_ok = emergency >= STARTERS
            && team.player(emergency).is_some_and(|p| self.is_eligible(p));
        if emergency_ok {
            Some(emergency)
        } else {
            self.first_eligible(team)
        }
    }

    /// Swap `starter` off for `bench`, after checking both slots and the allowance.
    pub fn execute(
        &mut self,
        team: &mut Team,
        starter: usize,
        bench: usize,
        cfg: &SubstitutionConfig,
    ) -> crate::Result<()> {
        if !self.has_remaining(cfg) {
            return Err(MatchError::InvalidSubstitution(format!(
                "{} has used all {} substitutions",
                team.name, cfg.max_substitutions
            )));
        }
        if starter >= STARTERS {
            return Err(MatchError::InvalidSubstitution(format!("slot {starter} is not a starter")));
        }
        let incoming = team
            .player(bench)
            .filter(|_| bench >= STARTERS)
            .ok_or_else(|| MatchError::InvalidSubstitution(format!("slot {bench} is not on the bench")))?;
        if !self.is_eligible(incoming) {
            return Err(MatchError::InvalidSubstitution(format!(
                "{} is not available to come on",
                incoming.name
            )));
        }

        team.swap(starter, bench)?;
        if let Some(outgoing) = team.player(bench) {
            self.withdrawn.insert(outgoing.id.clone());
        }
        self.made += 1;
        Ok(())
    }
}

fn names(team: &Team, starter: usize, bench: usize) -> (String, String) {
    let name = |slot: usize| team.player(slot).map(|p| p.name.clone()).unwrap_or_default();
    (name(starter), name(bench))
}

/// Manual change requested by the touchline.
pub fn manual_substitution(
    team: &mut Team,
    tracker: &mut SubstitutionTracker,
    cfg: &SubstitutionConfig,
    starter: usize,
    bench: usize,
    at: MatchMinute,
) -> crate::Result<MatchEvent> {
    let (off, on) = names(team, starter, bench);
    tracker.execute(team, starter, bench, cfg)?;
    let on_id = team.player(starter).map(|p| p.id.clone()).unwrap_or_default();
    Ok(MatchEvent::new(at, EventKind::Substitution, Some(team.id.as_str()), format!("SUB: {on} replaces {off}"))
        .with_player(&on_id))
}

/// Computer-side tiredness change. At most one per side per minute.
pub fn ai_substitution<R: Rng + ?Sized>(
    team: &mut Team,
    tracker: &mut SubstitutionTracker,
    cfg: &SubstitutionConfig,
    at: MatchMinute,
    rng: &mut R,
) -> Option<MatchEvent> {
    if !tracker.has_remaining(cfg) {
        return None;
    }

    let (starter, tired) = team
        .starters()
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.injured)
        .min_by(|(_, a), (_, b)| a.stamina.total_cmp(&b.stamina))?;

    if tired.stamina >= cfg.tired_threshold || rng.gen::<f64>() >= cfg.ai_probability {
        return None;
    }

    let bench = tracker.first_eligible(team)?;
    let (off, on) = names(team, starter, bench);
    match tracker.execute(team, starter, bench, cfg) {
        Ok(()) => {
            debug!("{} {}: {} replaces tired {}", team.short_name, at, on, off);
            let on_id = team.player(starter).map(|p| p.id.clone()).unwrap_or_default();
            Some(
                MatchEvent::new(at, EventKind::Substitution, Some(team.id.as_str()), format!("SUB: {on} replaces {off}"))
                    .with_player(&on_id),
            )
        }
        Err(err) => {
            warn!("AI substitution skipped: {}", err);
            None
        }
    }
}

/// Mark `player_id` injured and bring on cover if any is left.
///
/// Returns the forced substitution event, or `None` when the player stays
/// on injured (no cover or no substitutions left).
pub fn injury_substitution(
    team: &mut Team,
    tracker: &mut SubstitutionTracker,
    cfg: &SubstitutionConfig,
    player_id: &str,
    at: MatchMinute,
) -> Option<MatchEvent> {
    let slot = team.starter_slot(player_id)?;
    if let Some(player) = team.player_mut(slot) {
        player.mark_injured();
    }

    if !tracker.has_remaining(cfg) {
        warn!("{}: no substitutions left to replace injured {}", team.name, player_id);
        return None;
    }
    let Some(cover) = tracker.injury_cover(team, cfg) else {
        warn!("{}: no eligible cover for injured {}", team.name, player_id);
        return None;
    };

    let (off, on) = names(team, slot, cover);
    match tracker.execute(team, slot, cover, cfg) {
        Ok(()) => {
            let on_id = team.player(slot).map(|p| p.id.clone()).unwrap_or_default();
            Some(
                MatchEvent::new(
                    at,
                    EventKind::Substitution,
                    Some(team.id.as_str()),
                    format!("FORCED SUB: {on} replaces injured {off}"),
                )
                .with_player(&on_id),
            )
        }
        Err(err) => {
            warn!("Forced substitution skipped: {}", err);
            None
        }
    }
}
