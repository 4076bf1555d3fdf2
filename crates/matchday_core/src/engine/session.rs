//! Live match session
//!
//! Drives one fixture through FirstHalf → HalfTime → SecondHalf → FullTime,
//! one minute per [`MatchSession::tick`]. The squads are owned by the caller
//! and lent to every tick, since the session drains stamina, swaps players and
//! marks injuries on them.
//!
//! The raw clock counts played minutes within a half (it is reset to 45 at the
//! break); events are stamped with a [`MatchMinute`] so added time reads as
//! `45+2'` or `90+4'` and never runs backwards.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::background::BackgroundFixtures;
use super::config::{SimulationConfig, StoppageConfig};
use super::phase::{next_phase, MatchPhase};
use super::resolver::{resolve_minute, MinuteContext};
use super::stamina::{drain_starters, TeamTalk};
use super::substitutions::{ai_substitution, injury_substitution, manual_substitution, SubstitutionTracker};
use crate::error::MatchError;
use crate::models::{EventKind, Match, MatchEvent, MatchMinute, MatchResult, Side, StandingsDelta, Team};
use crate::tactics::Mentality;

pub const HALF_TIME_MINUTE: u8 = 45;

/// Default pacing between ticks, in milliseconds.
pub const DEFAULT_SPEED_MS: u32 = 600;

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Paused, at half time, or finished
    Idle,
    /// Added time for the half was announced; the clock did not move
    AddedTime(u8),
    /// One minute was played
    Minute { at: MatchMinute, events: Vec<MatchEvent> },
    /// First half over, session paused until `start_second_half`
    HalfTime,
    FullTime(FinalReport),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub result: MatchResult,
    /// Main fixture first (home, away), then every background fixture.
    pub standings: Vec<StandingsDelta>,
}

#[derive(Debug, Clone)]
pub struct MatchSession {
    fixture: Match,
    config: SimulationConfig,
    phase: MatchPhase,
    elapsed: u8,
    clock: MatchMinute,
    running: bool,
    speed_ms: u32,
    user_side: Option<Side>,
    user_mentality: Mentality,
    stoppage: Option<u8>,
    home_subs: SubstitutionTracker,
    away_subs: SubstitutionTracker,
    background: Option<BackgroundFixtures>,
}

impl MatchSession {
    /// Kick off `fixture`, reset to a blank 0-0 state.
    pub fn new(mut fixture: Match, config: SimulationConfig) -> Self {
        fixture.reset_for_kickoff();
        Self {
            fixture,
            config,
            phase: MatchPhase::FirstHalf,
            elapsed: 0,
            clock: MatchMinute::default(),
            running: true,
            speed_ms: DEFAULT_SPEED_MS,
            user_side: None,
            user_mentality: Mentality::Balanced,
            stoppage: None,
            home_subs: SubstitutionTracker::new(),
            away_subs: SubstitutionTracker::new(),
            background: None,
        }
    }

    /// Side controlled by the user. It gets the mentality override and no AI substitutions.
    pub fn with_user_side(mut self, side: Side) -> Self {
        self.user_side = Some(side);
        self
    }

    pub fn with_background(mut self, fixtures: BackgroundFixtures) -> Self {
        self.background = Some(fixtures);
        self
    }

    pub fn fixture(&self) -> &Match {
        &self.fixture
    }

    pub fn into_fixture(self) -> Match {
        self.fixture
    }

    pub fn background(&self) -> Option<&BackgroundFixtures> {
        self.background.as_ref()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Raw minute counter of the current half.
    pub fn elapsed(&self) -> u8 {
        self.elapsed
    }

    /// Stamp of the last minute played or announced.
    pub fn clock(&self) -> MatchMinute {
        self.clock
    }

    pub fn stoppage(&self) -> Option<u8> {
        self.stoppage
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn user_side(&self) -> Option<Side> {
        self.user_side
    }

    pub fn user_mentality(&self) -> Mentality {
        self.user_mentality
    }

    pub fn substitutions_made(&self, side: Side) -> u8 {
        self.tracker(side).made()
    }

    fn tracker(&self, side: Side) -> &SubstitutionTracker {
        match side {
            Side::Home => &self.home_subs,
            Side::Away => &self.away_subs,
        }
    }

    fn tracker_mut(&mut self, side: Side) -> &mut SubstitutionTracker {
        match side {
            Side::Home => &mut self.home_subs,
            Side::Away => &mut self.away_subs,
        }
    }

    fn mentality(&self, side: Side) -> Mentality {
        if self.user_side == Some(side) {
            self.user_mentality
        } else {
            Mentality::Balanced
        }
    }

    fn expect_team(&self, side: Side, team: &Team) -> crate::Result<()> {
        let expected = match side {
            Side::Home => &self.fixture.home_team_id,
            Side::Away => &self.fixture.away_team_id,
        };
        if &team.id != expected {
            return Err(MatchError::TeamMismatch { expected: expected.clone(), found: team.id.clone() });
        }
        Ok(())
    }

    fn stamp(&self, minute: u8) -> MatchMinute {
        match self.phase.regulation_end() {
            Some(end) if minute > end => MatchMinute::stoppage(end, minute - end),
            _ => MatchMinute::regular(minute),
        }
    }

    fn enter(&mut self, phase: MatchPhase) {
        info!(
            "{} v {}: {:?} -> {:?} at {}",
            self.fixture.home_team_id, self.fixture.away_team_id, self.phase, phase, self.clock
        );
        self.phase = phase;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resume after a pause. Half time is only left through `start_second_half`.
    pub fn resume(&mut self) -> crate::Result<()> {
        if !self.phase.is_playing() {
            return Err(MatchError::InvalidPhase { phase: self.phase });
        }
        self.running = true;
        Ok(())
    }

    /// Pacing hint for the caller's timer. Does not change the simulation.
    pub fn set_speed(&mut self, speed_ms: u32) {
        self.speed_ms = speed_ms;
    }

    pub fn set_mentality(&mut self, mentality: Mentality) -> crate::Result<()> {
        if self.phase == MatchPhase::FullTime {
            return Err(MatchError::InvalidPhase { phase: self.phase });
        }
        if self.user_side.is_none() {
            warn!("Mentality set on a session without a user side; it has no effect");
        }
        self.user_mentality = mentality;
        Ok(())
    }

    /// Leave half time, optionally giving the user side a team talk.
    pub fn start_second_half(
        &mut self,
        home: &mut Team,
        away: &mut Team,
        talk: Option<TeamTalk>,
    ) -> crate::Result<()> {
        if self.phase != MatchPhase::HalfTime {
            return Err(MatchError::InvalidPhase { phase: self.phase });
        }
        self.expect_team(Side::Home, home)?;
        self.expect_team(Side::Away, away)?;

        if let Some(talk) = talk {
            match self.user_side {
                Some(Side::Home) => talk.apply(home),
                Some(Side::Away) => talk.apply(away),
                None => warn!("Team talk {:?} ignored: no user side", talk),
            }
        }

        self.enter(next_phase(self.phase));
        self.stoppage = None;
        self.running = true;
        Ok(())
    }

    /// Manual substitution for `side`, allowed until full time.
    pub fn substitute(
        &mut self,
        side: Side,
        team: &mut Team,
        starter: usize,
        bench: usize,
    ) -> crate::Result<MatchEvent> {
        if self.phase == MatchPhase::FullTime {
            return Err(MatchError::InvalidPhase { phase: self.phase });
        }
        self.expect_team(side, team)?;

        let at = self.clock;
        let cfg = self.config.substitutions.clone();
        let event = manual_substitution(team, self.tracker_mut(side), &cfg, starter, bench, at)?;
        self.fixture.record([event.clone()]);
        Ok(event)
    }

    /// Advance the match by one step.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        home: &mut Team,
        away: &mut Team,
        rng: &mut R,
    ) -> crate::Result<TickOutcome> {
        self.expect_team(Side::Home, home)?;
        self.expect_team(Side::Away, away)?;

        if !self.running || !self.phase.is_playing() {
            return Ok(TickOutcome::Idle);
        }

        let next = self.elapsed.saturating_add(1);
        let Some(end) = self.phase.regulation_end() else {
            return Ok(TickOutcome::Idle);
        };

        if next == end && self.stoppage.is_none() {
            let bounds = match self.phase {
                MatchPhase::FirstHalf => self.config.stoppage.first_half,
                _ => self.config.stoppage.second_half,
            };
            let added = rng.gen_range(StoppageConfig::range(bounds));
            self.stoppage = Some(added);
            self.clock = MatchMinute::regular(end);
            self.fixture.record([MatchEvent::new(
                self.clock,
                EventKind::AddedTime,
                None,
                format!("+{added} Minutes Added Time"),
            )]);
            debug!("{:?}: {} added minutes", self.phase, added);
            return Ok(TickOutcome::AddedTime(added));
        }

        if next > end.saturating_add(self.stoppage.unwrap_or(0)) {
            return Ok(self.end_half());
        }

        let events = self.play_minute(next, home, away, rng);
        self.elapsed = next;
        debug!("{} played, {} events", self.clock, events.len());
        Ok(TickOutcome::Minute { at: self.clock, events })
    }

    fn end_half(&mut self) -> TickOutcome {
        match self.phase {
            MatchPhase::FirstHalf => {
                self.enter(next_phase(self.phase));
                self.running = false;
                self.elapsed = HALF_TIME_MINUTE;
                TickOutcome::HalfTime
            }
            _ => {
                self.enter(MatchPhase::FullTime);
                self.running = false;
                TickOutcome::FullTime(self.finish())
            }
        }
    }

    fn finish(&mut self) -> FinalReport {
        let result = self.fixture.finalize();
        let mut standings: Vec<StandingsDelta> =
            StandingsDelta::from_match(&self.fixture).into_iter().flatten().collect();
        if let Some(background) = self.background.as_mut() {
            background.finalize();
            standings.extend(background.standings());
        }
        info!(
            "Full time: {} {}-{} {}",
            self.fixture.home_team_id, result.home_score, result.away_score, self.fixture.away_team_id
        );
        FinalReport { result, standings }
    }

    fn play_minute<R: Rng + ?Sized>(
        &mut self,
        minute: u8,
        home: &mut Team,
        away: &mut Team,
        rng: &mut R,
    ) -> Vec<MatchEvent> {
        let at = self.stamp(minute);
        self.clock = at;
        let (home_mentality, away_mentality) = (self.mentality(Side::Home), self.mentality(Side::Away));

        drain_starters(home, home_mentality, &self.config.stamina);
        drain_starters(away, away_mentality, &self.config.stamina);

        let mut events = Vec::new();
        let subs = &self.config.substitutions;
        if self.user_side != Some(Side::Home) {
            events.extend(ai_substitution(home, &mut self.home_subs, subs, at, rng));
        }
        if self.user_side != Some(Side::Away) {
            events.extend(ai_substitution(away, &mut self.away_subs, subs, at, rng));
        }

        let ctx = MinuteContext::new(home, away, home_mentality, away_mentality);
        let (minute_events, delta) = resolve_minute(&ctx, at, self.fixture.stats(), rng);
        self.fixture.apply(&delta);

        for event in minute_events {
            let injured = (event.kind == EventKind::Injury)
                .then(|| event.team_id.clone().zip(event.player_id.clone()))
                .flatten();
            events.push(event);

            if let Some((team_id, player_id)) = injured {
                let (team, tracker) = if team_id == home.id {
                    (&mut *home, &mut self.home_subs)
                } else {
                    (&mut *away, &mut self.away_subs)
                };
                events.extend(injury_substitution(team, tracker, subs, &player_id, at));
            }
        }

        self.fixture.record(events.iter().cloned());
        if let Some(background) = self.background.as_mut() {
            background.tick(minute, rng);
        }
        events
    }
}
