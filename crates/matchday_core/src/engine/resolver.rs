//! Per-minute event resolution
//!
//! One minute is resolved as a pipeline of small stages, each drawing from
//! the injected random source in a fixed order:
//!
//! 1. possession holder
//! 2. late-game time wasting (may void the minute)
//! 3. chance threshold → attack (offside trap, shot, xG, on target, goal)
//! 4. otherwise a rare foul check with cards
//! 5. injury roll
//!
//! Stages only read the teams; stat increments come back as a [`StatsDelta`]
//! and events in generation order. Nothing here mutates a squad, the session
//! applies injuries and substitutions afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::possession::update_possession;
use super::strength::{team_strength, TeamStrength};
use crate::models::{EventKind, MatchEvent, MatchMinute, MatchStats, Player, Side, StatsDelta, Team};
use crate::tactics::{Mentality, MentalityModifiers, Tackling, TacticalInstructions};

pub const BASE_CHANCE: f64 = 0.14;
pub const TIME_WASTING_FROM: u8 = 70;
pub const TIME_WASTING_SCALE: f64 = 0.5;

pub const OFFSIDE_TRAP_SUCCESS: f64 = 0.3;
pub const OFFSIDE_TRAP_FAILURE: f64 = 0.1;
pub const TRAP_FAILURE_XG_BONUS: f64 = 0.30;

pub const XG_MIN: f64 = 0.02;
pub const XG_SPREAD: f64 = 0.25;
/// Off-target shots above this xG are worth a "miss" line.
pub const NOTABLE_MISS_XG: f64 = 0.25;

pub const BASE_ON_TARGET: f64 = 0.35;
pub const KEEPER_SAVE_SCALE: f64 = 0.85;
pub const GOAL_CEILING: f64 = 1.1;
pub const CORNER_ROLL: f64 = 0.6;
pub const SAVE_LOG_ROLL: f64 = 0.9;

pub const FOUL_ROLL: f64 = 0.95;
pub const BASE_FOUL: f64 = 0.3;
pub const RED_CARD_ROLL: f64 = 0.98;
pub const YELLOW_CARD_ROLL: f64 = 0.85;

pub const INJURY_CHANCE: f64 = 0.0003;

/// Frozen inputs for resolving one or more minutes.
#[derive(Debug, Clone)]
pub struct MinuteContext<'a> {
    pub home: &'a Team,
    pub away: &'a Team,
    pub home_strength: TeamStrength,
    pub away_strength: TeamStrength,
    pub home_mentality: Mentality,
    pub away_mentality: Mentality,
}

impl<'a> MinuteContext<'a> {
    pub fn new(home: &'a Team, away: &'a Team, home_mentality: Mentality, away_mentality: Mentality) -> Self {
        Self {
            home,
            away,
            home_strength: team_strength(home),
            away_strength: team_strength(away),
            home_mentality,
            away_mentality,
        }
    }

    pub fn team(&self, side: Side) -> &'a Team {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn strength(&self, side: Side) -> &TeamStrength {
        match side {
            Side::Home => &self.home_strength,
            Side::Away => &self.away_strength,
        }
    }

    pub fn mentality(&self, side: Side) -> Mentality {
        match side {
            Side::Home => self.home_mentality,
            Side::Away => self.away_mentality,
        }
    }
}

/// Events and final stats of a resolved range of minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub events: Vec<MatchEvent>,
    pub stats: MatchStats,
}

pub fn possession_holder<R: Rng + ?Sized>(home_possession: f64, rng: &mut R) -> Side {
    if rng.gen::<f64>() * 100.0 < home_possession {
        Side::Home
    } else {
        Side::Away
    }
}

/// Whether the side in possession runs down the clock this minute.
pub fn wastes_time<R: Rng + ?Sized>(at: MatchMinute, tactics: &TacticalInstructions, rng: &mut R) -> bool {
    at.minute > TIME_WASTING_FROM
        && rng.gen::<f64>() < tactics.time_wasting as f64 / 100.0 * TIME_WASTING_SCALE
}

pub fn chance_threshold(
    attacker: &TeamStrength,
    attacker_mods: &MentalityModifiers,
    defender: &TeamStrength,
    defender_mods: &MentalityModifiers,
    tactics: &TacticalInstructions,
) -> f64 {
    let diff = attacker.attack * attacker_mods.attack - defender.defense * defender_mods.defense;
    let mut threshold = BASE_CHANCE + diff / 400.0;
    threshold *= 1.0 + TacticalInstructions::offset(tactics.creative_freedom) / 200.0;
    threshold *= 1.0 + TacticalInstructions::offset(tactics.passing_directness) / 400.0;
    threshold * attacker_mods.attack
}

/// Base xG of a shot, before any offside-trap bonus.
pub fn shot_xg<R: Rng + ?Sized>(
    attacker_mods: &MentalityModifiers,
    tactics: &TacticalInstructions,
    rng: &mut R,
) -> f64 {
    let raw = rng.gen::<f64>() * XG_SPREAD + XG_MIN;
    raw * attacker_mods.xg * (1.0 - TacticalInstructions::offset(tactics.passing_directness) / 400.0)
}

pub fn on_target_probability(attacker: &TeamStrength, defender: &TeamStrength) -> f64 {
    BASE_ON_TARGET + (attacker.attack - defender.defense) / 300.0
}

pub fn goal_probability(xg: f64, keeper: &Player) -> f64 {
    let save = keeper.rating as f64 / 100.0 * KEEPER_SAVE_SCALE;
    xg * (GOAL_CEILING - save)
}

pub fn foul_probability(defender_mods: &MentalityModifiers, tackling: Tackling) -> f64 {
    BASE_FOUL * defender_mods.aggression * tackling.foul_factor()
}

/// Card shown for a foul, from a uniform roll.
pub fn card_outcome(roll: f64) -> Option<EventKind> {
    if roll > RED_CARD_ROLL {
        Some(EventKind::RedCard)
    } else if roll > YELLOW_CARD_ROLL {
        Some(EventKind::YellowCard)
    } else {
        None
    }
}

fn pick<'t, R: Rng + ?Sized>(pool: &[&'t Player], rng: &mut R) -> &'t Player {
    pool[rng.gen_range(0..pool.len())]
}

/// Resolve one minute. Possession is re-targeted first, then the holder acts.
pub fn resolve_minute<R: Rng + ?Sized>(
    ctx: &MinuteContext<'_>,
    at: MatchMinute,
    stats: &MatchStats,
    rng: &mut R,
) -> (Vec<MatchEvent>, StatsDelta) {
    let mut events = Vec::new();
    let mut delta = StatsDelta::default();

    let home_possession = update_possession(
        stats.home_possession(),
        ctx.home,
        ctx.away,
        &ctx.home_strength,
        &ctx.away_strength,
        ctx.home_mentality,
        ctx.away_mentality,
    );
    delta.home_possession = Some(home_possession);

    let side = possession_holder(home_possession, rng);
    let def_side = side.opponent();
    let (att_team, def_team) = (ctx.team(side), ctx.team(def_side));
    let (att_str, def_str) = (ctx.strength(side), ctx.strength(def_side));
    let (att_mods, def_mods) = (ctx.mentality(side).modifiers(), ctx.mentality(def_side).modifiers());

    if wastes_time(at, &att_team.tactics, rng) {
        return (events, delta);
    }

    let threshold = chance_threshold(att_str, &att_mods, def_str, &def_mods, &att_team.tactics);
    let action = rng.gen::<f64>();

    if action < threshold {
        let attackers = att_team.attacking_pool();

        if def_team.tactics.offside_trap && rng.gen::<f64>() < OFFSIDE_TRAP_SUCCESS {
            let flagged = pick(&attackers, rng);
            events.push(
                MatchEvent::new(
                    at,
                    EventKind::Miss,
                    Some(att_team.id.as_str()),
                    format!("{} is caught offside by the trap.", flagged.name),
                )
                .with_player(&flagged.id),
            );
            return (events, delta);
        }

        let att_delta = delta.side_mut(side);
        att_delta.shots += 1;

        let mut xg = shot_xg(&att_mods, &att_team.tactics, rng);
        if def_team.tactics.offside_trap && rng.gen::<f64>() < OFFSIDE_TRAP_FAILURE {
            xg += TRAP_FAILURE_XG_BONUS;
            events.push(MatchEvent::new(
                at,
                EventKind::BigChance,
                Some(att_team.id.as_str()),
                format!("The offside trap fails! {} is through on goal!", att_team.short_name),
            ));
        }
        att_delta.xg += xg;

        if rng.gen::<f64>() < on_target_probability(att_str, def_str) {
            att_delta.on_target += 1;
            let keeper = def_team.goalkeeper();

            if rng.gen::<f64>() < goal_probability(xg, keeper) {
                att_delta.score += 1;
                let scorer = pick(&attackers, rng);
                events.push(
                    MatchEvent::new(
                        at,
                        EventKind::Goal,
                        Some(att_team.id.as_str()),
                        format!("{} scores! (xG: {:.2})", scorer.name, xg),
                    )
                    .with_player(&scorer.id)
                    .with_xg(xg as f32),
                );
            } else if rng.gen::<f64>() > CORNER_ROLL {
                att_delta.corners += 1;
                let winner = pick(&attackers, rng);
                events.push(MatchEvent::new(
                    at,
                    EventKind::Corner,
                    Some(att_team.id.as_str()),
                    format!("Corner kick won by {} after a save.", winner.name),
                ));
            } else if rng.gen::<f64>() > SAVE_LOG_ROLL {
                events.push(
                    MatchEvent::new(
                        at,
                        EventKind::Save,
                        Some(def_team.id.as_str()),
                        format!("{} makes a brilliant save!", keeper.name),
                    )
                    .with_player(&keeper.id),
                );
            }
        } else if xg > NOTABLE_MISS_XG {
            let shooter = pick(&attackers, rng);
            events.push(
                MatchEvent::new(
                    at,
                    EventKind::Miss,
                    Some(att_team.id.as_str()),
                    format!("{} shoots wide from a great position!", shooter.name),
                )
                .with_player(&shooter.id),
            );
        }
    } else if action > FOUL_ROLL
        && rng.gen::<f64>() < foul_probability(&def_mods, def_team.tactics.tackling)
    {
        let def_delta = delta.side_mut(def_side);
        def_delta.fouls += 1;

        if let Some(card) = card_outcome(rng.gen::<f64>()) {
            let starters = def_team.starters();
            let offender = &starters[rng.gen_range(0..starters.len())];
            let description = match card {
                EventKind::RedCard => format!("RED CARD! {} is sent off!", offender.name),
                _ => format!("Yellow card for {}", offender.name),
            };
            match card {
                EventKind::RedCard => def_delta.reds += 1,
                _ => def_delta.yellows += 1,
            }
            events.push(MatchEvent::new(at, card, Some(def_team.id.as_str()), description).with_player(&offender.id));
        }
    }

    if rng.gen::<f64>() < INJURY_CHANCE {
        let fit: Vec<&Player> = att_team.starters().iter().filter(|p| !p.injured).collect();
        if !fit.is_empty() {
            let hurt = pick(&fit, rng);
            events.push(
                MatchEvent::new(at, EventKind::Injury, Some(att_team.id.as_str()), format!("{} is injured!", hurt.name))
                    .with_player(&hurt.id),
            );
        }
    }

    (events, delta)
}

/// Resolve every regular minute in `start..=end` against fixed squads.
///
/// Possession moves once per minute; the returned stats include every
/// increment on top of `stats`.
pub fn simulate_chunk<R: Rng + ?Sized>(
    stats: &MatchStats,
    ctx: &MinuteContext<'_>,
    start: u8,
    end: u8,
    rng: &mut R,
) -> SimulationResult {
    let mut stats = stats.clone();
    let mut events = Vec::new();

    for minute in start..=end {
        let (minute_events, delta) = resolve_minute(ctx, MatchMinute::regular(minute), &stats, rng);
        stats.merge(&delta);
        events.extend(minute_events);
    }

    SimulationResult { events, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::team::test_support::{team, team_with};
    use crate::models::Position;
    use crate::tactics::PlayStyle;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn balanced<'a>(home: &'a Team, away: &'a Team) -> MinuteContext<'a> {
        MinuteContext::new(home, away, Mentality::Balanced, Mentality::Balanced)
    }

    #[test]
    fn test_same_seed_same_minute() {
        let (h, a) = (team("h", 75), team("a", 72));
        let ctx = balanced(&h, &a);
        let stats = MatchStats::new();

        for seed in 0..200 {
            let first = simulate_chunk(&stats, &ctx, 30, 30, &mut ChaCha8Rng::seed_from_u64(seed));
            let second = simulate_chunk(&stats, &ctx, 30, 30, &mut ChaCha8Rng::seed_from_u64(seed));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_chance_threshold_neutral_teams() {
        let (h, a) = (team("h", 70), team("a", 70));
        let ctx = balanced(&h, &a);
        let m = Mentality::Balanced.modifiers();
        let t = chance_threshold(&ctx.home_strength, &m, &ctx.away_strength, &m, &h.tactics);
        // 0.14 + (60 - 70) / 400
        assert!((t - 0.115).abs() < 1e-9);
    }

    #[test]
    fn test_card_outcome_bands() {
        assert_eq!(card_outcome(0.5), None);
        assert_eq!(card_outcome(0.85), None);
        assert_eq!(card_outcome(0.9), Some(EventKind::YellowCard));
        assert_eq!(card_outcome(0.98), Some(EventKind::YellowCard));
        assert_eq!(card_outcome(0.99), Some(EventKind::RedCard));
    }

    #[test]
    fn test_foul_probability_by_tackling() {
        let m = Mentality::AllOutAttack.modifiers();
        assert!((foul_probability(&m, Tackling::Normal) - 0.42).abs() < 1e-9);
        assert!((foul_probability(&m, Tackling::GetStuckIn) - 0.63).abs() < 1e-9);
        assert!((foul_probability(&m, Tackling::StayOnFeet) - 0.21).abs() < 1e-9);
    }

    #[test]
    fn test_goal_probability_uses_keeper() {
        let keeper = Player::new("gk", "GK", Position::Goalkeeper, 100);
        assert!((goal_probability(0.5, &keeper) - 0.5 * 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_time_wasting_only_late() {
        let tactics = TacticalInstructions { time_wasting: 100, ..TacticalInstructions::default() };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!((0..100).all(|_| !wastes_time(MatchMinute::regular(70), &tactics, &mut rng)));
        let wasted = (0..1000).filter(|_| wastes_time(MatchMinute::regular(85), &tactics, &mut rng)).count();
        assert!((400..600).contains(&wasted));
    }

    #[test]
    fn test_balanced_shot_volume() {
        let (h, a) = (team("h", 70), team("a", 70));
        let ctx = balanced(&h, &a);
        let runs = 50;
        let total: u32 = (0..runs)
            .map(|seed| {
                let r = simulate_chunk(&MatchStats::new(), &ctx, 1, 90, &mut ChaCha8Rng::seed_from_u64(seed));
                (r.stats.home.shots + r.stats.away.shots) as u32
            })
            .sum();
        let mean = total as f64 / runs as f64;
        // 0.115 per minute over 90 minutes
        assert!((8.5..=12.5).contains(&mean), "mean shots {mean}");
    }

    #[test]
    fn test_low_block_concedes_less_than_broken_press() {
        let bus_tactics = TacticalInstructions {
            depth: 20,
            pressing_intensity: 30,
            ..TacticalInstructions::for_style(PlayStyle::ParkTheBus)
        };
        let press_tactics = TacticalInstructions {
            pressing_intensity: 20,
            ..TacticalInstructions::for_style(PlayStyle::Gegenpress)
        };
        let bus = team_with("bus", 70, bus_tactics);
        let press = team_with("press", 70, press_tactics);
        let opponent = team("opp", 70);

        assert!(team_strength(&bus).tactical_multiplier > 1.0);
        assert!(team_strength(&press).tactical_multiplier < 1.0);

        let vs_bus = MinuteContext::new(&bus, &opponent, Mentality::ParkTheBus, Mentality::Balanced);
        let vs_press = MinuteContext::new(&press, &opponent, Mentality::Balanced, Mentality::Balanced);

        let conceded = |ctx: &MinuteContext<'_>| -> u32 {
            (0..30)
                .map(|seed| {
                    let r = simulate_chunk(&MatchStats::new(), ctx, 1, 90, &mut ChaCha8Rng::seed_from_u64(seed));
                    r.stats.away.on_target as u32
                })
                .sum()
        };
        let (against_bus, against_press) = (conceded(&vs_bus), conceded(&vs_press));
        assert!(against_bus * 3 < against_press, "bus {against_bus} vs press {against_press}");
    }

    #[test]
    fn test_offside_trap_voids_some_attacks() {
        let trap = TacticalInstructions { offside_trap: true, ..TacticalInstructions::default() };
        let (h, a) = (team("h", 80), team_with("a", 60, trap));
        let ctx = balanced(&h, &a);
        let mut offsides = 0;
        let mut big_chances = 0;
        for seed in 0..40 {
            let r = simulate_chunk(&MatchStats::new(), &ctx, 1, 90, &mut ChaCha8Rng::seed_from_u64(seed));
            offsides += r
                .events
                .iter()
                .filter(|e| e.kind == EventKind::Miss && e.description.contains("caught offside"))
                .count();
            big_chances += r.events.iter().filter(|e| e.kind == EventKind::BigChance).count();
            assert!(r.events.iter().filter(|e| e.kind == EventKind::BigChance).all(|e| e.is_for("h")));
        }
        assert!(offsides > 0);
        assert!(big_chances > 0);
    }

    #[test]
    fn test_empty_range() {
        let (h, a) = (team("h", 70), team("a", 70));
        let r = simulate_chunk(&MatchStats::new(), &balanced(&h, &a), 10, 9, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(r.events.is_empty());
        assert_eq!(r.stats, MatchStats::new());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_chunk_invariants(seed in any::<u64>(), home_rating in 30u8..=95, away_rating in 30u8..=95) {
            let (h, a) = (team("h", home_rating), team("a", away_rating));
            let ctx = balanced(&h, &a);
            let r = simulate_chunk(&MatchStats::new(), &ctx, 1, 90, &mut ChaCha8Rng::seed_from_u64(seed));

            for (side, id) in [(Side::Home, "h"), (Side::Away, "a")] {
                let s = r.stats.side(side);
                prop_assert!(s.on_target <= s.shots);
                let goals = r.events.iter().filter(|e| e.is_goal() && e.is_for(id)).count();
                prop_assert_eq!(goals, s.score as usize);
                prop_assert!(s.xg >= 0.0 && s.xg.is_finite());
            }
            prop_assert_eq!(r.stats.home_possession() + r.stats.away_possession(), 100.0);
            prop_assert!(r.events.windows(2).all(|w| w[0].at() <= w[1].at()));
            prop_assert!(r.events.iter().all(|e| e.team_id.is_some()));
        }
    }
}
