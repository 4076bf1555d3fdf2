//! Team strength model
//!
//! Collapses a team's starting eleven and tactical instructions into three
//! ratings (attack, midfield, defense) scaled by a tactical coherence
//! multiplier. Recomputed every minute since stamina keeps moving.

use serde::{Deserialize, Serialize};

use crate::models::{Player, Position, Team};
use crate::tactics::{PlayStyle, TacticalInstructions};

/// Nominal group sizes of a 4-3-3 eleven. Fixed regardless of formation.
pub const ATTACK_DIVISOR: f64 = 7.0;
pub const MIDFIELD_DIVISOR: f64 = 3.0;
pub const DEFENSE_DIVISOR: f64 = 5.0;

/// Below this stamina a player's rating starts to fade.
pub const FATIGUE_THRESHOLD: f32 = 60.0;
pub const MIN_STAMINA_FACTOR: f64 = 0.4;

pub const MIN_TACTICAL_MULTIPLIER: f64 = 0.3;
pub const MAX_TACTICAL_MULTIPLIER: f64 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamStrength {
    pub attack: f64,
    pub midfield: f64,
    pub defense: f64,
    pub tactical_multiplier: f64,
}

/// Rating scaled by how much stamina is left.
pub fn effective_rating(player: &Player) -> f64 {
    let factor = if player.stamina > FATIGUE_THRESHOLD {
        1.0
    } else {
        (player.stamina as f64 / FATIGUE_THRESHOLD as f64).max(MIN_STAMINA_FACTOR)
    };
    player.rating as f64 * factor
}

/// Coherence of the instructions with the chosen style.
pub fn tactical_multiplier(tactics: &TacticalInstructions) -> f64 {
    let directness = tactics.passing_directness;
    let pressing = tactics.pressing_intensity;
    let depth = tactics.depth;
    let tempo = tactics.tempo;
    let width = tactics.width;

    let mut m: f64 = 1.0;

    match tactics.style {
        PlayStyle::TikiTaka => {
            m += if directness < 40 { 0.15 } else { -0.30 };
            if tempo < 60 {
                m += 0.10;
            }
            if width > 60 {
                m += 0.10;
            }
        }
        PlayStyle::Gegenpress => {
            m += if pressing > 70 { 0.15 } else { -0.40 };
            m += if depth > 60 { 0.10 } else { -0.20 };
            if tempo > 60 {
                m += 0.10;
            }
        }
        PlayStyle::ParkTheBus => {
            m += if depth < 40 { 0.15 } else { -0.50 };
            m += if pressing < 40 { 0.10 } else { -0.20 };
        }
        PlayStyle::Counter => {
            m += if directness > 60 { 0.10 } else { -0.15 };
            if depth < 50 {
                m += 0.10;
            }
            if tempo > 60 {
                m += 0.10;
            }
        }
        PlayStyle::Possession | PlayStyle::WingPlay | PlayStyle::Catenaccio => {}
    }

    // Incoherent combinations, whatever the style
    if depth > 70 && pressing < 40 {
        m -= 0.40;
    }
    if depth < 30 && tactics.offside_trap {
        m -= 0.30;
    }
    if directness > 80 && tempo < 30 {
        m -= 0.20;
    }
    if width > 80 && tactics.style == PlayStyle::ParkTheBus {
        m -= 0.20;
    }

    m.clamp(MIN_TACTICAL_MULTIPLIER, MAX_TACTICAL_MULTIPLIER)
}

fn group_sum(team: &Team, include: impl Fn(Position) -> bool) -> f64 {
    team.starters()
        .iter()
        .filter(|p| include(p.position))
        .map(effective_rating)
        .sum()
}

pub fn team_strength(team: &Team) -> TeamStrength {
    let multiplier = tactical_multiplier(&team.tactics);

    let attack = group_sum(team, |p| p.is_forward_leaning()) / ATTACK_DIVISOR;
    let midfield = group_sum(team, |p| p == Position::Midfielder) / MIDFIELD_DIVISOR;
    let defense = group_sum(team, |p| p.is_rear()) / DEFENSE_DIVISOR;

    TeamStrength {
        attack: attack * multiplier,
        midfield: midfield * multiplier,
        defense: defense * multiplier,
        tactical_multiplier: multiplier,
    }
}
