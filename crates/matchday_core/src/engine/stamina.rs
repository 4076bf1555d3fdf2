//! Stamina drain and half-time team talks.

use serde::{Deserialize, Serialize};

use super::config::StaminaConfig;
use crate::models::Team;
use crate::tactics::{Mentality, PlayStyle};

/// Stamina lost per minute by each outfield starter.
pub fn drain_rate(mentality: Mentality, style: PlayStyle, cfg: &StaminaConfig) -> f32 {
    if mentality == Mentality::AllOutAttack || style == PlayStyle::Gegenpress {
        cfg.intense_drain
    } else if mentality == Mentality::ParkTheBus {
        cfg.low_block_drain
    } else {
        cfg.default_drain
    }
}

/// Drain one minute from the outfield starters. Keepers and injured players hold.
pub fn drain_starters(team: &mut Team, mentality: Mentality, cfg: &StaminaConfig) {
    let rate = drain_rate(mentality, team.tactics.style, cfg);
    for player in team.starters_mut() {
        if player.injured || player.position.is_goalkeeper() {
            continue;
        }
        player.drain(rate);
    }
}

/// Half-time talk options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum TeamTalk {
    /// Demand passion
    Aggressive,
    /// Focus and rest
    Calm,
    /// Keep it up
    Praise,
}

impl TeamTalk {
    pub fn stamina_delta(&self) -> f32 {
        match self {
            TeamTalk::Aggressive => -10.0,
            TeamTalk::Calm => 25.0,
            TeamTalk::Praise => 15.0,
        }
    }

    /// Motivational lift of the talk. Only recorded through form.
    pub fn morale_boost(&self) -> u8 {
        match self {
            TeamTalk::Aggressive => 10,
            TeamTalk::Calm => 0,
            TeamTalk::Praise => 3,
        }
    }

    pub fn form_score(&self) -> u8 {
        if self.morale_boost() > 0 {
            10
        } else {
            5
        }
    }

    /// Apply to the starting eleven.
    pub fn apply(&self, team: &mut Team) {
        let (delta, score) = (self.stamina_delta(), self.form_score());
        for player in team.starters_mut() {
            player.adjust_stamina(delta);
            player.form.push(score);
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            TeamTalk::Aggressive => "Aggressive",
            TeamTalk::Calm => "Calm",
            TeamTalk::Praise => "Praise",
        }
    }
}
