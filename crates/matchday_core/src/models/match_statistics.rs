use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

pub const FULL_POSSESSION: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Side::Home)
    }
}

/// Per-side counters. Also used as the increment type when merging a minute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SideStats {
    pub score: u16,
    pub shots: u16,
    pub on_target: u16,
    pub xg: f64,
    pub corners: u16,
    pub fouls: u16,
    pub yellows: u16,
    pub reds: u16,
}

impl AddAssign<&SideStats> for SideStats {
    fn add_assign(&mut self, rhs: &SideStats) {
        self.score += rhs.score;
        self.shots += rhs.shots;
        self.on_target += rhs.on_target;
        self.xg += rhs.xg;
        self.corners += rhs.corners;
        self.fouls += rhs.fouls;
        self.yellows += rhs.yellows;
        self.reds += rhs.reds;
    }
}

/// Running statistics for one match. Every field exists from kick-off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchStats {
    home_possession: f64,
    away_possession: f64,
    pub home: SideStats,
    pub away: SideStats,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self {
            home_possession: FULL_POSSESSION / 2.0,
            away_possession: FULL_POSSESSION / 2.0,
            home: SideStats::default(),
            away: SideStats::default(),
        }
    }
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn home_possession(&self) -> f64 {
        self.home_possession
    }

    pub fn away_possession(&self) -> f64 {
        self.away_possession
    }

    pub fn possession(&self, side: Side) -> f64 {
        match side {
            Side::Home => self.home_possession,
            Side::Away => self.away_possession,
        }
    }

    /// Set home share; away is always the complement.
    pub fn set_home_possession(&mut self, home: f64) {
        let home = if home.is_finite() { home.clamp(0.0, FULL_POSSESSION) } else { FULL_POSSESSION / 2.0 };
        self.home_possession = home;
        self.away_possession = FULL_POSSESSION - home;
    }

    pub fn side(&self, side: Side) -> &SideStats {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideStats {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub fn score(&self) -> (u16, u16) {
        (self.home.score, self.away.score)
    }

    /// Fold a minute's (or a range's) increments into the running totals.
    pub fn merge(&mut self, delta: &StatsDelta) {
        self.home += &delta.home;
        self.away += &delta.away;
        if let Some(home) = delta.home_possession {
            self.set_home_possession(home);
        }
        debug_assert!(self.home.on_target <= self.home.shots);
        debug_assert!(self.away.on_target <= self.away.shots);
    }
}

/// Increments produced by resolving minutes; merged with [`MatchStats::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsDelta {
    pub home: SideStats,
    pub away: SideStats,
    /// Latest published home possession, if it moved.
    pub home_possession: Option<f64>,
}

impl StatsDelta {
    pub fn side_mut(&mut self, side: Side) -> &mut SideStats {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.home == SideStats::default()
            && self.away == SideStats::default()
            && self.home_possession.is_none()
    }
}
