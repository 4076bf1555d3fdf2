use serde::{Deserialize, Serialize};

use super::{MatchEvent, MatchStats, StatsDelta};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub home_score: u16,
    pub away_score: u16,
}

impl MatchResult {
    pub fn is_draw(&self) -> bool {
        self.home_score == self.away_score
    }
}

/// A scheduled fixture. Created unplayed, updated while live, frozen once played.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub week: u16,
    pub played: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
    #[serde(default)]
    events: Vec<MatchEvent>,
    #[serde(default)]
    stats: MatchStats,
}

impl Match {
    pub fn scheduled(
        id: impl Into<String>,
        home_team_id: impl Into<String>,
        away_team_id: impl Into<String>,
        week: u16,
    ) -> Self {
        Self {
            id: id.into(),
            home_team_id: home_team_id.into(),
            away_team_id: away_team_id.into(),
            week,
            played: false,
            result: None,
            events: Vec::new(),
            stats: MatchStats::new(),
        }
    }

    /// Running totals; only moved through [`Match::apply`].
    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Append events in generation order. Ignored once the match is frozen.
    pub fn record(&mut self, events: impl IntoIterator<Item = MatchEvent>) {
        if self.played {
            return;
        }
        self.events.extend(events);
    }

    pub fn apply(&mut self, delta: &StatsDelta) {
        if self.played {
            return;
        }
        self.stats.merge(delta);
    }

    /// Current score as a result, whether or not the match is over.
    pub fn live_result(&self) -> MatchResult {
        let (home_score, away_score) = self.stats.score();
        MatchResult { home_score, away_score }
    }

    /// Freeze the match and commit its result.
    pub fn finalize(&mut self) -> MatchResult {
        if let Some(result) = self.result.filter(|_| self.played) {
            return result;
        }
        let result = self.live_result();
        self.result = Some(result);
        self.played = true;
        result
    }

    /// Reset a scheduled match to a 0-0, 50/50 starting state.
    pub fn reset_for_kickoff(&mut self) {
        if self.played {
            return;
        }
        self.events.clear();
        self.stats = MatchStats::new();
        self.result = None;
    }
}

/// League-table movement produced by one finished match for one team.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingsDelta {
    pub team_id: String,
    pub played: u8,
    pub won: u8,
    pub drawn: u8,
    pub lost: u8,
    pub goals_for: u16,
    pub goals_against: u16,
    pub points: u8,
}

impl StandingsDelta {
    fn for_team(team_id: &str, scored: u16, conceded: u16) -> Self {
        let (won, drawn, lost, points) = match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => (1, 0, 0, 3),
            std::cmp::Ordering::Equal => (0, 1, 0, 1),
            std::cmp::Ordering::Less => (0, 0, 1, 0),
        };
        Self {
            team_id: team_id.to_string(),
            played: 1,
            won,
            drawn,
            lost,
            goals_for: scored,
            goals_against: conceded,
            points,
        }
    }

    /// Home then away delta; `None` until the match has a result.
    pub fn from_match(m: &Match) -> Option<[StandingsDelta; 2]> {
        let result = m.result?;
        Some([
            Self::for_team(&m.home_team_id, result.home_score, result.away_score),
            Self::for_team(&m.away_team_id, result.away_score, result.home_score),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, MatchMinute};

    #[test]
    fn test_scheduled_match_is_blank() {
        let m = Match::scheduled("m1", "h", "a", 3);
        assert!(!m.played);
        assert!(m.result.is_none());
        assert!(m.events().is_empty());
        assert_eq!(m.stats, MatchStats::new());
        assert!(StandingsDelta::from_match(&m).is_none());
    }

    #[test]
    fn test_finalize_freezes() {
        let mut m = Match::scheduled("m1", "h", "a", 1);
        let mut delta = StatsDelta::default();
        delta.home.score = 2;
        delta.home.shots = 5;
        delta.home.on_target = 3;
        delta.away.score = 1;
        delta.away.shots = 2;
        delta.away.on_target = 1;
        m.apply(&delta);

        let result = m.finalize();
        assert_eq!(result, MatchResult { home_score: 2, away_score: 1 });
        assert!(m.played);

        m.apply(&delta);
        m.record([MatchEvent::new(MatchMinute::regular(90), EventKind::Goal, Some("h"), "late")]);
        assert_eq!(m.stats.home.score, 2);
        assert!(m.events().is_empty());
        assert_eq!(m.finalize(), result);
    }

    #[test]
    fn test_standings_delta() {
        let mut m = Match::scheduled("m1", "h", "a", 1);
        let mut delta = StatsDelta::default();
        delta.away.score = 1;
        delta.away.shots = 1;
        delta.away.on_target = 1;
        m.apply(&delta);
        m.finalize();

        let [home, away] = StandingsDelta::from_match(&m).unwrap();
        assert_eq!((home.lost, home.points, home.goals_against), (1, 0, 1));
        assert_eq!((away.won, away.points, away.goals_for), (1, 3, 1));

        let mut draw = Match::scheduled("m2", "h", "a", 1);
        draw.finalize();
        let [home, away] = StandingsDelta::from_match(&draw).unwrap();
        assert_eq!((home.drawn, home.points), (1, 1));
        assert_eq!((away.drawn, away.points), (1, 1));
    }
}
