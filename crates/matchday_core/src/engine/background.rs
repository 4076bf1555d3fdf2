//! Other fixtures of the round, played out as a coarse random walk alongside
//! the live match so the scoreboard ticker has something to show.

use rand::Rng;

use super::config::BackgroundConfig;
use crate::models::{EventKind, Match, MatchEvent, MatchMinute, MatchResult, Side, StandingsDelta, StatsDelta};

#[derive(Debug, Clone)]
pub struct BackgroundFixtures {
    fixtures: Vec<Match>,
    config: BackgroundConfig,
}

impl BackgroundFixtures {
    /// Unplayed fixtures are reset to 0-0; already played ones are kept as they are.
    pub fn new(mut fixtures: Vec<Match>, config: BackgroundConfig) -> Self {
        for fixture in &mut fixtures {
            fixture.reset_for_kickoff();
        }
        Self { fixtures, config }
    }

    pub fn fixtures(&self) -> &[Match] {
        &self.fixtures
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Live scores as `(match id, score)`.
    pub fn scores(&self) -> impl Iterator<Item = (&str, MatchResult)> + '_ {
        self.fixtures.iter().map(|m| (m.id.as_str(), m.live_result()))
    }

    /// Advance to `minute` on the live match clock.
    pub fn tick<R: Rng + ?Sized>(&mut self, minute: u8, rng: &mut R) {
        let interval = self.config.interval_minutes;
        if interval == 0 || minute % interval != 0 {
            return;
        }

        for fixture in self.fixtures.iter_mut().filter(|m| !m.played) {
            if rng.gen::<f64>() >= self.config.goal_probability {
                continue;
            }
            let side = if rng.gen::<f64>() > 0.5 { Side::Home } else { Side::Away };
            let team_id = match side {
                Side::Home => fixture.home_team_id.clone(),
                Side::Away => fixture.away_team_id.clone(),
            };

            let mut delta = StatsDelta::default();
            let scored = delta.side_mut(side);
            scored.score = 1;
            scored.shots = 1;
            scored.on_target = 1;
            fixture.apply(&delta);
            fixture.record([MatchEvent::new(
                MatchMinute::regular(minute),
                EventKind::Goal,
                Some(team_id.as_str()),
                "Goal",
            )]);
        }
    }

    /// Freeze every fixture and return its results in order.
    pub fn finalize(&mut self) -> Vec<MatchResult> {
        self.fixtures.iter_mut().map(Match::finalize).collect()
    }

    /// Table movement of every finished fixture.
    pub fn standings(&self) -> Vec<StandingsDelta> {
        self.fixtures
            .iter()
            .filter_map(StandingsDelta::from_match)
            .flatten()
            .collect()
    }

    pub fn into_fixtures(self) -> Vec<Match> {
        self.fixtures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn round() -> Vec<Match> {
        (0..4)
            .map(|i| Match::scheduled(format!("m{i}"), format!("h{i}"), format!("a{i}"), 1))
            .collect()
    }

    #[test]
    fn test_only_updates_on_interval() {
        let always = BackgroundConfig { goal_probability: 1.0, ..BackgroundConfig::default() };
        let mut bg = BackgroundFixtures::new(round(), always);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for minute in 1..=4 {
            bg.tick(minute, &mut rng);
        }
        assert!(bg.scores().all(|(_, r)| r == MatchResult { home_score: 0, away_score: 0 }));

        bg.tick(5, &mut rng);
        assert!(bg.scores().all(|(_, r)| r.home_score + r.away_score == 1));
    }

    #[test]
    fn test_full_round_is_sparse_and_consistent() {
        let mut bg = BackgroundFixtures::new(round(), BackgroundConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for minute in 1..=96 {
            bg.tick(minute, &mut rng);
        }
        let results = bg.finalize();
        assert_eq!(results.len(), 4);
        for fixture in bg.fixtures() {
            assert!(fixture.played);
            let goals = fixture.events().iter().filter(|e| e.is_goal()).count() as u16;
            let result = fixture.result.unwrap();
            assert_eq!(goals, result.home_score + result.away_score);
            assert!(goals <= 19);
        }
        assert_eq!(bg.standings().len(), 8);
    }

    #[test]
    fn test_finalized_fixture_stops_moving() {
        let always = BackgroundConfig { goal_probability: 1.0, ..BackgroundConfig::default() };
        let mut bg = BackgroundFixtures::new(round(), always);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        bg.finalize();
        bg.tick(5, &mut rng);
        assert!(bg.scores().all(|(_, r)| r.home_score + r.away_score == 0));
    }
}
