//! Many independent runs of one request, spread over the rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::json_api::{simulate_with_seed, MatchRequest, MatchResponse};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: u32,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub avg_home_goals: f64,
    pub avg_away_goals: f64,
    pub avg_home_possession: f64,
    pub avg_home_shots: f64,
    pub avg_away_shots: f64,
    pub avg_home_xg: f64,
    pub avg_away_xg: f64,
}

impl BatchSummary {
    fn from_responses(responses: &[MatchResponse]) -> Self {
        let mut summary = BatchSummary { runs: responses.len() as u32, ..Default::default() };
        if responses.is_empty() {
            return summary;
        }

        for r in responses {
            match r.result.home_score.cmp(&r.result.away_score) {
                std::cmp::Ordering::Greater => summary.home_wins += 1,
                std::cmp::Ordering::Equal => summary.draws += 1,
                std::cmp::Ordering::Less => summary.away_wins += 1,
            }
            summary.avg_home_goals += r.result.home_score as f64;
            summary.avg_away_goals += r.result.away_score as f64;
            summary.avg_home_possession += r.stats.home_possession();
            summary.avg_home_shots += r.stats.home.shots as f64;
            summary.avg_away_shots += r.stats.away.shots as f64;
            summary.avg_home_xg += r.stats.home.xg;
            summary.avg_away_xg += r.stats.away.xg;
        }

        let n = responses.len() as f64;
        for avg in [
            &mut summary.avg_home_goals,
            &mut summary.avg_away_goals,
            &mut summary.avg_home_possession,
            &mut summary.avg_home_shots,
            &mut summary.avg_away_shots,
            &mut summary.avg_home_xg,
            &mut summary.avg_away_xg,
        ] {
            *avg /= n;
        }
        summary
    }
}

/// Run `runs` matches seeded `seed, seed+1, ...`. Results do not depend on thread count.
pub fn simulate_batch(request: &MatchRequest, runs: u32) -> crate::Result<BatchSummary> {
    request.validate()?;

    let responses = (0..runs)
        .into_par_iter()
        .map(|i| simulate_with_seed(request, request.seed.wrapping_add(i as u64)))
        .collect::<crate::Result<Vec<_>>>()?;

    let summary = BatchSummary::from_responses(&responses);
    info!(
        "Batch of {}: {}W {}D {}L, {:.2}-{:.2} avg",
        summary.runs, summary.home_wins, summary.draws, summary.away_wins, summary.avg_home_goals, summary.avg_away_goals
    );
    Ok(summary)
}

pub fn simulate_batch_json(request_json: &str, runs: u32) -> crate::Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let summary = simulate_batch(&request, runs)?;
    Ok(serde_json::to_string(&summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::json_api::test_support::request_json;
    use crate::api::simulate_match;

    #[test]
    fn test_batch_matches_sequential_runs() {
        let request: MatchRequest = serde_json::from_str(&request_json(100)).unwrap();
        let summary = simulate_batch(&request, 6).unwrap();

        assert_eq!(summary.runs, 6);
        assert_eq!(summary.home_wins + summary.draws + summary.away_wins, 6);

        let mut home_goals = 0u32;
        for i in 0..6 {
            let mut single = request.clone();
            single.seed = 100 + i;
            home_goals += simulate_match(&single).unwrap().result.home_score as u32;
        }
        assert!((summary.avg_home_goals - home_goals as f64 / 6.0).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&summary.avg_home_possession));
    }

    #[test]
    fn test_empty_batch() {
        let request: MatchRequest = serde_json::from_str(&request_json(1)).unwrap();
        assert_eq!(simulate_batch(&request, 0).unwrap(), BatchSummary::default());
    }

    #[test]
    fn test_batch_json() {
        let out = simulate_batch_json(&request_json(3), 2).unwrap();
        let summary: BatchSummary = serde_json::from_str(&out).unwrap();
        assert_eq!(summary.runs, 2);
    }
}
