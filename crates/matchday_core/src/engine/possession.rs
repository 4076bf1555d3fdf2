//! Possession model: midfield control, nudged a little every minute.

use super::strength::TeamStrength;
use crate::models::Team;
use crate::tactics::{Mentality, TacticalInstructions};

pub const HOME_ADVANTAGE: f64 = 1.05;
pub const FORMATION_ADVANTAGE: f64 = 1.1;
pub const PARK_THE_BUS_CONTROL: f64 = 0.6;
/// Weight of the new target in the smoothed share.
pub const SMOOTHING: f64 = 0.05;

/// Raw control factor of one side before any matchup bonus.
pub fn control_factor(strength: &TeamStrength, tactics: &TacticalInstructions) -> f64 {
    let tempo = tactics.tempo as f64 / 100.0 + 0.5;
    let pressing = 1.0 + TacticalInstructions::offset(tactics.pressing_intensity) / 200.0;
    let directness = 1.0 - TacticalInstructions::offset(tactics.passing_directness) / 200.0;
    strength.midfield * tempo * pressing * directness
}

/// Smoothed home share for the next minute, in [0, 100].
#[allow(clippy::too_many_arguments)]
pub fn update_possession(
    prev_home: f64,
    home: &Team,
    away: &Team,
    home_strength: &TeamStrength,
    away_strength: &TeamStrength,
    home_mentality: Mentality,
    away_mentality: Mentality,
) -> f64 {
    let mut home_factor = control_factor(home_strength, &home.tactics) * HOME_ADVANTAGE;
    let mut away_factor = control_factor(away_strength, &away.tactics);

    let (home_shape, away_shape) = (home.tactics.formation, away.tactics.formation);
    if home_shape.beats(away_shape) {
        home_factor *= FORMATION_ADVANTAGE;
    }
    if away_shape.beats(home_shape) {
        away_factor *= FORMATION_ADVANTAGE;
    }

    if home_mentality == Mentality::ParkTheBus {
        home_factor *= PARK_THE_BUS_CONTROL;
    }
    if away_mentality == Mentality::ParkTheBus {
        away_factor *= PARK_THE_BUS_CONTROL;
    }

    let total = home_factor + away_factor;
    let target = if total > 0.0 && total.is_finite() { home_factor / total * 100.0 } else { 50.0 };

    let next = prev_home * (1.0 - SMOOTHING) + target * SMOOTHING;
    next.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::strength::team_strength;
    use crate::models::team::test_support::{team, team_with};
    use crate::tactics::Formation;

    #[test]
    fn test_equal_teams_drift_home() {
        let (h, a) = (team("h", 70), team("a", 70));
        let (hs, as_) = (team_strength(&h), team_strength(&a));
        let next = update_possession(50.0, &h, &a, &hs, &as_, Mentality::Balanced, Mentality::Balanced);
        // target = 1.05 / 2.05 * 100
        let target = 105.0 / 2.05;
        assert!((next - (50.0 * 0.95 + target * 0.05)).abs() < 1e-9);
        assert!(next > 50.0);
    }

    #[test]
    fn test_zero_midfield_targets_half() {
        let (h, a) = (team("h", 0), team("a", 0));
        let (hs, as_) = (team_strength(&h), team_strength(&a));
        let next = update_possession(70.0, &h, &a, &hs, &as_, Mentality::Balanced, Mentality::Balanced);
        assert!((next - (70.0 * 0.95 + 2.5)).abs() < 1e-9);
    }

    #[test]
    fn test_formation_and_bus_modifiers() {
        let mut away_tactics = crate::tactics::TacticalInstructions::default();
        away_tactics.formation = Formation::F352;
        let h = team("h", 70);
        let a = team_with("a", 70, away_tactics);
        let (hs, as_) = (team_strength(&h), team_strength(&a));

        // 3-5-2 beats 4-3-3
        let target = 1.05 / (1.05 + 1.1) * 100.0;
        let next = update_possession(50.0, &h, &a, &hs, &as_, Mentality::Balanced, Mentality::Balanced);
        assert!((next - (47.5 + target * 0.05)).abs() < 1e-9);

        let bus = update_possession(50.0, &h, &a, &hs, &as_, Mentality::ParkTheBus, Mentality::Balanced);
        assert!(bus < next);
    }

    #[test]
    fn test_repeated_updates_converge() {
        let (h, a) = (team("h", 90), team("a", 40));
        let (hs, as_) = (team_strength(&h), team_strength(&a));
        let mut home = 50.0;
        for _ in 0..300 {
            home = update_possession(home, &h, &a, &hs, &as_, Mentality::Balanced, Mentality::Balanced);
            assert!((0.0..=100.0).contains(&home));
        }
        let target = 90.0 * 1.05 / (90.0 * 1.05 + 40.0) * 100.0;
        assert!((home - target).abs() < 0.1);
    }
}
