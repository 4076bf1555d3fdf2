use serde::{Deserialize, Serialize};

/// Live mentality the touchline can change at any moment of the match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Mentality {
    #[serde(alias = "Park the Bus")]
    ParkTheBus,
    Defensive,
    #[default]
    Balanced,
    Attacking,
    #[serde(alias = "All Out Attack")]
    AllOutAttack,
}

/// Multipliers a mentality applies to the minute resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MentalityModifiers {
    pub attack: f64,
    pub defense: f64,
    pub tempo: f64,
    pub xg: f64,
    pub aggression: f64,
}

impl Mentality {
    pub fn modifiers(&self) -> MentalityModifiers {
        let (attack, defense, tempo, xg, aggression) = match self {
            Mentality::ParkTheBus => (0.2, 2.0, 0.3, 0.3, 0.5),
            Mentality::Defensive => (0.6, 1.5, 0.8, 0.7, 0.8),
            Mentality::Balanced => (1.0, 1.0, 1.0, 1.0, 1.0),
            Mentality::Attacking => (1.4, 0.8, 1.2, 1.1, 1.2),
            Mentality::AllOutAttack => (1.8, 0.4, 1.5, 1.3, 1.4),
        };
        MentalityModifiers { attack, defense, tempo, xg, aggression }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Mentality::ParkTheBus => "Park the Bus",
            Mentality::Defensive => "Defensive",
            Mentality::Balanced => "Balanced",
            Mentality::Attacking => "Attacking",
            Mentality::AllOutAttack => "All Out Attack",
        }
    }
}
