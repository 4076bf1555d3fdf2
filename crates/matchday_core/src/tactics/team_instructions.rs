//! Team-wide tactical instructions
//!
//! Everything the manager sets on the tactics screen before or during a match:
//! shape, playing style, the seven 0-100 sliders, tackling, offside trap and
//! time wasting. The engine reads these, it never writes them.

use serde::{Deserialize, Deserializer, Serialize};

use super::Formation;

pub const SLIDER_MAX: u8 = 100;
pub const SLIDER_NEUTRAL: u8 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TacticalInstructions {
    pub formation: Formation,
    pub style: PlayStyle,
    /// Slow (0) to fast (100)
    #[serde(deserialize_with = "de_slider")]
    pub tempo: u8,
    /// Narrow (0) to wide (100)
    #[serde(deserialize_with = "de_slider")]
    pub width: u8,
    /// Deep block (0) to high line (100)
    #[serde(deserialize_with = "de_slider")]
    pub depth: u8,
    #[serde(deserialize_with = "de_slider")]
    pub aggression: u8,
    /// Short (0) to direct (100)
    #[serde(deserialize_with = "de_slider", alias = "directness")]
    pub passing_directness: u8,
    #[serde(deserialize_with = "de_slider", alias = "pressing")]
    pub pressing_intensity: u8,
    /// Disciplined (0) to expressive (100)
    #[serde(deserialize_with = "de_slider")]
    pub creative_freedom: u8,
    pub tackling: Tackling,
    pub offside_trap: bool,
    #[serde(deserialize_with = "de_slider")]
    pub time_wasting: u8,
}

impl Default for TacticalInstructions {
    fn default() -> Self {
        Self {
            formation: Formation::DEFAULT,
            style: PlayStyle::Possession,
            tempo: SLIDER_NEUTRAL,
            width: SLIDER_NEUTRAL,
            depth: SLIDER_NEUTRAL,
            aggression: SLIDER_NEUTRAL,
            passing_directness: SLIDER_NEUTRAL,
            pressing_intensity: SLIDER_NEUTRAL,
            creative_freedom: SLIDER_NEUTRAL,
            tackling: Tackling::Normal,
            offside_trap: false,
            time_wasting: 0,
        }
    }
}

fn de_slider<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, SLIDER_MAX as i64) as u8)
}

impl TacticalInstructions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset matching a style, mirroring how the tactics screen seeds sliders.
    pub fn for_style(style: PlayStyle) -> Self {
        let base = Self { style, ..Self::default() };
        match style {
            PlayStyle::TikiTaka => Self {
                tempo: 40,
                width: 65,
                passing_directness: 25,
                creative_freedom: 65,
                ..base
            },
            PlayStyle::Gegenpress => Self {
                tempo: 75,
                depth: 70,
                pressing_intensity: 85,
                aggression: 65,
                ..base
            },
            PlayStyle::ParkTheBus => Self {
                tempo: 30,
                width: 35,
                depth: 20,
                pressing_intensity: 30,
                time_wasting: 60,
                ..base
            },
            PlayStyle::Counter => Self {
                tempo: 70,
                depth: 35,
                passing_directness: 75,
                ..base
            },
            PlayStyle::WingPlay => Self { width: 80, ..base },
            PlayStyle::Catenaccio => Self {
                depth: 30,
                pressing_intensity: 35,
                tackling: Tackling::GetStuckIn,
                ..base
            },
            PlayStyle::Possession => base,
        }
    }

    /// Slider as a signed offset from neutral (-50..=50).
    pub fn offset(value: u8) -> f64 {
        value as f64 - SLIDER_NEUTRAL as f64
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum PlayStyle {
    #[default]
    Possession,
    Counter,
    #[serde(alias = "Wing Play")]
    WingPlay,
    #[serde(alias = "Park the Bus")]
    ParkTheBus,
    Gegenpress,
    #[serde(alias = "Tiki-Taka")]
    TikiTaka,
    Catenaccio,
}

impl PlayStyle {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Possession => "Possession",
            Self::Counter => "Counter",
            Self::WingPlay => "Wing Play",
            Self::ParkTheBus => "Park the Bus",
            Self::Gegenpress => "Gegenpress",
            Self::TikiTaka => "Tiki-Taka",
            Self::Catenaccio => "Catenaccio",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Tackling {
    #[serde(alias = "Stay on Feet")]
    StayOnFeet,
    #[default]
    Normal,
    #[serde(alias = "Get Stuck In")]
    GetStuckIn,
}

impl Tackling {
    /// Scale applied to the base foul probability.
    pub fn foul_factor(&self) -> f64 {
        match self {
            Tackling::StayOnFeet => 0.5,
            Tackling::Normal => 1.0,
            Tackling::GetStuckIn => 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults_and_clamps() {
        let json = r#"{"formation":"4-4-2","style":"Tiki-Taka","tempo":250,"pressing":-4}"#;
        let tactics: TacticalInstructions = serde_json::from_str(json).unwrap();
        assert_eq!(tactics.formation, Formation::F442);
        assert_eq!(tactics.style, PlayStyle::TikiTaka);
        assert_eq!(tactics.tempo, 100);
        assert_eq!(tactics.pressing_intensity, 0);
        assert_eq!(tactics.width, SLIDER_NEUTRAL);
        assert_eq!(tactics.tackling, Tackling::Normal);
        assert!(!tactics.offside_trap);
    }

    #[test]
    fn test_style_presets_keep_style() {
        let gegen = TacticalInstructions::for_style(PlayStyle::Gegenpress);
        assert_eq!(gegen.style, PlayStyle::Gegenpress);
        assert!(gegen.pressing_intensity > 70);

        let bus = TacticalInstructions::for_style(PlayStyle::ParkTheBus);
        assert!(bus.depth < 40);
    }

    #[test]
    fn test_foul_factor() {
        assert_eq!(Tackling::GetStuckIn.foul_factor(), 1.5);
        assert_eq!(Tackling::StayOnFeet.foul_factor(), 0.5);
    }
}
