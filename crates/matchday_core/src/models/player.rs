use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const MAX_STAMINA: f32 = 100.0;
pub const MAX_RATING: u8 = 100;
pub const FORM_HISTORY_LEN: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF", alias = "DF")]
    Defender,
    #[serde(rename = "MID", alias = "MF")]
    Midfielder,
    #[serde(rename = "ATT", alias = "FW")]
    Attacker,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    /// Midfielders and attackers: the pool goals, shots and offsides are credited to.
    pub fn is_forward_leaning(&self) -> bool {
        matches!(self, Position::Midfielder | Position::Attacker)
    }

    /// Defenders and the goalkeeper.
    pub fn is_rear(&self) -> bool {
        matches!(self, Position::Defender | Position::Goalkeeper)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Attacker => "ATT",
        }
    }
}

/// Rolling window of recent performance scores, newest last.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct FormHistory(VecDeque<u8>);

impl FormHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, score: u8) {
        if self.0.len() == FORM_HISTORY_LEN {
            self.0.pop_front();
        }
        self.0.push_back(score.min(10));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn latest(&self) -> Option<u8> {
        self.0.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    pub fn average(&self) -> Option<f32> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.iter().map(|&s| s as f32).sum::<f32>() / self.0.len() as f32)
    }
}

impl From<Vec<u8>> for FormHistory {
    fn from(scores: Vec<u8>) -> Self {
        let mut form = FormHistory::new();
        for score in scores {
            form.push(score);
        }
        form
    }
}

impl From<FormHistory> for Vec<u8> {
    fn from(form: FormHistory) -> Self {
        form.0.into_iter().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Position,
    #[serde(deserialize_with = "de_rating")]
    pub rating: u8,
    #[serde(default = "full_stamina", deserialize_with = "de_stamina")]
    pub stamina: f32,
    #[serde(default)]
    pub injured: bool,
    #[serde(default)]
    pub form: FormHistory,
}

fn de_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = u8::deserialize(deserializer)?;
    Ok(raw.min(MAX_RATING))
}

fn full_stamina() -> f32 {
    MAX_STAMINA
}

fn de_stamina<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f32::deserialize(deserializer)?;
    Ok(clamp_stamina(raw))
}

fn clamp_stamina(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_STAMINA)
    }
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position, rating: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            rating: rating.min(MAX_RATING),
            stamina: MAX_STAMINA,
            injured: false,
            form: FormHistory::new(),
        }
    }

    pub fn with_stamina(mut self, stamina: f32) -> Self {
        self.stamina = clamp_stamina(stamina);
        self
    }

    /// Remove stamina, never dropping below zero.
    pub fn drain(&mut self, amount: f32) {
        self.stamina = clamp_stamina(self.stamina - amount.max(0.0));
    }

    /// Add stamina, never exceeding the maximum.
    pub fn restore(&mut self, amount: f32) {
        self.stamina = clamp_stamina(self.stamina + amount.max(0.0));
    }

    /// Signed adjustment used by team talks.
    pub fn adjust_stamina(&mut self, delta: f32) {
        self.stamina = clamp_stamina(self.stamina + delta);
    }

    pub fn mark_injured(&mut self) {
        self.injured = true;
    }

    /// Kick-off state: fresh legs, no knocks carried in.
    pub fn refresh(&mut self) {
        self.stamina = MAX_STAMINA;
        self.injured = false;
    }
}
