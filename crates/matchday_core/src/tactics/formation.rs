use serde::{Deserialize, Serialize};
use tracing::warn;

/// Shapes the tactics screen offers. Unknown keys collapse to [`Formation::DEFAULT`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(from = "String", into = "String")]
pub enum Formation {
    F433,
    F442,
    F4231,
    F352,
    F532,
    F343,
    F4141,
    F41212,
}

impl Formation {
    pub const DEFAULT: Formation = Formation::F433;

    pub fn code(&self) -> &'static str {
        match self {
            Formation::F433 => "4-3-3",
            Formation::F442 => "4-4-2",
            Formation::F4231 => "4-2-3-1",
            Formation::F352 => "3-5-2",
            Formation::F532 => "5-3-2",
            Formation::F343 => "3-4-3",
            Formation::F4141 => "4-1-4-1",
            Formation::F41212 => "4-1-2-1-2",
        }
    }

    pub fn from_code(code: &str) -> Option<Formation> {
        match code.trim() {
            "4-3-3" => Some(Formation::F433),
            "4-4-2" => Some(Formation::F442),
            "4-2-3-1" => Some(Formation::F4231),
            "3-5-2" => Some(Formation::F352),
            "5-3-2" => Some(Formation::F532),
            "3-4-3" => Some(Formation::F343),
            "4-1-4-1" => Some(Formation::F4141),
            "4-1-2-1-2" => Some(Formation::F41212),
            _ => None,
        }
    }

    /// Lenient lookup used at the configuration boundary.
    pub fn from_key(key: &str) -> Formation {
        Self::from_code(key).unwrap_or_else(|| {
            warn!("Unknown formation '{}', falling back to {}", key, Self::DEFAULT.code());
            Self::DEFAULT
        })
    }

    /// Shapes this formation overloads in midfield battles.
    pub fn advantage_over(&self) -> &'static [Formation] {
        match self {
            Formation::F433 => &[Formation::F442, Formation::F532],
            Formation::F442 => &[Formation::F352, Formation::F4231],
            Formation::F352 => &[Formation::F433, Formation::F532],
            Formation::F532 => &[Formation::F4231, Formation::F433],
            Formation::F4231 => &[Formation::F442, Formation::F352],
            Formation::F343 | Formation::F4141 | Formation::F41212 => &[],
        }
    }

    pub fn beats(&self, other: Formation) -> bool {
        self.advantage_over().contains(&other)
    }
}

impl Default for Formation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<String> for Formation {
    fn from(key: String) -> Self {
        Formation::from_key(&key)
    }
}

impl From<Formation> for String {
    fn from(formation: Formation) -> Self {
        formation.code().to_string()
    }
}

impl std::fmt::Display for Formation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
