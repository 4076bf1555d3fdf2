use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    /// Minutes into added time (0 during regular time), so 45+2 is `minute: 45, added: 2`.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub added: u8,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Acting team. Only informational notices carry no team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xg: Option<f32>,
}

fn is_zero(value: &u8) -> bool {
    *value == 0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
    Substitution,
    /// Off-target shot or an attack flagged offside
    Miss,
    Save,
    Injury,
    BigChance,
    Corner,
    Foul,
    /// "+N Minutes Added Time" notice
    AddedTime,
}

/// Point on the match clock an event is stamped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct MatchMinute {
    pub minute: u8,
    pub added: u8,
}

impl MatchMinute {
    pub fn regular(minute: u8) -> Self {
        Self { minute, added: 0 }
    }

    pub fn stoppage(minute: u8, added: u8) -> Self {
        Self { minute, added }
    }

    /// Minutes actually played, counting added time.
    pub fn elapsed(&self) -> u16 {
        self.minute as u16 + self.added as u16
    }
}

impl std::fmt::Display for MatchMinute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.added > 0 {
            write!(f, "{}+{}'", self.minute, self.added)
        } else {
            write!(f, "{}'", self.minute)
        }
    }
}

impl MatchEvent {
    pub fn new(at: MatchMinute, kind: EventKind, team_id: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            minute: at.minute,
            added: at.added,
            kind,
            team_id: team_id.map(str::to_string),
            player_id: None,
            description: description.into(),
            xg: None,
        }
    }

    pub fn with_player(mut self, player_id: &str) -> Self {
        self.player_id = Some(player_id.to_string());
        self
    }

    pub fn with_xg(mut self, xg: f32) -> Self {
        self.xg = Some(xg);
        self
    }

    pub fn at(&self) -> MatchMinute {
        MatchMinute::stoppage(self.minute, self.added)
    }

    pub fn is_goal(&self) -> bool {
        self.kind == EventKind::Goal
    }

    pub fn is_for(&self, team_id: &str) -> bool {
        self.team_id.as_deref() == Some(team_id)
    }
}
