use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use super::{Player, Position};
use crate::error::MatchError;
use crate::tactics::TacticalInstructions;

/// Slots 0..STARTERS are the starting eleven, everything after is the bench.
pub const STARTERS: usize = 11;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "TeamData")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: String,
    players: Vec<Player>, // 11 starters, then bench in substitution priority order
    pub tactics: TacticalInstructions,
}

/// Unvalidated wire shape of a team.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    pub players: Vec<Player>,
    #[serde(default)]
    pub tactics: TacticalInstructions,
}

impl TryFrom<TeamData> for Team {
    type Error = MatchError;

    fn try_from(data: TeamData) -> Result<Self, Self::Error> {
        let short_name = data
            .short_name
            .unwrap_or_else(|| data.name.chars().take(3).collect::<String>().to_uppercase());
        Team::new(data.id, data.name, short_name, data.players, data.tactics)
    }
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        short_name: impl Into<String>,
        players: Vec<Player>,
        tactics: TacticalInstructions,
    ) -> crate::Result<Self> {
        let team = Self {
            id: id.into(),
            name: name.into(),
            short_name: short_name.into(),
            players,
            tactics,
        };
        team.validate()?;
        Ok(team)
    }

    fn validate(&self) -> crate::Result<()> {
        if self.players.len() < STARTERS {
            return Err(MatchError::SquadTooSmall {
                team: self.name.clone(),
                needed: STARTERS,
                found: self.players.len(),
            });
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if !seen.insert(player.id.as_str()) {
                return Err(MatchError::DuplicatePlayer {
                    team: self.name.clone(),
                    player: player.id.clone(),
                });
            }
        }

        if !self.starters().iter().any(|p| p.position.is_goalkeeper()) {
            warn!("{} starts without a goalkeeper; slot 0 will keep goal", self.name);
        }
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn starters(&self) -> &[Player] {
        &self.players[..STARTERS]
    }

    pub fn starters_mut(&mut self) -> &mut [Player] {
        &mut self.players[..STARTERS]
    }

    pub fn bench(&self) -> &[Player] {
        &self.players[STARTERS..]
    }

    pub fn player(&self, slot: usize) -> Option<&Player> {
        self.players.get(slot)
    }

    pub fn player_mut(&mut self, slot: usize) -> Option<&mut Player> {
        self.players.get_mut(slot)
    }

    pub fn slot_of(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    /// Slot of a player currently in the starting eleven.
    pub fn starter_slot(&self, player_id: &str) -> Option<usize> {
        self.slot_of(player_id).filter(|&slot| slot < STARTERS)
    }

    pub fn swap(&mut self, a: usize, b: usize) -> crate::Result<()> {
        let len = self.players.len();
        if a >= len || b >= len {
            return Err(MatchError::InvalidSubstitution(format!(
                "slot out of range ({a} <-> {b}, squad of {len})"
            )));
        }
        self.players.swap(a, b);
        Ok(())
    }

    /// First goalkeeper in the eleven, or whoever is in slot 0.
    pub fn goalkeeper(&self) -> &Player {
        self.starters()
            .iter()
            .find(|p| p.position.is_goalkeeper())
            .unwrap_or(&self.players[0])
    }

    /// Starting midfielders and attackers; falls back to slot 0 when empty.
    pub fn attacking_pool(&self) -> Vec<&Player> {
        let pool: Vec<&Player> =
            self.starters().iter().filter(|p| p.position.is_forward_leaning()).collect();
        if pool.is_empty() {
            vec![&self.players[0]]
        } else {
            pool
        }
    }

    pub fn count_starting(&self, position: Position) -> usize {
        self.starters().iter().filter(|p| p.position == position).count()
    }

    /// Reset stamina and injuries before kick-off.
    pub fn prepare_for_kickoff(&mut self) {
        for player in &mut self.players {
            player.refresh();
        }
    }
}
