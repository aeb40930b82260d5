//! World catalogue. Each connection builds its own world from a [`WorldKind`].

pub mod forest;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::{GameError, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorldKind {
    #[default]
    Forest,
}

impl WorldKind {
    pub fn build(self) -> Result<World, GameError> {
        match self {
            WorldKind::Forest => forest::build_forest(),
        }
    }
}

impl fmt::Display for WorldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldKind::Forest => write!(f, "{}", forest::WORLD_NAME),
        }
    }
}

impl FromStr for WorldKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forest" => Ok(WorldKind::Forest),
            other => Err(GameError::UnknownWorld(other.to_string())),
        }
    }
}

/// Convenience used by the server: build a fresh world of the given kind.
pub fn build_world(kind: WorldKind) -> Result<World, GameError> {
    kind.build()
}
