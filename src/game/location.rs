//! The [`Location`] trait implemented by every room in a world.
//!
//! Locations never hold a reference to their world. `go` names a destination and
//! the [`World`](super::world::World) resolves it; handlers that need to know what
//! the player carries receive the [`Inventory`] explicitly.

use super::inventory::{GroundItems, Inventory};
use super::item::Item;

/// Result of trying to move in a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoOutcome {
    pub message: String,
    /// Name of the location to move to; `None` means the player stays put.
    pub destination: Option<&'static str>,
}

impl GoOutcome {
    pub fn to(message: impl Into<String>, destination: &'static str) -> Self {
        Self {
            message: message.into(),
            destination: Some(destination),
        }
    }

    pub fn stay(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            destination: None,
        }
    }
}

/// Result of location-specific pickup logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TakeOutcome {
    /// The location handed over an item.
    Taken { item: Item, message: String },
    /// The location knows the thing but won't give it up.
    Refused(String),
    /// Nothing special here; fall back to the ground set.
    NotHere,
}

impl TakeOutcome {
    pub fn taken(item: impl Into<Item>, message: impl Into<String>) -> Self {
        TakeOutcome::Taken {
            item: item.into(),
            message: message.into(),
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        TakeOutcome::Refused(message.into())
    }
}

/// Result of `use <item> on <target>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseOutcome {
    pub message: String,
    /// Whether the item goes back into the inventory.
    pub keep: bool,
}

impl UseOutcome {
    pub fn keep(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            keep: true,
        }
    }

    pub fn consume(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            keep: false,
        }
    }
}

pub trait Location: Send {
    /// Unique name within the world; also the registry key.
    fn name(&self) -> &'static str;

    /// Current description. Must be a pure function of the location's flags.
    fn describe(&self) -> String;

    fn go(&mut self, direction: &str, inventory: &Inventory) -> GoOutcome;

    fn take_item(&mut self, _name: &str) -> TakeOutcome {
        TakeOutcome::NotHere
    }

    fn use_item(&mut self, item: &mut Item, target: &str, inventory: &Inventory) -> UseOutcome;

    /// Text for a named feature of the location, or `None` if nothing matches.
    fn examine(&self, name: &str) -> Option<String>;

    /// Dialogue for a named character, or `None` if nobody by that name is here.
    fn talk_to(&mut self, _name: &str) -> Option<String> {
        None
    }

    fn ground(&self) -> &GroundItems;

    fn ground_mut(&mut self) -> &mut GroundItems;

    /// Set once the location has killed the player.
    fn is_dead(&self) -> bool {
        false
    }
}
