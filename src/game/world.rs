//! World graph: an arena of locations indexed by name, plus the player's
//! position, inventory and the game-over latch.

use std::collections::HashMap;

use log::error;

use super::errors::GameError;
use super::inventory::Inventory;
use super::location::Location;

pub struct World {
    name: String,
    locations: Vec<Box<dyn Location>>,
    index: HashMap<&'static str, usize>,
    starting: usize,
    current: usize,
    inventory: Inventory,
    game_over: bool,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("name", &self.name)
            .field("locations", &self.locations.len())
            .field("current", &self.current_name())
            .field("inventory", &self.inventory.names())
            .field("game_over", &self.game_over)
            .finish()
    }
}

/// Collects locations and validates the registry before a [`World`] exists.
pub struct WorldBuilder {
    name: String,
    locations: Vec<Box<dyn Location>>,
    start: Option<&'static str>,
}

impl WorldBuilder {
    pub fn location(mut self, location: impl Location + 'static) -> Self {
        self.locations.push(Box::new(location));
        self
    }

    /// Starting location; defaults to the first registered one.
    pub fn start_at(mut self, name: &'static str) -> Self {
        self.start = Some(name);
        self
    }

    pub fn build(self) -> Result<World, GameError> {
        if self.locations.is_empty() {
            return Err(GameError::EmptyWorld(self.name));
        }
        let mut index = HashMap::with_capacity(self.locations.len());
        for (i, loc) in self.locations.iter().enumerate() {
            if index.insert(loc.name(), i).is_some() {
                return Err(GameError::DuplicateLocation {
                    name: loc.name().to_string(),
                });
            }
        }
        let starting = match self.start {
            Some(name) => *index.get(name).ok_or_else(|| GameError::UnknownLocation {
                name: name.to_string(),
            })?,
            None => 0,
        };
        Ok(World {
            name: self.name,
            locations: self.locations,
            index,
            starting,
            current: starting,
            inventory: Inventory::new(),
            game_over: false,
        })
    }
}

impl World {
    pub fn builder(name: impl Into<String>) -> WorldBuilder {
        WorldBuilder {
            name: name.into(),
            locations: Vec::new(),
            start: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, name: &str) -> Result<usize, GameError> {
        self.index.get(name).copied().ok_or_else(|| {
            error!(
                "world '{}': location '{}' is not registered",
                self.name, name
            );
            GameError::UnknownLocation {
                name: name.to_string(),
            }
        })
    }

    pub fn location(&self, name: &str) -> Option<&dyn Location> {
        self.index.get(name).map(|&i| self.locations[i].as_ref())
    }

    pub fn location_mut(&mut self, name: &str) -> Result<&mut dyn Location, GameError> {
        let i = self.resolve(name)?;
        Ok(self.locations[i].as_mut())
    }

    pub fn location_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.locations.iter().map(|l| l.name())
    }

    pub fn starting_name(&self) -> &'static str {
        self.locations[self.starting].name()
    }

    pub fn current(&self) -> &dyn Location {
        self.locations[self.current].as_ref()
    }

    pub fn current_mut(&mut self) -> &mut dyn Location {
        self.locations[self.current].as_mut()
    }

    pub fn current_name(&self) -> &'static str {
        self.current().name()
    }

    /// Borrow the current location together with the inventory.
    pub fn current_and_inventory(&mut self) -> (&mut dyn Location, &mut Inventory) {
        (self.locations[self.current].as_mut(), &mut self.inventory)
    }

    /// Move the player. On a registry miss the position is left unchanged.
    pub fn move_to(&mut self, name: &str) -> Result<(), GameError> {
        self.current = self.resolve(name)?;
        Ok(())
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Latch the game over. There is no way back.
    pub fn set_game_over(&mut self) {
        self.game_over = true;
    }
}
