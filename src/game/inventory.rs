//! Item collections: the player's [`Inventory`] and the per-location
//! [`GroundItems`] helper that locations embed.

use super::item::{Item, RuneStoneBag};

/// Ordered list of items matched by exact name.
#[derive(Debug, Clone, Default)]
struct ItemList {
    items: Vec<Item>,
}

impl ItemList {
    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name() == name)
    }

    fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name() == name)
    }
}

/// Items held by the player. Names are unique; insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    list: ItemList,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, handing it back if an item with the same name is already held.
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        if self.contains(item.name()) {
            return Err(item);
        }
        self.list.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Item> {
        self.remove_entry(name).map(|(_, item)| item)
    }

    /// Remove an item and report the slot it occupied so it can be put back with [`Inventory::restore`].
    pub fn remove_entry(&mut self, name: &str) -> Option<(usize, Item)> {
        let idx = self.list.position(name)?;
        Some((idx, self.list.items.remove(idx)))
    }

    /// Put an item back at its previous slot (clamped to the end).
    pub fn restore(&mut self, slot: usize, item: Item) -> Result<(), Item> {
        if self.contains(item.name()) {
            return Err(item);
        }
        let slot = slot.min(self.list.items.len());
        self.list.items.insert(slot, item);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.list.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.list.position(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.list.items.iter().map(Item::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.list.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.items.len()
    }

    pub fn rune_stone_bag(&self) -> Option<&RuneStoneBag> {
        self.list.items.iter().find_map(Item::as_rune_stone_bag)
    }

    pub fn rune_stone_bag_mut(&mut self) -> Option<&mut RuneStoneBag> {
        self.list.items.iter_mut().find_map(Item::as_rune_stone_bag_mut)
    }
}

/// Items lying on the ground at one location. Duplicate names are allowed.
#[derive(Debug, Clone, Default)]
pub struct GroundItems {
    list: ItemList,
}

impl GroundItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, item: Item) {
        self.list.items.push(item);
    }

    /// Remove the first item with this exact name.
    pub fn take(&mut self, name: &str) -> Option<Item> {
        let idx = self.list.position(name)?;
        Some(self.list.items.remove(idx))
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.list.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.list.position(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.list.items.iter().map(Item::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.list.items.is_empty()
    }
}
