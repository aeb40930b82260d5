//! Item value types.
//!
//! Most items are immutable catalogue entries ([`PlainItem`]); a few carry state
//! that `use` can change (the [`Bowl`]) or that records player choices (the
//! [`RuneStoneBag`]). Every item is matched by its exact [`Item::name`].

/// Name of the carried bag that records teleport bindings.
pub const RUNE_STONE_BAG_NAME: &str = "bag of rune stones";

/// Name of the marker dropped wherever a teleport label is bound.
pub const PLACED_STONE_NAME: &str = "Teleportation Stone";

/// A stateless catalogue item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainItem {
    pub name: &'static str,
    pub description: &'static str,
    pub examine: &'static str,
}

/// A container that is either empty or holds a single kind of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bowl {
    /// What the bowl is meant to hold ("stew").
    pub contents: &'static str,
    pub full: bool,
}

impl Bowl {
    pub fn empty(contents: &'static str) -> Self {
        Self {
            contents,
            full: false,
        }
    }

    /// Fill the bowl. Returns false when it was already full.
    pub fn fill(&mut self) -> bool {
        if self.full {
            return false;
        }
        self.full = true;
        true
    }
}

/// Label → location bindings recorded by dropping rune stones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuneStoneBag {
    bindings: Vec<(String, String)>,
}

impl RuneStoneBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `label` to `location`. Re-binding an existing label moves it.
    pub fn bind(&mut self, label: &str, location: &str) {
        if let Some(entry) = self.bindings.iter_mut().find(|(l, _)| l == label) {
            entry.1 = location.to_string();
        } else {
            self.bindings.push((label.to_string(), location.to_string()));
        }
    }

    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, loc)| loc.as_str())
    }

    /// Known labels in binding order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(l, _)| l.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Plain(PlainItem),
    Bowl(Bowl),
    RuneStoneBag(RuneStoneBag),
    /// Marker left on the ground where a teleport label was bound.
    PlacedStone { label: String },
}

impl From<PlainItem> for Item {
    fn from(item: PlainItem) -> Self {
        Item::Plain(item)
    }
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Plain(p) => p.name,
            Item::Bowl(b) if b.full => "full bowl",
            Item::Bowl(_) => "bowl",
            Item::RuneStoneBag(_) => RUNE_STONE_BAG_NAME,
            Item::PlacedStone { .. } => PLACED_STONE_NAME,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Item::Plain(p) => p.description.to_string(),
            Item::Bowl(b) if b.full => format!("Bowl full of {}.", b.contents),
            Item::Bowl(b) => format!(
                "A bowl, it looks like it could hold something. Probably {}.",
                b.contents
            ),
            Item::RuneStoneBag(_) => {
                "A bag of rune stones that can be used to teleport to different locations."
                    .to_string()
            }
            Item::PlacedStone { .. } => {
                "A stone that allows you to teleport to a different location.".to_string()
            }
        }
    }

    pub fn examine(&self) -> String {
        match self {
            Item::Plain(p) => p.examine.to_string(),
            Item::Bowl(b) if b.full => format!("A bowl full of {}.", b.contents),
            Item::Bowl(_) => "An empty bowl.".to_string(),
            Item::RuneStoneBag(bag) if bag.is_empty() => {
                "The bag is filled with rune stones that glow with a faint light.".to_string()
            }
            Item::RuneStoneBag(bag) => format!(
                "The bag is filled with rune stones that glow with a faint light. Stones are bound to: {}.",
                bag.labels().collect::<Vec<_>>().join(", ")
            ),
            Item::PlacedStone { label } => format!(
                "The stone is engraved with runes that glow faintly. You named this place '{}'.",
                label
            ),
        }
    }

    pub fn as_bowl_mut(&mut self) -> Option<&mut Bowl> {
        match self {
            Item::Bowl(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_rune_stone_bag(&self) -> Option<&RuneStoneBag> {
        match self {
            Item::RuneStoneBag(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn as_rune_stone_bag_mut(&mut self) -> Option<&mut RuneStoneBag> {
        match self {
            Item::RuneStoneBag(bag) => Some(bag),
            _ => None,
        }
    }
}
