//! Item catalogue for the forest world.

use crate::game::{Bowl, Item, PlainItem, RuneStoneBag};

pub const KEY: PlainItem = PlainItem {
    name: "key",
    description: "A small iron key.",
    examine: "A small iron key, slightly bent. It looks like it fits an old door lock.",
};

pub const LANTERN: PlainItem = PlainItem {
    name: "lantern",
    description: "A small lantern.",
    examine: "The lantern is small, and it is casting a small radius of light around you.",
};

pub const SCREWDRIVER: PlainItem = PlainItem {
    name: "screwdriver",
    description: "A flathead screwdriver, a bit rusty but usable.",
    examine: "The screwdriver is a bit rusty, it's a flathead, and it still seems to work.",
};

pub const LOG_PILE: PlainItem = PlainItem {
    name: "log pile",
    description: "A neatly stacked pile of firewood beside the house.",
    examine: "The log pile is neatly stacked and ready for use.",
};

pub const OLD_SWORD: PlainItem = PlainItem {
    name: "old sword",
    description: "A heavy, time-worn longsword. Its edge is still sharp enough to hack through thick vines.",
    examine: "A heavy, time-worn longsword. Its edge is still sharp enough to hack through thick vines, or to scare off small creatures.",
};

pub const GLOWING_MUSHROOM: PlainItem = PlainItem {
    name: "glowing mushroom",
    description: "It glows with a soft, magical light.",
    examine: "You look closely at the glowing mushroom. It pulses gently like it's alive.",
};

pub const CRYSTAL_SHARD: PlainItem = PlainItem {
    name: "crystal shard",
    description: "A shiny crystal shard that sparkles faintly.",
    examine: "The crystal shard sparkles faintly, it seems to be a piece of a larger crystal.",
};

pub const STICKY_SAP: PlainItem = PlainItem {
    name: "sticky sap",
    description: "A small container of thick, amber sap.",
    examine: "A thick, sticky sap that could glue things together.",
};

pub const WOODEN_PLANK: PlainItem = PlainItem {
    name: "wooden plank",
    description: "A long, flat plank pried from a fallen tree.",
    examine: "A long, flat plank, perfect for patching something.",
};

pub fn stew_bowl() -> Item {
    Item::Bowl(Bowl::empty("stew"))
}

pub fn rune_stone_bag() -> Item {
    Item::RuneStoneBag(RuneStoneBag::new())
}
