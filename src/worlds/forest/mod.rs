//! The forest world: a locked house, a dark wood and the caves beneath an old tomb.

mod caves;
mod house;
pub mod items;
mod woods;

use crate::game::{GameError, World};

pub use caves::{
    CaveExit, CaveJunction, FallenTree, GoblinCamp, HiddenForestShrine, MushroomGrove, RavineEdge,
    SapTreeClearing, TombEntrance,
};
pub use house::{BesideHouse, FrontSteps, StartingRoom};
pub use woods::{ForkedPath, OvergrownGarden, ShedExterior, ShedInterior, WoodsEntrance};

pub const WORLD_NAME: &str = "forest";

pub const STARTING_ROOM: &str = "Starting Location";
pub const FRONT_STEPS: &str = "Front Steps";
pub const BESIDE_HOUSE: &str = "Beside House";
pub const WOODS_ENTRANCE: &str = "Woods Entrance";
pub const FORKED_PATH: &str = "Forked Path";
pub const SHED_EXTERIOR: &str = "Shed Exterior";
pub const SHED_INTERIOR: &str = "Shed Interior";
pub const OVERGROWN_GARDEN: &str = "Overgrown Garden";
pub const TOMB_ENTRANCE: &str = "Tomb Entrance";
pub const GOBLIN_CAMP: &str = "Goblin Camp";
pub const MUSHROOM_GROVE: &str = "Mushroom Grove";
pub const FALLEN_TREE: &str = "Fallen Tree";
pub const RAVINE_EDGE: &str = "Ravine Edge";
pub const HIDDEN_FOREST_SHRINE: &str = "Hidden Forest Shrine";
pub const CAVE_JUNCTION: &str = "Cave Junction";
pub const CAVE_EXIT: &str = "Cave Exit";
pub const SAP_TREE_CLEARING: &str = "Sap Tree Clearing";

/// Build a fresh forest. Every call returns independent state.
pub fn build_forest() -> Result<World, GameError> {
    World::builder(WORLD_NAME)
        .location(StartingRoom::new())
        .location(FrontSteps::new())
        .location(BesideHouse::new())
        .location(WoodsEntrance::new())
        .location(ForkedPath::new())
        .location(ShedExterior::new())
        .location(ShedInterior::new())
        .location(OvergrownGarden::new())
        .location(TombEntrance::new())
        .location(GoblinCamp::new())
        .location(MushroomGrove::new())
        .location(FallenTree::new())
        .location(RavineEdge::new())
        .location(HiddenForestShrine::new())
        .location(CaveJunction::new())
        .location(CaveExit::new())
        .location(SapTreeClearing::new())
        .start_at(STARTING_ROOM)
        .build()
}
