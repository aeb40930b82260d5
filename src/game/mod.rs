//! Deterministic world-state engine.
//!
//! - [`item`] / [`inventory`] - item values and the containers that hold them
//! - [`location`] - the per-room [`Location`] trait
//! - [`world`] - the location arena, player position and game-over latch
//! - [`commands`] - verb parsing and handlers
//! - [`output`] - the [`OutputSink`] narration abstraction
//!
//! Nothing here touches the network; a [`World`] is plain data owned by one session.

pub mod commands;
pub mod errors;
pub mod inventory;
pub mod item;
pub mod location;
pub mod output;
pub mod world;

pub use commands::{
    bind_rune_stone, command_listing, handle_command, parse_command, CommandOutcome, VerbKind,
    GENERIC_FAILURE, VERBS,
};
pub use errors::GameError;
pub use inventory::{GroundItems, Inventory};
pub use item::{Bowl, Item, PlainItem, RuneStoneBag, PLACED_STONE_NAME, RUNE_STONE_BAG_NAME};
pub use location::{GoOutcome, Location, TakeOutcome, UseOutcome};
pub use output::OutputSink;
pub use world::{World, WorldBuilder};
