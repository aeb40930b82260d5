//! Per-connection game state.

use log::debug;

use crate::game::{bind_rune_stone, command_listing, handle_command, CommandOutcome, OutputSink, World};
use crate::logutil::escape_log;

/// What the connection should do after a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
    GameOver,
}

/// One player's world plus the labelling prompt left open by a rune-stone drop.
#[derive(Debug)]
pub struct GameSession {
    world: World,
    /// Location waiting for a rune-stone label.
    pending_label: Option<&'static str>,
}

impl GameSession {
    pub fn new(world: World) -> Self {
        Self {
            world,
            pending_label: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn is_awaiting_label(&self) -> bool {
        self.pending_label.is_some()
    }

    pub fn banner(&self) -> Vec<String> {
        command_listing()
    }

    /// Feed one cleaned line to the game.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn OutputSink) -> Step {
        if self.world.is_game_over() {
            out.say("You are dead. Your adventure ends here.");
            return Step::GameOver;
        }

        if let Some(location) = self.pending_label {
            debug!("labelling stone at {} as '{}'", location, escape_log(line));
            if bind_rune_stone(&mut self.world, location, line, out) {
                self.pending_label = None;
            }
            return Step::Continue;
        }

        match handle_command(&mut self.world, line, out) {
            CommandOutcome::Continue => Step::Continue,
            CommandOutcome::AwaitLabel { location } => {
                self.pending_label = Some(location);
                Step::Continue
            }
            CommandOutcome::Quit => Step::Quit,
            CommandOutcome::GameOver => Step::GameOver,
        }
    }
}
