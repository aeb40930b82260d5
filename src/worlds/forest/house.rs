//! The house: where every playthrough begins.

use crate::game::{GoOutcome, GroundItems, Inventory, Item, Location, TakeOutcome, UseOutcome};

use super::items::{KEY, LANTERN, LOG_PILE, SCREWDRIVER};
use super::{BESIDE_HOUSE, FRONT_STEPS, STARTING_ROOM, WOODS_ENTRANCE};

#[derive(Debug, Default)]
pub struct StartingRoom {
    door_unlocked: bool,
    key_taken: bool,
    ground: GroundItems,
}

impl StartingRoom {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for StartingRoom {
    fn name(&self) -> &'static str {
        STARTING_ROOM
    }

    fn describe(&self) -> String {
        let mut s = String::from("You are in a small room with a door to the north.");
        if self.door_unlocked {
            s.push_str(" The door is unlocked.");
        } else {
            s.push_str(" The door is locked.");
        }
        if !self.key_taken {
            s.push_str(" There is a key on the floor.");
        }
        s
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "north" if self.door_unlocked => {
                GoOutcome::to("You go through the door to the north.", FRONT_STEPS)
            }
            "north" => GoOutcome::stay("The door is locked."),
            "south" | "east" | "west" => GoOutcome::stay(format!(
                "You are in a room, there is no way to go {}.",
                direction
            )),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn take_item(&mut self, name: &str) -> TakeOutcome {
        if name == KEY.name && !self.key_taken {
            self.key_taken = true;
            return TakeOutcome::taken(KEY, "You take the key.");
        }
        TakeOutcome::NotHere
    }

    fn use_item(&mut self, item: &mut Item, target: &str, _inventory: &Inventory) -> UseOutcome {
        if item.name() == KEY.name && target == "door" {
            if self.door_unlocked {
                return UseOutcome::keep("The door is already unlocked.");
            }
            self.door_unlocked = true;
            return UseOutcome::consume(
                "You unlock the door with the key. The key breaks in the lock, but you manage to open the door before it does.",
            );
        }
        UseOutcome::keep("You can't use that item on that target.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "door" if self.door_unlocked => Some("The door is unlocked.".into()),
            "door" => Some("The door is locked.".into()),
            "key" if !self.key_taken => Some(KEY.examine.into()),
            "room" => Some(self.describe()),
            _ => None,
        }
    }

    fn ground(&self) -> &GroundItems {
        &self.ground
    }

    fn ground_mut(&mut self) -> &mut GroundItems {
        &mut self.ground
    }
}

/// The lantern hangs in a sconce until a screwdriver loosens it.
#[derive(Debug)]
pub struct FrontSteps {
    lantern_attached: bool,
    lantern_taken: bool,
    ground: GroundItems,
}

impl Default for FrontSteps {
    fn default() -> Self {
        Self {
            lantern_attached: true,
            lantern_taken: false,
            ground: GroundItems::new(),
        }
    }
}

impl FrontSteps {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for FrontSteps {
    fn name(&self) -> &'static str {
        FRONT_STEPS
    }

    fn describe(&self) -> String {
        let light = if self.lantern_taken {
            "The lantern you carry casts a small radius of light around you."
        } else if self.lantern_attached {
            "There's a small radius of light around you, cast by a lantern hanging in a sconce on the wall beside the door."
        } else {
            "A lantern dangles loosely from its sconce beside the door, casting a small radius of light."
        };
        format!(
            "You are standing on the front steps of a small house. It's dark out, the moon is obscured by clouds, and the wind is howling. {}\n\
             To the north, a small path leads into the woods.\n\
             To the south, behind you, is the door you just came through.\n\
             To the east, a path leads around the side of the house.\n\
             To the west, darkness.",
            light
        )
    }

    fn go(&mut self, direction: &str, inventory: &Inventory) -> GoOutcome {
        match direction {
            "north" if inventory.contains(LANTERN.name) => GoOutcome::to(
                "You walk into the woods, the path is dark but you can see a little bit ahead of you.",
                WOODS_ENTRANCE,
            ),
            "north" => GoOutcome::stay(
                "You take a few steps, and realise you will get lost without a light. You go back to the house.",
            ),
            "south" => GoOutcome::to("You walk back through the front door.", STARTING_ROOM),
            "east" => GoOutcome::to("You walk around the side of the house.", BESIDE_HOUSE),
            "west" => GoOutcome::stay("You get a bad feeling about this place, and decide to turn back."),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn take_item(&mut self, name: &str) -> TakeOutcome {
        if name != LANTERN.name || self.lantern_taken {
            return TakeOutcome::NotHere;
        }
        if self.lantern_attached {
            return TakeOutcome::refused("You can't remove it, it's screwed to the wall.");
        }
        self.lantern_taken = true;
        TakeOutcome::taken(LANTERN, "You take the lantern.")
    }

    fn use_item(&mut self, item: &mut Item, target: &str, _inventory: &Inventory) -> UseOutcome {
        if item.name() == SCREWDRIVER.name && target == LANTERN.name && !self.lantern_taken {
            if !self.lantern_attached {
                return UseOutcome::keep("The lantern is already loose.");
            }
            self.lantern_attached = false;
            return UseOutcome::keep(
                "You use the screwdriver to remove the lantern from the sconce. The lantern is now loosely hanging from the wall.",
            );
        }
        UseOutcome::keep("You can't use that item on that target.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "lantern" if !self.lantern_taken && self.lantern_attached => Some(
                "A small lantern, screwed into a sconce on the wall beside the door.".into(),
            ),
            "lantern" if !self.lantern_taken => {
                Some("A small lantern hangs loosely from the sconce.".into())
            }
            "door" => Some("The front door of the house. It leads back inside.".into()),
            "path" => Some("A small path leads away from the house.".into()),
            "woods" => Some("A small path leads into the woods.".into()),
            _ => None,
        }
    }

    fn ground(&self) -> &GroundItems {
        &self.ground
    }

    fn ground_mut(&mut self) -> &mut GroundItems {
        &mut self.ground
    }
}

#[derive(Debug, Default)]
pub struct BesideHouse {
    screwdriver_taken: bool,
    ground: GroundItems,
}

impl BesideHouse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for BesideHouse {
    fn name(&self) -> &'static str {
        BESIDE_HOUSE
    }

    fn describe(&self) -> String {
        let mut desc = String::from(
            "You are standing beside the house. There is a log pile stacked against the wall.",
        );
        if !self.screwdriver_taken {
            desc.push_str(" A screwdriver lies on top of the pile.");
        }
        desc.push_str(" To the west are the front steps.");
        desc
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "west" => GoOutcome::to("You go back to the front steps.", FRONT_STEPS),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn take_item(&mut self, name: &str) -> TakeOutcome {
        if name == LOG_PILE.name {
            return TakeOutcome::refused("The log pile is too heavy to take.");
        }
        if name == SCREWDRIVER.name && !self.screwdriver_taken {
            self.screwdriver_taken = true;
            return TakeOutcome::taken(SCREWDRIVER, "You take the screwdriver.");
        }
        TakeOutcome::NotHere
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("You can't use that item here.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "log pile" => Some(LOG_PILE.examine.into()),
            "screwdriver" if !self.screwdriver_taken => Some(SCREWDRIVER.examine.into()),
            "house" => Some(
                "The house is old and weathered, with a small porch and a few windows.".into(),
            ),
            _ => None,
        }
    }

    fn ground(&self) -> &GroundItems {
        &self.ground
    }

    fn ground_mut(&mut self) -> &mut GroundItems {
        &mut self.ground
    }
}
