//! The woods north of the house: the fork, the shed and the overgrown garden.

use crate::game::{GoOutcome, GroundItems, Inventory, Item, Location, TakeOutcome, UseOutcome};

use super::items::{stew_bowl, OLD_SWORD, SCREWDRIVER};
use super::{
    FORKED_PATH, FRONT_STEPS, OVERGROWN_GARDEN, SHED_EXTERIOR, SHED_INTERIOR, TOMB_ENTRANCE,
    WOODS_ENTRANCE,
};

#[derive(Debug, Default)]
pub struct WoodsEntrance {
    ground: GroundItems,
}

impl WoodsEntrance {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for WoodsEntrance {
    fn name(&self) -> &'static str {
        WOODS_ENTRANCE
    }

    fn describe(&self) -> String {
        "Tall firs loom ahead, their branches choking out the moonlight. A narrow path disappears into the darkness to the north. To the south, the house is visible.".into()
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "south" => GoOutcome::to("You head back to the front steps.", FRONT_STEPS),
            "north" => GoOutcome::to(
                "You follow the dark path deeper into the woods.",
                FORKED_PATH,
            ),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("There's nothing here that responds to that item.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "woods" | "fir trees" | "firs" => Some(
                "Tall firs loom ahead, their branches choking out the moonlight.".into(),
            ),
            "path" => Some("A narrow path disappears into the darkness to the north.".into()),
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
pub struct ForkedPath {
    ground: GroundItems,
}

impl ForkedPath {
    pub fn new() -> Self {
        Self::default()
    }
}

const FORK_DESCRIPTION: &str = "The path splits here: to the east stands a decrepit wooden shed; to the west a tangle of ivy hides a small garden clearing. The way back to the house lies south.";

impl Location for ForkedPath {
    fn name(&self) -> &'static str {
        FORKED_PATH
    }

    fn describe(&self) -> String {
        FORK_DESCRIPTION.into()
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "south" => GoOutcome::to("You retrace your steps toward the house.", WOODS_ENTRANCE),
            "east" => GoOutcome::to("You step toward the listing shed.", SHED_EXTERIOR),
            "west" => GoOutcome::to(
                "You push through the undergrowth toward the garden.",
                OVERGROWN_GARDEN,
            ),
            _ => GoOutcome::stay("That direction leads nowhere discernible."),
        }
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("That achieves nothing here.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "forked path" | "path" => Some(FORK_DESCRIPTION.into()),
            "shed" => Some(
                "The shed is old and weathered, with peeling paint and a sagging roof.".into(),
            ),
            "garden" => Some(
                "The garden is overgrown with weeds, but you can see hints of flowers peeking through."
                    .into(),
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

#[derive(Debug, Default)]
pub struct ShedExterior {
    hinge_removed: bool,
    ground: GroundItems,
}

impl ShedExterior {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for ShedExterior {
    fn name(&self) -> &'static str {
        SHED_EXTERIOR
    }

    fn describe(&self) -> String {
        if self.hinge_removed {
            "The shed door hangs loose on one side; you could easily slip in. The fork in the path is back to the west.".into()
        } else {
            "A dilapidated wooden shed leans at odd angles. The door is secured by a single rusty hinge plate. The fork in the path is back to the west.".into()
        }
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "west" => GoOutcome::to("You head back to the fork.", FORKED_PATH),
            "in" if self.hinge_removed => {
                GoOutcome::to("You slip into the dark shed interior.", SHED_INTERIOR)
            }
            "in" => GoOutcome::stay("The door won't budge; the hinge is still holding."),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn use_item(&mut self, item: &mut Item, target: &str, _inventory: &Inventory) -> UseOutcome {
        if item.name() == SCREWDRIVER.name && target == "hinge" && !self.hinge_removed {
            self.hinge_removed = true;
            return UseOutcome::keep("You pry off the rusty hinge plate. The door creaks open a crack.");
        }
        UseOutcome::keep("That doesn't seem to work.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        let text = match (name, self.hinge_removed) {
            ("shed", false) => "A dilapidated wooden shed leans at odd angles. The door is secured by a single rusty hinge plate.",
            ("shed", true) | ("door", true) => "The door hangs loose on one side; you could easily slip inside.",
            ("door", false) => "The door is secured by a single rusty hinge plate.",
            ("hinge", false) => "A rusty hinge plate secures the door.",
            ("hinge", true) => "The hinge is already removed.",
            _ => return None,
        };
        Some(text.into())
    }

    fn ground(&self) -> &GroundItems {
        &self.ground
    }

    fn ground_mut(&mut self) -> &mut GroundItems {
        &mut self.ground
    }
}

#[derive(Debug, Default)]
pub struct ShedInterior {
    sword_taken: bool,
    bowl_taken: bool,
    ground: GroundItems,
}

impl ShedInterior {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for ShedInterior {
    fn name(&self) -> &'static str {
        SHED_INTERIOR
    }

    fn describe(&self) -> String {
        let mut desc = String::from("Dust motes dance in the lantern light. Cobwebbed tools line the walls.");
        if !self.sword_taken {
            desc.push_str(" A long, cloth-wrapped object rests on a rack.");
        }
        if !self.bowl_taken {
            desc.push_str(" An empty bowl sits on a shelf.");
        }
        desc.push_str(" The way out is behind you.");
        desc
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "out" => GoOutcome::to("You step back outside.", SHED_EXTERIOR),
            _ => GoOutcome::stay("You bump into a wall."),
        }
    }

    fn take_item(&mut self, name: &str) -> TakeOutcome {
        match name {
            "bowl" if !self.bowl_taken => {
                self.bowl_taken = true;
                TakeOutcome::taken(stew_bowl(), "You take the empty bowl.")
            }
            "cloth" if !self.sword_taken => {
                self.sword_taken = true;
                TakeOutcome::taken(
                    OLD_SWORD,
                    "You unwrap the bundle; the cloth falls apart in your hands revealing an old sword. You take the sword.",
                )
            }
            "old sword" | "sword" if !self.sword_taken => {
                self.sword_taken = true;
                TakeOutcome::taken(OLD_SWORD, "You unwrap the bundle, revealing an old sword.")
            }
            _ => TakeOutcome::NotHere,
        }
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("No useful interaction here.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "bowl" if !self.bowl_taken => Some("An empty bowl.".into()),
            "cloth" if !self.sword_taken => {
                Some("A long, cloth-wrapped object rests on a rack.".into())
            }
            "old sword" | "sword" if !self.sword_taken => Some(OLD_SWORD.examine.into()),
            "tools" => Some("Rusted saws and broken rakes. Nothing you could use.".into()),
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
pub struct OvergrownGarden {
    vines_cut: bool,
    ground: GroundItems,
}

impl OvergrownGarden {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for OvergrownGarden {
    fn name(&self) -> &'static str {
        OVERGROWN_GARDEN
    }

    fn describe(&self) -> String {
        if self.vines_cut {
            "An old stone tomb stands cleared of vines. Its lid lies ajar, revealing a stairway descending into darkness. The fork in the path is to the east.".into()
        } else {
            "Broken fountains and knee high ivy choke the clearing. Thick vines coil around a waist high stone tomb at the center. The fork in the path is to the east.".into()
        }
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "east" => GoOutcome::to("You return to the fork in the path.", FORKED_PATH),
            "down" if self.vines_cut => {
                GoOutcome::to("You descend the narrow stone steps.", TOMB_ENTRANCE)
            }
            "down" => GoOutcome::stay("Thick vines block any passage downward."),
            _ => GoOutcome::stay("Shrubs and trees block your path."),
        }
    }

    fn use_item(&mut self, item: &mut Item, target: &str, _inventory: &Inventory) -> UseOutcome {
        if item.name() == OLD_SWORD.name && target == "vines" && !self.vines_cut {
            self.vines_cut = true;
            return UseOutcome::keep(
                "You hack through the vines, clearing the tomb and revealing a hidden stairway leading down.",
            );
        }
        UseOutcome::keep("That doesn't work.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "vines" if !self.vines_cut => {
                Some("Thick vines coil around a waist high stone tomb at the center.".into())
            }
            "tomb" if self.vines_cut => Some(
                "An old stone tomb stands cleared of vines. Its lid lies ajar, revealing a stairway descending into darkness."
                    .into(),
            ),
            "tomb" => Some("A waist high stone tomb is choked with thick vines.".into()),
            "fountains" => Some("The fountains are cracked and dry.".into()),
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
