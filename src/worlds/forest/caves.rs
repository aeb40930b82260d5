//! Below the tomb: the goblin camp, the grove and everything reachable from it.

use crate::game::{
    GoOutcome, GroundItems, Inventory, Item, Location, TakeOutcome, UseOutcome,
};

use super::items::{
    rune_stone_bag, CRYSTAL_SHARD, GLOWING_MUSHROOM, OLD_SWORD, STICKY_SAP, WOODEN_PLANK,
};
use super::{
    CAVE_EXIT, CAVE_JUNCTION, FALLEN_TREE, GOBLIN_CAMP, HIDDEN_FOREST_SHRINE, MUSHROOM_GROVE,
    OVERGROWN_GARDEN, RAVINE_EDGE, SAP_TREE_CLEARING, TOMB_ENTRANCE,
};

#[derive(Debug, Default)]
pub struct TombEntrance {
    ground: GroundItems,
}

impl TombEntrance {
    pub fn new() -> Self {
        Self::default()
    }
}

const TOMB_DESCRIPTION: &str = "A yawning passage leads into impenetrable darkness. A chill wind whistles from the depths.";

impl Location for TombEntrance {
    fn name(&self) -> &'static str {
        TOMB_ENTRANCE
    }

    fn describe(&self) -> String {
        format!(
            "{} The stairs lead up to the garden; to the east the passage goes deeper into the darkness.",
            TOMB_DESCRIPTION
        )
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "up" => GoOutcome::to("You climb back up to the garden.", OVERGROWN_GARDEN),
            "east" => GoOutcome::to(
                "You peer into the depths, and venture forward.",
                GOBLIN_CAMP,
            ),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("Nothing happens.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "tomb" | "passage" | "darkness" => Some(TOMB_DESCRIPTION.into()),
            "stairs" => Some("Narrow stone steps lead back up to the garden.".into()),
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

/// A hungry goblin guards a pot of stew.
///
/// Feeding it the glowing mushroom earns a crystal shard; waving the sword at
/// it makes it flee, which leaves the stew unguarded.
#[derive(Debug, Default)]
pub struct GoblinCamp {
    helped: bool,
    shard_taken: bool,
    ran_off: bool,
    ground: GroundItems,
}

impl GoblinCamp {
    pub fn new() -> Self {
        Self::default()
    }

    fn shard_available(&self) -> bool {
        self.helped && !self.shard_taken
    }
}

impl Location for GoblinCamp {
    fn name(&self) -> &'static str {
        GOBLIN_CAMP
    }

    fn describe(&self) -> String {
        let scene = if self.ran_off {
            if self.shard_available() {
                "The goblin has run off, leaving his stew and a crystal shard behind. The camp is now empty."
            } else {
                "The goblin has run off, leaving his stew behind. The camp is now empty."
            }
        } else if !self.helped {
            "A small goblin stirs a pot of stew and looks up at you. He seems hungry and mutters something about glowing mushrooms."
        } else if !self.shard_taken {
            "The goblin smiles happily, stirring his now glowing stew. He left a crystal shard nearby."
        } else {
            "The goblin is busy stirring his stew. He seems happy and content."
        };
        format!(
            "{}\nA path leads south to a grove of mushrooms, and the passage back to the tomb lies west.",
            scene
        )
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "south" => GoOutcome::to("You head south to the mushroom grove.", MUSHROOM_GROVE),
            "west" => GoOutcome::to("You go back to the tomb entrance.", TOMB_ENTRANCE),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn take_item(&mut self, name: &str) -> TakeOutcome {
        if name == CRYSTAL_SHARD.name && self.shard_available() {
            self.shard_taken = true;
            return TakeOutcome::taken(
                CRYSTAL_SHARD,
                "You take the crystal shard the goblin left for you.",
            );
        }
        if name == "stew" {
            return TakeOutcome::refused("The pot is far too hot to carry. Maybe you could fill something with it.");
        }
        TakeOutcome::NotHere
    }

    fn use_item(&mut self, item: &mut Item, target: &str, _inventory: &Inventory) -> UseOutcome {
        let name = item.name().to_string();
        if name == GLOWING_MUSHROOM.name && target == "goblin" && !self.helped && !self.ran_off {
            self.helped = true;
            return UseOutcome::consume(
                "The goblin gobbles the mushroom and grins. He tosses a shiny shard from his satchel onto the ground!",
            );
        }
        if name == OLD_SWORD.name && target == "goblin" {
            if self.ran_off {
                return UseOutcome::keep("There is no goblin left to threaten.");
            }
            self.ran_off = true;
            return UseOutcome::keep(
                "The goblin looks at you in horror and runs away, leaving his stew behind.",
            );
        }
        if name == OLD_SWORD.name && target == "stew" {
            return UseOutcome::keep("You dip your sword in the stew, nothing happens.");
        }
        if target == "stew" {
            if let Some(bowl) = item.as_bowl_mut() {
                if bowl.full {
                    return UseOutcome::keep("You cannot do that with a full bowl.");
                }
                if !self.ran_off {
                    return UseOutcome::keep("The goblin swats your hand away. He looks annoyed.");
                }
                bowl.fill();
                return UseOutcome::keep("You fill the bowl with stew.");
            }
        }
        UseOutcome::keep("That doesn't do anything here.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "goblin" if self.ran_off => Some("The goblin is long gone.".into()),
            "goblin" if self.helped => {
                Some("The goblin hums to himself, his belly full of mushroom.".into())
            }
            "goblin" => Some(
                "A scrawny goblin with a wooden spoon. His stomach growls loudly.".into(),
            ),
            "stew" | "pot" => Some("A thick, bubbling stew. It smells better than you expected.".into()),
            "crystal shard" if self.shard_available() => Some(CRYSTAL_SHARD.examine.into()),
            _ => None,
        }
    }

    fn talk_to(&mut self, name: &str) -> Option<String> {
        if name != "goblin" {
            return None;
        }
        let line = if self.ran_off {
            "You call out, but the goblin is long gone."
        } else if self.helped {
            "\"Mushroom good! You good!\" the goblin cackles, patting his belly."
        } else {
            "\"Hungry... so hungry. Glowing mushroom, yes? Bring, bring!\" the goblin pleads."
        };
        Some(line.into())
    }

    fn ground(&self) -> &GroundItems {
        &self.ground
    }

    fn ground_mut(&mut self) -> &mut GroundItems {
        &mut self.ground
    }
}

#[derive(Debug, Default)]
pub struct MushroomGrove {
    mushroom_taken: bool,
    ground: GroundItems,
}

impl MushroomGrove {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for MushroomGrove {
    fn name(&self) -> &'static str {
        MUSHROOM_GROVE
    }

    fn describe(&self) -> String {
        let mut desc = String::from("Mushrooms of all shapes and sizes glow gently. The air is peaceful here.");
        if !self.mushroom_taken {
            desc.push_str(" One glowing mushroom is brighter than the rest.");
        }
        desc.push_str(
            " To the north, you can see the goblin camp. To the south, a dark cave system beckons. \
             A fallen tree lies to the west, and to the east the ground drops away at a ravine.",
        );
        desc
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "north" => GoOutcome::to("You return to the goblin camp.", GOBLIN_CAMP),
            "south" => GoOutcome::to(
                "You head deeper into a cave system, arriving at a junction.",
                CAVE_JUNCTION,
            ),
            "west" => GoOutcome::to("You pick your way toward the fallen tree.", FALLEN_TREE),
            "east" => GoOutcome::to("You walk to the edge of the ravine.", RAVINE_EDGE),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn take_item(&mut self, name: &str) -> TakeOutcome {
        if name == GLOWING_MUSHROOM.name && !self.mushroom_taken {
            self.mushroom_taken = true;
            return TakeOutcome::taken(GLOWING_MUSHROOM, "You pick a glowing mushroom.");
        }
        TakeOutcome::NotHere
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("You can't use that here.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "glowing mushroom" if !self.mushroom_taken => {
                Some("A glowing mushroom. It pulses gently like it's alive.".into())
            }
            "mushroom grove" | "mushrooms" => Some(
                "Mushrooms of all shapes and sizes glow gently. The air is peaceful here.".into(),
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
pub struct FallenTree {
    plank_taken: bool,
    ground: GroundItems,
}

impl FallenTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn scene(&self) -> &'static str {
        if self.plank_taken {
            "A mossy fallen tree lies split and broken."
        } else {
            "A mossy fallen tree blocks part of the path. One of its planks is loose and looks usable."
        }
    }
}

impl Location for FallenTree {
    fn name(&self) -> &'static str {
        FALLEN_TREE
    }

    fn describe(&self) -> String {
        format!("{} The mushroom grove is back to the east.", self.scene())
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "east" => GoOutcome::to("You walk back toward the mushroom grove.", MUSHROOM_GROVE),
            _ => GoOutcome::stay("There's too much brush that way."),
        }
    }

    fn take_item(&mut self, name: &str) -> TakeOutcome {
        if name == WOODEN_PLANK.name && !self.plank_taken {
            self.plank_taken = true;
            return TakeOutcome::taken(WOODEN_PLANK, "You pry a plank loose from the tree trunk.");
        }
        TakeOutcome::NotHere
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("Nothing happens.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "wooden plank" if !self.plank_taken => Some(WOODEN_PLANK.examine.into()),
            "fallen tree" | "tree" => Some(self.scene().into()),
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
pub struct RavineEdge {
    ladder_fixed: bool,
    ground: GroundItems,
}

impl RavineEdge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for RavineEdge {
    fn name(&self) -> &'static str {
        RAVINE_EDGE
    }

    fn describe(&self) -> String {
        let scene = if self.ladder_fixed {
            "A repaired ladder now leads safely down into the ravine."
        } else {
            "You reach a ravine. A broken ladder lies splintered nearby. It's too dangerous to climb without fixing it."
        };
        format!("{} The mushroom grove is to the west.", scene)
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "west" => GoOutcome::to("You head back to the mushroom grove.", MUSHROOM_GROVE),
            "down" if self.ladder_fixed => GoOutcome::to(
                "You carefully descend the ladder into the ravine.",
                HIDDEN_FOREST_SHRINE,
            ),
            "down" => GoOutcome::stay("The ladder is broken; it's too dangerous to climb down."),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn use_item(&mut self, item: &mut Item, target: &str, inventory: &Inventory) -> UseOutcome {
        if item.name() == WOODEN_PLANK.name && target == "ladder" && !self.ladder_fixed {
            if !inventory.contains(STICKY_SAP.name) {
                return UseOutcome::keep("You need something to hold the plank in place.");
            }
            self.ladder_fixed = true;
            return UseOutcome::consume(
                "You patch the broken ladder with the plank and seal it with sticky sap.",
            );
        }
        UseOutcome::keep("That doesn't work here.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "ladder" if self.ladder_fixed => Some("The ladder is now fixed and safe to use.".into()),
            "ladder" => Some("The ladder is broken and unsafe to use.".into()),
            "ravine" => Some("A deep ravine stretches before you, with steep sides.".into()),
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
pub struct HiddenForestShrine {
    ground: GroundItems,
}

impl HiddenForestShrine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for HiddenForestShrine {
    fn name(&self) -> &'static str {
        HIDDEN_FOREST_SHRINE
    }

    fn describe(&self) -> String {
        "You step into a glade filled with shimmering light.\n\
         A stone shrine rises from the forest floor, vines curling gently around its base.\n\
         Crystals float silently in the air, casting soft rainbow glows on the surrounding trees.\n\
         On the pedestal, faint glowing runes pulse gently. They seem to respond to your presence.\n\
         A voice, warm and ancient, echoes in your mind:\n\
         \"You have taken your first step, young traveler. The forest remembers those who are kind and clever.\"\n\
         The ladder leads back up."
            .into()
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "up" => GoOutcome::to("You climb back up the repaired ladder.", RAVINE_EDGE),
            _ => GoOutcome::stay("Only trees surround you."),
        }
    }

    fn take_item(&mut self, name: &str) -> TakeOutcome {
        match name {
            "crystals" | "shrine" | "runes" => {
                TakeOutcome::refused("There is nothing to take here, only serenity.")
            }
            _ => TakeOutcome::NotHere,
        }
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("You kneel at the shrine. It hums softly in response.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        let text = match name {
            "shrine" => "The shrine is made of ancient stone, covered in glowing runes. It seems to hum with energy.",
            "crystals" => "The crystals float in the air, casting soft rainbow glows on the surrounding trees.",
            "trees" => "The trees are tall and ancient, their leaves whispering secrets to one another.",
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
pub struct CaveJunction {
    ground: GroundItems,
}

impl CaveJunction {
    pub fn new() -> Self {
        Self::default()
    }
}

const JUNCTION_DESCRIPTION: &str =
    "A dark cave system stretches out in all directions. The air is damp and musty.";

impl Location for CaveJunction {
    fn name(&self) -> &'static str {
        CAVE_JUNCTION
    }

    fn describe(&self) -> String {
        JUNCTION_DESCRIPTION.into()
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "north" => GoOutcome::to("You head deeper into the cave system.", CAVE_EXIT),
            "south" => GoOutcome::to("You head back to the mushroom grove.", MUSHROOM_GROVE),
            "west" => GoOutcome::to(
                "You venture further into the darkness. After wandering for hours, you arrive back where you started, at the same cave junction.",
                CAVE_JUNCTION,
            ),
            "east" => GoOutcome::to(
                "You venture further into the darkness. After wandering for hours, you arrive back where you started, or could this be a different cave junction?",
                CAVE_JUNCTION,
            ),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("Nothing happens.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "cave" | "junction" => Some(JUNCTION_DESCRIPTION.into()),
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

/// The traveler's speech escalates over three conversations; the last one
/// leaves the rune-stone bag on the ground.
#[derive(Debug, Default)]
pub struct CaveExit {
    traveler_talks: u8,
    ground: GroundItems,
}

const TRAVELER_FAREWELL: &str = "The traveler pulls himself up off the rock, using his staff for support. \
His presence is imposing, and a chill runs down your spine, not from fear but from the wisdom and power about him. \
\"You seem to have no intention of turning back, and I would be letting you walk to your own death if I did not intervene.\" \
He reaches into his pocket, pulls out a small ornate bag and places it on the stone between you. \
\"Take this bag, it contains teleportation stones. It will allow you to escape the forest if you find yourself in danger.\" \
The wind picks up around him, a small glimmer of light hangs in the air, and he vanishes, leaving you alone with the bag.";

impl CaveExit {
    pub fn new() -> Self {
        Self::default()
    }

    fn traveler_present(&self) -> bool {
        self.traveler_talks < 3
    }
}

impl Location for CaveExit {
    fn name(&self) -> &'static str {
        CAVE_EXIT
    }

    fn describe(&self) -> String {
        let mut desc = String::from(
            "To the south, you see a cave entrance. Outside the cave a dark and foreboding forest looms, \
             its trees twisted and gnarled seem to be leaning in towards you.",
        );
        if self.traveler_present() {
            desc.push_str(
                " You notice a weary traveler sitting on a rock, disheveled and hunched in a tattered robe. \
                 You can not see their face; they don't seem to notice you.",
            );
        }
        desc.push_str(
            " A small trail leads to the north, deep into the dark forest. \
             To the east, you can see a small clearing with a large tree in the center.",
        );
        desc
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "south" => GoOutcome::to("You head back into the cave.", CAVE_JUNCTION),
            "east" => GoOutcome::to(
                "You head towards the clearing, where a large tree stands.",
                SAP_TREE_CLEARING,
            ),
            "north" => GoOutcome::stay("The trail is choked with brambles. You can't go that way yet."),
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("Nothing happens.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "traveler" if self.traveler_present() => Some(
                "A hooded figure in a tattered robe, leaning on a gnarled staff.".into(),
            ),
            "forest" => Some("The trees are twisted and gnarled, leaning in towards you.".into()),
            _ => None,
        }
    }

    fn talk_to(&mut self, name: &str) -> Option<String> {
        if name != "traveler" {
            return None;
        }
        if !self.traveler_present() {
            return Some("The traveler is gone.".into());
        }
        self.traveler_talks += 1;
        let line = match self.traveler_talks {
            1 => "The traveler looks up at you, their face obscured by a hood. They mutter something about the forest being cursed.",
            2 => "The traveler looks up at you again. 'You should leave this place,' they say, 'before it consumes you.'",
            _ => {
                self.ground.put(rune_stone_bag());
                TRAVELER_FAREWELL
            }
        };
        Some(line.into())
    }

    fn ground(&self) -> &GroundItems {
        &self.ground
    }

    fn ground_mut(&mut self) -> &mut GroundItems {
        &mut self.ground
    }
}

/// Heading east from here three times is fatal.
#[derive(Debug, Default)]
pub struct SapTreeClearing {
    sap_taken: bool,
    warnings: u8,
    dead: bool,
    ground: GroundItems,
}

impl SapTreeClearing {
    pub fn new() -> Self {
        Self::default()
    }

    fn scene(&self) -> &'static str {
        if self.sap_taken {
            "A tall tree oozes dried sap. The clearing smells sweet."
        } else {
            "A tall tree oozes thick, amber-colored sap. It drips slowly onto a flat rock."
        }
    }
}

impl Location for SapTreeClearing {
    fn name(&self) -> &'static str {
        SAP_TREE_CLEARING
    }

    fn describe(&self) -> String {
        format!(
            "{} To the west, you see the cave entrance. To the east, a path leads deeper into the forest.",
            self.scene()
        )
    }

    fn go(&mut self, direction: &str, _inventory: &Inventory) -> GoOutcome {
        match direction {
            "west" => GoOutcome::to("You head back to the cave entrance.", CAVE_EXIT),
            "east" => {
                self.warnings = self.warnings.saturating_add(1);
                match self.warnings {
                    1 => GoOutcome::stay(
                        "You hear a rustling in the bushes. You should be careful going that way.",
                    ),
                    2 => GoOutcome::stay(
                        "You hear a growl from the bushes. You should be careful going that way.",
                    ),
                    _ => {
                        self.dead = true;
                        GoOutcome::stay("You venture deeper into the forest, you are eaten by a grue.")
                    }
                }
            }
            _ => GoOutcome::stay("You can't go that way."),
        }
    }

    fn take_item(&mut self, name: &str) -> TakeOutcome {
        if name == STICKY_SAP.name && !self.sap_taken {
            self.sap_taken = true;
            return TakeOutcome::taken(STICKY_SAP, "You collect some sticky sap in a small container.");
        }
        TakeOutcome::NotHere
    }

    fn use_item(&mut self, _item: &mut Item, _target: &str, _inventory: &Inventory) -> UseOutcome {
        UseOutcome::keep("That doesn't seem to do anything here.")
    }

    fn examine(&self, name: &str) -> Option<String> {
        match name {
            "sticky sap" if !self.sap_taken => Some(STICKY_SAP.examine.into()),
            "sap tree" | "tree" => Some(self.scene().into()),
            _ => None,
        }
    }

    fn ground(&self) -> &GroundItems {
        &self.ground
    }

    fn ground_mut(&mut self) -> &mut GroundItems {
        &mut self.ground
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
