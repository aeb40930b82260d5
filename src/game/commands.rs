//! Command parsing and verb handlers.
//!
//! A raw line is split into a verb keyword and a trimmed argument, then routed to
//! one handler that mutates the [`World`] and narrates through an [`OutputSink`].

use log::{debug, warn};

use super::errors::GameError;
use super::item::{Item, PLACED_STONE_NAME};
use super::location::TakeOutcome;
use super::output::OutputSink;
use super::world::World;

/// Line shown when the world registry turns out to be inconsistent.
pub const GENERIC_FAILURE: &str =
    "Something went wrong; the world seems to shift around you, but nothing happens.";

/// Item name that triggers the rune-stone labelling prompt when dropped.
pub const RUNE_STONE_DROP_NAME: &str = "teleportation stone";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbKind {
    Commands,
    Look,
    Examine,
    Go,
    Teleport,
    Take,
    Drop,
    Use,
    Talk,
    Inventory,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct Verb {
    pub kind: VerbKind,
    /// Name shown in the command listing.
    pub name: &'static str,
    /// What the player types. May span several words.
    pub keyword: &'static str,
    pub description: &'static str,
}

/// Registered verbs in listing order.
pub const VERBS: &[Verb] = &[
    Verb {
        kind: VerbKind::Commands,
        name: "commands",
        keyword: "commands",
        description: "List all available commands",
    },
    Verb {
        kind: VerbKind::Look,
        name: "look",
        keyword: "look",
        description: "Look at your surroundings",
    },
    Verb {
        kind: VerbKind::Examine,
        name: "examine",
        keyword: "examine",
        description: "Examine an item",
    },
    Verb {
        kind: VerbKind::Go,
        name: "go",
        keyword: "go",
        description: "Go to a different location",
    },
    Verb {
        kind: VerbKind::Teleport,
        name: "teleport",
        keyword: "teleport to",
        description: "Teleport to a different location",
    },
    Verb {
        kind: VerbKind::Take,
        name: "take",
        keyword: "take",
        description: "Take an item",
    },
    Verb {
        kind: VerbKind::Drop,
        name: "drop",
        keyword: "drop",
        description: "Drop an item on the ground",
    },
    Verb {
        kind: VerbKind::Use,
        name: "use",
        keyword: "use",
        description: "Use an item",
    },
    Verb {
        kind: VerbKind::Talk,
        name: "talk",
        keyword: "talk to",
        description: "Talk to someone",
    },
    Verb {
        kind: VerbKind::Inventory,
        name: "inventory",
        keyword: "inventory",
        description: "Check your inventory",
    },
    Verb {
        kind: VerbKind::Quit,
        name: "quit",
        keyword: "quit",
        description: "Quit the game",
    },
];

/// What the session should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    /// The next line from the player is a label for the stone just dropped here.
    AwaitLabel { location: &'static str },
    Quit,
    GameOver,
}

fn keyword_matches(input: &str, keyword: &str) -> bool {
    let Some(head) = input.get(..keyword.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(keyword) {
        return false;
    }
    match input[keyword.len()..].chars().next() {
        None => true,
        Some(c) => c.is_whitespace(),
    }
}

/// Split a line into a verb and its trimmed argument.
///
/// Keywords match case-insensitively on word boundaries; when several match, the
/// longest keyword wins so multi-word verbs shadow shorter prefixes.
pub fn parse_command(input: &str) -> Option<(VerbKind, &str)> {
    let input = input.trim();
    let verb = VERBS
        .iter()
        .filter(|v| keyword_matches(input, v.keyword))
        .max_by_key(|v| v.keyword.len())?;
    Some((verb.kind, input[verb.keyword.len()..].trim()))
}

/// Banner plus one line per registered verb.
pub fn command_listing() -> Vec<String> {
    let mut lines = vec![
        " ".to_string(),
        "***********************************************".to_string(),
        "Welcome to your very own Text-Based Adventure!".to_string(),
        "***********************************************".to_string(),
    ];
    for verb in VERBS {
        let head = format!(" - \"{}\"", verb.name);
        lines.push(format!("{:<15}{}", head, verb.description));
    }
    lines.push(" ".to_string());
    lines
}

/// Run one command line against the world.
pub fn handle_command(world: &mut World, line: &str, out: &mut dyn OutputSink) -> CommandOutcome {
    let Some((verb, arg)) = parse_command(line) else {
        out.say(&format!("I don't know how to '{}'", line.trim()));
        return CommandOutcome::Continue;
    };
    debug!("world '{}': verb {:?} arg '{}'", world.name(), verb, arg);

    let outcome = match verb {
        VerbKind::Commands => {
            for l in command_listing() {
                out.say(&l);
            }
            CommandOutcome::Continue
        }
        VerbKind::Look => {
            handle_look(world, out);
            CommandOutcome::Continue
        }
        VerbKind::Examine => {
            handle_examine(world, arg, out);
            CommandOutcome::Continue
        }
        VerbKind::Go => {
            handle_go(world, arg, out);
            CommandOutcome::Continue
        }
        VerbKind::Teleport => {
            handle_teleport(world, arg, out);
            CommandOutcome::Continue
        }
        VerbKind::Take => {
            handle_take(world, arg, out);
            CommandOutcome::Continue
        }
        VerbKind::Drop => handle_drop(world, arg, out),
        VerbKind::Use => {
            handle_use(world, arg, out);
            CommandOutcome::Continue
        }
        VerbKind::Talk => {
            handle_talk(world, arg, out);
            CommandOutcome::Continue
        }
        VerbKind::Inventory => {
            handle_inventory(world, out);
            CommandOutcome::Continue
        }
        VerbKind::Quit => {
            out.say("You sit down and rest. Thanks for playing!");
            CommandOutcome::Quit
        }
    };

    if world.is_game_over() {
        CommandOutcome::GameOver
    } else {
        outcome
    }
}

pub fn handle_look(world: &World, out: &mut dyn OutputSink) {
    let loc = world.current();
    out.say(&loc.describe());
    if !loc.ground().is_empty() {
        out.say("You see the following items on the ground:");
        for name in loc.ground().names() {
            out.say(&format!(" - {}", name));
        }
    }
}

fn report_internal(err: GameError, out: &mut dyn OutputSink) {
    warn!("internal world error surfaced as generic failure: {}", err);
    out.say(GENERIC_FAILURE);
}

fn handle_go(world: &mut World, direction: &str, out: &mut dyn OutputSink) {
    if direction.is_empty() {
        out.say("Go where?");
        return;
    }
    let (loc, inventory) = world.current_and_inventory();
    let outcome = loc.go(direction, inventory);
    let dead = loc.is_dead();
    out.say(&outcome.message);

    match outcome.destination {
        Some(dest) => match world.move_to(dest) {
            Ok(()) => handle_look(world, out),
            Err(e) => report_internal(e, out),
        },
        None if dead => {
            world.set_game_over();
            out.say("You are dead. Your adventure ends here.");
        }
        None => {}
    }
}

fn handle_teleport(world: &mut World, label: &str, out: &mut dyn OutputSink) {
    let Some(bag) = world.inventory().rune_stone_bag() else {
        out.say("You do not have a bag of rune stones.");
        return;
    };
    let Some(target) = bag.lookup(label).map(str::to_string) else {
        out.say(&format!(
            "You do not have a teleportation stone named '{}'",
            label
        ));
        out.say("To teleport to a location, use the command 'teleport to <location name>'");
        let labels: Vec<String> = bag.labels().map(|l| format!(" - {}", l)).collect();
        for l in labels {
            out.say(&l);
        }
        return;
    };

    if let Err(e) = world.move_to(&target) {
        report_internal(e, out);
        return;
    }
    out.say(&format!(
        "You close your eyes and think of the place you remember as '{}'. The wind rushes around you and pulls you in a direction you did not know existed. For a moment you are weightless, then your feet touch solid ground. You open your eyes.",
        label
    ));
    handle_look(world, out);
}

fn handle_take(world: &mut World, name: &str, out: &mut dyn OutputSink) {
    if name.is_empty() {
        out.say("Take what?");
        return;
    }
    let (loc, inventory) = world.current_and_inventory();
    let refusal = match loc.take_item(name) {
        TakeOutcome::Taken { item, message } => {
            out.say(&message);
            if let Err(item) = inventory.add(item) {
                out.say(&format!("You already carry a {}, so you leave it here.", item.name()));
                loc.ground_mut().put(item);
            }
            return;
        }
        TakeOutcome::Refused(message) => Some(message),
        TakeOutcome::NotHere => None,
    };

    if let Some(item) = loc.ground_mut().take(name) {
        match inventory.add(item) {
            Ok(()) => out.say(&format!("You pick up the {}.", name)),
            Err(item) => {
                out.say(&format!("You already carry a {}.", item.name()));
                loc.ground_mut().put(item);
            }
        }
        return;
    }

    out.say(refusal.as_deref().unwrap_or("You can't take that item."));
}

fn handle_drop(world: &mut World, name: &str, out: &mut dyn OutputSink) -> CommandOutcome {
    if name.is_empty() {
        out.say("Drop what?");
        return CommandOutcome::Continue;
    }

    if name == RUNE_STONE_DROP_NAME {
        if world.inventory().rune_stone_bag().is_none() {
            out.say("You do not have a bag of rune stones.");
            return CommandOutcome::Continue;
        }
        out.say("You drop the teleportation stone. Looking around, you try to memorize the location.");
        out.say("To teleport here later, use the command 'teleport to <location name>'. What would you like to name this location?");
        return CommandOutcome::AwaitLabel {
            location: world.current_name(),
        };
    }

    let (loc, inventory) = world.current_and_inventory();
    match inventory.remove(name) {
        Some(item) => {
            loc.ground_mut().put(item);
            out.say(&format!("You drop the {}.", name));
        }
        None => out.say(&format!("You do not have a '{}' in your inventory", name)),
    }
    CommandOutcome::Continue
}

/// Finish a rune-stone drop: bind `label` to `location` and leave a marker there.
///
/// Returns false when the label was empty and the question should be asked again.
pub fn bind_rune_stone(
    world: &mut World,
    location: &'static str,
    label: &str,
    out: &mut dyn OutputSink,
) -> bool {
    let label = label.trim();
    if label.is_empty() {
        out.say("The stone needs a name. What would you like to name this location?");
        return false;
    }
    let Some(bag) = world.inventory_mut().rune_stone_bag_mut() else {
        out.say("You do not have a bag of rune stones.");
        return true;
    };
    bag.bind(label, location);
    match world.location_mut(location) {
        Ok(loc) => loc.ground_mut().put(Item::PlacedStone {
            label: label.to_string(),
        }),
        Err(e) => warn!("{} marker not placed: {}", PLACED_STONE_NAME, e),
    }
    out.say(&format!("You have named this location '{}'", label));
    true
}

fn handle_use(world: &mut World, arg: &str, out: &mut dyn OutputSink) {
    let parts: Vec<&str> = arg.split(" on ").collect();
    if parts.len() != 2 {
        out.say("Usage: use <item> on <target>");
        return;
    }
    let item_name = parts[0].trim();
    let target = parts[1].trim();

    let (loc, inventory) = world.current_and_inventory();
    let Some((slot, mut item)) = inventory.remove_entry(item_name) else {
        out.say(&format!("You do not have a '{}' in your inventory", item_name));
        return;
    };
    let outcome = loc.use_item(&mut item, target, inventory);
    out.say(&outcome.message);
    if outcome.keep {
        if let Err(item) = inventory.restore(slot, item) {
            // Another item took the name while this one was out; keep it reachable.
            loc.ground_mut().put(item);
        }
    }
}

fn handle_examine(world: &World, name: &str, out: &mut dyn OutputSink) {
    if let Some(item) = world.inventory().get(name) {
        out.say(&item.examine());
        return;
    }
    let loc = world.current();
    if let Some(text) = loc.examine(name) {
        out.say(&text);
        return;
    }
    if let Some(item) = loc.ground().get(name) {
        out.say(&item.examine());
        return;
    }
    out.say(&format!("You don't notice anything special about the {}.", name));
}

fn handle_talk(world: &mut World, name: &str, out: &mut dyn OutputSink) {
    match world.current_mut().talk_to(name) {
        Some(reply) if !reply.is_empty() => out.say(&reply),
        _ => out.say(&format!("There's no one named '{}' here to talk to.", name)),
    }
}

fn handle_inventory(world: &World, out: &mut dyn OutputSink) {
    let inventory = world.inventory();
    if inventory.is_empty() {
        out.say("Your inventory is empty.");
        return;
    }
    out.say(&format!(
        "You have the following items in your inventory: {}",
        inventory.names().join(", ")
    ));
}
