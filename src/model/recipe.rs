//! The fixed drink catalog and the selector/resource vocabulary around it.

use serde::Serialize;
use std::fmt;

/// A menu entry: the resources one drink consumes and the price it earns.
///
/// Recipes are static data. The machine never changes them; it only reads
/// them while deciding whether a purchase can go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub name: &'static str,
    /// Water per drink, in ml.
    pub water: u32,
    /// Milk per drink, in ml.
    pub milk: u32,
    /// Coffee beans per drink, in g.
    pub beans: u32,
    /// Sale price, in whole currency units.
    pub price: u32,
}

/// The fixed menu, in selector order: 1 - espresso, 2 - latte, 3 - cappuccino.
///
/// Position defines the numeric selector mapping, so the order here is part of
/// the machine's public contract. Exposed read-only so callers can render it.
pub const MENU: [Recipe; 3] = [
    Recipe {
        name: "espresso",
        water: 250,
        milk: 0,
        beans: 16,
        price: 4,
    },
    Recipe {
        name: "latte",
        water: 350,
        milk: 75,
        beans: 20,
        price: 7,
    },
    Recipe {
        name: "cappuccino",
        water: 200,
        milk: 100,
        beans: 12,
        price: 6,
    },
];

/// One consumable kind tracked by the machine.
///
/// The `Display` names are the user-facing ones ("coffee beans", not `Beans`),
/// so error messages read naturally without a second mapping layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resource {
    Water,
    Milk,
    Beans,
    Cups,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Water => "water",
            Resource::Milk => "milk",
            Resource::Beans => "coffee beans",
            Resource::Cups => "disposable cups",
        };
        write!(f, "{name}")
    }
}

/// A buyer's menu choice: a 1-based menu number, or backing out to the menu.
///
/// The numeric side is deliberately unvalidated here; the machine bounds-checks
/// it against [`MENU`] when the purchase runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Item(usize),
    Back,
}
