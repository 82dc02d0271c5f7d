//! The machine entity itself: inventory, revenue, and the maintenance latch,
//! plus every state transition the station exposes.
//!
//! All transitions here are pure synchronous methods on [`Machine`]; the actor
//! layer only decides *when* they run, never *what* they do. That keeps the
//! whole model testable without a runtime.

use serde::{Deserialize, Serialize};

use super::recipe::{Recipe, Resource, Selection, MENU};
use crate::machine_actor::MachineError;

/// Number of brews after which the machine refuses to sell until cleaned.
pub const CLEANING_THRESHOLD: u32 = 10;

/// The single stateful entity of the station.
///
/// One `Machine` is created at process start and mutated exclusively through
/// [`brew`](Machine::brew), [`refill`](Machine::refill),
/// [`collect`](Machine::collect) and [`clean`](Machine::clean) for the life of
/// the process. Fields are private: the only read path is
/// [`snapshot`](Machine::snapshot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Water on hand, in ml.
    water: u32,
    /// Milk on hand, in ml.
    milk: u32,
    /// Coffee beans on hand, in g.
    beans: u32,
    /// Disposable cups on hand.
    cups: u32,
    /// Revenue accumulated since the last collection.
    cash: u32,
    /// Brews since the machine was last cleaned. Never exceeds
    /// [`CLEANING_THRESHOLD`].
    brews_since_clean: u32,
    /// Latched when `brews_since_clean` reaches the threshold; only
    /// [`clean`](Machine::clean) resets it.
    needs_cleaning: bool,
}

/// A read-only view of the machine, for menu rendering and status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub water: u32,
    pub milk: u32,
    pub beans: u32,
    pub cups: u32,
    pub cash: u32,
    pub brews_since_clean: u32,
    pub needs_cleaning: bool,
}

/// Amounts to add to the machine's stock, one per resource.
///
/// Components are signed so the machine can reject a negative amount itself
/// instead of trusting the caller's input validation; an unsigned DTO could
/// not even represent the case the contract requires it to refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refill {
    pub water: i64,
    pub milk: i64,
    pub beans: i64,
    pub cups: i64,
}

/// The outcome of a successful purchase.
///
/// `maintenance_due` is set on the sale that pushes the brew counter to the
/// threshold: that sale still succeeds, and every later purchase is refused
/// until the machine is cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub recipe: &'static str,
    pub maintenance_due: bool,
}

/// The outcome of a clean request.
///
/// `progress` is the brew count after the operation: `0` whenever a clean was
/// actually performed, otherwise the current count toward the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub performed: bool,
    pub progress: u32,
}

impl Machine {
    /// A machine in its factory state: partially stocked and holding the float
    /// it was commissioned with.
    pub fn new() -> Self {
        Self {
            water: 400,
            milk: 540,
            beans: 120,
            cups: 9,
            cash: 550,
            brews_since_clean: 0,
            needs_cleaning: false,
        }
    }

    /// Read-only view of the current state. Never mutates, never fails.
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            water: self.water,
            milk: self.milk,
            beans: self.beans,
            cups: self.cups,
            cash: self.cash,
            brews_since_clean: self.brews_since_clean,
            needs_cleaning: self.needs_cleaning,
        }
    }

    /// Sell one drink.
    ///
    /// The maintenance latch is checked before anything else: a machine that
    /// needs cleaning refuses the sale outright, regardless of stock. A `Back`
    /// selection is a no-op surfaced as [`MachineError::Cancelled`]. Otherwise
    /// the selector is bounds-checked against [`MENU`], sufficiency is
    /// evaluated, and only then is anything debited.
    ///
    /// On any error path the machine is left untouched; there are no partial
    /// debits.
    pub fn brew(&mut self, selection: Selection) -> Result<Receipt, MachineError> {
        if self.needs_cleaning {
            return Err(MachineError::MaintenanceRequired);
        }
        let number = match selection {
            Selection::Back => return Err(MachineError::Cancelled),
            Selection::Item(number) => number,
        };
        let recipe = number
            .checked_sub(1)
            .and_then(|index| MENU.get(index))
            .ok_or(MachineError::InvalidSelection(number))?;

        self.check_sufficient(recipe)?;

        self.water -= recipe.water;
        self.milk -= recipe.milk;
        self.beans -= recipe.beans;
        self.cups -= 1;
        self.cash += recipe.price;
        self.brews_since_clean += 1;
        // The threshold check runs after the sale: the brew that reaches it is
        // still sold, and the latch blocks the next one.
        if self.brews_since_clean >= CLEANING_THRESHOLD {
            self.needs_cleaning = true;
        }

        Ok(Receipt {
            recipe: recipe.name,
            maintenance_due: self.needs_cleaning,
        })
    }

    /// Sufficiency check in fixed order: water, milk, beans, cups.
    ///
    /// The first shortfall short-circuits, so a state deficient in several
    /// resources always reports the first one in this order.
    fn check_sufficient(&self, recipe: &Recipe) -> Result<(), MachineError> {
        if self.water < recipe.water {
            return Err(MachineError::InsufficientResource(Resource::Water));
        }
        if self.milk < recipe.milk {
            return Err(MachineError::InsufficientResource(Resource::Milk));
        }
        if self.beans < recipe.beans {
            return Err(MachineError::InsufficientResource(Resource::Beans));
        }
        if self.cups < 1 {
            return Err(MachineError::InsufficientResource(Resource::Cups));
        }
        Ok(())
    }

    /// Add stock. All-or-nothing: every component is validated before any
    /// quantity changes, so a refill with one bad amount changes nothing.
    pub fn refill(&mut self, refill: Refill) -> Result<(), MachineError> {
        let water = Self::accept_amount(Resource::Water, refill.water)?;
        let milk = Self::accept_amount(Resource::Milk, refill.milk)?;
        let beans = Self::accept_amount(Resource::Beans, refill.beans)?;
        let cups = Self::accept_amount(Resource::Cups, refill.cups)?;

        self.water += water;
        self.milk += milk;
        self.beans += beans;
        self.cups += cups;
        Ok(())
    }

    fn accept_amount(resource: Resource, amount: i64) -> Result<u32, MachineError> {
        u32::try_from(amount).map_err(|_| MachineError::InvalidQuantity { resource, amount })
    }

    /// Empty the cash box, returning what was in it. A second call returns 0;
    /// the balance never goes negative.
    pub fn collect(&mut self) -> u32 {
        std::mem::take(&mut self.cash)
    }

    /// Clean the machine if it needs it.
    ///
    /// When cleaning is not due this is a pure no-op that reports the current
    /// progress toward the threshold, so calling it repeatedly never changes
    /// state.
    pub fn clean(&mut self) -> CleanReport {
        if self.needs_cleaning {
            self.brews_since_clean = 0;
            self.needs_cleaning = false;
            CleanReport {
                performed: true,
                progress: 0,
            }
        } else {
            CleanReport {
                performed: false,
                progress: self.brews_since_clean,
            }
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESPRESSO: Selection = Selection::Item(1);
    const LATTE: Selection = Selection::Item(2);
    const CAPPUCCINO: Selection = Selection::Item(3);

    #[test]
    fn factory_state_matches_commissioning_values() {
        let snapshot = Machine::new().snapshot();
        assert_eq!(
            snapshot,
            MachineSnapshot {
                water: 400,
                milk: 540,
                beans: 120,
                cups: 9,
                cash: 550,
                brews_since_clean: 0,
                needs_cleaning: false,
            }
        );
    }

    #[test]
    fn espresso_sale_debits_exactly_one_recipe() {
        let mut machine = Machine::new();
        let receipt = machine.brew(ESPRESSO).unwrap();

        assert_eq!(receipt.recipe, "espresso");
        assert!(!receipt.maintenance_due);

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.water, 150);
        assert_eq!(snapshot.milk, 540);
        assert_eq!(snapshot.beans, 104);
        assert_eq!(snapshot.cups, 8);
        assert_eq!(snapshot.cash, 554);
        assert_eq!(snapshot.brews_since_clean, 1);
    }

    #[test]
    fn shortfall_reports_resource_and_leaves_state_untouched() {
        let mut machine = Machine {
            milk: 50,
            ..Machine::new()
        };
        let before = machine.snapshot();

        let err = machine.brew(LATTE).unwrap_err();
        assert_eq!(err, MachineError::InsufficientResource(Resource::Milk));
        assert_eq!(machine.snapshot(), before);
    }

    #[test]
    fn first_shortfall_in_fixed_order_wins() {
        // Short of water AND milk: water must be the one reported.
        let mut machine = Machine {
            water: 10,
            milk: 10,
            ..Machine::new()
        };
        let err = machine.brew(LATTE).unwrap_err();
        assert_eq!(err, MachineError::InsufficientResource(Resource::Water));

        // Short of beans AND cups: beans comes first.
        let mut machine = Machine {
            beans: 0,
            cups: 0,
            ..Machine::new()
        };
        let err = machine.brew(ESPRESSO).unwrap_err();
        assert_eq!(err, MachineError::InsufficientResource(Resource::Beans));
    }

    #[test]
    fn out_of_cups_is_reported_last() {
        let mut machine = Machine {
            cups: 0,
            ..Machine::new()
        };
        let err = machine.brew(CAPPUCCINO).unwrap_err();
        assert_eq!(err, MachineError::InsufficientResource(Resource::Cups));
    }

    #[test]
    fn selector_is_bounds_checked() {
        let mut machine = Machine::new();
        let before = machine.snapshot();

        assert_eq!(
            machine.brew(Selection::Item(0)).unwrap_err(),
            MachineError::InvalidSelection(0)
        );
        assert_eq!(
            machine.brew(Selection::Item(4)).unwrap_err(),
            MachineError::InvalidSelection(4)
        );
        assert_eq!(machine.snapshot(), before);
    }

    #[test]
    fn backing_out_is_a_no_op() {
        let mut machine = Machine::new();
        let before = machine.snapshot();

        assert_eq!(
            machine.brew(Selection::Back).unwrap_err(),
            MachineError::Cancelled
        );
        assert_eq!(machine.snapshot(), before);
    }

    #[test]
    fn tenth_brew_sells_then_latches_the_cleaning_lockout() {
        // Plenty of everything, so only the counter can get in the way.
        let mut machine = Machine {
            water: 100_000,
            milk: 100_000,
            beans: 100_000,
            cups: 100,
            ..Machine::new()
        };

        for brew in 1..=9 {
            let receipt = machine.brew(ESPRESSO).unwrap();
            assert!(!receipt.maintenance_due, "brew {brew} should not warn");
        }

        // The 10th sale still goes through, with the warning attached.
        let receipt = machine.brew(ESPRESSO).unwrap();
        assert!(receipt.maintenance_due);
        assert!(machine.snapshot().needs_cleaning);
        assert_eq!(machine.snapshot().brews_since_clean, 10);

        // The 11th is refused outright, resources notwithstanding.
        let err = machine.brew(ESPRESSO).unwrap_err();
        assert_eq!(err, MachineError::MaintenanceRequired);

        // Cleaning unlocks it again.
        let report = machine.clean();
        assert!(report.performed);
        assert_eq!(report.progress, 0);
        assert!(machine.brew(ESPRESSO).is_ok());
        assert_eq!(machine.snapshot().brews_since_clean, 1);
    }

    #[test]
    fn maintenance_check_precedes_every_other_check() {
        // Even an invalid selector is masked by the lockout.
        let mut machine = Machine {
            needs_cleaning: true,
            ..Machine::new()
        };
        assert_eq!(
            machine.brew(Selection::Item(99)).unwrap_err(),
            MachineError::MaintenanceRequired
        );
    }

    #[test]
    fn clean_when_not_needed_is_idempotent() {
        let mut machine = Machine::new();
        machine.brew(ESPRESSO).unwrap();
        let before = machine.snapshot();

        for _ in 0..3 {
            let report = machine.clean();
            assert!(!report.performed);
            assert_eq!(report.progress, 1);
            assert_eq!(machine.snapshot(), before);
        }
    }

    #[test]
    fn collect_empties_the_cash_box_once() {
        let mut machine = Machine::new();
        assert_eq!(machine.collect(), 550);
        assert_eq!(machine.collect(), 0);
        assert_eq!(machine.snapshot().cash, 0);
    }

    #[test]
    fn refill_adds_every_component() {
        let mut machine = Machine::new();
        machine
            .refill(Refill {
                water: 1000,
                milk: 0,
                beans: 50,
                cups: 10,
            })
            .unwrap();

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.water, 1400);
        assert_eq!(snapshot.milk, 540);
        assert_eq!(snapshot.beans, 170);
        assert_eq!(snapshot.cups, 19);
    }

    #[test]
    fn refill_with_any_negative_component_applies_nothing() {
        let mut machine = Machine::new();
        let before = machine.snapshot();

        let err = machine
            .refill(Refill {
                water: 500,
                milk: -1,
                beans: 20,
                cups: 5,
            })
            .unwrap_err();

        assert_eq!(
            err,
            MachineError::InvalidQuantity {
                resource: Resource::Milk,
                amount: -1,
            }
        );
        assert_eq!(machine.snapshot(), before);
    }

    #[test]
    fn refill_rejects_amounts_beyond_the_representable_range() {
        let mut machine = Machine::new();
        let before = machine.snapshot();

        let err = machine
            .refill(Refill {
                water: i64::from(u32::MAX) + 1,
                milk: 0,
                beans: 0,
                cups: 0,
            })
            .unwrap_err();

        assert!(matches!(
            err,
            MachineError::InvalidQuantity {
                resource: Resource::Water,
                ..
            }
        ));
        assert_eq!(machine.snapshot(), before);
    }
}
