//! Commands for the machine actor.
//!
//! This module defines the operations that can be performed on the
//! [`Machine`](crate::model::Machine) entity, and the replies they produce.
//! Commands are handled by the
//! [`ServiceEntity::handle_command`](crate::framework::ServiceEntity::handle_command)
//! implementation in [`entity`](super::entity).

use crate::model::{CleanReport, Receipt, Refill, Selection};

/// Commands for the machine entity.
///
/// Reads don't appear here: a snapshot is served by the framework-level
/// inspect request and never mutates anything.
#[derive(Debug, Clone)]
pub enum MachineCommand {
    /// Sell one drink picked off the menu (or back out).
    ///
    /// # Errors
    /// Fails when the machine needs cleaning, the selector is out of range,
    /// or any resource falls short of the recipe.
    Brew(Selection),
    /// Add stock to the machine, all-or-nothing.
    ///
    /// # Errors
    /// Fails when any component is negative; nothing is applied in that case.
    Refill(Refill),
    /// Empty the cash box.
    CollectCash,
    /// Reset the maintenance counter if the lockout is latched.
    Clean,
}

/// Results from MachineCommands - variants match 1:1 with MachineCommand
#[derive(Debug, Clone)]
pub enum MachineReply {
    /// Result from Brew - the receipt for the sold drink
    Brew(Receipt),
    /// Result from Refill - returns unit on success
    Refill(()),
    /// Result from CollectCash - the amount taken out
    CollectCash(u32),
    /// Result from Clean - whether a clean happened and the counter state
    Clean(CleanReport),
}
