//! Error types for the machine actor.

use thiserror::Error;

use crate::model::Resource;

/// Errors that can occur during machine operations.
///
/// One enum covers the whole actor. Every variant is recoverable: the process
/// never terminates because of a domain error, only via the explicit exit
/// command of whatever front end drives the client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    /// The brew counter hit the threshold; purchases are refused until the
    /// machine is cleaned.
    #[error("machine needs cleaning before it can brew again")]
    MaintenanceRequired,

    /// The selector did not resolve to a menu entry.
    #[error("no drink with number {0} on the menu")]
    InvalidSelection(usize),

    /// The first resource (in check order) that cannot cover the recipe.
    #[error("not enough {0}")]
    InsufficientResource(Resource),

    /// A refill amount was negative or not representable.
    #[error("cannot add {amount} units of {resource}: amounts must be non-negative")]
    InvalidQuantity { resource: Resource, amount: i64 },

    /// The buyer backed out of the purchase. Not a failure; front ends
    /// normally swallow it silently.
    #[error("purchase cancelled")]
    Cancelled,

    /// The actor or its channel went away mid-request.
    #[error("machine unreachable: {0}")]
    Unreachable(String),
}

impl From<String> for MachineError {
    fn from(msg: String) -> Self {
        MachineError::Unreachable(msg)
    }
}
