//! Machine-specific actor logic: the coffee machine entity behind the actor.
//!
//! - [`entity`] - [`ServiceEntity`](crate::framework::ServiceEntity) implementation for [`Machine`](crate::model::Machine)
//! - [`actions`] - [`MachineCommand`] and [`MachineReply`], matched 1:1
//! - [`error`] - [`MachineError`], the actor's whole error taxonomy
//! - [`new()`] - Factory function that creates the actor and its client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::MachineClient;
use crate::framework::ServiceActor;
use crate::model::Machine;

/// Creates the machine actor and its client, with the machine in factory state.
pub fn new() -> (ServiceActor<Machine>, MachineClient) {
    let (actor, generic_client) = ServiceActor::new(Machine::new(), 32);
    let client = MachineClient::new(generic_client);

    (actor, client)
}
