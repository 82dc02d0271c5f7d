//! Entity trait implementation for the Machine domain type.
//!
//! This module contains the [`ServiceEntity`] implementation that enables
//! [`Machine`] to be managed by the generic
//! [`ServiceActor`](crate::framework::ServiceActor). The implementation is a
//! thin dispatch layer: every transition is a pure method on [`Machine`]
//! itself.

use async_trait::async_trait;

use super::actions::{MachineCommand, MachineReply};
use super::error::MachineError;
use crate::framework::ServiceEntity;
use crate::model::{Machine, MachineSnapshot};

#[async_trait]
impl ServiceEntity for Machine {
    type Command = MachineCommand;
    type Reply = MachineReply;
    type Snapshot = MachineSnapshot;
    type Context = ();
    type Error = MachineError;

    fn snapshot(&self) -> MachineSnapshot {
        Machine::snapshot(self)
    }

    /// Handles commands for the Machine entity.
    ///
    /// # Commands
    /// - `Brew`: Sells one drink, or fails without mutation
    /// - `Refill`: Adds stock, all-or-nothing
    /// - `CollectCash`: Empties the cash box, never fails
    /// - `Clean`: Resets the maintenance latch, no-op when not needed
    async fn handle_command(
        &mut self,
        command: MachineCommand,
        _ctx: &(),
    ) -> Result<MachineReply, MachineError> {
        match command {
            MachineCommand::Brew(selection) => self.brew(selection).map(MachineReply::Brew),
            MachineCommand::Refill(refill) => self.refill(refill).map(MachineReply::Refill),
            MachineCommand::CollectCash => Ok(MachineReply::CollectCash(self.collect())),
            MachineCommand::Clean => Ok(MachineReply::Clean(self.clean())),
        }
    }
}
