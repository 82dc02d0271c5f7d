use crate::clients::MachineClient;
use tracing::{error, info};

/// The runtime orchestrator for the coffee station.
///
/// `BrewStation` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the machine actor
/// - **Client Handout**: Exposing the typed [`MachineClient`] to front ends
///
/// # Architecture
///
/// The station runs a single actor — the machine — in its own Tokio task.
/// There is exactly one machine per station and it lives for the whole
/// process; front ends clone the client, never the machine.
///
/// # Example
///
/// ```ignore
/// let station = BrewStation::new();
///
/// let snapshot = station.machine.inspect().await?;
/// let receipt = station.machine.purchase(Selection::Item(1)).await?;
///
/// // Gracefully shut down when done
/// station.shutdown().await?;
/// ```
pub struct BrewStation {
    /// Client for interacting with the machine actor
    pub machine: MachineClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BrewStation {
    /// Creates and initializes a new `BrewStation` with the machine actor
    /// running and the machine in factory state.
    pub fn new() -> Self {
        // 1. Create the actor (no dependencies, Context = ())
        let (machine_actor, machine_client) = crate::machine_actor::new();

        // 2. Start it in its own task
        let machine_handle = tokio::spawn(machine_actor.run(()));

        Self {
            machine: machine_client,
            handles: vec![machine_handle],
        }
    }

    /// Gracefully shuts down the station.
    ///
    /// Dropping the client closes the actor's channel; the actor drains what
    /// is already queued, exits its event loop, and the task completes.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down station...");

        drop(self.machine);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Station shutdown complete.");
        Ok(())
    }
}

impl Default for BrewStation {
    fn default() -> Self {
        Self::new()
    }
}
