//! Binary entry point: a coffee machine you can talk to on stdin/stdout.
//!
//! Wires the pieces together in order: tracing first, then the station (which
//! spawns the machine actor), then a dispatcher bound to real stdio. The
//! process ends only through the dispatcher's `exit` command or end of input,
//! never because of a domain error.

use brew_station::dispatcher::Dispatcher;
use brew_station::lifecycle::{setup_tracing, BrewStation};
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting brew station");

    let station = BrewStation::new();

    let dispatcher = Dispatcher::new(
        station.machine.clone(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );
    dispatcher.run().await.map_err(|e| e.to_string())?;

    // Shutdown the station gracefully
    station.shutdown().await?;

    info!("Station stopped");
    Ok(())
}
