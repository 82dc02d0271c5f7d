//! Orchestration layer: spins up the machine actor, hands out its client,
//! and owns graceful shutdown and tracing setup.

pub mod station;
pub mod tracing;

pub use self::station::BrewStation;
pub use self::tracing::setup_tracing;
