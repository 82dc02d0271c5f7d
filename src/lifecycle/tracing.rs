//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the station.
//!
//! ## Configuration
//!
//! [`setup_tracing`] installs a compact subscriber that hides the crate/module
//! prefix (`with_target(false)`); the actor loop already records an
//! `entity_type` field, which keeps log lines short while still structured.
//!
//! Log levels are controlled via the `RUST_LOG` environment variable:
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Show full command payloads
//! RUST_LOG=debug cargo run
//!
//! # Filter to specific modules
//! RUST_LOG=brew_station::framework=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: Startup, shutdown
//! - **Entity Operations**: Inspect and every command, with outcome
//! - **Errors**: Failure reasons with structured fields
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline
        .init();
}
