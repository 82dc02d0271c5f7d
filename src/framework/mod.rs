//! Generic actor framework for single-entity services.
//!
//! This module provides the core building blocks for wrapping a stateful
//! entity in an actor: a snapshot-style read and a typed command surface,
//! processed sequentially by one task.
//!
//! # Main Components
//!
//! - [`ServiceEntity`] - Trait a service type implements to be managed by the actor
//! - [`ServiceActor`] - Generic actor that owns one entity
//! - [`ServiceClient`] - Type-safe client for sending requests
//! - [`FrameworkError`] - Transport-level error types
//!
//! # Testing
//!
//! See the [`mock`] module for utilities to test clients without spawning a
//! full actor.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
