//! Pure data and state transitions: the [`Machine`] entity, its DTOs, and the
//! fixed drink catalog. Nothing in here knows about actors or I/O.

pub mod machine;
pub mod recipe;

pub use machine::*;
pub use recipe::*;
