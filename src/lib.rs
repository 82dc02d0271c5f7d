//! # Brew Station
//!
//! > **A coffee-machine resource simulator behind a typed actor.**
//!
//! One stateful entity — the [`Machine`](model::Machine) — tracks consumable
//! inventory (water, milk, beans, cups) and accumulated revenue, and enforces
//! resource sufficiency and a periodic-maintenance lockout before any sale
//! goes through. A thin line-oriented [`Dispatcher`](dispatcher::Dispatcher)
//! turns stdin commands into client calls and prints what came back.
//!
//! ## Architecture Notes
//!
//! ### 1. One Entity, One Task
//! The machine lives inside a generic [`ServiceActor`](framework::ServiceActor)
//! that processes requests sequentially off a channel. Check-then-debit
//! sequences are therefore atomic by construction: no locks, and no way for a
//! second caller to observe a half-applied purchase.
//!
//! ### 2. Type-Safe Error Handling
//! The actor owns a single error enum ([`MachineError`](machine_actor::MachineError))
//! built with `thiserror`. Entity errors cross the actor boundary boxed and
//! are downcast back to the typed enum in the client, so the front end
//! pattern-matches on exact cases (which resource ran short, maintenance due,
//! and so on) instead of parsing strings.
//!
//! ### 3. Observability
//! `tracing` everywhere with structured fields; the actor loop records the
//! entity type and the outcome of every command. See [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic single-entity service actor: [`ServiceEntity`](framework::ServiceEntity),
//! [`ServiceActor`](framework::ServiceActor), [`ServiceClient`](framework::ServiceClient),
//! plus the [`framework::mock`] test harness.
//!
//! ### 2. The Model ([`model`])
//! Pure data and transitions: the [`Machine`](model::Machine), the fixed
//! [`MENU`](model::MENU), and the DTOs. No actors, no I/O, fully unit-tested
//! on its own.
//!
//! ### 3. The Implementation ([`machine_actor`])
//! The [`ServiceEntity`](framework::ServiceEntity) impl for the machine, its
//! command/reply pair, and its error taxonomy.
//!
//! ### 4. The Interface ([`clients`])
//! [`MachineClient`](clients::MachineClient) wraps the generic client in
//! domain methods (`purchase`, `refill`, `collect`, `clean`, `inspect`).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`BrewStation`](lifecycle::BrewStation) spins the actor up, hands out the
//! client, and shuts the task down gracefully.
//!
//! ### 6. The Front End ([`dispatcher`])
//! The `buy | fill | take | clean | remaining | exit` menu loop, generic over
//! async I/O so tests can script entire sessions.
//!
//! ## Running
//!
//! ```bash
//! # Run with info logs
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod dispatcher;
pub mod framework;
pub mod lifecycle;
pub mod machine_actor;
pub mod model;
