//! # Core Service Actor
//!
//! This module defines the generic building blocks for the actor layer.
//!
//! ## Key Types
//!
//! - [`ServiceEntity`]: The trait a stateful service type must implement.
//! - [`ServiceActor`]: The generic actor that owns one entity.
//! - [`ServiceClient`]: The generic client for communicating with the actor.
//! - [`FrameworkError`]: Transport-level errors (e.g., ActorClosed).

use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use async_trait::async_trait;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait a stateful service entity must implement to be driven by [`ServiceActor`].
///
/// # Architecture Note
/// The actor manages exactly one entity for the life of the process. Every
/// mutation goes through [`ServiceEntity::handle_command`], and every read goes
/// through [`ServiceEntity::snapshot`], so a check-then-mutate sequence inside a
/// single command can never be interleaved with another request.
///
/// We use "Associated Types" (type Command, type Reply, etc.) to enforce type
/// safety: the compiler rejects a command enum that belongs to a different
/// entity before the program ever runs.
///
/// # Async & Context
/// This trait is `#[async_trait]` so command handlers may perform asynchronous
/// work (e.g., consulting another actor). The `Context` type is injected into
/// the handler at `run()` time, not at construction time ("Late Binding"),
/// which keeps dependency wiring out of the entity itself. Use `()` if the
/// entity has no dependencies.
#[async_trait]
pub trait ServiceEntity: Send + 'static {
    /// Enum of the operations that may mutate the entity.
    type Command: Send + Sync + Debug + 'static;

    /// The result type returned by commands. Variants should match the
    /// command enum 1:1 so clients can unwrap without guessing.
    type Reply: Send + Sync + Debug + 'static;

    /// A read-only view of the entity's current state.
    type Snapshot: Send + Sync + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// The framework enforces a **Per-Actor Error Type** (one enum for the
    /// whole entity) rather than a specific error per command. Clients deal
    /// with a single error type, making pattern matching easy; the trade-off
    /// is that the enum must be the union of every command's failure modes.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce a read-only snapshot of the current state. Must not mutate.
    fn snapshot(&self) -> Self::Snapshot;

    /// Handle a command, mutating the entity and producing a reply.
    async fn handle_command(
        &mut self,
        command: Self::Command,
        _ctx: &Self::Context,
    ) -> Result<Self::Reply, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// Two shapes cover the whole surface:
///
/// - **Inspect**: Retrieval. Returns a [`ServiceEntity::Snapshot`] without
///   touching state.
/// - **Command**: State mutation. Executes a [`ServiceEntity::Command`] and
///   returns the matching [`ServiceEntity::Reply`].
///
/// The enum is generic over `T: ServiceEntity`, so a request built for one
/// entity type cannot be sent to an actor managing a different one.
#[derive(Debug)]
pub enum ServiceRequest<T: ServiceEntity> {
    Inspect {
        respond_to: Response<T::Snapshot>,
    },
    Command {
        command: T::Command,
        respond_to: Response<T::Reply>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns a single service entity.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the entity and the
/// receiver end of the channel.
///
/// **Concurrency Model**:
/// The actor processes its messages *sequentially* in a loop, so the entity
/// needs no `Mutex` or `RwLock`: exclusive ownership within the task is the
/// mutual-exclusion region. Clients on other tasks only ever see the state
/// between two complete operations, never mid-transition.
pub struct ServiceActor<T: ServiceEntity> {
    receiver: mpsc::Receiver<ServiceRequest<T>>,
    entity: T,
}

impl<T: ServiceEntity> ServiceActor<T> {
    /// Creates a new `ServiceActor` around `entity` and its associated client.
    ///
    /// # Arguments
    ///
    /// * `entity` - The initial entity state the actor takes ownership of.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is
    ///   full, calls on the client wait until there is space.
    pub fn new(entity: T, buffer_size: usize) -> (Self, ServiceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, entity };
        let client = ServiceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every command handler. This
    /// allows the entity to access dependencies that were created *after* the
    /// actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Machine" instead of "brew_station::model::machine::Machine")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ServiceRequest::Inspect { respond_to } => {
                    debug!(entity_type, "Inspect");
                    let _ = respond_to.send(Ok(self.entity.snapshot()));
                }
                ServiceRequest::Command {
                    command,
                    respond_to,
                } => {
                    debug!(entity_type, ?command, "Command");
                    let result = self
                        .entity
                        .handle_command(command, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, "Command ok"),
                        Err(e) => warn!(entity_type, error = %e, "Command failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`ServiceActor`].
///
/// Holds only a sender, so cloning is inexpensive and the client can be shared
/// across tasks. All methods resolve to `Result<…, FrameworkError>`.
pub struct ServiceClient<T: ServiceEntity> {
    sender: mpsc::Sender<ServiceRequest<T>>,
}

impl<T: ServiceEntity> Clone for ServiceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ServiceEntity> ServiceClient<T> {
    pub fn new(sender: mpsc::Sender<ServiceRequest<T>>) -> Self {
        Self { sender }
    }

    /// Fetch a snapshot of the entity's current state.
    pub async fn inspect(&self) -> Result<T::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ServiceRequest::Inspect { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Execute a command against the entity.
    pub async fn dispatch(&self, command: T::Command) -> Result<T::Reply, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ServiceRequest::Command {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Debug)]
    struct Turnstile {
        entries: u32,
        locked: bool,
    }

    #[derive(Debug)]
    enum TurnstileCommand {
        Push,
        InsertCoin,
    }

    #[derive(Debug, PartialEq)]
    enum TurnstileReply {
        Pushed,
        Unlocked,
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum TurnstileError {
        #[error("turnstile is locked")]
        Locked,
    }

    #[async_trait]
    impl ServiceEntity for Turnstile {
        type Command = TurnstileCommand;
        type Reply = TurnstileReply;
        type Snapshot = u32;
        type Context = ();
        type Error = TurnstileError;

        fn snapshot(&self) -> u32 {
            self.entries
        }

        async fn handle_command(
            &mut self,
            command: TurnstileCommand,
            _ctx: &(),
        ) -> Result<TurnstileReply, TurnstileError> {
            match command {
                TurnstileCommand::Push => {
                    if self.locked {
                        return Err(TurnstileError::Locked);
                    }
                    self.entries += 1;
                    self.locked = true;
                    Ok(TurnstileReply::Pushed)
                }
                TurnstileCommand::InsertCoin => {
                    self.locked = false;
                    Ok(TurnstileReply::Unlocked)
                }
            }
        }
    }

    // --- Test ---

    #[tokio::test]
    async fn test_service_actor_with_commands() {
        let turnstile = Turnstile {
            entries: 0,
            locked: false,
        };
        let (actor, client) = ServiceActor::new(turnstile, 10);
        tokio::spawn(actor.run(()));

        // 1. Inspect initial state
        assert_eq!(client.inspect().await.unwrap(), 0);

        // 2. Push through
        let reply = client.dispatch(TurnstileCommand::Push).await.unwrap();
        assert_eq!(reply, TurnstileReply::Pushed);
        assert_eq!(client.inspect().await.unwrap(), 1);

        // 3. Pushing again fails (locked) and the entity error comes back typed
        let err = client.dispatch(TurnstileCommand::Push).await.unwrap_err();
        match err {
            FrameworkError::EntityError(inner) => {
                let inner = inner.downcast::<TurnstileError>().unwrap();
                assert_eq!(*inner, TurnstileError::Locked);
            }
            other => panic!("Expected EntityError, got {other:?}"),
        }

        // 4. A failed command must not have mutated state
        assert_eq!(client.inspect().await.unwrap(), 1);

        // 5. Unlock and push again
        client
            .dispatch(TurnstileCommand::InsertCoin)
            .await
            .unwrap();
        client.dispatch(TurnstileCommand::Push).await.unwrap();
        assert_eq!(client.inspect().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let turnstile = Turnstile {
            entries: 0,
            locked: false,
        };
        let (actor, client) = ServiceActor::new(turnstile, 10);
        drop(actor);

        let err = client.inspect().await.unwrap_err();
        assert!(matches!(err, FrameworkError::ActorClosed));
    }
}
