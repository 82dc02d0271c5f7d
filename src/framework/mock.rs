//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then use the
//! helpers [`expect_inspect`] and [`expect_command`] to assert behavior. For a
//! fluent, queue-based API, use [`MockClient`] instead.
//!
//! # Testing Strategy
//! In unit tests we don't want to spin up a full [`ServiceActor`](crate::framework::ServiceActor)
//! if we are just testing the *client* logic wrapped around it. A mock client
//! sends messages to a channel the test controls; the test inspects the
//! requests arriving on that channel and answers them deterministically,
//! including with failures that are hard to reproduce against a real actor.

use crate::framework::{FrameworkError, ServiceClient, ServiceEntity, ServiceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: ServiceEntity> {
    Inspect {
        response: Result<T::Snapshot, FrameworkError>,
    },
    Command {
        response: Result<T::Reply, FrameworkError>,
    },
}

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Machine>::new();
/// mock.expect_command().return_ok(MachineReply::CollectCash(550));
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ServiceEntity> {
    client: ServiceClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ServiceEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ServiceRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut exps = expectations_clone.lock().unwrap();
                let expectation = exps.pop_front();
                drop(exps); // Release lock before async operations

                match (request, expectation) {
                    (
                        ServiceRequest::Inspect { respond_to },
                        Some(Expectation::Inspect { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ServiceRequest::Command { respond_to, .. },
                        Some(Expectation::Command { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ServiceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ServiceClient<T> {
        self.client.clone()
    }

    /// Expects an `inspect` operation.
    pub fn expect_inspect(&mut self) -> InspectExpectationBuilder<T> {
        InspectExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `dispatch` (command) operation.
    pub fn expect_command(&mut self) -> CommandExpectationBuilder<T> {
        CommandExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: ServiceEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `inspect` expectations.
pub struct InspectExpectationBuilder<T: ServiceEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ServiceEntity> InspectExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, snapshot: T::Snapshot) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Inspect {
            response: Ok(snapshot),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Inspect {
            response: Err(error),
        });
    }
}

/// Builder for command expectations.
pub struct CommandExpectationBuilder<T: ServiceEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ServiceEntity> CommandExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, reply: T::Reply) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Command {
            response: Ok(reply),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Command {
            response: Err(error),
        });
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// **Note**: Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: ServiceEntity>(
    buffer_size: usize,
) -> (ServiceClient<T>, mpsc::Receiver<ServiceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ServiceClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Inspect request.
pub async fn expect_inspect<T: ServiceEntity>(
    receiver: &mut mpsc::Receiver<ServiceRequest<T>>,
) -> Option<tokio::sync::oneshot::Sender<Result<T::Snapshot, FrameworkError>>> {
    match receiver.recv().await {
        Some(ServiceRequest::Inspect { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Command request.
pub async fn expect_command<T: ServiceEntity>(
    receiver: &mut mpsc::Receiver<ServiceRequest<T>>,
) -> Option<(
    T::Command,
    tokio::sync::oneshot::Sender<Result<T::Reply, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ServiceRequest::Command {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}
