//! # Machine Client
//!
//! Provides a high-level API for interacting with the machine actor.
//! It wraps a `ServiceClient<Machine>` and exposes domain-specific methods
//! with typed errors, hiding the message passing entirely.

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ServiceClient};
use crate::machine_actor::{MachineCommand, MachineError, MachineReply};
use crate::model::{CleanReport, Machine, Receipt, Refill, Selection};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the machine actor.
#[derive(Clone)]
pub struct MachineClient {
    inner: ServiceClient<Machine>,
}

impl MachineClient {
    pub fn new(inner: ServiceClient<Machine>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Machine> for MachineClient {
    type Error = MachineError;

    fn inner(&self) -> &ServiceClient<Machine> {
        &self.inner
    }

    /// Entity errors cross the actor boundary boxed; recover the typed
    /// [`MachineError`] so callers can pattern-match on the exact case.
    /// Anything else is a transport failure.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<MachineError>() {
                Ok(err) => *err,
                Err(other) => MachineError::Unreachable(other.to_string()),
            },
            other => MachineError::Unreachable(other.to_string()),
        }
    }
}

impl MachineClient {
    /// Buy one drink off the menu (or back out with [`Selection::Back`]).
    ///
    /// Returns the receipt, whose `maintenance_due` flag warns that this sale
    /// was the one to trip the cleaning threshold.
    #[instrument(skip(self))]
    pub async fn purchase(&self, selection: Selection) -> Result<Receipt, MachineError> {
        debug!(?selection, "Sending purchase to actor");
        match self.inner.dispatch(MachineCommand::Brew(selection)).await {
            Ok(MachineReply::Brew(receipt)) => Ok(receipt),
            Ok(_) => unreachable!("Brew command must return Brew reply"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Add stock to the machine. All-or-nothing per call.
    #[instrument(skip(self))]
    pub async fn refill(&self, refill: Refill) -> Result<(), MachineError> {
        debug!(?refill, "Sending refill to actor");
        match self.inner.dispatch(MachineCommand::Refill(refill)).await {
            Ok(MachineReply::Refill(())) => Ok(()),
            Ok(_) => unreachable!("Refill command must return Refill reply"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Empty the cash box, returning the amount taken.
    #[instrument(skip(self))]
    pub async fn collect(&self) -> Result<u32, MachineError> {
        debug!("Sending collect to actor");
        match self.inner.dispatch(MachineCommand::CollectCash).await {
            Ok(MachineReply::CollectCash(amount)) => Ok(amount),
            Ok(_) => unreachable!("CollectCash command must return CollectCash reply"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Clean the machine if it needs it; otherwise a no-op reporting the
    /// current progress toward the threshold.
    #[instrument(skip(self))]
    pub async fn clean(&self) -> Result<CleanReport, MachineError> {
        debug!("Sending clean to actor");
        match self.inner.dispatch(MachineCommand::Clean).await {
            Ok(MachineReply::Clean(report)) => Ok(report),
            Ok(_) => unreachable!("Clean command must return Clean reply"),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_command, MockClient};
    use crate::model::{MachineSnapshot, Resource};

    #[tokio::test]
    async fn test_collect_returns_amount() {
        let (client, mut receiver) = create_mock_client::<Machine>(10);
        let machine_client = MachineClient::new(client);

        // Spawn task to call collect
        let collect_task = tokio::spawn(async move { machine_client.collect().await });

        // Expect the command request
        let (command, responder) = expect_command(&mut receiver)
            .await
            .expect("Expected Command request");
        assert!(matches!(command, MachineCommand::CollectCash));

        // Respond with the amount taken
        responder.send(Ok(MachineReply::CollectCash(550))).unwrap();

        // Verify the result
        let result = collect_task.await.unwrap();
        assert_eq!(result.unwrap(), 550);
    }

    #[tokio::test]
    async fn test_purchase_recovers_typed_entity_error() {
        let (client, mut receiver) = create_mock_client::<Machine>(10);
        let machine_client = MachineClient::new(client);

        let purchase_task =
            tokio::spawn(async move { machine_client.purchase(Selection::Item(2)).await });

        let (command, responder) = expect_command(&mut receiver)
            .await
            .expect("Expected Command request");
        match command {
            MachineCommand::Brew(selection) => assert_eq!(selection, Selection::Item(2)),
            _ => panic!("Expected Brew command"),
        }

        // Respond with a boxed entity error, as the real actor would
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                MachineError::InsufficientResource(Resource::Milk),
            ))))
            .unwrap();

        // The client must hand back the typed variant, not a string
        let result = purchase_task.await.unwrap();
        assert_eq!(
            result.unwrap_err(),
            MachineError::InsufficientResource(Resource::Milk)
        );
    }

    #[tokio::test]
    async fn test_inspect_with_expectations() {
        let snapshot = MachineSnapshot {
            water: 400,
            milk: 540,
            beans: 120,
            cups: 9,
            cash: 550,
            brews_since_clean: 0,
            needs_cleaning: false,
        };

        // Create mock with fluent expectation API
        let mut mock = MockClient::<Machine>::new();
        mock.expect_inspect().return_ok(snapshot);

        let machine_client = MachineClient::new(mock.client());

        let fetched = machine_client.inspect().await.unwrap();
        assert_eq!(fetched, snapshot);

        // Verify all expectations were met
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_unreachable() {
        let (client, receiver) = create_mock_client::<Machine>(10);
        drop(receiver);
        let machine_client = MachineClient::new(client);

        let result = machine_client.collect().await;
        assert!(matches!(result, Err(MachineError::Unreachable(_))));
    }
}
