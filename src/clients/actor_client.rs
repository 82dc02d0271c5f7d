use crate::framework::{FrameworkError, ServiceClient, ServiceEntity};
use async_trait::async_trait;

/// Trait for service-specific clients to inherit the standard read operation.
///
/// This trait reduces boilerplate by providing a default implementation for
/// `inspect` and centralizing the framework-to-domain error mapping.
#[async_trait]
pub trait ActorClient<T: ServiceEntity>: Send + Sync {
    /// The service-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ServiceClient.
    fn inner(&self) -> &ServiceClient<T>;

    /// Map framework errors to the specific service error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a snapshot of the entity's current state.
    #[tracing::instrument(skip(self))]
    async fn inspect(&self) -> Result<T::Snapshot, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().inspect().await.map_err(Self::map_error)
    }
}
