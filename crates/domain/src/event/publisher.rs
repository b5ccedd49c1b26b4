use crate::DomainEvent;
use async_trait::async_trait;

/// Outbound seam for domain events.
///
/// Implementations are provided in the infrastructure layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(
        &self,
        event: DomainEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
