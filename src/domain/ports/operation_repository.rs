use crate::domain::entities::operation::{NewOperation, Operation};
use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

#[derive(Debug, Clone, Default)]
pub struct OperationFilter {
    pub limit: Option<usize>,
    pub since: Option<DateTime<Utc>>,
}

/// Boundary to the document store holding operations. The store assigns
/// id and creation timestamp at write time; reads come back newest-first.
#[async_trait::async_trait]
pub trait OperationRepository: Send + Sync {
    async fn create(&self, owner_id: &str, draft: &NewOperation) -> Result<Operation, DomainError>;

    /// All operations owned by `owner_id`, created_at non-increasing.
    async fn list(
        &self,
        owner_id: &str,
        filter: &OperationFilter,
    ) -> Result<Vec<Operation>, DomainError>;

    /// Live view of the owner's list: seeded with the current full
    /// snapshot and re-delivered in full on every underlying change.
    /// Dropping the receiver cancels the subscription.
    async fn subscribe(
        &self,
        owner_id: &str,
    ) -> Result<watch::Receiver<Vec<Operation>>, DomainError>;
}
