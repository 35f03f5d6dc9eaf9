use crate::domain::entities::operation::Operation;
use crate::domain::error::DomainError;
use crate::domain::ports::operation_repository::{OperationFilter, OperationRepository};
use std::sync::Arc;
use tokio::sync::watch;

pub struct ListOperationsUseCase {
    repo: Arc<dyn OperationRepository>,
}

impl ListOperationsUseCase {
    pub fn new(repo: Arc<dyn OperationRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner_id: &str,
        filter: &OperationFilter,
    ) -> Result<Vec<Operation>, DomainError> {
        self.repo.list(owner_id, filter).await
    }

    pub async fn watch(
        &self,
        owner_id: &str,
    ) -> Result<watch::Receiver<Vec<Operation>>, DomainError> {
        self.repo.subscribe(owner_id).await
    }
}
