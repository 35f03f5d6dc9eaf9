use crate::domain::entities::operation::{NewOperation, Operation};
use crate::domain::error::DomainError;
use crate::domain::ports::operation_repository::OperationRepository;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SaveOperationUseCase {
    repo: Arc<dyn OperationRepository>,
    // At most one create in flight: a second gesture while the first is
    // still pending is rejected, not queued.
    in_flight: Mutex<()>,
}

impl SaveOperationUseCase {
    pub fn new(repo: Arc<dyn OperationRepository>) -> Self {
        Self {
            repo,
            in_flight: Mutex::new(()),
        }
    }

    pub async fn execute(
        &self,
        owner_id: &str,
        draft: &NewOperation,
    ) -> Result<Operation, DomainError> {
        let _gate = self
            .in_flight
            .try_lock()
            .map_err(|_| DomainError::SaveInFlight)?;
        self.repo.create(owner_id, draft).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::operation_repository::OperationFilter;
    use std::time::Duration;
    use tokio::sync::watch;

    struct SlowRepo;

    #[async_trait::async_trait]
    impl OperationRepository for SlowRepo {
        async fn create(
            &self,
            owner_id: &str,
            draft: &NewOperation,
        ) -> Result<Operation, DomainError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(Operation::record(owner_id.to_string(), draft))
        }

        async fn list(
            &self,
            _owner_id: &str,
            _filter: &OperationFilter,
        ) -> Result<Vec<Operation>, DomainError> {
            Ok(vec![])
        }

        async fn subscribe(
            &self,
            _owner_id: &str,
        ) -> Result<watch::Receiver<Vec<Operation>>, DomainError> {
            let (_tx, rx) = watch::channel(vec![]);
            Ok(rx)
        }
    }

    #[tokio::test]
    async fn test_second_gesture_rejected_while_first_in_flight() {
        let uc = Arc::new(SaveOperationUseCase::new(Arc::new(SlowRepo)));
        let draft =
            NewOperation::new("BTC".into(), "USDT".into(), 1.0, 2.0, None, None, None).unwrap();

        let first = {
            let uc = uc.clone();
            let draft = draft.clone();
            tokio::spawn(async move { uc.execute("u1", &draft).await })
        };
        // Let the first call take the gate before the double-click lands.
        tokio::time::sleep(Duration::from_millis(10)).await;

        let second = uc.execute("u1", &draft).await;
        assert!(matches!(second, Err(DomainError::SaveInFlight)));
        assert!(first.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_gate_released_after_completion() {
        let uc = SaveOperationUseCase::new(Arc::new(SlowRepo));
        let draft =
            NewOperation::new("BTC".into(), "USDT".into(), 1.0, 2.0, None, None, None).unwrap();
        assert!(uc.execute("u1", &draft).await.is_ok());
        assert!(uc.execute("u1", &draft).await.is_ok());
    }
}
