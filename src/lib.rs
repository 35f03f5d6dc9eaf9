pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::list_operations::ListOperationsUseCase;
use crate::application::save_operation::SaveOperationUseCase;
use crate::application::session::SessionUseCase;
use crate::application::summary::{ProfitSummary, SummaryUseCase};
use crate::application::upgrade::{UpgradeOutcome, UpgradeUseCase};
use crate::domain::entities::operation::{NewOperation, Operation};
use crate::domain::entities::session::Session;
use crate::domain::error::DomainError;
use crate::domain::ports::identity_provider::IdentityProvider;
use crate::domain::ports::operation_repository::{OperationFilter, OperationRepository};
use crate::domain::ports::payment_gateway::{PaymentConfirmation, PaymentGateway};
use crate::domain::values::payment_method::PaymentMethod;
use crate::domain::values::plan::Plan;
use crate::domain::values::session_state::SessionState;
use crate::infrastructure::firestore::operation_repo::FirestoreOperationRepo;
use crate::infrastructure::identity::local::LocalIdentityProvider;
use crate::infrastructure::identity::rest::RestIdentityProvider;
use crate::infrastructure::payments::link::LinkGateway;
use crate::infrastructure::payments::paypal::PaypalGateway;
use crate::infrastructure::payments::sandbox::SandboxGateway;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::operation_repo::SqliteOperationRepo;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Composition root and facade. All ports are constructed here and
/// injected into the use cases; nothing holds an ambient global client.
pub struct JjxCapital {
    session_uc: SessionUseCase,
    save_uc: SaveOperationUseCase,
    list_uc: ListOperationsUseCase,
    summary_uc: SummaryUseCase,
    upgrade_uc: UpgradeUseCase,
}

impl JjxCapital {
    /// Env-driven construction: `JJX_BACKEND=rest` targets the remote
    /// identity and document-store services, anything else runs on the
    /// embedded database at `db_path`. PayPal is used when credentials
    /// are configured, the sandbox gateway otherwise.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let payments: Arc<dyn PaymentGateway> = match (
            std::env::var("JJX_PAYPAL_CLIENT_ID"),
            std::env::var("JJX_PAYPAL_SECRET"),
        ) {
            (Ok(client_id), Ok(secret)) => Arc::new(PaypalGateway::new(
                client_id,
                secret,
                std::env::var("JJX_PAYPAL_URL").ok(),
            )),
            _ => Arc::new(SandboxGateway),
        };

        let backend = std::env::var("JJX_BACKEND").unwrap_or_else(|_| "local".into());
        if backend == "rest" {
            let api_key = std::env::var("JJX_API_KEY")
                .map_err(|_| DomainError::InvalidInput("JJX_API_KEY is required for the rest backend".into()))?;
            let firestore_url = std::env::var("JJX_FIRESTORE_URL")
                .map_err(|_| DomainError::InvalidInput("JJX_FIRESTORE_URL is required for the rest backend".into()))?;
            let cache_path = std::env::var("JJX_TOKEN_CACHE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./.jjx_session.json"));

            let identity = RestIdentityProvider::new(
                api_key,
                std::env::var("JJX_AUTH_URL").ok(),
                cache_path,
            );
            let token = identity.cached_token();
            let repo: Arc<dyn OperationRepository> =
                Arc::new(FirestoreOperationRepo::new(firestore_url, token));
            return Ok(Self::assemble(Arc::new(identity), repo, payments));
        }

        Self::local(db_path, payments)
    }

    /// Fully embedded backend: accounts and operations in one sqlite
    /// database. This is what the test suite runs against `:memory:`.
    pub fn local(
        db_path: &str,
        payments: Arc<dyn PaymentGateway>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;
        let conn = Arc::new(Mutex::new(conn));

        let identity: Arc<dyn IdentityProvider> =
            Arc::new(LocalIdentityProvider::new(conn.clone()));
        let repo: Arc<dyn OperationRepository> = Arc::new(SqliteOperationRepo::new(conn));
        Ok(Self::assemble(identity, repo, payments))
    }

    /// Injected ports over the embedded store; for tests and embedders.
    pub fn with_providers(
        db_path: &str,
        identity: Arc<dyn IdentityProvider>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        run_migrations(&conn)?;
        let repo: Arc<dyn OperationRepository> =
            Arc::new(SqliteOperationRepo::new(Arc::new(Mutex::new(conn))));
        Ok(Self::assemble(identity, repo, payments))
    }

    fn assemble(
        identity: Arc<dyn IdentityProvider>,
        repo: Arc<dyn OperationRepository>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        let links: Vec<(PaymentMethod, Arc<dyn PaymentGateway>)> = vec![
            (PaymentMethod::BinancePay, Arc::new(LinkGateway::binance_pay())),
            (
                PaymentMethod::BlockchainPay,
                Arc::new(LinkGateway::blockchain_pay()),
            ),
        ];
        Self {
            session_uc: SessionUseCase::new(identity),
            save_uc: SaveOperationUseCase::new(repo.clone()),
            list_uc: ListOperationsUseCase::new(repo.clone()),
            summary_uc: SummaryUseCase::new(repo),
            upgrade_uc: UpgradeUseCase::new(payments, links),
        }
    }

    fn owner_id(&self) -> Result<String, DomainError> {
        self.session_uc
            .current()
            .owner_id()
            .map(String::from)
            .ok_or_else(|| DomainError::Auth("sign in to manage operations".into()))
    }

    // --- session ---

    /// Resolve the initial `Unknown` state; call once at startup.
    pub async fn restore_session(&self) -> SessionState {
        self.session_uc.restore().await
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Session, DomainError> {
        self.session_uc.register(email, password, display_name).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        self.session_uc.sign_in(email, password).await
    }

    pub async fn logout(&self) {
        self.session_uc.sign_out().await
    }

    pub fn session(&self) -> SessionState {
        self.session_uc.current()
    }

    pub fn subscribe_session(&self) -> watch::Receiver<SessionState> {
        self.session_uc.subscribe()
    }

    // --- operations ---

    /// Rejected before the store boundary when no session is active.
    pub async fn save_operation(&self, draft: &NewOperation) -> Result<Operation, DomainError> {
        let owner = self.owner_id()?;
        self.save_uc.execute(&owner, draft).await
    }

    pub async fn list_operations(
        &self,
        filter: &OperationFilter,
    ) -> Result<Vec<Operation>, DomainError> {
        let owner = self.owner_id()?;
        self.list_uc.execute(&owner, filter).await
    }

    pub async fn watch_operations(
        &self,
    ) -> Result<watch::Receiver<Vec<Operation>>, DomainError> {
        let owner = self.owner_id()?;
        self.list_uc.watch(&owner).await
    }

    pub async fn summary(&self) -> Result<ProfitSummary, DomainError> {
        let owner = self.owner_id()?;
        self.summary_uc.execute(&owner).await
    }

    // --- premium ---

    pub async fn upgrade(&self, method: PaymentMethod) -> Result<UpgradeOutcome, DomainError> {
        self.owner_id()?;
        self.upgrade_uc.begin(method, Plan::Premium).await
    }

    pub async fn confirm_upgrade(
        &self,
        order_id: &str,
    ) -> Result<PaymentConfirmation, DomainError> {
        self.upgrade_uc.confirm(order_id).await
    }
}
