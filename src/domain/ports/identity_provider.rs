use crate::domain::entities::session::Session;
use crate::domain::error::DomainError;

/// Boundary to the external identity service. The provider owns its own
/// credential persistence; this side holds no tokens beyond what the
/// adapter chooses to cache for `restore`.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new identity and sign it in.
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Session, DomainError>;

    /// Exchange credentials for a session. On rejection the session
    /// remains absent; no retry.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError>;

    /// Clear the provider-side session. Downstream failures are the
    /// adapter's to swallow; the local session is cleared regardless.
    async fn sign_out(&self) -> Result<(), DomainError>;

    /// Recover a previously established session, if the provider still
    /// holds one.
    async fn restore(&self) -> Result<Option<Session>, DomainError>;
}
