use crate::domain::entities::session::Session;
use crate::domain::error::DomainError;
use crate::domain::ports::identity_provider::IdentityProvider;
use crate::domain::values::session_state::SessionState;
use std::sync::Arc;
use tokio::sync::watch;

/// Owns the observable session lifecycle over the identity port. Every
/// transition is published on a watch channel whose initial value is
/// `Unknown`; `restore` resolves that exactly once at startup.
pub struct SessionUseCase {
    identity: Arc<dyn IdentityProvider>,
    state: watch::Sender<SessionState>,
}

impl SessionUseCase {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self { identity, state }
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver whose first read is the current state and which observes
    /// every subsequent transition. Dropping it unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Resolve the initial `Unknown` state. A failing restoration check
    /// degrades to `Anonymous` rather than leaving the state unresolved.
    pub async fn restore(&self) -> SessionState {
        let next = match self.identity.restore().await {
            Ok(Some(session)) => SessionState::Authenticated(session),
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                log::warn!("session restore failed, continuing anonymous: {e}");
                SessionState::Anonymous
            }
        };
        self.state.send_replace(next.clone());
        next
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Session, DomainError> {
        let session = self.identity.register(email, password, display_name).await?;
        self.state
            .send_replace(SessionState::Authenticated(session.clone()));
        Ok(session)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let session = self.identity.sign_in(email, password).await?;
        self.state
            .send_replace(SessionState::Authenticated(session.clone()));
        Ok(session)
    }

    /// Always clears the local session; a failing downstream revoke is
    /// logged and swallowed.
    pub async fn sign_out(&self) {
        if let Err(e) = self.identity.sign_out().await {
            log::warn!("provider sign-out failed: {e}");
        }
        self.state.send_replace(SessionState::Anonymous);
    }
}
