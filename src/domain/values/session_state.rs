use crate::domain::entities::session::Session;
use serde::Serialize;

/// Observable session lifecycle. `Unknown` is the sole initial state,
/// held until the first restoration check completes, so consumers never
/// render an anonymous surface before the check resolves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SessionState {
    Unknown,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(s) => Some(s),
            _ => None,
        }
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.session().map(|s| s.uid.as_str())
    }
}
