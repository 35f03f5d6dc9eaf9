use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The currently authenticated identity. Absence of a session is a valid
/// state and is modeled by `SessionState`, not by an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(uid: String, display_name: Option<String>, email: Option<String>) -> Self {
        Self {
            uid,
            display_name,
            email,
            created_at: Some(Utc::now()),
        }
    }
}
