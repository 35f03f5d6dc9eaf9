use crate::domain::entities::session::Session;
use crate::domain::error::DomainError;
use crate::domain::ports::identity_provider::IdentityProvider;
use chrono::{DateTime, Utc};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use rusqlite::{params, Connection, OptionalExtension};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32; // SHA-256 output

/// Identity provider backed by the embedded database. Accounts carry a
/// PBKDF2-HMAC-SHA256 password hash; the signed-in identity survives
/// process restarts through a single-row state table, which is this
/// provider's own persistence in the sense the port requires.
pub struct LocalIdentityProvider {
    conn: Arc<Mutex<Connection>>,
    rng: SystemRandom,
}

impl LocalIdentityProvider {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            rng: SystemRandom::new(),
        }
    }

    fn iterations() -> NonZeroU32 {
        NonZeroU32::new(PBKDF2_ITERATIONS).unwrap()
    }

    fn hash_password(&self, password: &str) -> Result<(String, String), DomainError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng
            .fill(&mut salt)
            .map_err(|_| DomainError::Auth("failed to generate salt".into()))?;
        let mut hash = [0u8; HASH_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            Self::iterations(),
            &salt,
            password.as_bytes(),
            &mut hash,
        );
        Ok((to_hex(&salt), to_hex(&hash)))
    }

    fn verify_password(salt_hex: &str, hash_hex: &str, password: &str) -> bool {
        let (Some(salt), Some(hash)) = (from_hex(salt_hex), from_hex(hash_hex)) else {
            return false;
        };
        pbkdf2::verify(
            pbkdf2::PBKDF2_HMAC_SHA256,
            Self::iterations(),
            &salt,
            password.as_bytes(),
            &hash,
        )
        .is_ok()
    }

    fn row_to_session(row: &rusqlite::Row) -> Result<Session, rusqlite::Error> {
        let created_str: String = row.get(3)?;
        Ok(Session {
            uid: row.get(0)?,
            display_name: row.get(1)?,
            email: row.get(2)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        })
    }

    fn mark_signed_in(conn: &Connection, uid: &str) -> Result<(), DomainError> {
        conn.execute(
            "INSERT OR REPLACE INTO auth_state (slot, uid, signed_in_at) VALUES (0, ?1, ?2)",
            params![uid, Utc::now().to_rfc3339()],
        )
        .map_err(|e| DomainError::Auth(format!("failed to persist session: {e}")))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Session, DomainError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Auth("a valid email is required".into()));
        }
        if password.len() < 6 {
            return Err(DomainError::Auth(
                "password must be at least 6 characters".into(),
            ));
        }

        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Auth(e.to_string()))?;
        let exists: Option<String> = conn
            .query_row(
                "SELECT uid FROM accounts WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DomainError::Auth(e.to_string()))?;
        if exists.is_some() {
            return Err(DomainError::Auth(format!("{email} is already registered")));
        }

        let (salt, hash) = self.hash_password(password)?;
        let session = Session::new(
            uuid::Uuid::new_v4().to_string(),
            display_name,
            Some(email.clone()),
        );
        conn.execute(
            "INSERT INTO accounts (uid, email, password_hash, salt, display_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.uid,
                email,
                hash,
                salt,
                session.display_name,
                session
                    .created_at
                    .unwrap_or_else(Utc::now)
                    .to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Auth(format!("failed to create account: {e}")))?;
        Self::mark_signed_in(&conn, &session.uid)?;
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let email = email.trim().to_lowercase();
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Auth(e.to_string()))?;
        let row = conn
            .query_row(
                "SELECT uid, display_name, email, created_at, salt, password_hash
                 FROM accounts WHERE email = ?1",
                params![email],
                |row| {
                    let session = Self::row_to_session(row)?;
                    let salt: String = row.get(4)?;
                    let hash: String = row.get(5)?;
                    Ok((session, salt, hash))
                },
            )
            .optional()
            .map_err(|e| DomainError::Auth(e.to_string()))?;

        // One generic rejection for unknown email and bad password alike.
        let (session, salt, hash) =
            row.ok_or_else(|| DomainError::Auth("invalid email or password".into()))?;
        if !Self::verify_password(&salt, &hash, password) {
            return Err(DomainError::Auth("invalid email or password".into()));
        }
        Self::mark_signed_in(&conn, &session.uid)?;
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Auth(e.to_string()))?;
        conn.execute("DELETE FROM auth_state", [])
            .map_err(|e| DomainError::Auth(e.to_string()))?;
        Ok(())
    }

    async fn restore(&self) -> Result<Option<Session>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Auth(e.to_string()))?;
        conn.query_row(
            "SELECT a.uid, a.display_name, a.email, a.created_at
             FROM auth_state s JOIN accounts a ON a.uid = s.uid
             WHERE s.slot = 0",
            [],
            Self::row_to_session,
        )
        .optional()
        .map_err(|e| DomainError::Auth(e.to_string()))
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn from_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let bytes = [0x00, 0x0f, 0xff, 0x42];
        assert_eq!(from_hex(&to_hex(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_from_hex_rejects_odd_length() {
        assert!(from_hex("abc").is_none());
    }
}
