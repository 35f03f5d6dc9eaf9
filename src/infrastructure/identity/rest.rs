use crate::domain::entities::session::Session;
use crate::domain::error::DomainError;
use crate::domain::ports::identity_provider::IdentityProvider;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identity-Toolkit-style REST provider. Tokens live in a JSON cache file
/// owned by this adapter; `restore` reads it back, `sign_out` deletes it
/// and treats the downstream revoke as fire-and-forget.
pub struct RestIdentityProvider {
    client: Client,
    api_key: String,
    base_url: String,
    cache_path: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsResponse {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    id_token: String,
    refresh_token: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct TokenCache {
    uid: String,
    email: Option<String>,
    display_name: Option<String>,
    id_token: String,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
}

impl RestIdentityProvider {
    pub fn new(api_key: String, base_url: Option<String>, cache_path: PathBuf) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://identitytoolkit.googleapis.com/v1".to_string()),
            cache_path,
        }
    }

    async fn exchange(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Session, DomainError> {
        let url = format!("{}/accounts:{endpoint}?key={}", self.base_url, self.api_key);
        let resp = self
            .client
            .post(&url)
            .json(&CredentialsRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| DomainError::Auth(format!("identity provider unreachable: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Auth(format!(
                "identity provider {status}: {body}"
            )));
        }

        let result: CredentialsResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Auth(format!("Parse error: {e}")))?;

        let cache = TokenCache {
            uid: result.local_id.clone(),
            email: result.email.clone(),
            display_name: display_name.or(result.display_name.clone()),
            id_token: result.id_token,
            refresh_token: result.refresh_token,
            created_at: Utc::now(),
        };
        self.write_cache(&cache)?;

        Ok(Session {
            uid: cache.uid,
            display_name: cache.display_name,
            email: cache.email,
            created_at: Some(cache.created_at),
        })
    }

    fn write_cache(&self, cache: &TokenCache) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(cache)
            .map_err(|e| DomainError::Auth(format!("token cache encode failed: {e}")))?;
        std::fs::write(&self.cache_path, json)
            .map_err(|e| DomainError::Auth(format!("token cache write failed: {e}")))?;
        Ok(())
    }

    fn read_cache(&self) -> Option<TokenCache> {
        let raw = std::fs::read_to_string(&self.cache_path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// The cached bearer token, for adapters that call the same backend.
    pub fn cached_token(&self) -> Option<String> {
        self.read_cache().map(|c| c.id_token)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Session, DomainError> {
        self.exchange("signUp", email, password, display_name).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        self.exchange("signInWithPassword", email, password, None)
            .await
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        if let Err(e) = std::fs::remove_file(&self.cache_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::debug!("token cache removal failed: {e}");
            }
        }
        Ok(())
    }

    async fn restore(&self) -> Result<Option<Session>, DomainError> {
        Ok(self.read_cache().map(|c| Session {
            uid: c.uid,
            display_name: c.display_name,
            email: c.email,
            created_at: Some(c.created_at),
        }))
    }
}
