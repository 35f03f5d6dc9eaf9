use crate::domain::entities::operation::{NewOperation, Operation};
use crate::domain::error::DomainError;
use crate::domain::ports::operation_repository::{OperationFilter, OperationRepository};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::watch;

const COLLECTION: &str = "operations";

/// Operation store over the Firestore REST surface. The adapter is the
/// write-time authority for id, timestamp and derived profit; reads run
/// an owner-filtered query ordered by createdAt descending. The live
/// subscription polls and re-delivers the full snapshot on change,
/// stopping once the receiver is dropped.
#[derive(Clone)]
pub struct FirestoreOperationRepo {
    client: Client,
    /// Documents root, e.g.
    /// `https://firestore.googleapis.com/v1/projects/<p>/databases/(default)/documents`.
    base_url: String,
    auth_token: Option<String>,
    poll_interval: Duration,
}

impl FirestoreOperationRepo {
    pub fn new(base_url: String, auth_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
            poll_interval: Duration::from_secs(5),
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn to_fields(op: &Operation) -> Value {
        let mut fields = json!({
            "ownerId": { "stringValue": op.owner_id },
            "base": { "stringValue": op.base },
            "quote": { "stringValue": op.quote },
            "priceBuy": { "doubleValue": op.price_buy },
            "priceSell": { "doubleValue": op.price_sell },
            "profit": { "doubleValue": op.profit },
            "createdAt": { "timestampValue": op.created_at.to_rfc3339() },
        });
        if let Some(exchange) = &op.exchange {
            fields["exchange"] = json!({ "stringValue": exchange });
        }
        if let Some(note) = &op.note {
            fields["note"] = json!({ "stringValue": note });
        }
        if let Some(date) = &op.trade_date {
            fields["tradeDate"] = json!({ "stringValue": date.to_string() });
        }
        fields
    }

    fn from_document(doc: &Value) -> Option<Operation> {
        let fields = &doc["fields"];
        let id = doc["name"].as_str()?.rsplit('/').next()?.to_string();
        Some(Operation {
            id,
            owner_id: string_field(fields, "ownerId")?,
            base: string_field(fields, "base")?,
            quote: string_field(fields, "quote")?,
            price_buy: double_field(fields, "priceBuy"),
            price_sell: double_field(fields, "priceSell"),
            profit: double_field(fields, "profit"),
            exchange: string_field(fields, "exchange"),
            note: string_field(fields, "note"),
            trade_date: string_field(fields, "tradeDate").and_then(|s| s.parse().ok()),
            created_at: fields["createdAt"]["timestampValue"]
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        })
    }

    async fn fetch(
        &self,
        owner_id: &str,
        filter: &OperationFilter,
    ) -> Result<Vec<Operation>, DomainError> {
        let mut query = json!({
            "from": [{ "collectionId": COLLECTION }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": "ownerId" },
                    "op": "EQUAL",
                    "value": { "stringValue": owner_id }
                }
            },
            "orderBy": [{
                "field": { "fieldPath": "createdAt" },
                "direction": "DESCENDING"
            }]
        });
        if let Some(limit) = filter.limit {
            query["limit"] = json!(limit);
        }

        let url = format!("{}:runQuery", self.base_url);
        let resp = self
            .authorize(self.client.post(&url))
            .json(&json!({ "structuredQuery": query }))
            .send()
            .await
            .map_err(|e| DomainError::StoreRead(format!("store unreachable: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            // A missing composite index lands here too; nothing to do but
            // surface it.
            return Err(DomainError::StoreRead(format!("store {status}: {body}")));
        }

        let rows: Vec<Value> = resp
            .json()
            .await
            .map_err(|e| DomainError::StoreRead(format!("Parse error: {e}")))?;
        let mut ops: Vec<Operation> = rows
            .iter()
            .filter_map(|row| row.get("document"))
            .filter_map(Self::from_document)
            .collect();
        if let Some(since) = &filter.since {
            ops.retain(|o| o.created_at >= *since);
        }
        Ok(ops)
    }
}

#[async_trait::async_trait]
impl OperationRepository for FirestoreOperationRepo {
    async fn create(&self, owner_id: &str, draft: &NewOperation) -> Result<Operation, DomainError> {
        let op = Operation::record(owner_id.to_string(), draft);
        let url = format!(
            "{}/{}?documentId={}",
            self.base_url, COLLECTION, op.id
        );
        let resp = self
            .authorize(self.client.post(&url))
            .json(&json!({ "fields": Self::to_fields(&op) }))
            .send()
            .await
            .map_err(|e| DomainError::StoreWrite(format!("store unreachable: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::StoreWrite(format!("store {status}: {body}")));
        }
        Ok(op)
    }

    async fn list(
        &self,
        owner_id: &str,
        filter: &OperationFilter,
    ) -> Result<Vec<Operation>, DomainError> {
        self.fetch(owner_id, filter).await
    }

    async fn subscribe(
        &self,
        owner_id: &str,
    ) -> Result<watch::Receiver<Vec<Operation>>, DomainError> {
        let initial = self.fetch(owner_id, &OperationFilter::default()).await?;
        let (tx, rx) = watch::channel(initial);
        let repo = self.clone();
        let owner = owner_id.to_string();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(repo.poll_interval);
            ticker.tick().await; // first tick fires immediately
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    _ = ticker.tick() => {
                        match repo.fetch(&owner, &OperationFilter::default()).await {
                            Ok(snapshot) => {
                                if *tx.borrow() != snapshot {
                                    let _ = tx.send(snapshot);
                                }
                            }
                            Err(e) => log::warn!("live poll failed for {owner}: {e}"),
                        }
                    }
                }
            }
        });
        Ok(rx)
    }
}

fn string_field(fields: &Value, name: &str) -> Option<String> {
    fields[name]["stringValue"].as_str().map(String::from)
}

fn double_field(fields: &Value, name: &str) -> f64 {
    fields[name]["doubleValue"]
        .as_f64()
        .or_else(|| {
            fields[name]["integerValue"]
                .as_str()
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(0.0)
}
