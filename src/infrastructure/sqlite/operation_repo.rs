use crate::domain::entities::operation::{NewOperation, Operation};
use crate::domain::error::DomainError;
use crate::domain::ports::operation_repository::{OperationFilter, OperationRepository};
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Embedded store. Backs the local backend and the test suite at
/// `:memory:`. Live subscribers get the full owner snapshot re-delivered
/// after every write.
pub struct SqliteOperationRepo {
    conn: Arc<Mutex<Connection>>,
    watchers: Mutex<HashMap<String, watch::Sender<Vec<Operation>>>>,
}

impl SqliteOperationRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            watchers: Mutex::new(HashMap::new()),
        }
    }

    fn row_to_operation(row: &rusqlite::Row) -> Result<Operation, rusqlite::Error> {
        let trade_date: Option<String> = row.get(9)?;
        let created_str: String = row.get(10)?;

        Ok(Operation {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            base: row.get(2)?,
            quote: row.get(3)?,
            price_buy: row.get(4)?,
            price_sell: row.get(5)?,
            profit: row.get(6)?,
            exchange: row.get(7)?,
            note: row.get(8)?,
            trade_date: trade_date.and_then(|s| s.parse().ok()),
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }

    fn list_sync(
        conn: &Connection,
        owner_id: &str,
        filter: &OperationFilter,
    ) -> Result<Vec<Operation>, DomainError> {
        let mut sql = String::from(
            "SELECT id, owner_id, base, quote, price_buy, price_sell, profit, exchange, note, trade_date, created_at
             FROM operations WHERE owner_id = ?1",
        );
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> =
            vec![Box::new(owner_id.to_string())];

        if let Some(since) = &filter.since {
            sql.push_str(&format!(" AND created_at >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(since.to_rfc3339()));
        }
        // rowid breaks ties between writes landing in the same instant.
        sql.push_str(" ORDER BY created_at DESC, rowid DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT ?{}", param_values.len() + 1));
            param_values.push(Box::new(limit as i64));
        }

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::StoreRead(e.to_string()))?;
        let ops = stmt
            .query_map(params_refs.as_slice(), Self::row_to_operation)
            .map_err(|e| DomainError::StoreRead(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(ops)
    }

    /// Push a fresh snapshot to the owner's live subscription, if one is
    /// open. Closed channels are pruned here.
    fn notify(&self, owner_id: &str) {
        let mut watchers = match self.watchers.lock() {
            Ok(w) => w,
            Err(e) => {
                log::warn!("watcher registry poisoned: {e}");
                return;
            }
        };
        let Some(tx) = watchers.get(owner_id) else {
            return;
        };
        if tx.is_closed() {
            watchers.remove(owner_id);
            return;
        }
        let snapshot = {
            let conn = match self.conn.lock() {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("connection lock poisoned: {e}");
                    return;
                }
            };
            match Self::list_sync(&conn, owner_id, &OperationFilter::default()) {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("live snapshot query failed for {owner_id}: {e}");
                    return;
                }
            }
        };
        let _ = tx.send(snapshot);
    }
}

#[async_trait::async_trait]
impl OperationRepository for SqliteOperationRepo {
    async fn create(&self, owner_id: &str, draft: &NewOperation) -> Result<Operation, DomainError> {
        let op = Operation::record(owner_id.to_string(), draft);
        {
            let conn = self
                .conn
                .lock()
                .map_err(|e| DomainError::StoreWrite(e.to_string()))?;
            conn.execute(
                "INSERT INTO operations (id, owner_id, base, quote, price_buy, price_sell, profit, exchange, note, trade_date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    op.id,
                    op.owner_id,
                    op.base,
                    op.quote,
                    op.price_buy,
                    op.price_sell,
                    op.profit,
                    op.exchange,
                    op.note,
                    op.trade_date.map(|d| d.to_string()),
                    op.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DomainError::StoreWrite(format!("Failed to save operation: {e}")))?;
        }
        self.notify(owner_id);
        Ok(op)
    }

    async fn list(
        &self,
        owner_id: &str,
        filter: &OperationFilter,
    ) -> Result<Vec<Operation>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::StoreRead(e.to_string()))?;
        Self::list_sync(&conn, owner_id, filter)
    }

    async fn subscribe(
        &self,
        owner_id: &str,
    ) -> Result<watch::Receiver<Vec<Operation>>, DomainError> {
        let snapshot = {
            let conn = self
                .conn
                .lock()
                .map_err(|e| DomainError::StoreRead(e.to_string()))?;
            Self::list_sync(&conn, owner_id, &OperationFilter::default())?
        };
        let mut watchers = self
            .watchers
            .lock()
            .map_err(|e| DomainError::StoreRead(e.to_string()))?;
        if let Some(tx) = watchers.get(owner_id) {
            if !tx.is_closed() {
                // Late subscriber to an existing channel: refresh so its
                // first read is the current snapshot.
                tx.send_replace(snapshot);
                return Ok(tx.subscribe());
            }
        }
        let (tx, rx) = watch::channel(snapshot);
        watchers.insert(owner_id.to_string(), tx);
        Ok(rx)
    }
}
