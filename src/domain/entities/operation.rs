use crate::domain::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One persisted trade record. Immutable once created: there is no update
/// or delete anywhere in the surface. `profit` is derived at write time
/// and read back as stored, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    pub owner_id: String,
    pub base: String,
    pub quote: String,
    pub price_buy: f64,
    pub price_sell: f64,
    pub profit: f64,
    pub exchange: Option<String>,
    pub note: Option<String>,
    pub trade_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Operation {
    /// Materialize a validated draft into a record. Called by store
    /// adapters at write time, which is where the id and timestamp are
    /// assigned.
    pub fn record(owner_id: String, draft: &NewOperation) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id,
            base: draft.base.clone(),
            quote: draft.quote.clone(),
            price_buy: draft.price_buy,
            price_sell: draft.price_sell,
            profit: draft.profit(),
            exchange: draft.exchange.clone(),
            note: draft.note.clone(),
            trade_date: draft.trade_date,
            created_at: Utc::now(),
        }
    }

    pub fn pair(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}

/// A validated operation draft. Base and quote must be non-empty; symbols
/// are trimmed and uppercased on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOperation {
    pub base: String,
    pub quote: String,
    pub price_buy: f64,
    pub price_sell: f64,
    pub exchange: Option<String>,
    pub note: Option<String>,
    pub trade_date: Option<NaiveDate>,
}

impl NewOperation {
    pub fn new(
        base: String,
        quote: String,
        price_buy: f64,
        price_sell: f64,
        exchange: Option<String>,
        note: Option<String>,
        trade_date: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        let base = base.trim().to_uppercase();
        let quote = quote.trim().to_uppercase();
        if base.is_empty() {
            return Err(DomainError::InvalidInput("base asset is required".into()));
        }
        if quote.is_empty() {
            return Err(DomainError::InvalidInput("quote asset is required".into()));
        }
        if !price_buy.is_finite() || !price_sell.is_finite() {
            return Err(DomainError::InvalidInput(
                "prices must be finite numbers".into(),
            ));
        }
        Ok(Self {
            base,
            quote,
            price_buy,
            price_sell,
            exchange: exchange.filter(|e| !e.trim().is_empty()),
            note: note.filter(|n| !n.trim().is_empty()),
            trade_date,
        })
    }

    /// Derived at write time: sell minus buy, exact in f64.
    pub fn profit(&self) -> f64 {
        self.price_sell - self.price_buy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit_is_sell_minus_buy() {
        let draft =
            NewOperation::new("BTC".into(), "USDT".into(), 25000.0, 25500.0, None, None, None)
                .unwrap();
        assert_eq!(draft.profit(), 500.0);
    }

    #[test]
    fn test_negative_profit_allowed() {
        let draft =
            NewOperation::new("ETH".into(), "USDT".into(), 2000.0, 1950.0, None, None, None)
                .unwrap();
        assert_eq!(draft.profit(), -50.0);
    }

    #[test]
    fn test_symbols_normalized() {
        let draft =
            NewOperation::new(" btc ".into(), "usdt".into(), 1.0, 2.0, None, None, None).unwrap();
        assert_eq!(draft.base, "BTC");
        assert_eq!(draft.quote, "USDT");
    }

    #[test]
    fn test_empty_base_rejected() {
        let err = NewOperation::new("  ".into(), "USDT".into(), 1.0, 2.0, None, None, None);
        assert!(err.is_err());
    }

    #[test]
    fn test_record_assigns_id_and_timestamp() {
        let draft =
            NewOperation::new("BTC".into(), "USDT".into(), 10.0, 12.0, None, None, None).unwrap();
        let op = Operation::record("u1".into(), &draft);
        assert!(!op.id.is_empty());
        assert_eq!(op.owner_id, "u1");
        assert_eq!(op.profit, 2.0);
    }
}
