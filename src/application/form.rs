use crate::domain::entities::operation::NewOperation;
use crate::domain::error::DomainError;
use chrono::NaiveDate;

/// Raw form fields as the user entered them. Numeric fields default to
/// zero when blank or unparseable; base and quote must be non-empty.
#[derive(Debug, Clone, Default)]
pub struct FormDraft {
    pub base: String,
    pub quote: String,
    pub price_buy: String,
    pub price_sell: String,
    pub exchange: Option<String>,
    pub note: Option<String>,
    pub trade_date: Option<NaiveDate>,
}

impl FormDraft {
    pub fn parse(&self) -> Result<NewOperation, DomainError> {
        NewOperation::new(
            self.base.clone(),
            self.quote.clone(),
            parse_price(&self.price_buy),
            parse_price(&self.price_sell),
            self.exchange.clone(),
            self.note.clone(),
            self.trade_date,
        )
    }
}

fn parse_price(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}
