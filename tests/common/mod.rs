//! Shared test helpers.

use jjxcapital::domain::entities::operation::NewOperation;
use jjxcapital::infrastructure::payments::sandbox::SandboxGateway;
use jjxcapital::JjxCapital;
use std::sync::Arc;

pub fn setup() -> JjxCapital {
    JjxCapital::local(":memory:", Arc::new(SandboxGateway)).unwrap()
}

/// App with a freshly registered, signed-in account.
#[allow(dead_code)]
pub async fn signed_in(email: &str) -> JjxCapital {
    let app = setup();
    app.register(email, "secret1", Some("Trader".into()))
        .await
        .unwrap();
    app
}

#[allow(dead_code)]
pub fn draft(base: &str, quote: &str, buy: f64, sell: f64) -> NewOperation {
    NewOperation::new(base.into(), quote.into(), buy, sell, None, None, None).unwrap()
}
