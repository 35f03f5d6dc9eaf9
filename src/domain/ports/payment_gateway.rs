use crate::domain::error::DomainError;
use crate::domain::values::plan::Plan;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    pub order_id: String,
    /// Where the payer approves the charge. `None` means the gateway
    /// approved immediately and `confirm` can be called right away.
    pub approval_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payer_name: String,
}

/// Boundary to an external payment processor. No authenticity check
/// beyond trusting the processor's response.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn begin_checkout(&self, plan: Plan) -> Result<CheckoutSession, DomainError>;

    async fn confirm(&self, order_id: &str) -> Result<PaymentConfirmation, DomainError>;
}
