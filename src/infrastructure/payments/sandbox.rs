use crate::domain::error::DomainError;
use crate::domain::ports::payment_gateway::{CheckoutSession, PaymentConfirmation, PaymentGateway};
use crate::domain::values::plan::Plan;

/// Auto-approving gateway used when no payment processor is configured,
/// and by the test suite.
pub struct SandboxGateway;

#[async_trait::async_trait]
impl PaymentGateway for SandboxGateway {
    async fn begin_checkout(&self, _plan: Plan) -> Result<CheckoutSession, DomainError> {
        Ok(CheckoutSession {
            order_id: uuid::Uuid::new_v4().to_string(),
            approval_url: None,
        })
    }

    async fn confirm(&self, order_id: &str) -> Result<PaymentConfirmation, DomainError> {
        Ok(PaymentConfirmation {
            order_id: order_id.to_string(),
            payer_name: "Sandbox payer".to_string(),
        })
    }
}
