use crate::domain::error::DomainError;
use crate::domain::ports::payment_gateway::{CheckoutSession, PaymentConfirmation, PaymentGateway};
use crate::domain::values::payment_method::PaymentMethod;
use crate::domain::values::plan::Plan;

const BINANCE_PAY_URL: &str = "https://pay.binance.com/en/checkout";
const BLOCKCHAIN_PAY_URL: &str = "https://pay.blockchain.com/checkout";

/// Static-link methods (Binance Pay, Blockchain Pay). Checkout hands out
/// an approval link with a client-generated reference; settlement happens
/// entirely on the provider side, so there is no confirmation to query.
pub struct LinkGateway {
    method: PaymentMethod,
    base_url: String,
}

impl LinkGateway {
    pub fn binance_pay() -> Self {
        Self {
            method: PaymentMethod::BinancePay,
            base_url: std::env::var("JJX_BINANCE_PAY_URL")
                .unwrap_or_else(|_| BINANCE_PAY_URL.to_string()),
        }
    }

    pub fn blockchain_pay() -> Self {
        Self {
            method: PaymentMethod::BlockchainPay,
            base_url: std::env::var("JJX_BLOCKCHAIN_PAY_URL")
                .unwrap_or_else(|_| BLOCKCHAIN_PAY_URL.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for LinkGateway {
    async fn begin_checkout(&self, plan: Plan) -> Result<CheckoutSession, DomainError> {
        let order_id = uuid::Uuid::new_v4().to_string();
        let approval_url = format!(
            "{}?amount={}&currency=USDT&ref={order_id}",
            self.base_url,
            plan.amount()
        );
        Ok(CheckoutSession {
            order_id,
            approval_url: Some(approval_url),
        })
    }

    async fn confirm(&self, _order_id: &str) -> Result<PaymentConfirmation, DomainError> {
        Err(DomainError::Payment(format!(
            "{} settles externally; there is no confirmation to fetch",
            self.method
        )))
    }
}
