use crate::domain::error::DomainError;
use crate::domain::ports::payment_gateway::{PaymentConfirmation, PaymentGateway};
use crate::domain::values::payment_method::PaymentMethod;
use crate::domain::values::plan::Plan;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UpgradeOutcome {
    /// The gateway approved immediately.
    Completed(PaymentConfirmation),
    /// The payer has to approve externally, then confirm with the order id.
    Pending {
        order_id: String,
        approval_url: String,
    },
}

pub struct UpgradeUseCase {
    gateways: HashMap<PaymentMethod, Arc<dyn PaymentGateway>>,
    /// Gateway used for confirming pending checkouts.
    checkout: Arc<dyn PaymentGateway>,
}

impl UpgradeUseCase {
    pub fn new(
        checkout: Arc<dyn PaymentGateway>,
        links: Vec<(PaymentMethod, Arc<dyn PaymentGateway>)>,
    ) -> Self {
        let mut gateways: HashMap<_, _> = links.into_iter().collect();
        gateways.insert(PaymentMethod::Paypal, checkout.clone());
        Self { gateways, checkout }
    }

    pub async fn begin(
        &self,
        method: PaymentMethod,
        plan: Plan,
    ) -> Result<UpgradeOutcome, DomainError> {
        let gateway = self
            .gateways
            .get(&method)
            .ok_or_else(|| DomainError::Payment(format!("no gateway for {method}")))?;
        let checkout = gateway.begin_checkout(plan).await?;
        match checkout.approval_url {
            None => {
                let confirmation = gateway.confirm(&checkout.order_id).await?;
                Ok(UpgradeOutcome::Completed(confirmation))
            }
            Some(approval_url) => Ok(UpgradeOutcome::Pending {
                order_id: checkout.order_id,
                approval_url,
            }),
        }
    }

    pub async fn confirm(&self, order_id: &str) -> Result<PaymentConfirmation, DomainError> {
        self.checkout.confirm(order_id).await
    }
}
