use crate::domain::error::DomainError;
use crate::domain::ports::payment_gateway::{CheckoutSession, PaymentConfirmation, PaymentGateway};
use crate::domain::values::plan::Plan;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::OnceCell;

/// PayPal Orders v2. The OAuth access token is fetched lazily at most
/// once per gateway lifetime; orders go through create → payer approval
/// at the returned link → capture.
pub struct PaypalGateway {
    client: Client,
    client_id: String,
    secret: String,
    base_url: String,
    token: OnceCell<String>,
}

impl PaypalGateway {
    pub fn new(client_id: String, secret: String, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            client_id,
            secret,
            base_url: base_url.unwrap_or_else(|| "https://api-m.paypal.com".to_string()),
            token: OnceCell::new(),
        }
    }

    async fn access_token(&self) -> Result<&str, DomainError> {
        let token = self
            .token
            .get_or_try_init(|| async {
                let resp = self
                    .client
                    .post(format!("{}/v1/oauth2/token", self.base_url))
                    .basic_auth(&self.client_id, Some(&self.secret))
                    .form(&[("grant_type", "client_credentials")])
                    .send()
                    .await
                    .map_err(|e| DomainError::Payment(format!("PayPal unreachable: {e}")))?;
                if !resp.status().is_success() {
                    let status = resp.status();
                    return Err(DomainError::Payment(format!("PayPal auth {status}")));
                }
                let body: Value = resp
                    .json()
                    .await
                    .map_err(|e| DomainError::Payment(format!("Parse error: {e}")))?;
                body["access_token"]
                    .as_str()
                    .map(String::from)
                    .ok_or_else(|| DomainError::Payment("no access token in response".into()))
            })
            .await?;
        Ok(token.as_str())
    }
}

#[async_trait::async_trait]
impl PaymentGateway for PaypalGateway {
    async fn begin_checkout(&self, plan: Plan) -> Result<CheckoutSession, DomainError> {
        let token = self.access_token().await?;
        let resp = self
            .client
            .post(format!("{}/v2/checkout/orders", self.base_url))
            .bearer_auth(token)
            .json(&json!({
                "intent": "CAPTURE",
                "purchase_units": [{
                    "description": format!("JJXCAPITAL {plan} plan"),
                    "amount": { "currency_code": "USD", "value": plan.amount() }
                }]
            }))
            .send()
            .await
            .map_err(|e| DomainError::Payment(format!("PayPal unreachable: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Payment(format!("PayPal {status}: {body}")));
        }

        let order: Value = resp
            .json()
            .await
            .map_err(|e| DomainError::Payment(format!("Parse error: {e}")))?;
        let order_id = order["id"]
            .as_str()
            .ok_or_else(|| DomainError::Payment("order id missing".into()))?
            .to_string();
        let approval_url = order["links"]
            .as_array()
            .and_then(|links| {
                links
                    .iter()
                    .find(|l| l["rel"].as_str() == Some("approve"))
                    .and_then(|l| l["href"].as_str())
            })
            .map(String::from);

        Ok(CheckoutSession {
            order_id,
            approval_url,
        })
    }

    async fn confirm(&self, order_id: &str) -> Result<PaymentConfirmation, DomainError> {
        let token = self.access_token().await?;
        let resp = self
            .client
            .post(format!(
                "{}/v2/checkout/orders/{order_id}/capture",
                self.base_url
            ))
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| DomainError::Payment(format!("PayPal unreachable: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Payment(format!("PayPal {status}: {body}")));
        }

        let capture: Value = resp
            .json()
            .await
            .map_err(|e| DomainError::Payment(format!("Parse error: {e}")))?;
        let payer_name = capture["payer"]["name"]["given_name"]
            .as_str()
            .unwrap_or("PayPal customer")
            .to_string();

        Ok(PaymentConfirmation {
            order_id: order_id.to_string(),
            payer_name,
        })
    }
}
