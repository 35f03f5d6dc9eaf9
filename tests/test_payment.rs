mod common;

use common::{setup, signed_in};
use jjxcapital::application::upgrade::UpgradeOutcome;
use jjxcapital::domain::error::DomainError;
use jjxcapital::domain::values::payment_method::PaymentMethod;

#[tokio::test]
async fn test_upgrade_requires_session() {
    let app = setup();
    app.restore_session().await;
    let err = app.upgrade(PaymentMethod::Paypal).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(_)));
}

#[tokio::test]
async fn test_sandbox_upgrade_completes_immediately() {
    let app = signed_in("u1@example.com").await;
    match app.upgrade(PaymentMethod::Paypal).await.unwrap() {
        UpgradeOutcome::Completed(confirmation) => {
            assert!(!confirmation.order_id.is_empty());
            assert_eq!(confirmation.payer_name, "Sandbox payer");
        }
        UpgradeOutcome::Pending { .. } => panic!("sandbox checkout should auto-approve"),
    }
}

#[tokio::test]
async fn test_link_methods_yield_approval_url() {
    let app = signed_in("u1@example.com").await;
    for method in [PaymentMethod::BinancePay, PaymentMethod::BlockchainPay] {
        match app.upgrade(method).await.unwrap() {
            UpgradeOutcome::Pending {
                order_id,
                approval_url,
            } => {
                assert!(approval_url.contains(&format!("ref={order_id}")));
                assert!(approval_url.contains("amount=15.00"));
            }
            UpgradeOutcome::Completed(_) => panic!("{method} should hand out a link"),
        }
    }
}

#[tokio::test]
async fn test_payment_method_parsing() {
    assert_eq!(
        "binance".parse::<PaymentMethod>().unwrap(),
        PaymentMethod::BinancePay
    );
    assert_eq!(
        "PayPal".parse::<PaymentMethod>().unwrap(),
        PaymentMethod::Paypal
    );
    assert!("venmo".parse::<PaymentMethod>().is_err());
}
