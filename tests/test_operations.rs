mod common;

use common::{draft, setup, signed_in};
use jjxcapital::domain::entities::operation::NewOperation;
use jjxcapital::domain::error::DomainError;
use jjxcapital::domain::ports::operation_repository::OperationFilter;

#[tokio::test]
async fn test_save_without_session_rejected_before_store() {
    let app = setup();
    app.restore_session().await;

    let err = app
        .save_operation(&draft("BTC", "USDT", 25000.0, 25500.0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(_)));

    // Nothing was persisted: the same store is empty once someone signs in.
    app.register("u1@example.com", "secret1", None).await.unwrap();
    let ops = app.list_operations(&OperationFilter::default()).await.unwrap();
    assert!(ops.is_empty());
}

#[tokio::test]
async fn test_profit_derived_at_save() {
    let app = signed_in("u1@example.com").await;
    let op = app
        .save_operation(&draft("BTC", "USDT", 25000.0, 25500.0))
        .await
        .unwrap();

    assert_eq!(op.profit, 500.0);

    let ops = app.list_operations(&OperationFilter::default()).await.unwrap();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].profit, 500.0);
    assert_eq!(ops[0].base, "BTC");
    assert_eq!(ops[0].quote, "USDT");
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = signed_in("u1@example.com").await;
    app.save_operation(&draft("BTC", "USDT", 100.0, 110.0))
        .await
        .unwrap();
    app.save_operation(&draft("ETH", "USDT", 50.0, 45.0))
        .await
        .unwrap();

    let ops = app.list_operations(&OperationFilter::default()).await.unwrap();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].base, "ETH");
    assert_eq!(ops[1].base, "BTC");
    assert!(ops[0].created_at >= ops[1].created_at);
}

#[tokio::test]
async fn test_list_is_owner_scoped() {
    let app = signed_in("u1@example.com").await;
    app.save_operation(&draft("BTC", "USDT", 100.0, 110.0))
        .await
        .unwrap();
    app.logout().await;

    app.register("u2@example.com", "secret1", None).await.unwrap();
    app.save_operation(&draft("XRP", "USDT", 1.0, 1.2))
        .await
        .unwrap();

    let ops = app.list_operations(&OperationFilter::default()).await.unwrap();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].base, "XRP");

    app.logout().await;
    app.login("u1@example.com", "secret1").await.unwrap();
    let ops = app.list_operations(&OperationFilter::default()).await.unwrap();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].base, "BTC");
}

#[tokio::test]
async fn test_list_is_idempotent_between_writes() {
    let app = signed_in("u1@example.com").await;
    app.save_operation(&draft("BTC", "USDT", 10.0, 12.0))
        .await
        .unwrap();
    app.save_operation(&draft("ETH", "USDT", 5.0, 6.0))
        .await
        .unwrap();

    let first = app.list_operations(&OperationFilter::default()).await.unwrap();
    let second = app.list_operations(&OperationFilter::default()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_limit_filter() {
    let app = signed_in("u1@example.com").await;
    for i in 0..5 {
        app.save_operation(&draft("BTC", "USDT", 100.0, 100.0 + i as f64))
            .await
            .unwrap();
    }

    let ops = app
        .list_operations(&OperationFilter {
            limit: Some(3),
            since: None,
        })
        .await
        .unwrap();
    assert_eq!(ops.len(), 3);
    // Newest of the five comes first.
    assert_eq!(ops[0].price_sell, 104.0);
}

#[tokio::test]
async fn test_optional_fields_round_trip() {
    let app = signed_in("u1@example.com").await;
    let draft = NewOperation::new(
        "BTC".into(),
        "USDT".into(),
        25000.0,
        25500.0,
        Some("Binance".into()),
        Some("fast P2P flip".into()),
        Some(chrono::NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()),
    )
    .unwrap();
    app.save_operation(&draft).await.unwrap();

    let ops = app.list_operations(&OperationFilter::default()).await.unwrap();
    assert_eq!(ops[0].exchange.as_deref(), Some("Binance"));
    assert_eq!(ops[0].note.as_deref(), Some("fast P2P flip"));
    assert_eq!(
        ops[0].trade_date,
        Some(chrono::NaiveDate::from_ymd_opt(2026, 8, 30).unwrap())
    );
}
