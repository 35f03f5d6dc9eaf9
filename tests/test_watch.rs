mod common;

use common::{draft, signed_in};

#[tokio::test]
async fn test_subscription_seeded_with_current_snapshot() {
    let app = signed_in("u1@example.com").await;
    app.save_operation(&draft("BTC", "USDT", 100.0, 110.0))
        .await
        .unwrap();

    let mut rx = app.watch_operations().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].base, "BTC");
}

#[tokio::test]
async fn test_full_snapshot_redelivered_on_create() {
    let app = signed_in("u1@example.com").await;
    let mut rx = app.watch_operations().await.unwrap();
    assert!(rx.borrow_and_update().is_empty());

    app.save_operation(&draft("BTC", "USDT", 100.0, 110.0))
        .await
        .unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().len(), 1);

    app.save_operation(&draft("ETH", "USDT", 50.0, 45.0))
        .await
        .unwrap();
    rx.changed().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    // The complete current list, newest first — not a diff.
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].base, "ETH");
}

#[tokio::test]
async fn test_drop_cancels_subscription_and_saves_still_work() {
    let app = signed_in("u1@example.com").await;
    let rx = app.watch_operations().await.unwrap();
    drop(rx);

    app.save_operation(&draft("BTC", "USDT", 100.0, 110.0))
        .await
        .unwrap();

    // A fresh subscription sees the write.
    let mut rx = app.watch_operations().await.unwrap();
    assert_eq!(rx.borrow_and_update().len(), 1);
}

#[tokio::test]
async fn test_two_subscribers_see_the_same_snapshots() {
    let app = signed_in("u1@example.com").await;
    let mut rx1 = app.watch_operations().await.unwrap();
    let mut rx2 = app.watch_operations().await.unwrap();

    app.save_operation(&draft("BTC", "USDT", 1.0, 2.0))
        .await
        .unwrap();
    rx1.changed().await.unwrap();
    rx2.changed().await.unwrap();
    assert_eq!(*rx1.borrow_and_update(), *rx2.borrow_and_update());
}
