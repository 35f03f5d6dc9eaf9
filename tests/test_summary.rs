mod common;

use common::{draft, signed_in};

#[tokio::test]
async fn test_empty_summary() {
    let app = signed_in("u1@example.com").await;
    let summary = app.summary().await.unwrap();
    assert_eq!(summary.operations, 0);
    assert_eq!(summary.total_profit, 0.0);
    assert!(summary.pairs.is_empty());
    assert!(summary.chart.is_empty());
}

#[tokio::test]
async fn test_totals_match_stored_profits() {
    let app = signed_in("u1@example.com").await;
    app.save_operation(&draft("BTC", "USDT", 25000.0, 25500.0))
        .await
        .unwrap();
    app.save_operation(&draft("ETH", "USDT", 2000.0, 1950.0))
        .await
        .unwrap();
    app.save_operation(&draft("BTC", "USDT", 26000.0, 26100.0))
        .await
        .unwrap();

    let summary = app.summary().await.unwrap();
    assert_eq!(summary.operations, 3);
    assert_eq!(summary.total_profit, 550.0);

    let btc = summary.pairs.iter().find(|p| p.pair == "BTC/USDT").unwrap();
    assert_eq!(btc.operations, 2);
    assert_eq!(btc.profit, 600.0);
}

#[tokio::test]
async fn test_chart_is_cumulative_and_oldest_first() {
    let app = signed_in("u1@example.com").await;
    app.save_operation(&draft("BTC", "USDT", 100.0, 300.0))
        .await
        .unwrap();
    app.save_operation(&draft("BTC", "USDT", 100.0, 50.0))
        .await
        .unwrap();

    let summary = app.summary().await.unwrap();
    assert_eq!(summary.chart.len(), 2);
    assert_eq!(summary.chart[0].cumulative_profit, 200.0);
    assert_eq!(summary.chart[1].cumulative_profit, 150.0);
    assert!(summary.chart[0].at <= summary.chart[1].at);
}
