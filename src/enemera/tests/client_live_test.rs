#![cfg(test)]
use enemera::curves::ItalyPrices;
use enemera::{Client, Curve, CurveQuery};
use serial_test::serial;

#[tokio::test]
#[serial]
#[ignore]
async fn test_fetch_italy_prices_live() {
    // This test requires ENEMERA_API_KEY to be set in the environment.
    dotenvy::dotenv().ok();
    if std::env::var("ENEMERA_API_KEY").is_err() {
        println!("Skipping test_fetch_italy_prices_live: API key not set.");
        return;
    }

    let client = Client::from_env().expect("Failed to create client");
    let query = CurveQuery::range("2024-01-01", "2024-01-02")
        .market("MGP")
        .zone("NORD");

    let result = client.get::<ItalyPrices>(&query).await;
    assert!(result.is_ok(), "get returned an error: {:?}", result.err());

    let response = result.unwrap();
    assert!(!response.is_empty(), "Expected at least one price record");
    for record in &response {
        assert_eq!(record.market, "MGP");
        assert_eq!(record.zone, "NORD");
    }

    let frame = response.to_frame("utc", false).expect("Failed to build frame");
    assert_eq!(frame.height(), response.len());
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_fetch_frame_cet_live() {
    dotenvy::dotenv().ok();
    if std::env::var("ENEMERA_API_KEY").is_err() {
        println!("Skipping test_fetch_frame_cet_live: API key not set.");
        return;
    }

    let client = Client::from_env().expect("Failed to create client");
    let query = CurveQuery::range("2024-01-01", "2024-01-02");

    let frame = client
        .get_frame_cet(Curve::ItalyLoadActual, &query, true)
        .await
        .expect("get_frame_cet returned an error");
    assert_eq!(frame.get_column_names()[0].as_str(), "utc");
}
