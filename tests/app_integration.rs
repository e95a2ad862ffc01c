use std::fs;
use tracing::info;
use wallet_rates::cli;
use wallet_rates::core::ConversionError;
use wallet_rates::core::config::AppConfig;
use wallet_rates::providers::HttpPriceFeed;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const PRICES_JSON: &str = r#"[
        {"currency":"USD","date":"2023-08-29T07:10:30.000Z","price":1},
        {"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.9337373737374},
        {"currency":"ETH","date":"2023-08-29T07:10:40.000Z","price":1600.0},
        {"currency":"OSMO","date":"2023-08-29T07:10:50.000Z","price":0.3772974333333333},
        {"currency":"EUR","date":"2023-08-29T07:10:30.000Z","price":0.9}
    ]"#;

    pub async fn create_feed_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices.json"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(feed_uri: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
        balances:
          - currency: "ETH"
            amount: 1.5
            blockchain: "Ethereum"
          - currency: "OSMO"
            amount: 100.0
            blockchain: "Osmosis"
          - currency: "XYZ"
            amount: 2.0
            blockchain: "Unknown"
        priorities:
          Osmosis: 100
          Ethereum: 50
        providers:
          feed:
            url: "{feed_uri}/prices.json"
    "#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_rank_flow_with_mock_feed() {
    let mock_server = test_utils::create_feed_server(200, test_utils::PRICES_JSON).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = wallet_rates::run_command(
        wallet_rates::AppCommand::Rank,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Rank command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_rank_flow_survives_feed_outage() {
    let mock_server = test_utils::create_feed_server(500, "oops").await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = wallet_rates::run_command(
        wallet_rates::AppCommand::Rank,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Rank should tolerate a failed feed");
}

#[test_log::test(tokio::test)]
async fn test_rates_flow_with_mock_feed() {
    let mock_server = test_utils::create_feed_server(200, test_utils::PRICES_JSON).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = wallet_rates::run_command(
        wallet_rates::AppCommand::Rates,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_convert_flow_with_mock_feed() {
    let mock_server = test_utils::create_feed_server(200, test_utils::PRICES_JSON).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    info!("Converting 100 USD to EUR");
    let result = wallet_rates::run_command(
        wallet_rates::AppCommand::Convert {
            from: "USD".to_string(),
            to: "EUR".to_string(),
            amount: 100.0,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_flow_missing_currency() {
    let mock_server = test_utils::create_feed_server(200, test_utils::PRICES_JSON).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let err = wallet_rates::run_command(
        wallet_rates::AppCommand::Convert {
            from: "USD".to_string(),
            to: "GBP".to_string(),
            amount: 10.0,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ConversionError>(),
        Some(&ConversionError::MissingRate {
            currency: "GBP".to_string()
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("config.yaml");
    assert!(!missing.exists());

    let result =
        wallet_rates::run_command(wallet_rates::AppCommand::Rank, missing.to_str()).await;
    assert!(result.is_err());
    assert!(fs::metadata(&missing).is_err());
}

#[test_log::test(tokio::test)]
async fn test_rank_report_orders_and_values_balances() {
    let mock_server = test_utils::create_feed_server(200, test_utils::PRICES_JSON).await;
    let config_file = test_utils::write_config(&mock_server.uri());
    let config = AppConfig::load_from_path(config_file.path()).unwrap();
    let feed = HttpPriceFeed::new(config.providers.feed_url()).unwrap();

    let output = cli::rank::render(&config.balances, &config.priorities, &feed).await;
    info!("Rank report:\n{output}");

    let osmo = output.find("OSMO").expect("OSMO row");
    let eth = output.find("ETH").expect("ETH row");
    assert!(osmo < eth, "{output}");
    assert!(!output.contains("XYZ"), "{output}");
    // 100 * 0.3772974333333333 and 1.5 * 1645.9337373737374
    assert!(output.contains("37.73"), "{output}");
    assert!(output.contains("2468.90"), "{output}");
    assert!(output.contains("2506.63"), "{output}");
}

#[test_log::test(tokio::test)]
async fn test_convert_report_with_mock_feed() {
    let mock_server = test_utils::create_feed_server(200, test_utils::PRICES_JSON).await;
    let feed = HttpPriceFeed::new(&format!("{}/prices.json", mock_server.uri())).unwrap();

    let output = cli::convert::render(&feed, "USD", "EUR", 100.0).await.unwrap();
    assert!(output.contains("100 USD = 90.000000 EUR"), "{output}");
}

#[test_log::test(tokio::test)]
async fn test_rates_report_skips_bad_entries() {
    let body = r#"[
        {"currency":"USD","date":"2024-01-01","price":1.0},
        {"currency":"EUR","date":"2024-01-01T00:00:00","price":0.9},
        {"currency":"BAD","date":"someday","price":3.0}
    ]"#;
    let mock_server = test_utils::create_feed_server(200, body).await;
    let feed = HttpPriceFeed::new(&format!("{}/prices.json", mock_server.uri())).unwrap();

    let output = cli::rates::render(&feed).await;
    assert!(output.contains("USD"), "{output}");
    assert!(output.contains("EUR"), "{output}");
    assert!(!output.contains("BAD"), "{output}");
}
