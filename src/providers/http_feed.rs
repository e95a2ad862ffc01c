use super::util::with_retry;
use crate::core::{PriceEntry, PriceFeed};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, error, instrument, warn};

/// Parses the feed body. The body must be a JSON array; elements that do not
/// form a valid entry are skipped so one bad row does not hide the others.
fn parse_price_entries(body: &str) -> serde_json::Result<Vec<PriceEntry>> {
    let items: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = items.len();
    let entries: Vec<PriceEntry> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<PriceEntry>(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, entry = %item, "Skipping malformed price entry");
                None
            }
        })
        .collect();
    if entries.len() < total {
        debug!("Kept {} of {} price entries", entries.len(), total);
    }
    Ok(entries)
}

/// Reads the price feed from a JSON endpoint returning an array of
/// `{currency, price, date}` objects.
pub struct HttpPriceFeed {
    url: String,
    client: reqwest::Client,
}

impl HttpPriceFeed {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("wallet-rates/1.0")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpPriceFeed {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    #[instrument(name = "PriceFeedFetch", skip(self), fields(url = %self.url))]
    async fn fetch_prices(&self) -> Result<Vec<PriceEntry>> {
        debug!("Requesting price feed");
        let response = with_retry(|| async { self.client.get(&self.url).send().await }, 3, 500)
            .await
            .with_context(|| format!("Failed to send request to price feed: {}", self.url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for price feed: {}",
                response.status(),
                self.url
            ));
        }

        let response_text = response
            .text()
            .await
            .context("Failed to get price feed response text")?;

        let entries = match parse_price_entries(&response_text) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse price feed response"
                );
                return Err(e).context("Failed to parse price feed response");
            }
        };

        debug!("Received {} price entries", entries.len());
        Ok(entries)
    }
}
