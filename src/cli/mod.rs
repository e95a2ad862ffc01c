pub mod convert;
pub mod rank;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::{PriceFeed, RateTable, build_rate_table};
use tracing::warn;

/// Fetches the feed and builds the rate table. A failed fetch is not fatal:
/// it is logged and an empty table ("no data yet") is returned.
pub async fn load_rates(feed: &(dyn PriceFeed + Send + Sync)) -> RateTable {
    let pb = ui::new_spinner("Fetching prices...");
    let result = feed.fetch_prices().await;
    pb.finish_and_clear();

    match result {
        Ok(entries) => build_rate_table(&entries),
        Err(e) => {
            warn!(error = %e, "Price feed unavailable, continuing without prices");
            RateTable::default()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_utils::{FailingFeed, StaticFeed};
    use super::*;

    #[tokio::test]
    async fn test_load_rates_builds_table() {
        let feed = StaticFeed(vec![
            ("ETH", 1600.0, "2023-08-29T07:10:40Z"),
            ("ETH", 1645.9, "2023-08-29T07:10:52Z"),
        ]);
        let rates = load_rates(&feed).await;
        assert_eq!(rates.get("ETH"), Some(1645.9));
    }

    #[tokio::test]
    async fn test_load_rates_tolerates_feed_failure() {
        let rates = load_rates(&FailingFeed).await;
        assert!(rates.is_empty());
    }
}
