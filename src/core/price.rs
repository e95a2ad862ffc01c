//! Price feed abstraction

use crate::core::rates::PriceEntry;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetches the raw feed. Entries may repeat a currency and are not ordered.
    async fn fetch_prices(&self) -> Result<Vec<PriceEntry>>;
}
