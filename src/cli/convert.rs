use super::{load_rates, ui};
use crate::core::{PriceFeed, convert};
use anyhow::Result;
use tracing::info;

/// Converts with the current feed rates and renders the result line.
pub async fn render(
    feed: &(dyn PriceFeed + Send + Sync),
    from: &str,
    to: &str,
    amount: f64,
) -> Result<String> {
    let rates = load_rates(feed).await;
    info!(currencies = rates.len(), "Loaded exchange rates");

    let conversion = convert(&rates, from, to, amount)?;
    Ok(ui::style_text(
        &conversion.to_string(),
        ui::StyleType::TotalValue,
    ))
}

pub async fn run(
    feed: &(dyn PriceFeed + Send + Sync),
    from: &str,
    to: &str,
    amount: f64,
) -> Result<()> {
    println!("{}", render(feed, from, to, amount).await?);
    Ok(())
}
