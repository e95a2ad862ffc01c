use super::{load_rates, ui};
use crate::core::{PriceFeed, RateTable};
use anyhow::Result;
use comfy_table::Cell;

fn display_as_table(rates: &RateTable) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Price")]);

    for (currency, rate) in rates.iter() {
        table.add_row(vec![Cell::new(currency), ui::amount_cell(&rate.to_string())]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Exchange Rates", ui::StyleType::Title),
        table
    )
}

pub async fn render(feed: &(dyn PriceFeed + Send + Sync)) -> String {
    let rates = load_rates(feed).await;
    if rates.is_empty() {
        return ui::style_text("No exchange rates available.", ui::StyleType::Error);
    }
    display_as_table(&rates)
}

pub async fn run(feed: &(dyn PriceFeed + Send + Sync)) -> Result<()> {
    println!("{}", render(feed).await);
    Ok(())
}
