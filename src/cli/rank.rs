use super::{load_rates, ui};
use crate::core::money::format_fixed;
use crate::core::{BalanceBook, BalanceRecord, PriceFeed, PriorityTable, RankedBalance};
use anyhow::Result;
use comfy_table::Cell;
use std::sync::Arc;
use tracing::debug;

/// Sum of the USD values, or `None` when any row has no price.
fn total_usd_value(rows: &[RankedBalance]) -> Option<f64> {
    rows.iter().map(|r| r.usd_value).sum()
}

fn display_as_table(rows: &[RankedBalance]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Blockchain"),
        ui::header_cell("Amount"),
        ui::header_cell("Value (USD)"),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.currency),
            Cell::new(&row.blockchain),
            ui::amount_cell(&row.formatted_amount),
            ui::format_optional_cell(row.usd_value, |v| format_fixed(v, 2)),
        ]);
    }

    let (total, total_style_type) = match total_usd_value(rows) {
        Some(v) => (format_fixed(v, 2), ui::StyleType::TotalValue),
        None => ("N/A".to_string(), ui::StyleType::Error),
    };

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Wallet Balances", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\nTotal Value ({}): {}",
        ui::style_text("USD", ui::StyleType::TotalLabel),
        ui::style_text(&total, total_style_type)
    ));
    output
}

/// Ranks `balances`, prices them from `feed` and renders the report.
pub async fn render(
    balances: &[BalanceRecord],
    priorities: &PriorityTable,
    feed: &(dyn PriceFeed + Send + Sync),
) -> String {
    let book = BalanceBook::new(Arc::from(balances), priorities.clone());
    debug!(ranked = book.len(), "Ranked wallet balances");
    if book.is_empty() {
        return ui::style_text("No balances to display.", ui::StyleType::Subtle);
    }

    let prices = load_rates(feed).await.to_price_table();
    display_as_table(&book.value(&prices))
}

pub async fn run(
    balances: &[BalanceRecord],
    priorities: &PriorityTable,
    feed: &(dyn PriceFeed + Send + Sync),
) -> Result<()> {
    println!("{}", render(balances, priorities, feed).await);
    Ok(())
}
