//! Converts an amount between two currencies of a [`RateTable`].
use crate::core::money::format_fixed;
use crate::core::rates::RateTable;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;
use tracing::debug;

/// Fraction digits of a rendered conversion result.
pub const RESULT_DECIMALS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("No exchange rate for currency: {currency}")]
    MissingRate { currency: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub result: String,
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} = {} {}",
            self.amount, self.from_currency, self.result, self.to_currency
        )
    }
}

fn lookup(rates: &RateTable, currency: &str) -> Result<f64, ConversionError> {
    rates.get(currency).ok_or_else(|| ConversionError::MissingRate {
        currency: currency.to_string(),
    })
}

/// Computes `amount * rate(to) / rate(from)`.
///
/// `amount` must be finite and positive. Callers are expected to validate it
/// already, but it is checked again here.
pub fn convert(
    rates: &RateTable,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<ConversionResult, ConversionError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ConversionError::InvalidInput(format!(
            "amount must be a positive number, got {amount}"
        )));
    }

    let from_rate = lookup(rates, from)?;
    let to_rate = lookup(rates, to)?;
    let converted = (amount * to_rate) / from_rate;
    debug!("Converted {amount} {from} at {from_rate} to {to} at {to_rate}: {converted}");

    Ok(ConversionResult {
        from_currency: from.to_string(),
        to_currency: to.to_string(),
        amount,
        result: format_fixed(converted, RESULT_DECIMALS),
    })
}
