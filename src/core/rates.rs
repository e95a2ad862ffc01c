//! Rate table built from a price feed.
use crate::core::balance::PriceTable;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, warn};

/// One element of the price feed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceEntry {
    pub currency: String,
    pub price: f64,
    #[serde(deserialize_with = "deserialize_feed_date")]
    pub date: DateTime<Utc>,
}

/// Parses an ISO-8601 date as found in the feed. Timestamps without an offset
/// and plain dates are taken as UTC, a plain date at midnight.
pub fn parse_feed_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn deserialize_feed_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_feed_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

/// Latest known price per currency, all expressed in the same base unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn get(&self, currency: &str) -> Option<f64> {
        self.rates.get(currency).copied()
    }

    /// Currency codes in sorted order.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(c, r)| (c.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn to_price_table(&self) -> PriceTable {
        self.rates.iter().map(|(c, r)| (c.clone(), *r)).collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|(c, r)| (c.into(), r)).collect(),
        }
    }
}

/// Keeps the most recent price of every currency in `entries`.
///
/// An entry replaces the current one only when its date is strictly later, so
/// on equal dates the first entry seen wins. Prices that are not finite and
/// positive are skipped.
pub fn build_rate_table(entries: &[PriceEntry]) -> RateTable {
    let mut latest: BTreeMap<&str, &PriceEntry> = BTreeMap::new();

    for entry in entries {
        if !entry.price.is_finite() || entry.price <= 0.0 {
            warn!(
                currency = %entry.currency,
                price = entry.price,
                "Skipping unusable price"
            );
            continue;
        }
        match latest.entry(entry.currency.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(mut slot) => {
                if slot.get().date < entry.date {
                    slot.insert(entry);
                }
            }
        }
    }

    debug!(
        entries = entries.len(),
        currencies = latest.len(),
        "Built rate table"
    );

    latest
        .into_iter()
        .map(|(currency, entry)| (currency, entry.price))
        .collect()
}
