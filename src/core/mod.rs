//! Core business logic abstractions

pub mod balance;
pub mod config;
pub mod conversion;
pub mod log;
pub mod money;
pub mod price;
pub mod rates;

// Re-export main types for cleaner imports
pub use balance::{BalanceBook, BalanceRecord, PriceTable, PriorityTable, RankedBalance, rank};
pub use conversion::{ConversionError, ConversionResult, convert};
pub use price::PriceFeed;
pub use rates::{PriceEntry, RateTable, build_rate_table};
