pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Rank,
    Rates,
    Convert {
        from: String,
        to: String,
        amount: f64,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Wallet rates starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let feed = providers::HttpPriceFeed::new(config.providers.feed_url())?;

    match command {
        AppCommand::Rank => cli::rank::run(&config.balances, &config.priorities, &feed).await,
        AppCommand::Rates => cli::rates::run(&feed).await,
        AppCommand::Convert { from, to, amount } => {
            cli::convert::run(&feed, &from, &to, amount).await
        }
    }
}
