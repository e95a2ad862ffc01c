use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use wallet_rates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display wallet balances ranked by blockchain priority
    Rank,
    /// Display the latest exchange rates
    Rates,
    /// Convert an amount between two currencies
    Convert {
        /// Currency to convert from
        #[arg(value_parser = parse_currency)]
        from: String,
        /// Currency to convert to
        #[arg(value_parser = parse_currency)]
        to: String,
        /// Amount to convert, a positive number
        #[arg(value_parser = parse_amount)]
        amount: f64,
    },
}

impl From<Commands> for wallet_rates::AppCommand {
    fn from(cmd: Commands) -> wallet_rates::AppCommand {
        match cmd {
            Commands::Rank => wallet_rates::AppCommand::Rank,
            Commands::Rates => wallet_rates::AppCommand::Rates,
            Commands::Convert { from, to, amount } => {
                wallet_rates::AppCommand::Convert { from, to, amount }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn parse_currency(s: &str) -> Result<String, String> {
    let code = s.trim();
    if code.is_empty() {
        return Err("currency is required".to_string());
    }
    Ok(code.to_string())
}

fn parse_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err("amount must be a positive number".to_string());
    }
    Ok(amount)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => wallet_rates::cli::setup::setup(),
        Some(cmd) => wallet_rates::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
