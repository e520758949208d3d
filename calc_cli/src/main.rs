//! # Estimator CLI
//!
//! Command-line front end for facade insulation quotations.
//!
//! ```text
//! estimator quote --system FORM --area 90 --thickness 60
//! estimator quote -s RC -a 120 --vat --format csv > quote.csv
//! estimator prices show
//! estimator prices set-rate labor "패턴거푸집 시공비" 13000
//! estimator prices reset
//! ```
//!
//! The price table is read from `--prices`, `ESTIMATOR_PRICES`, or the
//! platform config directory, and falls back to built-in prices when no
//! file has been saved yet.

mod config;
mod logging;
mod prices;
mod quote;

use std::path::PathBuf;

use anyhow::Result;
use calc_core::api::PriceApi;
use calc_core::store::{FileStore, PriceStore};
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[clap(name = "estimator", version, about)]
struct Cli {
    /// Price table file
    #[clap(long, global = true)]
    prices: Option<PathBuf>,

    /// Debug logging to stderr
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a quotation
    Quote(quote::QuoteArgs),
    /// Maintain the price table
    #[clap(subcommand)]
    Prices(prices::PricesCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let path = config::price_path(cli.prices.clone())?;
    debug!(path = %path.display(), "price table location");
    let store = FileStore::new(path, config::user_id());

    match &cli.command {
        Command::Quote(args) => {
            let prices = store.load()?;
            quote::exec(args, &prices)
        }
        Command::Prices(command) => prices::exec(command, &mut PriceApi::new(store)),
    }
}
