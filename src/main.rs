use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use keylevels::config::LevelSettings;
use keylevels::indicators::structure::{calculate_key_levels, calculate_support_resistance};
use keylevels::indicators::Timeframe;
use keylevels::ingest::load_candles_from_csv;
use keylevels::logging;
use keylevels::models::{sort_chronologically, Candle, KeyLevel, PriceLevel};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "keylevels")]
#[command(about = "Find support/resistance levels in OHLC CSV exports", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Swing-based support/resistance levels for one series
    Levels {
        /// CSV export with Date, Price, Open, High, Low, Vol. columns
        csv: PathBuf,

        /// Timeframe of the bars: 5m, 10m, 1h, 1d
        #[arg(short, long, default_value = "1d")]
        timeframe: String,

        /// Drop levels whose normalized strength is at or below this (defaults to KEY_LEVELS_MIN_STRENGTH or 20)
        #[arg(long)]
        min_strength: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Prices shared across daily, weekly and monthly bars
    KeyLevels {
        #[arg(long)]
        daily: PathBuf,

        #[arg(long)]
        weekly: PathBuf,

        #[arg(long)]
        monthly: PathBuf,

        #[arg(long)]
        ticker: String,

        #[arg(long)]
        json: bool,
    },
}

fn load_series(path: &Path) -> Result<Vec<Candle>, Box<dyn std::error::Error>> {
    let raw = load_candles_from_csv(path)?;
    let mut candles: Vec<Candle> = raw.iter().map(Candle::from).collect();
    sort_chronologically(&mut candles);
    debug!(path = %path.display(), candles = candles.len(), "Loaded candles");
    Ok(candles)
}

fn print_levels(levels: &[PriceLevel]) {
    println!("{:>12}  {:>9}  type", "price", "strength");
    for level in levels {
        println!(
            "{:>12.2}  {:>9.2}  {}",
            level.price,
            level.strength,
            level.level_type.as_str()
        );
    }
}

fn print_key_levels(levels: &[KeyLevel]) {
    for level in levels {
        println!(
            "{:>4}  {:>12.2}  {:?}  {}",
            level.id,
            level.price,
            level.strength,
            level.last_date.format("%Y-%m-%d")
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let args = Args::parse();

    match args.command {
        Command::Levels {
            csv,
            timeframe,
            min_strength,
            json,
        } => {
            let timeframe: Timeframe = timeframe.parse()?;
            let min_strength = min_strength.unwrap_or(LevelSettings::from_env().min_strength);
            let candles = load_series(&csv)?;
            let levels = calculate_support_resistance(&candles, timeframe, min_strength);

            if json {
                println!("{}", serde_json::to_string_pretty(&levels)?);
            } else {
                print_levels(&levels);
            }
        }
        Command::KeyLevels {
            daily,
            weekly,
            monthly,
            ticker,
            json,
        } => {
            let daily = load_series(&daily)?;
            let weekly = load_series(&weekly)?;
            let monthly = load_series(&monthly)?;
            let levels = calculate_key_levels(&daily, &weekly, &monthly, &ticker);

            if json {
                println!("{}", serde_json::to_string_pretty(&levels)?);
            } else {
                print_key_levels(&levels);
            }
        }
    }

    Ok(())
}
