use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pantry_core::conversion::{compare_quantities, convert_units, format_quantity};
use pantry_core::receipt_config::ReceiptConfig;
use pantry_core::receipt_parser::ReceiptParser;
use std::cmp::Ordering;
use std::env;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Cooking unit conversion and receipt parsing")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a quantity between units
    Convert {
        quantity: f64,
        from_unit: String,
        to_unit: String,
        /// Ingredient name, used for volume <-> weight densities
        #[arg(short, long, default_value = "")]
        ingredient: String,
    },
    /// Compare two quantities, printing <, = or >
    Compare {
        quantity1: f64,
        unit1: String,
        quantity2: f64,
        unit2: String,
        #[arg(short, long, default_value = "")]
        ingredient: String,
    },
    /// Parse receipt text into pantry items (JSON on stdout)
    Receipt {
        /// Receipt text file; reads stdin when omitted
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Convert {
            quantity,
            from_unit,
            to_unit,
            ingredient,
        } => {
            let converted = convert_units(quantity, &from_unit, &to_unit, &ingredient);
            println!("{} {}", format_quantity(converted), to_unit);
        }
        Command::Compare {
            quantity1,
            unit1,
            quantity2,
            unit2,
            ingredient,
        } => {
            let symbol = match compare_quantities(quantity1, &unit1, quantity2, &unit2, &ingredient)
            {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            };
            println!("{quantity1} {unit1} {symbol} {quantity2} {unit2}");
        }
        Command::Receipt { path } => {
            let text = match path {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read receipt file {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read receipt text from stdin")?;
                    buffer
                }
            };

            let mut config = ReceiptConfig::default();
            if let Ok(unit) = env::var("PANTRY_DEFAULT_UNIT") {
                info!("Using default unit from environment: {}", unit);
                config.default_unit = unit;
            }

            let parser = ReceiptParser::with_config(config)?;
            let items = parser.parse(&text);
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    Ok(())
}
