/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::json;

use dimensionful::{Resolver, SymbolTable, Unit, UnitError};

#[derive(Parser)]
#[clap(version = env!("CARGO_PKG_VERSION"))]
/// Unit Parser
///
/// Parses unit expressions and outputs their dimensions and CGS
/// conversion factor as JSON.
struct Args {
    /// Increase verbosity (repeat for more).
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
    /// JSON symbol table merged over the built-in CGS table.
    #[clap(long, short)]
    table: Option<PathBuf>,
    /// Render units in CGS base units.
    #[clap(long, short)]
    base: bool,
    /// Also output the conversion factor to this unit.
    #[clap(long)]
    to: Option<String>,
    /// The units to parse.
    #[clap(required = true)]
    unit: Vec<String>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = simplelog::TermLogger::init(
        match args.verbosity {
            0 => simplelog::LevelFilter::Warn,
            1 => simplelog::LevelFilter::Info,
            2 => simplelog::LevelFilter::Debug,
            3.. => simplelog::LevelFilter::Trace,
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Error: failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), UnitError> {
    let table = match &args.table {
        Some(path) => {
            let mut table = SymbolTable::cgs().clone();
            table.extend(SymbolTable::load(path)?);
            table
        }
        None => SymbolTable::cgs().clone(),
    };
    let resolver = Resolver::new(&table);

    let target = match &args.to {
        Some(expr) => Some(Unit::parse_with(expr, &resolver)?),
        None => None,
    };

    let units = args
        .unit
        .iter()
        .map(|s| Unit::parse_with(s, &resolver))
        .collect::<Result<Vec<Unit>, UnitError>>()?;

    for unit in units {
        let rendered = match args.base {
            true => unit.to_base().to_string(),
            false => unit.to_string(),
        };
        let mut output = json!({
            "unit": rendered,
            "dimensions": unit.dimensions(),
            "factor": unit.factor(),
        });
        if let Some(target) = &target {
            output["conversion_factor"] =
                json!(unit.conversion_factor_to(target)?);
        }
        println!("{}", output);
    }

    Ok(())
}
