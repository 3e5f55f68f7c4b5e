//! Computes a loan repayment schedule from a calculator webhook request.
//!
//! ```bash
//! # request from a file
//! b2wall-schedule --input request.json --pretty
//!
//! # request on stdin, same-day repayments summed
//! cat request.json | b2wall-schedule --same-day aggregate
//!
//! # refuse plans whose repayments do not add up to the loan
//! b2wall-schedule --input request.json --enforce-total
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `info`).

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use b2wall_repayment::locale::parse_amount;
use b2wall_repayment::{handle_request, CalculatorConfig, Money, SameDayPolicy};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Day-indexed loan repayment schedule calculator
#[derive(Parser)]
#[command(name = "b2wall-schedule", version, about)]
struct Cli {
    /// Request json file, stdin when omitted
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Calculator configuration json file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Allowed gap between the repayments and the loan amount (Persian digits accepted)
    #[arg(long)]
    tolerance: Option<String>,

    /// How to treat repayments that share a day
    #[arg(long, value_enum)]
    same_day: Option<SameDayArg>,

    /// Reject repayment plans that do not cover the whole loan
    #[arg(long)]
    enforce_total: bool,

    /// Pretty-print the response
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SameDayArg {
    Reject,
    Aggregate,
}

impl From<SameDayArg> for SameDayPolicy {
    fn from(arg: SameDayArg) -> Self {
        match arg {
            SameDayArg::Reject => SameDayPolicy::Reject,
            SameDayArg::Aggregate => SameDayPolicy::Aggregate,
        }
    }
}

fn main() {
    init_tracing();

    match run(Cli::parse()) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(2),
        Err(e) => {
            tracing::error!(error = %e, "b2wall-schedule failed");
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

/// returns whether the calculation succeeded
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(&cli)?;
    let body = read_body(cli.input.as_ref())?;

    let response = handle_request(&body, &config);
    let json = if cli.pretty {
        response.to_json_pretty()?
    } else {
        response.to_json()?
    };
    println!("{}", json);

    Ok(response.is_success())
}

fn load_config(cli: &Cli) -> anyhow::Result<CalculatorConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            CalculatorConfig::from_json(&text)?
        }
        None => CalculatorConfig::default(),
    };

    if let Some(tolerance) = &cli.tolerance {
        config.repayment_tolerance = Money::from_decimal(parse_amount(tolerance)?);
    }
    if let Some(same_day) = cli.same_day {
        config.same_day_policy = same_day.into();
    }
    if cli.enforce_total {
        config.enforce_repayment_total = true;
    }

    config.validate()?;
    tracing::debug!(?config, "calculator configured");
    Ok(config)
}

fn read_body(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read request '{}'", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read request from stdin")?;
            Ok(buffer)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
