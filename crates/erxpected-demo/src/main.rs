//! Erxpected demo entry point
//!
//! Runs the sample call sites and prints how each outcome was classified.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use erxpected::prelude::*;
use erxpected::{config, Config, UnwrapPolicy};

mod samples;

/// Demonstrates classified outcomes, composition and ordered catching
#[derive(Debug, Parser)]
#[command(name = "erxpected-demo")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the unwrap policy (panic or abort)
    #[arg(long)]
    unwrap_policy: Option<UnwrapPolicy>,

    /// Log every constructed failure
    #[arg(long)]
    trace_failures: bool,

    /// Divide this numerator by the denominator
    #[arg(long, default_value = "10")]
    numerator: String,

    /// Denominator for the division sample
    #[arg(long, default_value = "0")]
    denominator: String,

    /// Finish by unwrapping a failed outcome
    #[arg(long)]
    crash: bool,
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;
    let layer = fmt::layer().with_target(true).with_level(true);
    tracing::subscriber::set_global_default(Registry::default().with(filter).with(layer))
        .context("failed to install tracing subscriber")?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    if let Some(policy) = cli.unwrap_policy {
        config.unwrap_policy = policy;
    }
    config.trace_failures |= cli.trace_failures;
    Ok(config)
}

fn report(label: &str, outcome: &Outcome<i32>) {
    match outcome {
        Outcome::Value(value) => println!("{:<22} value {}", label, value),
        Outcome::Error(error) => {
            let family = if error.is::<MathError>() {
                "math"
            } else if error.is::<ValueError>() {
                "value"
            } else {
                "runtime"
            };
            println!("{:<22} {} error: {}", label, family, error);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    config::install(load_config(&cli)?)?;

    report("ok", &samples::ok());
    report("monadic_ok", &samples::monadic_ok());
    report("maybe_a", &samples::maybe_a());
    report("maybe_b", &samples::maybe_b());
    report("inspect_then_rethrow", &samples::inspect_then_rethrow());
    report("recovered", &samples::recovered());

    let quotient = fallible(|| {
        let numerator = samples::parse_positive(&cli.numerator).into_result()?;
        let denominator = match cli.denominator.trim().parse::<i32>() {
            Ok(value) => value,
            Err(_) => return Err(ValueError::new(format!("not a number: {:?}", cli.denominator)).into()),
        };
        samples::divide(numerator, denominator).into_result()
    });
    report("divide", &quotient);

    let wrong = samples::maybe_b();
    if let Some(error) = wrong.catch_as::<RuntimeError>() {
        println!("caught as RuntimeError: {}", error.what());
    }

    if cli.crash {
        tracing::warn!("unwrapping a failed outcome on request");
        let value = wrong.unwrap();
        println!("unreachable: {}", value);
    }

    Ok(())
}
