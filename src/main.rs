//! mc-option-pricer CLI
//!
//! Collects spot, strike, expiry, rate, volatility and iteration count from
//! command-line flags, a TOML run configuration, or interactive prompts (in
//! that order of precedence), then prints the Monte Carlo call and put prices.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use mc_option_pricer::{price_both, McEstimate, PricingParams, RunConfig};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Monte Carlo pricer for European options under Black-Scholes
#[derive(Parser, Debug)]
#[command(name = "mc-option-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Underlying stock price
    #[arg(long)]
    spot: Option<f64>,

    /// Strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Time to expiration in years
    #[arg(long)]
    expiry: Option<f64>,

    /// Risk-free interest rate (continuously compounded)
    #[arg(long, allow_hyphen_values = true)]
    rate: Option<f64>,

    /// Volatility of the underlying stock
    #[arg(long)]
    volatility: Option<f64>,

    /// Number of iterations in the Monte Carlo simulation
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Run configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also print standard errors and a confidence interval at this level (e.g. 0.95)
    #[arg(long)]
    confidence: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Reads answers to free-text prompts.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask<T>(&mut self, prompt: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Err(anyhow!("Input closed while waiting for: {}", prompt.trim()));
        }

        let answer = line.trim();
        answer
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid input {:?} for {:?}: {}", answer, prompt.trim(), e))
    }

    /// `value` if already known, otherwise the answer to `prompt`.
    fn resolve<T>(&mut self, value: Option<T>, prompt: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match value {
            Some(v) => Ok(v),
            None => self.ask(prompt),
        }
    }
}

/// Merge flags over the config file and prompt for anything still missing.
fn collect_params<R: BufRead, W: Write>(
    cli: &Cli,
    config: Option<&RunConfig>,
    prompter: &mut Prompter<R, W>,
) -> Result<PricingParams> {
    let market = config.and_then(|c| c.market);

    let spot = prompter.resolve(
        cli.spot.or(market.map(|m| m.spot)),
        "> Enter the underlying stock price: ",
    )?;
    let strike = prompter.resolve(
        cli.strike.or(market.map(|m| m.strike)),
        "> Enter the Strike Price: ",
    )?;
    let expiry = prompter.resolve(
        cli.expiry.or(market.map(|m| m.expiry)),
        "> Enter the time to Expiration: ",
    )?;
    let rate = prompter.resolve(
        cli.rate.or(market.map(|m| m.rate)),
        "> Enter the risk-free interest rate: ",
    )?;
    let volatility = prompter.resolve(
        cli.volatility.or(market.map(|m| m.volatility)),
        "> Enter the volatility of the underlying stock: ",
    )?;
    let sample_count = prompter.resolve(
        cli.samples.or(config.map(|c| c.simulation.sample_count)),
        "> Enter the number of iterations in the Monte-Carlo Simulation: ",
    )?;

    PricingParams::new(spot, strike, expiry, rate, volatility, sample_count)
}

fn print_banner() {
    println!("Black-Scholes Option Pricer");
    println!("---------------------------------------------");
}

fn print_estimate(label: &str, estimate: &McEstimate, confidence: Option<f64>) -> Result<()> {
    println!("{} option price with Monte-Carlo approach:  {}", label, estimate.price);

    if let Some(level) = confidence {
        match estimate.std_error {
            Some(std_error) => {
                let (lo, hi) = estimate.confidence_interval(level)?;
                println!(
                    "    std error {:.6}, {:.1}% interval [{:.6}, {:.6}]",
                    std_error,
                    level * 100.0,
                    lo,
                    hi
                );
            }
            None => println!("    std error unavailable for a single iteration"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let run_config = match &cli.config {
        Some(path) => Some(RunConfig::from_file(path)?),
        None => None,
    };

    let mut simulation = run_config
        .as_ref()
        .map(|c| c.simulation.clone())
        .unwrap_or_default();
    if let Some(seed) = cli.seed {
        simulation.seed = Some(seed);
    }

    print_banner();

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let params = collect_params(&cli, run_config.as_ref(), &mut prompter)?;

    info!(
        spot = params.spot(),
        strike = params.strike(),
        expiry = params.expiry(),
        rate = params.rate(),
        volatility = params.volatility(),
        sample_count = params.sample_count(),
        seed = ?simulation.seed,
        "pricing European call and put"
    );

    let (call, put) = price_both(&params, &simulation)?;

    print_estimate("Call", &call, cli.confidence)?;
    print_estimate("Put", &put, cli.confidence)?;
    Ok(())
}
