// demos/pricing_demo.rs

//! Monte Carlo pricing walk-through
//!
//! This demo shows how to:
//! 1. Build validated pricing parameters
//! 2. Price a call and a put with a seeded sampler
//! 3. Inspect standard errors and confidence intervals
//! 4. Watch the estimate converge as the sample count grows

use anyhow::Result;
use mc_option_pricer::{MonteCarloPricer, OptionType, PricingParams, StdNormalSampler};

fn main() -> Result<()> {
    println!("Monte Carlo European Option Pricing Demo");
    println!("========================================");

    let params = PricingParams::new(100.0, 105.0, 1.0, 0.05, 0.2, 1_000_000)?;
    println!(
        "Spot {:.2}, strike {:.2}, expiry {:.2}y, rate {:.2}%, vol {:.1}%",
        params.spot(),
        params.strike(),
        params.expiry(),
        params.rate() * 100.0,
        params.volatility() * 100.0
    );

    println!("\nStep 1: Pricing with {} draws...", params.sample_count());
    let pricer = MonteCarloPricer::new(params);
    let mut sampler = StdNormalSampler::from_seed(42);

    for option_type in [OptionType::Call, OptionType::Put] {
        let estimate = pricer.estimate(option_type, &mut sampler);
        let (lo, hi) = estimate.confidence_interval(0.95)?;
        println!(
            "  {:<5} {:>9.4}  se {:.4}  95% [{:.4}, {:.4}]",
            option_type,
            estimate.price,
            estimate.std_error.unwrap_or(0.0),
            lo,
            hi
        );
    }

    let parity = params.spot() - params.strike() * (-params.rate() * params.expiry()).exp();
    println!("  Put-call parity target C - P = {:.4}", parity);

    println!("\nStep 2: Convergence of the call estimate");
    println!("{:<12} {:<12} {:<12}", "Draws", "Call", "Std error");
    println!("{}", "-".repeat(36));
    for exponent in 2..=6 {
        let n = 10usize.pow(exponent);
        let estimate = MonteCarloPricer::new(params.with_sample_count(n)?)
            .estimate(OptionType::Call, &mut StdNormalSampler::from_seed(7));
        println!(
            "{:<12} {:<12.4} {:<12.4}",
            n,
            estimate.price,
            estimate.std_error.unwrap_or(f64::NAN)
        );
    }

    Ok(())
}
