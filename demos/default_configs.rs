use mc_option_pricer::{default_configs, price_both, PricingParams, SimulationConfig};

fn describe(title: &str, use_case: &str, config: &SimulationConfig) {
    println!("{}:", title);
    println!("   Sample count: {}", config.sample_count);
    println!("   Batch size: {}", config.batch_size);
    println!(
        "   Seed: {}",
        config
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "OS entropy".to_string())
    );
    println!("   Use case: {}\n", use_case);
}

fn main() -> anyhow::Result<()> {
    println!("mc-option-pricer Default Configuration Examples\n");

    describe("1. Minimal Configuration", "Smoke tests, debugging", &default_configs::minimal());
    describe("2. Fast Configuration", "Development, quick checks", &default_configs::fast());
    describe("3. Production Configuration", "Day-to-day pricing", &default_configs::production());
    describe("4. Research Configuration", "Convergence studies", &default_configs::research());

    // Same contract priced with the two smallest presets
    let contract = PricingParams::new(100.0, 100.0, 1.0, 0.05, 0.2, 1)?;
    for (name, config) in [
        ("minimal", default_configs::minimal().with_seed(1)),
        ("fast", default_configs::fast().with_seed(1)),
    ] {
        let params = contract.with_sample_count(config.sample_count)?;
        let (call, put) = price_both(&params, &config)?;
        println!(
            "{:<8} call {:.4} (se {:.4})  put {:.4} (se {:.4})",
            name,
            call.price,
            call.std_error.unwrap_or(f64::NAN),
            put.price,
            put.std_error.unwrap_or(f64::NAN)
        );
    }
    Ok(())
}
