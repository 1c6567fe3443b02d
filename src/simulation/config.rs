use crate::rng::StdNormalSampler;
use crate::simulation::types::PricingParams;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Monte Carlo simulation settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of draws per estimate
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Random seed for reproducibility (None = seed from OS entropy)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Size of the reusable draw buffer
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_count: default_sample_count(),
            seed: None,
            batch_size: default_batch_size(),
        }
    }
}

impl SimulationConfig {
    /// Production settings: one million draws
    pub fn production() -> Self {
        Self {
            sample_count: 1_000_000,
            ..Self::default()
        }
    }

    /// Fast configuration for development and testing
    pub fn fast() -> Self {
        Self {
            sample_count: 100_000,
            ..Self::default()
        }
    }

    /// High-precision configuration for research
    pub fn research() -> Self {
        Self {
            sample_count: 10_000_000,
            batch_size: 1 << 18,
            ..Self::default()
        }
    }

    /// Minimal configuration for quick validation and debugging
    pub fn minimal() -> Self {
        Self {
            sample_count: 1_000,
            batch_size: 1_000,
            ..Self::default()
        }
    }

    /// Same settings with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(anyhow!("SimulationConfig: sample_count must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(anyhow!("SimulationConfig: batch_size must be at least 1"));
        }
        Ok(())
    }

    /// Sampler matching this configuration: seeded when `seed` is set.
    pub fn sampler(&self) -> StdNormalSampler {
        match self.seed {
            Some(seed) => StdNormalSampler::from_seed(seed),
            None => StdNormalSampler::from_entropy(),
        }
    }
}

/// Contract description as it appears in a run configuration file
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct MarketConfig {
    pub spot: f64,
    pub strike: f64,
    /// Time to expiry in years
    pub expiry: f64,
    pub rate: f64,
    pub volatility: f64,
}

/// Top-level run configuration, read from TOML.
///
/// ```toml
/// [market]
/// spot = 100.0
/// strike = 105.0
/// expiry = 1.0
/// rate = 0.05
/// volatility = 0.2
///
/// [simulation]
/// sample_count = 500000
/// seed = 42
/// ```
///
/// Both tables are optional; missing simulation keys fall back to defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct RunConfig {
    #[serde(default)]
    pub market: Option<MarketConfig>,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl RunConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RunConfig =
            toml::from_str(content).context("Failed to parse run configuration")?;
        config.simulation.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Validated pricing parameters from the `[market]` table and the
    /// configured sample count.
    pub fn pricing_params(&self) -> Result<PricingParams> {
        let market = self
            .market
            .ok_or_else(|| anyhow!("Run configuration has no [market] table"))?;
        PricingParams::new(
            market.spot,
            market.strike,
            market.expiry,
            market.rate,
            market.volatility,
            self.simulation.sample_count,
        )
    }
}

fn default_sample_count() -> usize {
    100_000
}

fn default_batch_size() -> usize {
    1 << 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for config in [
            SimulationConfig::production(),
            SimulationConfig::fast(),
            SimulationConfig::research(),
            SimulationConfig::minimal(),
        ] {
            assert!(config.validate().is_ok());
            assert_eq!(config.seed, None);
        }
        assert_eq!(SimulationConfig::production().sample_count, 1_000_000);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = SimulationConfig {
            batch_size: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_sampler() {
        let config = SimulationConfig::minimal().with_seed(7);
        assert_eq!(config.sampler().seed(), Some(7));
        assert_eq!(SimulationConfig::minimal().sampler().seed(), None);
    }

    #[test]
    fn test_simulation_defaults_from_empty_table() {
        let config = RunConfig::from_toml_str("[simulation]\n").unwrap();
        assert_eq!(config.simulation, SimulationConfig::default());
        assert!(config.market.is_none());
        assert!(config.pricing_params().is_err());
    }
}
