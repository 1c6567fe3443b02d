use anyhow::{anyhow, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::models::payoff::OptionType;

/// Contract and simulation inputs for one pricer instance.
///
/// Built once through [`PricingParams::new`], which rejects values the
/// estimator cannot price (non-positive spot, strike or expiry, negative
/// volatility, zero draws). Fields are read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingParams {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    sample_count: usize,
}

/// Helper function to validate pricing inputs.
fn validate_pricing_params(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    sample_count: usize,
) -> Result<()> {
    if spot <= 0.0 || !spot.is_finite() {
        return Err(anyhow!(
            "PricingParams validation: spot (spot={}) must be > 0 and finite",
            spot
        ));
    }
    if strike <= 0.0 || !strike.is_finite() {
        return Err(anyhow!(
            "PricingParams validation: strike (strike={}) must be > 0 and finite",
            strike
        ));
    }
    if expiry <= 0.0 || !expiry.is_finite() {
        return Err(anyhow!(
            "PricingParams validation: time to expiry (expiry={}) must be > 0 and finite",
            expiry
        ));
    }
    // Negative rates are legitimate; only NaN and infinities are rejected.
    if !rate.is_finite() {
        return Err(anyhow!(
            "PricingParams validation: rate (rate={}) must be finite",
            rate
        ));
    }
    if volatility < 0.0 || !volatility.is_finite() {
        return Err(anyhow!(
            "PricingParams validation: volatility (volatility={}) must be >= 0 and finite",
            volatility
        ));
    }
    if sample_count == 0 {
        return Err(anyhow!(
            "PricingParams validation: sample_count must be at least 1"
        ));
    }
    Ok(())
}

impl PricingParams {
    /// Creates new pricing parameters with validation.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
        sample_count: usize,
    ) -> Result<Self> {
        validate_pricing_params(spot, strike, expiry, rate, volatility, sample_count)?;

        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
            volatility,
            sample_count,
        })
    }

    /// Validates the current parameter set.
    pub fn validate(&self) -> Result<()> {
        validate_pricing_params(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.volatility,
            self.sample_count,
        )
    }

    /// Copy of these parameters with a different strike.
    pub fn with_strike(&self, strike: f64) -> Result<Self> {
        Self::new(
            self.spot,
            strike,
            self.expiry,
            self.rate,
            self.volatility,
            self.sample_count,
        )
    }

    /// Copy of these parameters with a different number of draws.
    pub fn with_sample_count(&self, sample_count: usize) -> Result<Self> {
        Self::new(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.volatility,
            sample_count,
        )
    }

    /// Current underlying price
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiry in years
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Annualized continuously compounded risk-free rate
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualized volatility
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Number of Monte Carlo draws per estimate
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
}

/// Result of a single Monte Carlo estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct McEstimate {
    /// Option right that was priced
    pub option_type: OptionType,
    /// Discounted mean payoff
    pub price: f64,
    /// Discounted standard error of the mean; `None` for a single draw
    pub std_error: Option<f64>,
    /// Number of draws the estimate is based on
    pub sample_count: usize,
}

impl McEstimate {
    /// Two-sided confidence interval `price ± z * std_error` at `level`
    /// (e.g. 0.95), with `z` the standard normal quantile.
    ///
    /// # Errors
    ///
    /// * `level` outside (0, 1)
    /// * the estimate has no standard error (single draw)
    pub fn confidence_interval(&self, level: f64) -> Result<(f64, f64)> {
        if !(level > 0.0 && level < 1.0) {
            return Err(anyhow!(
                "Confidence level (level={}) must be in (0, 1)",
                level
            ));
        }
        let std_error = self.std_error.ok_or_else(|| {
            anyhow!(
                "No standard error available for an estimate from {} draw(s)",
                self.sample_count
            )
        })?;

        let normal = Normal::new(0.0, 1.0).map_err(|e| anyhow!("{}", e))?;
        let z = normal.inverse_cdf(0.5 + 0.5 * level);
        let half_width = z * std_error;
        Ok((self.price - half_width, self.price + half_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pricing_params_validation() {
        assert!(PricingParams::new(100.0, 100.0, 1.0, 0.05, 0.2, 1000).is_ok());
        // Zero volatility and negative rates are allowed
        assert!(PricingParams::new(100.0, 100.0, 1.0, -0.01, 0.0, 1).is_ok());

        assert!(PricingParams::new(0.0, 100.0, 1.0, 0.05, 0.2, 1000).is_err()); // spot
        assert!(PricingParams::new(100.0, -5.0, 1.0, 0.05, 0.2, 1000).is_err()); // strike
        assert!(PricingParams::new(100.0, 100.0, 0.0, 0.05, 0.2, 1000).is_err()); // expiry
        assert!(PricingParams::new(100.0, 100.0, 1.0, f64::NAN, 0.2, 1000).is_err()); // rate
        assert!(PricingParams::new(100.0, 100.0, 1.0, 0.05, -0.2, 1000).is_err()); // volatility
        assert!(PricingParams::new(100.0, 100.0, 1.0, 0.05, 0.2, 0).is_err()); // sample count
        assert!(PricingParams::new(f64::INFINITY, 100.0, 1.0, 0.05, 0.2, 10).is_err());
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = PricingParams::new(100.0, 100.0, 1.0, 0.05, -0.3, 10).unwrap_err();
        assert!(err.to_string().contains("volatility"));
    }

    #[test]
    fn test_with_strike_revalidates() {
        let params = PricingParams::new(100.0, 100.0, 1.0, 0.05, 0.2, 1000).unwrap();
        let shifted = params.with_strike(110.0).unwrap();
        assert_eq!(shifted.strike(), 110.0);
        assert_eq!(shifted.spot(), params.spot());
        assert!(params.with_strike(0.0).is_err());
        assert!(params.with_sample_count(0).is_err());
    }

    #[test]
    fn test_confidence_interval() {
        let estimate = McEstimate {
            option_type: OptionType::Call,
            price: 10.0,
            std_error: Some(0.1),
            sample_count: 10_000,
        };
        let (lo, hi) = estimate.confidence_interval(0.95).unwrap();
        assert_relative_eq!(lo, 10.0 - 0.195996398, epsilon = 1e-6);
        assert_relative_eq!(hi, 10.0 + 0.195996398, epsilon = 1e-6);

        assert!(estimate.confidence_interval(1.0).is_err());
        assert!(estimate.confidence_interval(0.0).is_err());
    }

    #[test]
    fn test_confidence_interval_requires_std_error() {
        let estimate = McEstimate {
            option_type: OptionType::Put,
            price: 1.0,
            std_error: None,
            sample_count: 1,
        };
        assert!(estimate.confidence_interval(0.9).is_err());
    }
}
