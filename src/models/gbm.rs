// src/models/gbm.rs

//! Terminal distribution of geometric Brownian motion
//!
//! Under the risk-neutral measure the Black-Scholes SDE
//!
//! dS = r S dt + σ S dW
//!
//! has the exact solution
//!
//! S(T) = S(0) * exp((r - σ²/2) T + σ sqrt(T) Z),   Z ~ N(0, 1)
//!
//! so a European payoff needs a single draw per path and no time stepping.

use crate::simulation::types::PricingParams;

/// Precomputed drift and diffusion terms of the terminal-price transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GbmTerminal {
    spot: f64,
    /// T * (r - σ²/2)
    drift: f64,
    /// σ * sqrt(T)
    diffusion: f64,
}

impl GbmTerminal {
    pub fn new(spot: f64, expiry: f64, rate: f64, volatility: f64) -> Self {
        Self {
            spot,
            drift: expiry * (rate - 0.5 * volatility * volatility),
            diffusion: volatility * expiry.sqrt(),
        }
    }

    pub fn from_params(params: &PricingParams) -> Self {
        Self::new(
            params.spot(),
            params.expiry(),
            params.rate(),
            params.volatility(),
        )
    }

    /// Simulated terminal price for one standard normal draw `z`.
    #[inline]
    pub fn terminal_price(&self, z: f64) -> f64 {
        self.spot * (self.drift + self.diffusion * z).exp()
    }

    /// Forward price `S(0) * exp(rT)`, the mean of the terminal distribution.
    pub fn forward(&self) -> f64 {
        self.spot * (self.drift + 0.5 * self.diffusion * self.diffusion).exp()
    }
}

/// Terminal price for a single draw, without precomputing the coefficients.
pub fn terminal_price(
    spot: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    z: f64,
) -> f64 {
    GbmTerminal::new(spot, expiry, rate, volatility).terminal_price(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_draw_gives_median() {
        let gbm = GbmTerminal::new(100.0, 1.0, 0.05, 0.2);
        // Median of the lognormal: S0 * exp((r - σ²/2) T)
        assert_relative_eq!(gbm.terminal_price(0.0), 100.0 * (0.03f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let gbm = GbmTerminal::new(100.0, 2.0, 0.03, 0.0);
        let expected = 100.0 * (0.06f64).exp();
        for z in [-3.0, -0.5, 0.0, 1.7, 4.2] {
            assert_relative_eq!(gbm.terminal_price(z), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_forward_matches_risk_free_growth() {
        let gbm = GbmTerminal::new(50.0, 0.5, 0.04, 0.35);
        assert_relative_eq!(gbm.forward(), 50.0 * (0.02f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_terminal_price_monotone_in_draw() {
        let gbm = GbmTerminal::new(100.0, 1.0, 0.01, 0.3);
        assert!(gbm.terminal_price(-1.0) < gbm.terminal_price(0.0));
        assert!(gbm.terminal_price(0.0) < gbm.terminal_price(1.0));
        assert_eq!(terminal_price(100.0, 1.0, 0.01, 0.3, 1.0), gbm.terminal_price(1.0));
    }

    #[test]
    fn test_extreme_inputs_overflow_to_infinity() {
        let gbm = GbmTerminal::new(100.0, 1.0, 0.0, 30.0);
        // drift -450, diffusion 30: exponent 750 exceeds the f64 range
        assert!(gbm.terminal_price(40.0).is_infinite());
    }
}
