pub mod gbm;
pub mod payoff;

/// Common traits used by the Monte Carlo pricer
pub mod traits {
    /// Source of independent standard normal draws.
    ///
    /// This is the only randomness the pricer consumes. Implementations are
    /// taken by `&mut`, so a single generator can never be shared between
    /// concurrent pricing calls without external locking.
    pub trait NormalSampler {
        /// Overwrite every element of `buffer` with an independent N(0, 1) draw.
        fn fill_standard_normal(&mut self, buffer: &mut [f64]);
    }

    impl<S: NormalSampler + ?Sized> NormalSampler for &mut S {
        fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
            (**self).fill_standard_normal(buffer)
        }
    }

    impl<S: NormalSampler + ?Sized> NormalSampler for Box<S> {
        fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
            (**self).fill_standard_normal(buffer)
        }
    }
}

/// Utility functions shared by the pricing routines
pub mod utils {
    /// Continuously compounded discount factor: exp(-r * T)
    #[inline]
    pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
        (-rate * expiry).exp()
    }

    /// `max(0, x)` that lets NaN through instead of mapping it to zero.
    #[inline]
    pub fn clamp_at_zero(x: f64) -> f64 {
        if x.is_nan() {
            x
        } else {
            x.max(0.0)
        }
    }

    /// Discounted intrinsic value of a deterministic terminal price.
    ///
    /// With zero volatility every simulated path ends at `spot * exp(r * T)`,
    /// so this is the exact value both Monte Carlo estimators must reproduce.
    pub fn zero_volatility_value(
        option_type: super::payoff::OptionType,
        spot: f64,
        strike: f64,
        rate: f64,
        expiry: f64,
    ) -> f64 {
        let forward = spot * (rate * expiry).exp();
        discount_factor(rate, expiry) * option_type.payoff(forward, strike)
    }

}
