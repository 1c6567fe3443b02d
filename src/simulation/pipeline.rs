use crate::models::gbm::GbmTerminal;
use crate::models::payoff::OptionType;
use crate::models::traits::NormalSampler;
use crate::models::utils::discount_factor;
use crate::simulation::config::SimulationConfig;
use crate::simulation::types::{McEstimate, PricingParams};
use anyhow::Result;
use tracing::{debug, trace, warn};

/// Running mean and sum of squared deviations (Welford's algorithm).
///
/// Stable over very large samples, and exact when every observation is equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean; NaN before any observation.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.mean
        }
    }

    /// Unbiased sample variance, `None` with fewer than two observations.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2 / (self.count - 1) as f64)
        }
    }
}

/// Monte Carlo pricer for European options under Black-Scholes dynamics.
///
/// Holds the immutable [`PricingParams`]; every pricing call draws a fresh,
/// independent sample of `sample_count` normals from the sampler it is given.
/// Results are never cached, so two calls give two different (equally valid)
/// estimates unless the sampler replays the same draws.
///
/// The pricer itself is read-only and can be shared across threads; each
/// thread supplies its own sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloPricer {
    params: PricingParams,
    gbm: GbmTerminal,
    batch_size: usize,
}

impl MonteCarloPricer {
    pub fn new(params: PricingParams) -> Self {
        Self {
            params,
            gbm: GbmTerminal::from_params(&params),
            batch_size: SimulationConfig::default().batch_size,
        }
    }

    /// Pricer using the batch size of `config`. The sample count always
    /// comes from `params`.
    pub fn with_config(params: PricingParams, config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(params).with_batch_size(config.batch_size))
    }

    /// Set the size of the reusable draw buffer (at least one).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn params(&self) -> &PricingParams {
        &self.params
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Monte Carlo price of the European call.
    pub fn price_call<S: NormalSampler + ?Sized>(&self, sampler: &mut S) -> f64 {
        self.price(OptionType::Call, sampler)
    }

    /// Monte Carlo price of the European put.
    pub fn price_put<S: NormalSampler + ?Sized>(&self, sampler: &mut S) -> f64 {
        self.price(OptionType::Put, sampler)
    }

    pub fn price<S: NormalSampler + ?Sized>(&self, option_type: OptionType, sampler: &mut S) -> f64 {
        self.estimate(option_type, sampler).price
    }

    /// Discounted mean payoff together with its standard error.
    ///
    /// 1. draw `z_i ~ N(0, 1)` in batches of at most `batch_size`
    /// 2. `S_i = S0 * exp(T (r - σ²/2) + σ sqrt(T) z_i)`
    /// 3. accumulate `max(0, S_i - K)` or `max(0, K - S_i)`
    /// 4. discount the mean by `exp(-rT)`
    pub fn estimate<S: NormalSampler + ?Sized>(
        &self,
        option_type: OptionType,
        sampler: &mut S,
    ) -> McEstimate {
        let sample_count = self.params.sample_count();
        let strike = self.params.strike();
        let mut buffer = vec![0.0; self.batch_size.min(sample_count)];
        let mut moments = RunningMoments::default();

        debug!(
            %option_type,
            sample_count,
            batch_size = buffer.len(),
            "starting Monte Carlo estimate"
        );

        let mut remaining = sample_count;
        while remaining > 0 {
            let batch = &mut buffer[..remaining.min(self.batch_size)];
            sampler.fill_standard_normal(batch);
            for &z in batch.iter() {
                moments.push(option_type.payoff(self.gbm.terminal_price(z), strike));
            }
            remaining -= batch.len();
            trace!(remaining, running_mean = moments.mean(), "batch consumed");
        }

        let discount = discount_factor(self.params.rate(), self.params.expiry());
        let price = discount * moments.mean();
        let std_error = moments
            .sample_variance()
            .map(|variance| discount * (variance / sample_count as f64).sqrt());

        if price.is_finite() {
            debug!(%option_type, price, ?std_error, "Monte Carlo estimate complete");
        } else {
            warn!(
                %option_type,
                price,
                spot = self.params.spot(),
                volatility = self.params.volatility(),
                expiry = self.params.expiry(),
                "non-finite Monte Carlo estimate; inputs are outside a representable range"
            );
        }

        McEstimate {
            option_type,
            price,
            std_error,
            sample_count,
        }
    }
}
