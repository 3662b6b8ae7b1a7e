//! Log-normal parameter derivation via moment matching
//!
//! Historical hiring productivity is summarized as an arithmetic mean and
//! standard deviation, but the sampling distribution is log-normal (bounded
//! below by zero, right-skewed). The closed-form moment-matching map recovers
//! the location/scale parameters of the underlying normal.

use serde::{Deserialize, Serialize};

use crate::core::config::ParameterError;

/// Location/scale parameters of a log-normal distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogNormalParams {
    /// Mean of the underlying normal (location)
    pub mu: f64,

    /// Standard deviation of the underlying normal (scale)
    pub sigma: f64,
}

impl LogNormalParams {
    /// Derive `{mu, sigma}` so that the log-normal has arithmetic mean
    /// `mean` and standard deviation `std`.
    ///
    /// `mu = ln(mean² / sqrt(std² + mean²))`,
    /// `sigma = sqrt(ln(1 + std²/mean²))`.
    pub fn from_moments(mean: f64, std: f64) -> Result<Self, ParameterError> {
        if !mean.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "mean_monthly_hiring",
                value: mean,
            });
        }
        if !std.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "std_monthly_hiring",
                value: std,
            });
        }
        if mean <= 0.0 {
            return Err(ParameterError::NonPositive {
                name: "mean_monthly_hiring",
                value: mean,
            });
        }
        if std < 0.0 {
            return Err(ParameterError::Negative {
                name: "std_monthly_hiring",
                value: std,
            });
        }

        let mu = (mean * mean / (std * std + mean * mean).sqrt()).ln();
        let sigma = (1.0 + (std * std) / (mean * mean)).ln().sqrt();

        Ok(Self { mu, sigma })
    }

    /// Arithmetic mean implied by the parameters
    pub fn arithmetic_mean(&self) -> f64 {
        (self.mu + self.sigma * self.sigma / 2.0).exp()
    }

    /// Arithmetic standard deviation implied by the parameters
    pub fn arithmetic_std(&self) -> f64 {
        let s2 = self.sigma * self.sigma;
        ((s2.exp() - 1.0) * (2.0 * self.mu + s2).exp()).sqrt()
    }

    /// Median of the distribution, `exp(mu)`
    pub fn median(&self) -> f64 {
        self.mu.exp()
    }
}
