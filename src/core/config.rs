//! Forecast configuration - scalar planning parameters and simulation controls
//!
//! All validation happens eagerly through [`ForecastParams::validate`] and
//! [`SimulationControls::validate`] before any sampling begins, so downstream
//! stages can assume well-formed, finite inputs.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid planning or simulation parameters.
///
/// Raised eagerly at the start of each pipeline stage, never deferred into
/// mid-computation. Any input that would produce a NaN or infinity downstream
/// is rejected here.
#[derive(Debug, Error, Diagnostic)]
pub enum ParameterError {
    #[error("{name} must be positive, got {value}")]
    #[diagnostic(code(hirecast::params::non_positive))]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be non-negative, got {value}")]
    #[diagnostic(code(hirecast::params::negative))]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    #[diagnostic(code(hirecast::params::non_finite))]
    NonFinite { name: &'static str, value: f64 },

    #[error("{name} must lie in ({low}, {high}), got {value}")]
    #[diagnostic(code(hirecast::params::out_of_range))]
    OutOfRange {
        name: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },

    #[error("sample count must be positive")]
    #[diagnostic(code(hirecast::params::zero_samples))]
    ZeroSampleCount,

    #[error("availability spread {std} must be smaller than its mean {mean}")]
    #[diagnostic(
        code(hirecast::params::spread_exceeds_mean),
        help("a spread at or above the mean puts substantial mass outside (0, 1)")
    )]
    SpreadExceedsMean { mean: f64, std: f64 },

    #[error("workforce factor range {start}..={end} step {step} is malformed")]
    #[diagnostic(
        code(hirecast::params::bad_factor_range),
        help("start and end must be positive, start <= end, and step > 0")
    )]
    BadFactorRange { start: f64, end: f64, step: f64 },

    #[error("workforce factor {factor} yields workforce size {size} <= 0")]
    #[diagnostic(code(hirecast::params::empty_workforce))]
    EmptyWorkforce { factor: f64, size: i64 },

    #[error("sample vectors must have equal length: {left} vs {right}")]
    #[diagnostic(code(hirecast::params::length_mismatch))]
    LengthMismatch { left: usize, right: usize },
}

/// Scalar planning parameters describing the workforce and its goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    /// Annual hiring goal (hires per fiscal year)
    pub hiring_goal: f64,

    /// Total recruiting staff on the roster
    pub total_staff: u32,

    /// Mean fraction of staff available in a given month
    pub mean_availability: f64,

    /// Standard deviation of the availability fraction
    pub std_availability: f64,

    /// Mean hires per available staffer per month
    pub mean_monthly_hiring: f64,

    /// Standard deviation of monthly hires per staffer
    pub std_monthly_hiring: f64,
}

impl ForecastParams {
    /// Check every scalar parameter, failing fast on the first violation
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (name, value) in [
            ("hiring_goal", self.hiring_goal),
            ("mean_availability", self.mean_availability),
            ("std_availability", self.std_availability),
            ("mean_monthly_hiring", self.mean_monthly_hiring),
            ("std_monthly_hiring", self.std_monthly_hiring),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
        }

        if self.hiring_goal <= 0.0 {
            return Err(ParameterError::NonPositive {
                name: "hiring_goal",
                value: self.hiring_goal,
            });
        }
        if self.total_staff == 0 {
            return Err(ParameterError::NonPositive {
                name: "total_staff",
                value: 0.0,
            });
        }
        for (name, value) in [
            ("mean_availability", self.mean_availability),
            ("std_availability", self.std_availability),
        ] {
            if value <= 0.0 || value >= 1.0 {
                return Err(ParameterError::OutOfRange {
                    name,
                    value,
                    low: 0.0,
                    high: 1.0,
                });
            }
        }
        if self.std_availability >= self.mean_availability {
            return Err(ParameterError::SpreadExceedsMean {
                mean: self.mean_availability,
                std: self.std_availability,
            });
        }
        if self.mean_monthly_hiring <= 0.0 {
            return Err(ParameterError::NonPositive {
                name: "mean_monthly_hiring",
                value: self.mean_monthly_hiring,
            });
        }
        if self.std_monthly_hiring < 0.0 {
            return Err(ParameterError::Negative {
                name: "std_monthly_hiring",
                value: self.std_monthly_hiring,
            });
        }

        Ok(())
    }
}

/// How the scenario sweep seeds each factor's productivity draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// Every factor reuses the same seed, so the underlying random sequence
    /// is identical across scenarios and only the workforce size varies
    Shared,
    /// Each factor derives its own seed from the base seed and its index,
    /// restoring across-scenario sampling variance
    PerFactor,
}

impl Default for SeedMode {
    fn default() -> Self {
        SeedMode::Shared
    }
}

/// Simulation controls - sample sizes, seeding, sweep grid, saturation knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationControls {
    /// Number of Monte Carlo draws per random variable
    pub sample_count: usize,

    /// Base seed for all pseudo-random streams
    pub seed: u64,

    /// First workforce-size scaling factor in the sweep
    pub factor_start: f64,

    /// Last workforce-size scaling factor in the sweep (inclusive)
    pub factor_end: f64,

    /// Step between consecutive factors
    pub factor_step: f64,

    /// Steepness of the logistic saturation curve
    pub alpha: f64,

    /// Inflection point of the logistic saturation curve
    pub threshold: f64,

    /// Seeding discipline for the scenario sweep
    pub seed_mode: SeedMode,
}

impl Default for SimulationControls {
    fn default() -> Self {
        Self {
            sample_count: 20_000,
            seed: 2025,
            factor_start: 0.5,
            factor_end: 1.0,
            factor_step: 0.05,
            alpha: 6.0,
            threshold: 0.7,
            seed_mode: SeedMode::Shared,
        }
    }
}

impl SimulationControls {
    /// Check sweep grid and saturation knobs, failing fast on the first violation
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.sample_count == 0 {
            return Err(ParameterError::ZeroSampleCount);
        }
        for (name, value) in [
            ("factor_start", self.factor_start),
            ("factor_end", self.factor_end),
            ("factor_step", self.factor_step),
            ("alpha", self.alpha),
            ("threshold", self.threshold),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
        }
        if self.factor_start <= 0.0
            || self.factor_end < self.factor_start
            || self.factor_step <= 0.0
        {
            return Err(ParameterError::BadFactorRange {
                start: self.factor_start,
                end: self.factor_end,
                step: self.factor_step,
            });
        }
        if self.alpha <= 0.0 {
            return Err(ParameterError::NonPositive {
                name: "alpha",
                value: self.alpha,
            });
        }

        Ok(())
    }

    /// Materialize the factor grid, start to end inclusive
    pub fn factors(&self) -> Vec<f64> {
        let mut factors = Vec::new();
        let mut i = 0u32;
        loop {
            let f = self.factor_start + self.factor_step * f64::from(i);
            // half-step slack so 0.5 + 10 * 0.05 still lands on 1.0
            if f > self.factor_end + self.factor_step / 2.0 {
                break;
            }
            factors.push(f);
            i += 1;
        }
        factors
    }

    /// Seed for the availability draw
    pub fn availability_seed(&self) -> u64 {
        self.seed
    }

    /// Seed for the baseline productivity draw.
    ///
    /// Offset from the availability seed so the two variables come from
    /// independent ChaCha streams rather than the same uniform sequence.
    pub fn productivity_seed(&self) -> u64 {
        self.seed.wrapping_add(1)
    }

    /// Seed used for the productivity draw of the scenario at `index`.
    ///
    /// Under [`SeedMode::Shared`] every scenario reuses the baseline
    /// productivity stream, isolating the workforce-size effect.
    pub fn scenario_seed(&self, index: usize) -> u64 {
        match self.seed_mode {
            SeedMode::Shared => self.productivity_seed(),
            SeedMode::PerFactor => self.seed.wrapping_add(2 + index as u64),
        }
    }
}
