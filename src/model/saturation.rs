//! Logistic capacity-saturation adjustment
//!
//! Raw multiplicative scaling is unbounded and linear in availability, which
//! misrepresents real capacity constraints: below a staffing threshold,
//! marginal staff contribute less, and above it returns flatten. The logistic
//! transform bounds the effective availability multiplier into (0, 1). Its
//! steepness and inflection point are policy knobs, not estimated from data.

use serde::{Deserialize, Serialize};

use crate::core::config::{ForecastParams, ParameterError, SimulationControls};
use crate::core::sampler::SampleVector;
use crate::core::stats;

/// The logistic saturation curve, `1 / (1 + exp(-alpha * (a - threshold)))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationCurve {
    /// Steepness of the sigmoid
    pub alpha: f64,

    /// Inflection point - the availability at which the multiplier is 0.5
    pub threshold: f64,
}

impl SaturationCurve {
    /// Build a curve, rejecting non-finite or non-positive steepness
    pub fn new(alpha: f64, threshold: f64) -> Result<Self, ParameterError> {
        if !alpha.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "alpha",
                value: alpha,
            });
        }
        if !threshold.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "threshold",
                value: threshold,
            });
        }
        if alpha <= 0.0 {
            return Err(ParameterError::NonPositive {
                name: "alpha",
                value: alpha,
            });
        }
        Ok(Self { alpha, threshold })
    }

    /// Curve with the controls' steepness and inflection point
    pub fn from_controls(controls: &SimulationControls) -> Result<Self, ParameterError> {
        Self::new(controls.alpha, controls.threshold)
    }

    /// The bounded multiplier for one availability fraction, strictly in (0, 1)
    pub fn adjustment(&self, availability: f64) -> f64 {
        1.0 / (1.0 + (-self.alpha * (availability - self.threshold)).exp())
    }
}

/// The saturation stage's output: the adjustment vector computed once against
/// the original availability samples, plus the adjusted hiring outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaturationAdjustment {
    /// The curve that produced these adjustments
    pub curve: SaturationCurve,

    /// Per-draw bounded multipliers, index-aligned with the availability samples
    pub adjustments: Vec<f64>,

    /// Per-draw adjusted hires, `round(adjustment * total_staff * productivity * 12)`
    pub adjusted_hires: Vec<i64>,

    /// Median of the adjusted hires
    pub median_adjusted_hires: f64,
}

impl SaturationAdjustment {
    /// Apply the curve to the availability samples and combine with
    /// productivity and workforce size into adjusted annual hires
    pub fn compute(
        curve: SaturationCurve,
        params: &ForecastParams,
        availability: &SampleVector,
        productivity: &SampleVector,
    ) -> Result<Self, ParameterError> {
        params.validate()?;
        if availability.len() != productivity.len() {
            return Err(ParameterError::LengthMismatch {
                left: availability.len(),
                right: productivity.len(),
            });
        }

        let adjustments: Vec<f64> = availability
            .values()
            .iter()
            .map(|&a| curve.adjustment(a))
            .collect();

        let total_staff = f64::from(params.total_staff);
        let adjusted_hires: Vec<i64> = adjustments
            .iter()
            .zip(productivity.values())
            .map(|(&adj, &rate)| (adj * total_staff * rate * 12.0).round() as i64)
            .collect();

        let median_adjusted_hires = stats::median_i64(&adjusted_hires);

        Ok(Self {
            curve,
            adjustments,
            adjusted_hires,
            median_adjusted_hires,
        })
    }
}
