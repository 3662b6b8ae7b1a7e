//! Scenario sweep engine - the saturation model across workforce sizes
//!
//! Repeats the saturation-adjusted forecast across a grid of workforce-size
//! scaling factors. The adjustment vector is computed once against the
//! original availability samples and reused for every factor; productivity is
//! redrawn per factor from a deterministically derived seed, so the whole
//! sweep is reproducible and scenarios are directly comparable.

use serde::{Deserialize, Serialize};

use crate::core::config::{ForecastParams, ParameterError, SimulationControls};
use crate::core::distribution::LogNormalParams;
use crate::core::sampler::sample_log_normal;
use crate::core::stats;

/// One row of the scenario table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Workforce-size scaling factor for this scenario
    pub workforce_size_factor: f64,

    /// Scaled workforce, `round(total_staff * factor)`
    pub workforce_size: i64,

    /// Saturation-adjusted staff, `round(workforce_size * adjustment)`
    pub available_staff_total: i64,

    /// Fraction of the scaled workforce that is effectively available
    pub staff_availability_ratio: f64,

    /// Sampled monthly productivity for this row
    pub productivity_rate: f64,

    /// Adjusted annual output, `round(12 * available_staff_total * productivity)`
    pub adjusted_annual_hires: i64,
}

/// Per-scenario planning summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Workforce-size scaling factor
    pub workforce_size_factor: f64,

    /// Scaled workforce size
    pub workforce_size: i64,

    /// Median adjusted annual hires for this scenario
    pub median_adjusted_annual_hires: f64,
}

/// The full sweep output: the long-form table and per-scenario medians
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSweep {
    /// Concatenated per-factor tables, in factor order
    pub records: Vec<ScenarioRecord>,

    /// One summary per factor, in factor order
    pub summaries: Vec<ScenarioSummary>,
}

impl ScenarioSweep {
    /// Run the sweep across the controls' factor grid.
    ///
    /// `adjustments` is the saturation stage's multiplier vector; each factor
    /// contributes exactly `adjustments.len()` rows using a fresh productivity
    /// sample drawn from the factor's scenario seed.
    pub fn run(
        params: &ForecastParams,
        controls: &SimulationControls,
        productivity_params: LogNormalParams,
        adjustments: &[f64],
    ) -> Result<Self, ParameterError> {
        params.validate()?;
        controls.validate()?;

        let factors = controls.factors();
        let n = adjustments.len();
        if n == 0 {
            return Err(ParameterError::ZeroSampleCount);
        }

        let total_staff = f64::from(params.total_staff);
        let mut records = Vec::with_capacity(factors.len() * n);
        let mut summaries = Vec::with_capacity(factors.len());

        for (index, &factor) in factors.iter().enumerate() {
            let workforce_size = (total_staff * factor).round() as i64;
            if workforce_size <= 0 {
                return Err(ParameterError::EmptyWorkforce {
                    factor,
                    size: workforce_size,
                });
            }

            let productivity = sample_log_normal(
                "productivity_rate",
                productivity_params,
                n,
                controls.scenario_seed(index),
            )?;

            let mut adjusted: Vec<i64> = Vec::with_capacity(n);
            for (&adj, &rate) in adjustments.iter().zip(productivity.values()) {
                let available_staff_total = (workforce_size as f64 * adj).round() as i64;
                let adjusted_annual_hires =
                    (12.0 * available_staff_total as f64 * rate).round() as i64;
                adjusted.push(adjusted_annual_hires);
                records.push(ScenarioRecord {
                    workforce_size_factor: factor,
                    workforce_size,
                    available_staff_total,
                    staff_availability_ratio: available_staff_total as f64
                        / workforce_size as f64,
                    productivity_rate: rate,
                    adjusted_annual_hires,
                });
            }

            summaries.push(ScenarioSummary {
                workforce_size_factor: factor,
                workforce_size,
                median_adjusted_annual_hires: stats::median_i64(&adjusted),
            });
        }

        Ok(Self { records, summaries })
    }

    /// Total number of rows across all scenarios
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the sweep holds no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
