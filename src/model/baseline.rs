//! Baseline production model - raw availability x productivity hiring output
//!
//! Combines the availability and productivity sample vectors element-wise
//! into annualized hiring-output estimates and derives goal-attainment
//! statistics. All statistics are deterministic functions of the samples.

use serde::{Deserialize, Serialize};

use crate::core::config::{ForecastParams, ParameterError};
use crate::core::sampler::SampleVector;
use crate::core::stats;

/// One simulated outcome row
///
/// Staff counts are signed: extreme low-tail availability draws can round to
/// small negative counts, and the model preserves them rather than clamping
/// so that aggregate statistics reflect the raw distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRecord {
    /// Staff available in this draw, `round(total_staff * availability)`
    pub available_staff: i64,

    /// Annualized hires, `round(12 * available_staff * productivity)`
    pub annual_hires: i64,

    /// Saturation-adjusted hires, filled in by the saturation stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_hires: Option<i64>,
}

/// Summary statistics over the baseline table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineSummary {
    /// Median annual hires across all draws
    pub median_annual_hires: f64,

    /// Fraction of draws exceeding the hiring goal, 0-100 scale
    pub goal_attainment_percent: f64,

    /// 25th percentile of annual hires - the conservative planning floor
    /// below which only a quarter of outcomes fall
    pub planning_floor_p25: f64,
}

/// Baseline forecast - the simulation table plus its summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineForecast {
    /// One record per draw, index-aligned with the input sample vectors
    pub records: Vec<SimulationRecord>,

    /// Aggregate statistics
    pub summary: BaselineSummary,
}

impl BaselineForecast {
    /// Combine availability and productivity samples into the baseline table
    pub fn run(
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

        let total_staff = f64::from(params.total_staff);
        let records: Vec<SimulationRecord> = availability
            .values()
            .iter()
            .zip(productivity.values())
            .map(|(&avail, &rate)| {
                let available_staff = (total_staff * avail).round() as i64;
                let annual_hires = (12.0 * available_staff as f64 * rate).round() as i64;
                SimulationRecord {
                    available_staff,
                    annual_hires,
                    adjusted_hires: None,
                }
            })
            .collect();

        let annual: Vec<i64> = records.iter().map(|r| r.annual_hires).collect();
        let summary = BaselineSummary {
            median_annual_hires: stats::median_i64(&annual),
            goal_attainment_percent: stats::exceedance_percent(&annual, params.hiring_goal),
            planning_floor_p25: stats::percentile_i64(&annual, 25.0),
        };

        Ok(Self { records, summary })
    }

    /// Number of simulated rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distribution::LogNormalParams;
    use crate::core::sampler::{sample_log_normal, sample_normal};

    fn params() -> ForecastParams {
        ForecastParams {
            hiring_goal: 15_000.0,
            total_staff: 150,
            mean_availability: 0.8,
            std_availability: 0.05,
            mean_monthly_hiring: 15.0,
            std_monthly_hiring: 4.5,
        }
    }

    #[test]
    fn test_rows_follow_element_wise_formulas() {
        let availability = sample_normal("availability_fraction", 0.8, 0.05, 500, 1).unwrap();
        let lognormal = LogNormalParams::from_moments(15.0, 4.5).unwrap();
        let productivity = sample_log_normal("productivity_rate", lognormal, 500, 2).unwrap();

        let forecast = BaselineForecast::run(&params(), &availability, &productivity).unwrap();
        assert_eq!(forecast.len(), 500);

        for (i, record) in forecast.records.iter().enumerate() {
            let expected_staff = (150.0 * availability.values()[i]).round() as i64;
            let expected_hires =
                (12.0 * expected_staff as f64 * productivity.values()[i]).round() as i64;
            assert_eq!(record.available_staff, expected_staff);
            assert_eq!(record.annual_hires, expected_hires);
            assert!(record.adjusted_hires.is_none());
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let availability = sample_normal("availability_fraction", 0.8, 0.05, 100, 1).unwrap();
        let lognormal = LogNormalParams::from_moments(15.0, 4.5).unwrap();
        let productivity = sample_log_normal("productivity_rate", lognormal, 200, 2).unwrap();

        assert!(matches!(
            BaselineForecast::run(&params(), &availability, &productivity),
            Err(ParameterError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_low_tail_draws_are_not_clamped() {
        // an availability mean near zero drives some draws negative
        let availability = sample_normal("availability_fraction", 0.01, 0.009, 2000, 5).unwrap();
        let lognormal = LogNormalParams::from_moments(15.0, 4.5).unwrap();
        let productivity = sample_log_normal("productivity_rate", lognormal, 2000, 6).unwrap();

        let mut p = params();
        p.mean_availability = 0.01;
        p.std_availability = 0.009;

        let forecast = BaselineForecast::run(&p, &availability, &productivity).unwrap();
        let has_negative_draw = availability.values().iter().any(|&a| a < 0.0);
        if has_negative_draw {
            assert!(forecast.records.iter().any(|r| r.available_staff < 0));
        }
    }

    #[test]
    fn test_goal_attainment_scale() {
        let availability = sample_normal("availability_fraction", 0.8, 0.05, 5000, 1).unwrap();
        let lognormal = LogNormalParams::from_moments(15.0, 4.5).unwrap();
        let productivity = sample_log_normal("productivity_rate", lognormal, 5000, 2).unwrap();

        // a token goal is exceeded by essentially every draw
        let mut p = params();
        p.hiring_goal = 1.0;
        let forecast = BaselineForecast::run(&p, &availability, &productivity).unwrap();
        assert!(forecast.summary.goal_attainment_percent > 99.0);
        assert!(forecast.summary.goal_attainment_percent <= 100.0);
    }

    #[test]
    fn test_planning_floor_below_median() {
        let availability = sample_normal("availability_fraction", 0.8, 0.05, 5000, 1).unwrap();
        let lognormal = LogNormalParams::from_moments(15.0, 4.5).unwrap();
        let productivity = sample_log_normal("productivity_rate", lognormal, 5000, 2).unwrap();

        let forecast = BaselineForecast::run(&params(), &availability, &productivity).unwrap();
        assert!(forecast.summary.planning_floor_p25 < forecast.summary.median_annual_hires);
    }
}
