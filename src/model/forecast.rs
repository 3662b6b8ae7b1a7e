//! Forecast run - the one-shot pipeline artifact
//!
//! [`ForecastRun::execute`] runs every stage in order: parameter validation,
//! log-normal moment matching, seeded sampling, the baseline model, the
//! saturation adjustment, the workforce-size sweep, and the weighted
//! regression fit. The result is an immutable, serializable artifact; any
//! re-run is a new instance with a fresh id.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::{ForecastParams, ParameterError, SimulationControls};
use crate::core::distribution::LogNormalParams;
use crate::core::identity::{ArtifactId, ArtifactPrefix};
use crate::core::sampler::{sample_log_normal, sample_normal};
use crate::model::baseline::BaselineForecast;
use crate::model::regression::{EstimationError, RegressionModel};
use crate::model::saturation::{SaturationAdjustment, SaturationCurve};
use crate::model::scenario::ScenarioSweep;

/// Any failure while executing the pipeline
#[derive(Debug, Error, Diagnostic)]
pub enum ForecastError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parameters(#[from] ParameterError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Estimation(#[from] EstimationError),
}

/// A complete forecast run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRun {
    /// Unique identifier (RUN-...)
    pub id: ArtifactId,

    /// Execution timestamp
    pub created: DateTime<Utc>,

    /// Planning parameters the run was executed with
    pub params: ForecastParams,

    /// Simulation controls the run was executed with
    pub controls: SimulationControls,

    /// Derived productivity distribution parameters
    pub productivity_params: LogNormalParams,

    /// Baseline simulation table and goal-attainment statistics
    pub baseline: BaselineForecast,

    /// Logistic saturation stage output
    pub saturation: SaturationAdjustment,

    /// Workforce-size scenario sweep
    pub scenarios: ScenarioSweep,

    /// Fitted variance-aware regression model
    pub model: RegressionModel,
}

impl ForecastRun {
    /// Execute the full pipeline
    pub fn execute(
        params: ForecastParams,
        controls: SimulationControls,
    ) -> Result<Self, ForecastError> {
        params.validate()?;
        controls.validate()?;

        let productivity_params =
            LogNormalParams::from_moments(params.mean_monthly_hiring, params.std_monthly_hiring)?;

        let availability = sample_normal(
            "availability_fraction",
            params.mean_availability,
            params.std_availability,
            controls.sample_count,
            controls.availability_seed(),
        )?;
        let productivity = sample_log_normal(
            "productivity_rate",
            productivity_params,
            controls.sample_count,
            controls.productivity_seed(),
        )?;

        let mut baseline = BaselineForecast::run(&params, &availability, &productivity)?;

        let curve = SaturationCurve::from_controls(&controls)?;
        let saturation =
            SaturationAdjustment::compute(curve, &params, &availability, &productivity)?;
        for (record, &adjusted) in baseline
            .records
            .iter_mut()
            .zip(saturation.adjusted_hires.iter())
        {
            record.adjusted_hires = Some(adjusted);
        }

        let scenarios = ScenarioSweep::run(
            &params,
            &controls,
            productivity_params,
            &saturation.adjustments,
        )?;

        let model = RegressionModel::fit(&scenarios)?;

        Ok(Self {
            id: ArtifactId::new(ArtifactPrefix::Run),
            created: Utc::now(),
            params,
            controls,
            productivity_params,
            baseline,
            saturation,
            scenarios,
            model,
        })
    }
}
