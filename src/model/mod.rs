//! Forecasting pipeline stages
//!
//! The pipeline runs strictly forward:
//!
//! - [`BaselineForecast`] - raw availability x productivity hiring output and
//!   goal-attainment statistics
//! - [`SaturationAdjustment`] - logistic capacity-saturation transform
//! - [`ScenarioSweep`] - the saturation model swept across workforce sizes
//! - [`RegressionModel`] - variance-aware GLS/REML fit over the sweep table
//! - [`ForecastRun`] - one-shot artifact tying all stages together

pub mod baseline;
pub mod forecast;
pub mod regression;
pub mod saturation;
pub mod scenario;

pub use baseline::{BaselineForecast, BaselineSummary, SimulationRecord};
pub use forecast::{ForecastError, ForecastRun};
pub use regression::{Coefficient, EstimationError, RegressionModel};
pub use saturation::{SaturationAdjustment, SaturationCurve};
pub use scenario::{ScenarioRecord, ScenarioSummary, ScenarioSweep};
