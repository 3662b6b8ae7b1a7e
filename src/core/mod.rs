//! Core module - configuration, identity, and stochastic machinery

pub mod config;
pub mod distribution;
pub mod identity;
pub mod sampler;
pub mod stats;

pub use config::{ForecastParams, ParameterError, SeedMode, SimulationControls};
pub use distribution::LogNormalParams;
pub use identity::{ArtifactId, ArtifactPrefix, IdParseError};
pub use sampler::SampleVector;
