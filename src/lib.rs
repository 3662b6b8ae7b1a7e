//! Hirecast: stochastic workforce hiring-capacity forecasting
//!
//! Given historical estimates of staff availability and per-staffer hiring
//! productivity, hirecast produces a probabilistic forecast of annual hiring
//! output, evaluates the likelihood of meeting a fiscal hiring goal, applies
//! a logistic capacity-saturation adjustment, sweeps the forecast across a
//! grid of workforce sizes, and fits a variance-aware regression relating
//! workforce size and staff availability to expected hiring output.
//!
//! The pipeline is a single-pass, deterministic-given-seed batch computation:
//! plotting, reporting, and parameter loading are left to callers, which
//! consume only the numeric tables and fitted artifacts produced here.

pub mod core;
pub mod model;
