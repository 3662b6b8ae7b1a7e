//! Weighted regression estimator - variance-aware GLS fit over the sweep table
//!
//! Ordinary least squares on the scenario table is heteroskedastic: residual
//! variance scales with workforce size. The estimator models residual variance
//! as `sigma^2 * exp(2 * delta * (workforce_size - mean))` and estimates the
//! exponent `delta` by restricted maximum likelihood, profiling the
//! coefficients and scale out of the objective and maximizing over `delta`
//! with a golden-section search. Workforce size and availability ratio are
//! centered on their table means, which removes collinearity between the
//! intercept and the slope terms; the centering constants travel with the
//! fitted model so it can be applied to new inputs.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::{ArtifactId, ArtifactPrefix};
use crate::model::scenario::ScenarioSweep;

/// Minimum rows for a 3-parameter fit with a variance exponent
const MIN_ROWS: usize = 10;

/// Search bracket for the variance exponent
const EXPONENT_BRACKET: (f64, f64) = (-0.5, 0.5);

/// Inverse golden ratio
const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Estimation failure in the weighted regression
#[derive(Debug, Error, Diagnostic)]
pub enum EstimationError {
    #[error("weighted normal equations are singular (determinant {determinant:.3e})")]
    #[diagnostic(
        code(hirecast::regression::singular),
        help("check that workforce size and availability ratio both vary across the table")
    )]
    SingularSystem { determinant: f64 },

    #[error("variance-exponent search hit the bracket boundary at {exponent}")]
    #[diagnostic(
        code(hirecast::regression::non_convergent),
        help("the exponential variance model may not describe this table; inspect residuals")
    )]
    NonConvergent { exponent: f64 },

    #[error("too few rows to fit: {rows} (need at least {min})")]
    #[diagnostic(code(hirecast::regression::too_few_rows))]
    TooFewRows { rows: usize, min: usize },

    #[error("columns must have equal length: y={y}, workforce={workforce}, ratio={ratio}")]
    #[diagnostic(code(hirecast::regression::column_mismatch))]
    ColumnLengthMismatch {
        y: usize,
        workforce: usize,
        ratio: usize,
    },
}

/// One fitted coefficient with its standard error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Predictor name
    pub name: String,

    /// Point estimate, on centered inputs
    pub estimate: f64,

    /// Standard error from the weighted normal equations
    pub std_error: f64,
}

/// Fitted regression artifact
///
/// Created once from a scenario table and immutable afterwards; any refit is
/// a new instance with a fresh id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    /// Unique identifier (FIT-...)
    pub id: ArtifactId,

    /// Fit timestamp
    pub created: DateTime<Utc>,

    /// Intercept, workforce-size slope, availability-ratio slope
    pub coefficients: Vec<Coefficient>,

    /// Exponent of the residual-variance function of centered workforce size
    pub variance_exponent: f64,

    /// Residual standard error at the mean workforce size
    pub residual_std_error: f64,

    /// Restricted log-likelihood at the optimum
    pub log_likelihood: f64,

    /// Akaike information criterion
    pub aic: f64,

    /// Bayesian information criterion
    pub bic: f64,

    /// Centering constant for workforce size
    pub mean_workforce_size: f64,

    /// Centering constant for the staff availability ratio
    pub mean_availability_ratio: f64,

    /// Number of rows the model was fitted on
    pub n_obs: usize,
}

impl RegressionModel {
    /// Fit the model to a scenario sweep table
    pub fn fit(sweep: &ScenarioSweep) -> Result<Self, EstimationError> {
        let y: Vec<f64> = sweep
            .records
            .iter()
            .map(|r| r.adjusted_annual_hires as f64)
            .collect();
        let workforce: Vec<f64> = sweep
            .records
            .iter()
            .map(|r| r.workforce_size as f64)
            .collect();
        let ratio: Vec<f64> = sweep
            .records
            .iter()
            .map(|r| r.staff_availability_ratio)
            .collect();
        Self::fit_columns(&y, &workforce, &ratio)
    }

    /// Fit the model to raw columns of equal length
    pub fn fit_columns(
        y: &[f64],
        workforce: &[f64],
        ratio: &[f64],
    ) -> Result<Self, EstimationError> {
        let n = y.len();
        if workforce.len() != n || ratio.len() != n {
            return Err(EstimationError::ColumnLengthMismatch {
                y: n,
                workforce: workforce.len(),
                ratio: ratio.len(),
            });
        }
        if n < MIN_ROWS {
            return Err(EstimationError::TooFewRows { rows: n, min: MIN_ROWS });
        }

        let mean_w = workforce.iter().sum::<f64>() / n as f64;
        let mean_r = ratio.iter().sum::<f64>() / n as f64;
        let cw: Vec<f64> = workforce.iter().map(|w| w - mean_w).collect();
        let cr: Vec<f64> = ratio.iter().map(|r| r - mean_r).collect();

        // bracket the variance exponent, then golden-section the profiled
        // restricted likelihood
        let (mut lo, mut hi) = EXPONENT_BRACKET;
        let mut c = hi - INV_PHI * (hi - lo);
        let mut d = lo + INV_PHI * (hi - lo);
        let mut fc = profile_reml(y, &cw, &cr, c)?;
        let mut fd = profile_reml(y, &cw, &cr, d)?;

        while hi - lo > 1e-9 {
            if fc.log_likelihood > fd.log_likelihood {
                hi = d;
                d = c;
                fd = fc;
                c = hi - INV_PHI * (hi - lo);
                fc = profile_reml(y, &cw, &cr, c)?;
            } else {
                lo = c;
                c = d;
                fc = fd;
                d = lo + INV_PHI * (hi - lo);
                fd = profile_reml(y, &cw, &cr, d)?;
            }
        }

        let delta = (lo + hi) / 2.0;
        let span = EXPONENT_BRACKET.1 - EXPONENT_BRACKET.0;
        if (delta - EXPONENT_BRACKET.0).abs() < span * 1e-3
            || (delta - EXPONENT_BRACKET.1).abs() < span * 1e-3
        {
            return Err(EstimationError::NonConvergent { exponent: delta });
        }

        let point = profile_reml(y, &cw, &cr, delta)?;
        let sigma = point.sigma2.sqrt();
        let coefficients = vec![
            Coefficient {
                name: "intercept".to_string(),
                estimate: point.beta[0],
                std_error: (point.sigma2 * point.inv[0][0]).sqrt(),
            },
            Coefficient {
                name: "workforce_size".to_string(),
                estimate: point.beta[1],
                std_error: (point.sigma2 * point.inv[1][1]).sqrt(),
            },
            Coefficient {
                name: "staff_availability_ratio".to_string(),
                estimate: point.beta[2],
                std_error: (point.sigma2 * point.inv[2][2]).sqrt(),
            },
        ];

        // coefficients + variance exponent + residual scale
        let k = 5.0;
        let aic = -2.0 * point.log_likelihood + 2.0 * k;
        let bic = -2.0 * point.log_likelihood + k * (n as f64).ln();

        Ok(Self {
            id: ArtifactId::new(ArtifactPrefix::Fit),
            created: Utc::now(),
            coefficients,
            variance_exponent: delta,
            residual_std_error: sigma,
            log_likelihood: point.log_likelihood,
            aic,
            bic,
            mean_workforce_size: mean_w,
            mean_availability_ratio: mean_r,
            n_obs: n,
        })
    }

    /// Expected adjusted annual hires for new inputs, applying the centering
    /// constants the model was fitted with
    pub fn predict(&self, workforce_size: f64, availability_ratio: f64) -> f64 {
        self.coefficients[0].estimate
            + self.coefficients[1].estimate * (workforce_size - self.mean_workforce_size)
            + self.coefficients[2].estimate * (availability_ratio - self.mean_availability_ratio)
    }
}

/// Profiled REML evaluation at one variance exponent
struct ProfilePoint {
    beta: [f64; 3],
    inv: [[f64; 3]; 3],
    sigma2: f64,
    log_likelihood: f64,
}

/// Evaluate the profiled restricted log-likelihood for a fixed exponent.
///
/// Weights are `exp(-2 * delta * cw_i)`; the coefficients solve the weighted
/// 3x3 normal equations and the residual scale is the REML estimate
/// `rss_w / (n - 3)`.
fn profile_reml(
    y: &[f64],
    cw: &[f64],
    cr: &[f64],
    delta: f64,
) -> Result<ProfilePoint, EstimationError> {
    let n = y.len();
    let mut a = [[0.0f64; 3]; 3];
    let mut b = [0.0f64; 3];
    let mut sum_log_lambda = 0.0;

    for i in 0..n {
        let log_lambda = 2.0 * delta * cw[i];
        sum_log_lambda += log_lambda;
        let w = (-log_lambda).exp();
        let x = [1.0, cw[i], cr[i]];
        for j in 0..3 {
            b[j] += w * x[j] * y[i];
            for k in 0..3 {
                a[j][k] += w * x[j] * x[k];
            }
        }
    }

    let (beta, inv, det) = solve_sym3(&a, &b)?;

    let mut rss = 0.0;
    for i in 0..n {
        let fitted = beta[0] + beta[1] * cw[i] + beta[2] * cr[i];
        let r = y[i] - fitted;
        rss += (-2.0 * delta * cw[i]).exp() * r * r;
    }

    let dof = (n - 3) as f64;
    let sigma2 = rss / dof;
    let log_likelihood = -0.5
        * (dof * ((2.0 * std::f64::consts::PI * sigma2).ln() + 1.0) + sum_log_lambda + det.ln());

    Ok(ProfilePoint {
        beta,
        inv,
        sigma2,
        log_likelihood,
    })
}

/// Solve a symmetric positive-definite 3x3 system by adjugate inversion,
/// returning the solution, the inverse, and the determinant
fn solve_sym3(
    a: &[[f64; 3]; 3],
    b: &[f64; 3],
) -> Result<([f64; 3], [[f64; 3]; 3], f64), EstimationError> {
    let det = a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
        - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
        + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0]);

    let scale = a
        .iter()
        .flatten()
        .fold(0.0f64, |acc, &v| acc.max(v.abs()));
    if !det.is_finite() || det.abs() <= 1e-12 * scale.powi(3) {
        return Err(EstimationError::SingularSystem { determinant: det });
    }

    let mut inv = [[0.0f64; 3]; 3];
    inv[0][0] = (a[1][1] * a[2][2] - a[1][2] * a[2][1]) / det;
    inv[0][1] = (a[0][2] * a[2][1] - a[0][1] * a[2][2]) / det;
    inv[0][2] = (a[0][1] * a[1][2] - a[0][2] * a[1][1]) / det;
    inv[1][0] = (a[1][2] * a[2][0] - a[1][0] * a[2][2]) / det;
    inv[1][1] = (a[0][0] * a[2][2] - a[0][2] * a[2][0]) / det;
    inv[1][2] = (a[0][2] * a[1][0] - a[0][0] * a[1][2]) / det;
    inv[2][0] = (a[1][0] * a[2][1] - a[1][1] * a[2][0]) / det;
    inv[2][1] = (a[0][1] * a[2][0] - a[0][0] * a[2][1]) / det;
    inv[2][2] = (a[0][0] * a[1][1] - a[0][1] * a[1][0]) / det;

    let mut beta = [0.0f64; 3];
    for j in 0..3 {
        for k in 0..3 {
            beta[j] += inv[j][k] * b[k];
        }
    }

    Ok((beta, inv, det))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampler::sample_normal;

    /// Synthetic heteroskedastic table with known coefficients: 11 workforce
    /// sizes, `rows_per` rows each, noise sd growing exponentially in the
    /// centered size
    fn synthetic(
        rows_per: usize,
        b0: f64,
        b1: f64,
        b2: f64,
        delta: f64,
    ) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let sizes: Vec<f64> = (0..11).map(|i| 75.0 + 7.5 * f64::from(i)).collect();
        let n = sizes.len() * rows_per;
        let ratio_draws = sample_normal("ratio", 0.7, 0.1, n, 11).unwrap();
        let noise_draws = sample_normal("noise", 0.0, 1.0, n, 13).unwrap();

        let mean_w = sizes.iter().sum::<f64>() / sizes.len() as f64;
        let mut y = Vec::with_capacity(n);
        let mut workforce = Vec::with_capacity(n);
        let mut ratio = Vec::with_capacity(n);
        let mut idx = 0;
        for &w in &sizes {
            for _ in 0..rows_per {
                let r = ratio_draws.values()[idx];
                let cw = w - mean_w;
                let sd = 200.0 * (delta * cw).exp();
                y.push(b0 + b1 * cw + b2 * (r - 0.7) + sd * noise_draws.values()[idx]);
                workforce.push(w);
                ratio.push(r);
                idx += 1;
            }
        }
        (y, workforce, ratio)
    }

    #[test]
    fn test_recovers_known_coefficients() {
        let (y, workforce, ratio) = synthetic(200, 500.0, 40.0, 3000.0, 0.01);
        let model = RegressionModel::fit_columns(&y, &workforce, &ratio).unwrap();

        assert!((model.coefficients[0].estimate - 500.0).abs() < 30.0);
        assert!((model.coefficients[1].estimate - 40.0).abs() < 2.0);
        assert!((model.coefficients[2].estimate - 3000.0).abs() < 300.0);
    }

    #[test]
    fn test_variance_exponent_sign_matches_injected_trend() {
        let (y, workforce, ratio) = synthetic(200, 500.0, 40.0, 3000.0, 0.01);
        let model = RegressionModel::fit_columns(&y, &workforce, &ratio).unwrap();
        assert!(model.variance_exponent > 0.0);
        assert!((model.variance_exponent - 0.01).abs() < 0.005);

        let (y, workforce, ratio) = synthetic(200, 500.0, 40.0, 3000.0, -0.01);
        let model = RegressionModel::fit_columns(&y, &workforce, &ratio).unwrap();
        assert!(model.variance_exponent < 0.0);
    }

    #[test]
    fn test_standard_errors_are_positive_and_finite() {
        let (y, workforce, ratio) = synthetic(100, 500.0, 40.0, 3000.0, 0.01);
        let model = RegressionModel::fit_columns(&y, &workforce, &ratio).unwrap();
        for coef in &model.coefficients {
            assert!(coef.std_error.is_finite() && coef.std_error > 0.0);
        }
        assert!(model.residual_std_error > 0.0);
        assert!(model.log_likelihood.is_finite());
        assert!(model.aic.is_finite() && model.bic.is_finite());
    }

    #[test]
    fn test_predict_at_means_returns_intercept() {
        let (y, workforce, ratio) = synthetic(100, 500.0, 40.0, 3000.0, 0.01);
        let model = RegressionModel::fit_columns(&y, &workforce, &ratio).unwrap();
        let at_means = model.predict(model.mean_workforce_size, model.mean_availability_ratio);
        assert!((at_means - model.coefficients[0].estimate).abs() < 1e-9);
    }

    #[test]
    fn test_constant_workforce_is_singular() {
        let (y, _, ratio) = synthetic(50, 500.0, 40.0, 3000.0, 0.01);
        let workforce = vec![100.0; y.len()];
        assert!(matches!(
            RegressionModel::fit_columns(&y, &workforce, &ratio),
            Err(EstimationError::SingularSystem { .. })
        ));
    }

    #[test]
    fn test_too_few_rows_rejected() {
        let y = vec![1.0; 5];
        let workforce = vec![1.0; 5];
        let ratio = vec![0.5; 5];
        assert!(matches!(
            RegressionModel::fit_columns(&y, &workforce, &ratio),
            Err(EstimationError::TooFewRows { rows: 5, .. })
        ));
    }

    #[test]
    fn test_mismatched_columns_rejected() {
        let (y, workforce, ratio) = synthetic(50, 500.0, 40.0, 3000.0, 0.01);
        let short_ratio = &ratio[..ratio.len() - 1];
        assert!(matches!(
            RegressionModel::fit_columns(&y, &workforce, short_ratio),
            Err(EstimationError::ColumnLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_fit_is_deterministic_up_to_identity() {
        let (y, workforce, ratio) = synthetic(100, 500.0, 40.0, 3000.0, 0.01);
        let a = RegressionModel::fit_columns(&y, &workforce, &ratio).unwrap();
        let b = RegressionModel::fit_columns(&y, &workforce, &ratio).unwrap();
        assert_eq!(a.coefficients, b.coefficients);
        assert_eq!(a.variance_exponent, b.variance_exponent);
        // a refit is a distinct artifact
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_model_roundtrip() {
        let (y, workforce, ratio) = synthetic(100, 500.0, 40.0, 3000.0, 0.01);
        let model = RegressionModel::fit_columns(&y, &workforce, &ratio).unwrap();
        let yaml = serde_yml::to_string(&model).unwrap();
        let parsed: RegressionModel = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.coefficients, model.coefficients);
        assert_eq!(parsed.n_obs, model.n_obs);
    }
}
