//! Summary statistics over simulated outcome vectors
//!
//! Sorted-vector order statistics: callers pass raw outcome slices, helpers
//! copy and sort once, then read percentiles by index.

/// Arithmetic mean
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Percentile via nearest-rank on a copy of the data, `p` in [0, 100]
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let index = ((p / 100.0) * (sorted.len() as f64 - 1.0)).round() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Median (50th percentile)
pub fn median(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// Median of integer outcomes
pub fn median_i64(values: &[i64]) -> f64 {
    let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    median(&as_f64)
}

/// Percentile of integer outcomes
pub fn percentile_i64(values: &[i64], p: f64) -> f64 {
    let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    percentile(&as_f64, p)
}

/// Fraction of outcomes strictly above `target`, on a 0-100 scale
pub fn exceedance_percent(values: &[i64], target: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let above = values.iter().filter(|&&v| v as f64 > target).count();
    (above as f64 / values.len() as f64) * 100.0
}
