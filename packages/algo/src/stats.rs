//! Statistics Helpers
//!
//! Mean and sample standard deviation over the score window.

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (n - 1 denominator)
///
/// Undefined for fewer than two samples; returns 0.0 in that case, callers
/// that need a stand-in for single-element histories handle it themselves.
pub fn sample_std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mu = mean(samples);
    let variance =
        samples.iter().map(|x| (x - mu) * (x - mu)).sum::<f64>() / (samples.len() - 1) as f64;
    variance.sqrt()
}

// ==================== Tests ====================
