//! Numeric helpers shared by the table generators.

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Round `value` to `decimals` places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Draw from `N(mean, std_dev)`; a zero, negative or non-finite spread collapses to `mean`.
pub fn sample_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    if !std_dev.is_finite() || std_dev <= 0.0 {
        return mean;
    }
    match Normal::new(mean, std_dev) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}

/// Bernoulli draw with `probability` clamped into `[0, 1]`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.random::<f64>() < probability.clamp(0.0, 1.0)
}

/// `numerator / denominator`, or `0.0` when the denominator is not positive.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
