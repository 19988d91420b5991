//! Standard normal distribution helpers
//!
//! Thin wrappers over the `statrs` error functions plus the truncated
//! moment functions (`v`, `w`, `vt`, `wt`) used by draw and margin aware
//! rating updates.

use statrs::consts::SQRT_2PI;
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::SQRT_2;

/// Denominator floor for the truncated moment functions
pub const EPSILON: f64 = 1e-10;

/// Cumulative distribution function of N(0, 1)
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Inverse cumulative distribution function of N(0, 1)
pub fn inv_cdf(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Probability density function of N(0, 1)
pub fn pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / SQRT_2PI
}

/// Mean additive correction of a one-sided truncated Gaussian
pub fn v(x: f64, t: f64) -> f64 {
    let xt = x - t;
    let denom = cdf(xt);
    if denom < EPSILON {
        return -xt;
    }
    pdf(xt) / denom
}

/// Variance multiplicative correction of a one-sided truncated Gaussian
pub fn w(x: f64, t: f64) -> f64 {
    let xt = x - t;
    let denom = cdf(xt);
    if denom < EPSILON {
        return if x < 0.0 { 1.0 } else { 0.0 };
    }
    let v = v(x, t);
    v * (v + xt)
}

/// Mean additive correction of a two-sided truncated Gaussian
pub fn vt(x: f64, t: f64) -> f64 {
    let xx = x.abs();
    let b = cdf(t - xx) - cdf(-t - xx);
    if b < EPSILON {
        return if x < 0.0 { -x - t } else { -x + t };
    }
    let a = pdf(-t - xx) - pdf(t - xx);
    (if x < 0.0 { -a } else { a }) / b
}

/// Variance multiplicative correction of a two-sided truncated Gaussian
pub fn wt(x: f64, t: f64) -> f64 {
    let xx = x.abs();
    let b = cdf(t - xx) - cdf(-t - xx);
    if b < EPSILON {
        return 1.0;
    }
    ((t - xx) * pdf(t - xx) + (t + xx) * pdf(-t - xx)) / b + vt(x, t).powi(2)
}
