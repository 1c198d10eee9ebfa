// src/analysis/stats.rs
use std::f64::consts::{PI, SQRT_2};

use serde::{Serialize, Deserialize};
use crate::error::StatsError;

// Abramowitz & Stegun 7.1.26
const ERF_A1: f64 = 0.254829592;
const ERF_A2: f64 = -0.284496736;
const ERF_A3: f64 = 1.421413741;
const ERF_A4: f64 = -1.453152027;
const ERF_A5: f64 = 1.061405429;
const ERF_P: f64 = 0.3275911;

/// Mean and population standard deviation of a set of finish times.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
}

impl Moments {
    pub fn is_degenerate(&self) -> bool {
        !(self.std_dev.is_finite() && self.std_dev > 0.0)
    }
}

/// Gaussian density. `std_dev` must be positive, otherwise the result is
/// not finite.
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    (1.0 / (std_dev * (2.0 * PI).sqrt())) * (-0.5 * ((x - mean) / std_dev).powi(2)).exp()
}

pub fn normal_cdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / (std_dev * SQRT_2);
    0.5 * (1.0 + erf(z))
}

/// Rational approximation of the error function, absolute error below 1.5e-7.
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + ERF_P * x);
    let y = 1.0 - ((((ERF_A5 * t + ERF_A4) * t + ERF_A3) * t + ERF_A2) * t + ERF_A1) * t * (-x * x).exp();

    sign * y
}

pub fn z_score_to_percentile(z_score: f64) -> f64 {
    normal_cdf(z_score, 0.0, 1.0) * 100.0
}

pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / 60.0
}

pub fn z_score(value: f64, moments: &Moments) -> Result<f64, StatsError> {
    if moments.is_degenerate() {
        return Err(StatsError::DegenerateVariance);
    }
    Ok((value - moments.mean) / moments.std_dev)
}
