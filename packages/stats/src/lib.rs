#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Closed-form simple linear regression.
//!
//! Fits `y = slope * x + intercept` by ordinary least squares. Every series
//! in this system is tiny (a handful of forecast years), so the two-parameter
//! closed form is all that is needed; there is no matrix solver here.

use serde::Serialize;
use thiserror::Error;

/// Errors from fitting a regression line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// The input series contained no points.
    #[error("Regression input is empty")]
    Empty,

    /// The X and Y series differ in length.
    #[error("Regression inputs differ in length: {x_len} x values, {y_len} y values")]
    LengthMismatch {
        /// Number of x values provided.
        x_len: usize,
        /// Number of y values provided.
        y_len: usize,
    },
}

/// A fitted least-squares line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearFit {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Y-intercept of the fitted line.
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluates the fitted line at `x`.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a least-squares line through the given points.
///
/// A series where every x value is identical has no defined slope; the
/// policy is slope 0 with the intercept at the mean of y, so callers always
/// get a usable horizontal trend line instead of an error.
///
/// # Errors
///
/// Returns an error if the series are empty or differ in length.
#[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<LinearFit, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Err(StatsError::Empty);
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut centered_xx = 0.0;
    let mut centered_xy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        centered_xx += dx * dx;
        centered_xy += dx * (yi - y_mean);
    }

    let slope = if centered_xx > 0.0 {
        centered_xy / centered_xx
    } else {
        0.0
    };
    let intercept = y_mean - slope * x_mean;

    Ok(LinearFit { slope, intercept })
}
