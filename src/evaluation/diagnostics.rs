//! Accuracy diagnostics for comparing spatial predictors.
//!
//! ## Purpose
//!
//! This module scores predictions against held-out observations, so a
//! buffer-distance forest and a geostatistical baseline can be compared on the
//! same folds.
//!
//! ## Key concepts
//!
//! * **RMSE / MAE**: root mean squared and mean absolute error.
//! * **Mean error**: average of `predicted - observed` (bias).
//! * **R²**: amount of variation explained, `1 - MSE / var(observed)`, with
//!   the population variance of the observations.
//! * **Correlation**: Pearson correlation of observed and predicted.
//!
//! ## Non-goals
//!
//! * This module does not produce the predictions.

// External dependencies
use core::fmt;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::RfspError;

/// Summary accuracy statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics<T> {
    /// Number of scored pairs.
    pub n: usize,
    /// Root mean squared error.
    pub rmse: T,
    /// Mean absolute error.
    pub mae: T,
    /// Mean of `predicted - observed`.
    pub mean_error: T,
    /// Amount of variation explained; `None` when observations are constant.
    pub r_squared: Option<T>,
    /// Pearson correlation; `None` when either side is constant.
    pub correlation: Option<T>,
}

impl<T: Float> Diagnostics<T> {
    /// Score `predicted` against `observed`.
    pub fn compute(observed: &[T], predicted: &[T]) -> Result<Self, RfspError> {
        if observed.is_empty() {
            return Err(RfspError::EmptyInput);
        }
        if observed.len() != predicted.len() {
            return Err(RfspError::MismatchedInputs {
                what: "predictions",
                expected: observed.len(),
                got: predicted.len(),
            });
        }

        let n = T::from(observed.len()).ok_or(RfspError::EmptyInput)?;
        let mean_obs = observed.iter().fold(T::zero(), |a, &b| a + b) / n;
        let mean_pred = predicted.iter().fold(T::zero(), |a, &b| a + b) / n;

        let mut sse = T::zero();
        let mut sae = T::zero();
        let mut se = T::zero();
        let mut sxx = T::zero();
        let mut syy = T::zero();
        let mut sxy = T::zero();
        for (&o, &p) in observed.iter().zip(predicted.iter()) {
            let e = p - o;
            sse = sse + e * e;
            sae = sae + e.abs();
            se = se + e;
            let dx = o - mean_obs;
            let dy = p - mean_pred;
            sxx = sxx + dx * dx;
            syy = syy + dy * dy;
            sxy = sxy + dx * dy;
        }

        let mse = sse / n;
        let r_squared = if sxx > T::zero() {
            Some(T::one() - mse / (sxx / n))
        } else {
            None
        };
        let correlation = if sxx > T::zero() && syy > T::zero() {
            Some(sxy / (sxx * syy).sqrt())
        } else {
            None
        };

        Ok(Self {
            n: observed.len(),
            rmse: mse.sqrt(),
            mae: sae / n,
            mean_error: se / n,
            r_squared,
            correlation,
        })
    }
}

impl<T: Float + fmt::Display> fmt::Display for Diagnostics<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Diagnostics (n = {}):", self.n)?;
        writeln!(f, "  RMSE:        {:.4}", self.rmse)?;
        writeln!(f, "  MAE:         {:.4}", self.mae)?;
        writeln!(f, "  Mean error:  {:.4}", self.mean_error)?;
        match self.r_squared {
            Some(r2) => writeln!(f, "  R^2:         {:.4}", r2)?,
            None => writeln!(f, "  R^2:         n/a")?,
        }
        match self.correlation {
            Some(r) => write!(f, "  Correlation: {:.4}", r),
            None => write!(f, "  Correlation: n/a"),
        }
    }
}
