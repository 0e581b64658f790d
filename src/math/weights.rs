//! Case-weight helpers applied by the caller before assembly.
//!
//! The assembler carries weights through unmodified. Transforms such as
//! inverse measurement-variance weighting happen here, on the caller's side.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use num_traits::Float;

/// Inverse-variance weights `1 / var`.
///
/// Non-positive or non-finite variances yield NaN, which the assembler
/// treats as a missing weight and excludes.
pub fn inverse_variance_weights<T: Float>(variances: &[T]) -> Vec<T> {
    variances
        .iter()
        .map(|&v| {
            if v.is_finite() && v > T::zero() {
                T::one() / v
            } else {
                T::nan()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_variance() {
        let w = inverse_variance_weights(&[0.5, 4.0, 0.0, f64::INFINITY]);
        assert_eq!(w[0], 2.0);
        assert_eq!(w[1], 0.25);
        assert!(w[2].is_nan());
        assert!(w[3].is_nan());
    }
}
