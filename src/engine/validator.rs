//! Input validation for buffer-distance generation and matrix assembly.
//!
//! ## Purpose
//!
//! This module provides the validation functions run before any layer is
//! generated or any row is assembled. It checks reference-point sets, grid
//! alignment, coordinate systems, weights and builder configuration.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Named errors**: every error names the point, grid, layer or column
//!   that triggered it.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not filter rows (missing values are handled by the
//!   assembler, which drops and counts them).
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::ToString;
#[cfg(feature = "std")]
use std::string::ToString;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::crs::Crs;
use crate::primitives::errors::RfspError;
use crate::primitives::grid::Grid;
use crate::primitives::point::{Observation, ReferencePoint};

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for generation and assembly inputs.
///
/// Provides static methods returning `Result<(), RfspError>` that fail fast
/// upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Reference Points
    // ========================================================================

    /// Validate a reference-point set for buffer-distance generation.
    pub fn validate_reference_points<T: Float>(points: &[ReferencePoint<T>]) -> Result<(), RfspError> {
        // Check 1: Non-empty
        if points.is_empty() {
            return Err(RfspError::EmptyReferenceSet);
        }

        // Check 2: Representable coordinates
        for p in points {
            if !p.coordinate.is_finite() {
                return Err(RfspError::InvalidGeometry {
                    id: p.id.clone(),
                    reason: format!(
                        "coordinate ({}, {}) is not finite",
                        p.coordinate.x.to_f64().unwrap_or(f64::NAN),
                        p.coordinate.y.to_f64().unwrap_or(f64::NAN)
                    ),
                });
            }
        }

        // Check 3: Unique identifiers
        for (i, p) in points.iter().enumerate() {
            if points[..i].iter().any(|q| q.id == p.id) {
                return Err(RfspError::DuplicateIdentifier(p.id.clone()));
            }
        }

        Ok(())
    }

    /// Validate one class label per reference point.
    pub fn validate_classes(classes: &[impl AsRef<str>], points: usize) -> Result<(), RfspError> {
        if classes.len() != points {
            return Err(RfspError::MismatchedInputs {
                what: "class labels",
                expected: points,
                got: classes.len(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Grids
    // ========================================================================

    /// Validate that `grid` carries the expected CRS.
    pub fn validate_grid_crs<T: Float>(expected: &Crs, grid: &Grid<T>) -> Result<(), RfspError> {
        expected.ensure_matches(grid.crs(), grid.name())
    }

    /// Validate that `grid` has at least one layer.
    pub fn validate_has_layers<T: Float>(grid: &Grid<T>) -> Result<(), RfspError> {
        if grid.layers().is_empty() {
            return Err(RfspError::InvalidGrid(format!(
                "'{}' has no layers",
                grid.name()
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Observations and Weights
    // ========================================================================

    /// Validate that there is one weight per observation and none is negative.
    ///
    /// Non-finite weights pass; the assembler drops those rows as missing.
    pub fn validate_weights<T: Float>(
        observations: &[Observation<T>],
        weights: &[T],
    ) -> Result<(), RfspError> {
        if weights.len() != observations.len() {
            return Err(RfspError::MismatchedInputs {
                what: "weights",
                expected: observations.len(),
                got: weights.len(),
            });
        }
        for (obs, &w) in observations.iter().zip(weights.iter()) {
            if w.is_finite() && w < T::zero() {
                return Err(RfspError::InvalidWeight {
                    id: obs.site.to_string(),
                    value: w.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Validate that a column name is non-empty.
    pub fn validate_column_name(name: &str) -> Result<(), RfspError> {
        if name.trim().is_empty() {
            return Err(RfspError::InvalidModelSpec(
                "column names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), RfspError> {
        if let Some(param) = duplicate_param {
            return Err(RfspError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        let empty: Vec<ReferencePoint<f64>> = Vec::new();
        assert_eq!(
            Validator::validate_reference_points(&empty).unwrap_err(),
            RfspError::EmptyReferenceSet
        );

        let bad = vec![
            ReferencePoint::new("a", 0.0, 0.0),
            ReferencePoint::new("b", f64::NAN, 0.0),
        ];
        assert!(matches!(
            Validator::validate_reference_points(&bad),
            Err(RfspError::InvalidGeometry { ref id, .. }) if id == "b"
        ));

        let dup = vec![
            ReferencePoint::new("a", 0.0, 0.0),
            ReferencePoint::new("a", 1.0, 0.0),
        ];
        assert_eq!(
            Validator::validate_reference_points(&dup).unwrap_err(),
            RfspError::DuplicateIdentifier("a".to_string())
        );
    }

    #[test]
    fn test_weights() {
        let obs = vec![
            Observation::numeric("s1", 0.0, 0.0, 1.0),
            Observation::numeric("s2", 0.0, 0.0, 1.0),
        ];
        assert!(Validator::validate_weights(&obs, &[1.0, f64::NAN]).is_ok());
        assert_eq!(
            Validator::validate_weights(&obs, &[1.0]).unwrap_err(),
            RfspError::MismatchedInputs {
                what: "weights",
                expected: 2,
                got: 1
            }
        );
        assert_eq!(
            Validator::validate_weights(&obs, &[1.0, -0.5]).unwrap_err(),
            RfspError::InvalidWeight {
                id: "s2".to_string(),
                value: -0.5
            }
        );
    }
}
