//! Coordinate reference system identifiers.
//!
//! The crate never reprojects. A `Crs` is only compared: every point set and
//! grid taking part in one generation or assembly call must carry the same
//! identifier after normalization.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(feature = "std")]
use std::string::{String, ToString};

use core::fmt;

use crate::primitives::errors::RfspError;

/// Normalized coordinate reference system identifier (e.g. `EPSG:28992`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crs(String);

impl Crs {
    /// Create a CRS from a free-form identifier.
    ///
    /// Surrounding whitespace is trimmed and letters are upper-cased, so
    /// `"epsg:3035 "` and `"EPSG:3035"` compare equal.
    pub fn new(identifier: &str) -> Self {
        Self(identifier.trim().to_uppercase())
    }

    /// Create a CRS from an EPSG code.
    pub fn epsg(code: u32) -> Self {
        Self(format!("EPSG:{}", code))
    }

    /// The normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fail with `CoordinateSystemMismatch` unless `found` equals `self`.
    ///
    /// `context` names the grid or point set that carries `found`.
    pub fn ensure_matches(&self, found: &Crs, context: &str) -> Result<(), RfspError> {
        if self != found {
            return Err(RfspError::CoordinateSystemMismatch {
                context: context.to_string(),
                expected: self.0.clone(),
                found: found.0.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(Crs::new(" epsg:3035 "), Crs::epsg(3035));
        assert_eq!(Crs::epsg(28992).as_str(), "EPSG:28992");
    }

    #[test]
    fn test_mismatch_names_context() {
        let err = Crs::epsg(3035)
            .ensure_matches(&Crs::epsg(4326), "elevation")
            .unwrap_err();
        assert_eq!(
            err,
            RfspError::CoordinateSystemMismatch {
                context: "elevation".to_string(),
                expected: "EPSG:3035".to_string(),
                found: "EPSG:4326".to_string(),
            }
        );
    }
}
