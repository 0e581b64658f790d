//! Cell values of a regression matrix.
//!
//! ## Purpose
//!
//! A regression matrix mixes numeric columns (covariates, distances, weights,
//! numeric targets) with categorical ones (class targets, the block identifier
//! of a stacked matrix). `Value` carries either, plus an explicit missing marker
//! used while rows are being assembled.
//!
//! ## Invariants
//!
//! * A non-finite `Numeric` value is treated as missing (raster nodata).
//! * No `Missing` value survives into an assembled matrix.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use core::fmt;
use num_traits::Float;

// ============================================================================
// Column Kind
// ============================================================================

/// Storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnKind {
    /// Floating-point values.
    Numeric,

    /// Class labels.
    Categorical,
}

// ============================================================================
// Value
// ============================================================================

/// A single cell of a regression row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value<T> {
    /// Numeric measurement.
    Numeric(T),

    /// Class label.
    Categorical(String),

    /// No value observed.
    Missing,
}

impl<T: Float> Value<T> {
    /// True for `Missing` and for non-finite numeric values.
    #[inline]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Numeric(v) => !v.is_finite(),
            Self::Categorical(_) => false,
            Self::Missing => true,
        }
    }

    /// The numeric value, if this is a finite number.
    #[inline]
    pub fn as_numeric(&self) -> Option<T> {
        match self {
            Self::Numeric(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// The class label, if categorical.
    #[inline]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Categorical(label) => Some(label),
            _ => None,
        }
    }

    /// Kind of a present value; `None` when missing.
    pub fn kind(&self) -> Option<ColumnKind> {
        if self.is_missing() {
            return None;
        }
        match self {
            Self::Numeric(_) => Some(ColumnKind::Numeric),
            Self::Categorical(_) => Some(ColumnKind::Categorical),
            Self::Missing => None,
        }
    }

    /// Wrap a raster sample, mapping nodata to `Missing`.
    #[inline]
    pub fn from_sample(v: T) -> Self {
        if v.is_finite() {
            Self::Numeric(v)
        } else {
            Self::Missing
        }
    }
}

impl<T: Float + fmt::Display> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{:.4}", v),
            Self::Categorical(label) => f.write_str(label),
            Self::Missing => f.write_str("NA"),
        }
    }
}
