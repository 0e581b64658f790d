//! Error types for buffer-distance generation and regression-matrix assembly.
//!
//! ## Purpose
//!
//! This module defines `RfspError`, the single error type returned by every
//! fallible operation in the crate. Each variant names the reference point,
//! grid, layer, column or block that triggered it so that a data-preparation
//! defect can be located without re-running the pipeline.
//!
//! ## Design notes
//!
//! * **Fatal vs recoverable**: `NoContainingCell` is produced by point-in-cell
//!   lookups; the assembler turns it into a dropped row. Every other variant
//!   aborts the call that produced it.
//! * **no_std**: `Display` is written by hand; `std::error::Error` is only
//!   implemented with the `std` feature.
//!
//! ## Non-goals
//!
//! * Errors from external regression or geostatistical engines are not
//!   wrapped; they are returned unchanged through the engine's own error type.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use core::fmt;

/// Error type for all fallible operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RfspError {
    /// An input collection that must be non-empty is empty.
    EmptyInput,

    /// Buffer distances were requested for zero reference points.
    EmptyReferenceSet,

    /// Two inputs that must share a coordinate reference system do not.
    CoordinateSystemMismatch {
        /// Grid, layer set or point set whose CRS disagrees.
        context: String,
        /// CRS required by the operation.
        expected: String,
        /// CRS actually carried by `context`.
        found: String,
    },

    /// A coordinate cannot be represented (non-finite or conflicting).
    InvalidGeometry {
        /// Identifier of the offending point or site.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An identifier occurs more than once where uniqueness is required.
    DuplicateIdentifier(String),

    /// An observation does not fall inside any cell of a grid.
    NoContainingCell {
        /// Observation site identifier.
        id: String,
        /// Grid that does not cover it.
        grid: String,
    },

    /// A layer name is already present on the grid.
    DuplicateLayer(String),

    /// A column name occurs more than once in a regression schema.
    DuplicateColumn(String),

    /// A layer does not hold one value per grid cell.
    LayerLengthMismatch {
        /// Layer name.
        layer: String,
        /// Number of cells of the grid.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Grid dimensions or geotransform are unusable.
    InvalidGrid(String),

    /// Two parallel inputs have different lengths.
    MismatchedInputs {
        /// What the second input holds (e.g. "weights").
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// A row index is past the end of a matrix.
    RowOutOfRange {
        /// Requested row.
        index: usize,
        /// Number of rows available.
        nrows: usize,
    },

    /// A case weight is negative.
    InvalidWeight {
        /// Observation site identifier.
        id: String,
        /// The weight value.
        value: f64,
    },

    /// Blocks to be stacked do not share one column set.
    SchemaMismatch {
        /// Block (target variable) that disagrees.
        block: String,
        /// Description of the difference.
        reason: String,
    },

    /// A column referenced by name is absent from the schema.
    UnknownColumn(String),

    /// A model specification is inconsistent with itself or the matrix.
    InvalidModelSpec(String),

    /// Fold count is unusable for the number of rows.
    InvalidFolds {
        /// Requested number of folds.
        k: usize,
        /// Number of rows to partition.
        n: usize,
    },

    /// A builder parameter was configured more than once.
    DuplicateParameter {
        /// Parameter name.
        parameter: &'static str,
    },
}

impl fmt::Display for RfspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Input is empty"),
            Self::EmptyReferenceSet => write!(f, "Reference point set is empty"),
            Self::CoordinateSystemMismatch {
                context,
                expected,
                found,
            } => write!(
                f,
                "Coordinate system mismatch in '{}': expected {}, found {}",
                context, expected, found
            ),
            Self::InvalidGeometry { id, reason } => {
                write!(f, "Invalid geometry for '{}': {}", id, reason)
            }
            Self::DuplicateIdentifier(id) => write!(f, "Duplicate identifier: '{}'", id),
            Self::NoContainingCell { id, grid } => {
                write!(f, "Observation '{}' is outside grid '{}'", id, grid)
            }
            Self::DuplicateLayer(name) => write!(f, "Layer '{}' already exists", name),
            Self::DuplicateColumn(name) => write!(f, "Column '{}' appears more than once", name),
            Self::LayerLengthMismatch {
                layer,
                expected,
                got,
            } => write!(
                f,
                "Layer '{}' has {} values, grid has {} cells",
                layer, got, expected
            ),
            Self::InvalidGrid(reason) => write!(f, "Invalid grid: {}", reason),
            Self::MismatchedInputs {
                what,
                expected,
                got,
            } => write!(f, "Length mismatch: expected {} {}, got {}", expected, what, got),
            Self::RowOutOfRange { index, nrows } => {
                write!(f, "Row index {} is out of range for {} rows", index, nrows)
            }
            Self::InvalidWeight { id, value } => write!(
                f,
                "Invalid weight for '{}': {} (must be >= 0)",
                id, value
            ),
            Self::SchemaMismatch { block, reason } => {
                write!(f, "Schema mismatch in block '{}': {}", block, reason)
            }
            Self::UnknownColumn(name) => write!(f, "Unknown column: '{}'", name),
            Self::InvalidModelSpec(reason) => write!(f, "Invalid model specification: {}", reason),
            Self::InvalidFolds { k, n } => write!(
                f,
                "Invalid fold count: {} (must be between 2 and the row count {})",
                k, n
            ),
            Self::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RfspError {}
