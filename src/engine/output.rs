//! Output types for buffer-distance generation and matrix assembly.
//!
//! ## Purpose
//!
//! This module defines the values returned to callers: `DistanceLayers`
//! (generated layers plus the geometry and CRS they were computed for) and
//! `AssemblyResult` (a regression matrix plus its row accounting).
//!
//! ## Design notes
//!
//! * **Separate from inputs**: distance layers are returned on their own grid
//!   value; merging them into a covariate grid produces a new grid.
//! * **Provenance**: each distance layer records the reference point or class
//!   it was computed from.
//!
//! ## Invariants
//!
//! * `sources.len()` equals the number of layers, in layer order.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt;
use num_traits::Float;

// Internal dependencies
use crate::evaluation::report::AssemblyReport;
use crate::primitives::crs::Crs;
use crate::primitives::errors::RfspError;
use crate::primitives::grid::{Grid, Layer};
use crate::primitives::matrix::RegressionMatrix;

// ============================================================================
// Distance Layers
// ============================================================================

/// What a distance layer measures distance to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerSource {
    /// A single reference point, by identifier.
    Point(String),

    /// The nearest reference point of a class.
    Class {
        /// Class label.
        label: String,
        /// Number of reference points in the class.
        members: usize,
    },
}

/// Buffer-distance layers generated for one grid geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceLayers<T> {
    grid: Grid<T>,
    sources: Vec<LayerSource>,
}

impl<T: Float> DistanceLayers<T> {
    /// Wrap generated layers. `grid` holds the layers in `sources` order.
    pub(crate) fn new(grid: Grid<T>, sources: Vec<LayerSource>) -> Self {
        Self { grid, sources }
    }

    /// Number of layers (N).
    pub fn len(&self) -> usize {
        self.grid.layers().len()
    }

    /// True if there are no layers.
    pub fn is_empty(&self) -> bool {
        self.grid.layers().is_empty()
    }

    /// Number of cells per layer (M).
    pub fn cell_count(&self) -> usize {
        self.grid.cell_count()
    }

    /// Coordinate reference system of the layers.
    pub fn crs(&self) -> &Crs {
        self.grid.crs()
    }

    /// Layers in reference (or class) order.
    pub fn layers(&self) -> &[Layer<T>] {
        self.grid.layers()
    }

    /// Layer by name.
    pub fn layer(&self, name: &str) -> Option<&Layer<T>> {
        self.grid.layer(name)
    }

    /// Layer names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.grid.layer_names()
    }

    /// What each layer was computed from, in layer order.
    pub fn sources(&self) -> &[LayerSource] {
        &self.sources
    }

    /// The layers as a grid.
    pub fn as_grid(&self) -> &Grid<T> {
        &self.grid
    }

    /// Consume into a grid.
    pub fn into_grid(self) -> Grid<T> {
        self.grid
    }
}

impl<T: Float> Grid<T> {
    /// Return a new grid with the distance layers appended after existing layers.
    ///
    /// The layers must have been generated for this grid's geometry and CRS.
    pub fn with_distance_layers(self, distances: &DistanceLayers<T>) -> Result<Self, RfspError> {
        self.with_layers_from(distances.as_grid())
    }
}

impl<T: Float + fmt::Display> fmt::Display for DistanceLayers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Distance layers:")?;
        writeln!(f, "  Layers: {}", self.len())?;
        writeln!(
            f,
            "  Grid:   {} x {} ({})",
            self.grid.nrows(),
            self.grid.ncols(),
            self.grid.crs()
        )?;
        for (layer, source) in self.layers().iter().zip(&self.sources) {
            let (min, max) = layer
                .values
                .iter()
                .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            match source {
                LayerSource::Point(id) => {
                    writeln!(f, "  {:<16} point {:<10} [{:.2}, {:.2}]", layer.name, id, min, max)?
                }
                LayerSource::Class { label, members } => writeln!(
                    f,
                    "  {:<16} class {:<10} [{:.2}, {:.2}] ({} points)",
                    layer.name, label, min, max, members
                )?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Assembly Result
// ============================================================================

/// A regression matrix and the account of how it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyResult<T> {
    /// The assembled matrix.
    pub matrix: RegressionMatrix<T>,

    /// Retained and dropped row counts.
    pub report: AssemblyReport,
}

impl<T: Float + fmt::Display> fmt::Display for AssemblyResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.report)?;
        writeln!(f)?;
        write!(f, "{}", self.matrix)
    }
}
