//! Regular grids with named numeric layers.
//!
//! ## Purpose
//!
//! This module provides the raster model shared by covariates, distance
//! layers and engine predictions: a north-up regular tessellation described by
//! a `GeoTransform`, a CRS, and any number of named layers stored row-major.
//!
//! ## Design notes
//!
//! * **Value semantics**: adding layers consumes the grid and returns a new
//!   one; nothing is accumulated on shared state.
//! * **Alignment**: every layer holds exactly `nrows * ncols` values, so all
//!   layers of a grid share cell geometry by construction.
//! * **Nodata**: non-finite values mark missing cells.
//!
//! ## Key concepts
//!
//! * **Cell index**: `row * ncols + col`, row 0 at the top (north) edge.
//! * **Cell center**: `origin + (index + 0.5) * pixel size` on each axis.
//!
//! ## Non-goals
//!
//! * Reading or writing raster file formats.
//! * Reprojection or resampling between grids.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

use num_traits::Float;

use crate::primitives::crs::Crs;
use crate::primitives::errors::RfspError;
use crate::primitives::point::Coordinate;

// ============================================================================
// GeoTransform
// ============================================================================

/// North-up affine transform from cell indices to planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform<T> {
    /// X of the top-left corner.
    pub origin_x: T,
    /// Y of the top-left corner.
    pub origin_y: T,
    /// Cell width (positive).
    pub pixel_width: T,
    /// Cell height (negative for north-up grids).
    pub pixel_height: T,
}

impl<T: Float> GeoTransform<T> {
    /// Create a transform from its four components.
    pub fn new(origin_x: T, origin_y: T, pixel_width: T, pixel_height: T) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        }
    }

    /// Transform covering `[x_min, x_max] x [y_min, y_max]` with the given shape.
    pub fn from_extent(
        x_min: T,
        y_min: T,
        x_max: T,
        y_max: T,
        nrows: usize,
        ncols: usize,
    ) -> Self {
        let rows = T::from(nrows).unwrap_or_else(T::nan);
        let cols = T::from(ncols).unwrap_or_else(T::nan);
        Self {
            origin_x: x_min,
            origin_y: y_max,
            pixel_width: (x_max - x_min) / cols,
            pixel_height: -(y_max - y_min) / rows,
        }
    }

    /// Coordinate of the center of cell `(row, col)`.
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> Coordinate<T> {
        let half = T::from(0.5).unwrap_or_else(T::zero);
        let c = T::from(col).unwrap_or_else(T::nan) + half;
        let r = T::from(row).unwrap_or_else(T::nan) + half;
        Coordinate::new(
            self.origin_x + c * self.pixel_width,
            self.origin_y + r * self.pixel_height,
        )
    }

    /// True when all components are finite, width is positive and height negative.
    pub fn is_valid(&self) -> bool {
        self.origin_x.is_finite()
            && self.origin_y.is_finite()
            && self.pixel_width.is_finite()
            && self.pixel_height.is_finite()
            && self.pixel_width > T::zero()
            && self.pixel_height < T::zero()
    }
}

// ============================================================================
// Layer
// ============================================================================

/// A named numeric layer, one value per grid cell in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer<T> {
    /// Layer (column) name.
    pub name: String,
    /// Cell values; non-finite values are nodata.
    pub values: Vec<T>,
}

impl<T: Float> Layer<T> {
    /// Create a layer.
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

// ============================================================================
// Grid
// ============================================================================

/// Regular grid with named layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    name: String,
    nrows: usize,
    ncols: usize,
    transform: GeoTransform<T>,
    crs: Crs,
    layers: Vec<Layer<T>>,
}

impl<T: Float> Grid<T> {
    /// Create an empty grid (no layers).
    ///
    /// `name` identifies the grid in error messages.
    pub fn new(
        name: impl Into<String>,
        nrows: usize,
        ncols: usize,
        transform: GeoTransform<T>,
        crs: Crs,
    ) -> Result<Self, RfspError> {
        let name = name.into();
        if nrows == 0 || ncols == 0 {
            return Err(RfspError::InvalidGrid(format!(
                "'{}' has shape {}x{} (must be at least 1x1)",
                name, nrows, ncols
            )));
        }
        if nrows.checked_mul(ncols).is_none() {
            return Err(RfspError::InvalidGrid(format!(
                "'{}' has too many cells ({}x{})",
                name, nrows, ncols
            )));
        }
        if !transform.is_valid() {
            return Err(RfspError::InvalidGrid(format!(
                "'{}' has an unusable geotransform (width must be > 0, height < 0, all finite)",
                name
            )));
        }
        Ok(Self {
            name,
            nrows,
            ncols,
            transform,
            crs,
            layers: Vec::new(),
        })
    }

    /// A grid with the same geometry and CRS, a new name and no layers.
    pub fn empty_like(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nrows: self.nrows,
            ncols: self.ncols,
            transform: self.transform,
            crs: self.crs.clone(),
            layers: Vec::new(),
        }
    }

    /// Return a new grid with `layer` appended.
    pub fn with_layer(mut self, name: impl Into<String>, values: Vec<T>) -> Result<Self, RfspError> {
        self.push_layer(Layer::new(name, values))?;
        Ok(self)
    }

    /// Return a new grid with every layer of `other` appended.
    ///
    /// `other` must have identical geometry and CRS.
    pub fn with_layers_from(mut self, other: &Grid<T>) -> Result<Self, RfspError> {
        self.crs.ensure_matches(&other.crs, &other.name)?;
        if !self.same_geometry(other) {
            return Err(RfspError::InvalidGrid(format!(
                "'{}' is not aligned with '{}'",
                other.name, self.name
            )));
        }
        for layer in &other.layers {
            self.push_layer(layer.clone())?;
        }
        Ok(self)
    }

    pub(crate) fn push_layer(&mut self, layer: Layer<T>) -> Result<(), RfspError> {
        if self.layers.iter().any(|l| l.name == layer.name) {
            return Err(RfspError::DuplicateLayer(layer.name));
        }
        if layer.values.len() != self.cell_count() {
            return Err(RfspError::LayerLengthMismatch {
                layer: layer.name,
                expected: self.cell_count(),
                got: layer.values.len(),
            });
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Grid name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of cells (M).
    pub fn cell_count(&self) -> usize {
        self.nrows * self.ncols
    }

    /// Geotransform.
    pub fn transform(&self) -> &GeoTransform<T> {
        &self.transform
    }

    /// Coordinate reference system.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Layers in insertion order.
    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }

    /// Layer by name.
    pub fn layer(&self, name: &str) -> Option<&Layer<T>> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Layer names in insertion order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.name.as_str())
    }

    /// True if the two grids have the same shape and transform.
    pub fn same_geometry(&self, other: &Grid<T>) -> bool {
        self.nrows == other.nrows && self.ncols == other.ncols && self.transform == other.transform
    }

    /// Center of the cell with row-major `index`.
    #[inline]
    pub fn cell_center(&self, index: usize) -> Coordinate<T> {
        self.transform
            .cell_center(index / self.ncols, index % self.ncols)
    }

    /// Cell centers as separate x and y arrays in row-major order.
    pub fn cell_centers(&self) -> (Vec<T>, Vec<T>) {
        let m = self.cell_count();
        let mut xs = Vec::with_capacity(m);
        let mut ys = Vec::with_capacity(m);
        for row in 0..self.nrows {
            for col in 0..self.ncols {
                let c = self.transform.cell_center(row, col);
                xs.push(c.x);
                ys.push(c.y);
            }
        }
        (xs, ys)
    }
}
