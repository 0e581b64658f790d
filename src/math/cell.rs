//! Point-in-cell lookup for regular north-up grids.
//!
//! ## Purpose
//!
//! This module maps a planar coordinate to the row-major index of the grid
//! cell whose geometry contains it. It is the spatial join used by overlay.
//!
//! ## Design notes
//!
//! * **Half-open cells**: cell `(row, col)` covers `[x0, x1)` horizontally and
//!   `(y1, y0]` vertically, where `y0` is its north edge. A point on an
//!   interior vertical edge belongs to the east cell; on an interior
//!   horizontal edge, to the south cell.
//! * **Closed extent**: points exactly on the east or south edge of the grid
//!   are assigned to the last column or row, so the whole extent is covered.
//!
//! ## Invariants
//!
//! * Non-finite coordinates are never contained.
//! * A returned index is always `< nrows * ncols`.

use num_traits::Float;

use crate::primitives::grid::GeoTransform;
use crate::primitives::point::Coordinate;

/// Index along one axis, or `None` when outside `[0, count]`.
#[inline]
fn axis_index<T: Float>(offset: T, count: usize) -> Option<usize> {
    if !offset.is_finite() || offset < T::zero() {
        return None;
    }
    let last = T::from(count)?;
    if offset > last {
        return None;
    }
    let idx = offset.floor().to_usize()?;
    // Closed outer edge.
    if idx == count {
        return Some(count - 1);
    }
    Some(idx)
}

/// Row and column of the cell containing `point`.
#[inline]
pub fn containing_row_col<T: Float>(
    transform: &GeoTransform<T>,
    nrows: usize,
    ncols: usize,
    point: &Coordinate<T>,
) -> Option<(usize, usize)> {
    let col = axis_index((point.x - transform.origin_x) / transform.pixel_width, ncols)?;
    let row = axis_index((point.y - transform.origin_y) / transform.pixel_height, nrows)?;
    Some((row, col))
}

/// Row-major index of the cell containing `point`.
#[inline]
pub fn containing_cell<T: Float>(
    transform: &GeoTransform<T>,
    nrows: usize,
    ncols: usize,
    point: &Coordinate<T>,
) -> Option<usize> {
    containing_row_col(transform, nrows, ncols, point).map(|(row, col)| row * ncols + col)
}
