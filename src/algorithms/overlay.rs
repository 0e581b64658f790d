//! Overlay of point observations on grid layers.
//!
//! ## Purpose
//!
//! This module performs the spatial join of assembly: it locates the cell
//! containing an observation and reads every layer of a grid at that cell.
//!
//! ## Design notes
//!
//! * **Recoverable miss**: a location outside the grid yields
//!   `NoContainingCell`, which the assembler turns into a dropped row.
//! * **Nodata**: non-finite layer values are read as `Value::Missing`.
//!
//! ## Invariants
//!
//! * `sample_into` appends exactly one value per layer, in layer order.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::ToString;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::ToString;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::cell::containing_cell;
use crate::primitives::errors::RfspError;
use crate::primitives::grid::Grid;
use crate::primitives::point::Coordinate;
use crate::primitives::value::Value;

/// Row-major index of the cell of `grid` containing `location`.
///
/// `id` names the observation in the error.
pub fn locate<T: Float>(
    grid: &Grid<T>,
    id: &str,
    location: &Coordinate<T>,
) -> Result<usize, RfspError> {
    containing_cell(grid.transform(), grid.nrows(), grid.ncols(), location).ok_or_else(|| {
        RfspError::NoContainingCell {
            id: id.to_string(),
            grid: grid.name().to_string(),
        }
    })
}

/// Append the value of every layer of `grid` at `cell` to `out`.
pub fn sample_into<T: Float>(grid: &Grid<T>, cell: usize, out: &mut Vec<Value<T>>) {
    for layer in grid.layers() {
        let v = layer.values.get(cell).copied().unwrap_or_else(T::nan);
        out.push(Value::from_sample(v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::crs::Crs;
    use crate::primitives::grid::GeoTransform;

    fn elevation() -> Grid<f64> {
        Grid::new("dem", 2, 2, GeoTransform::new(0.0, 2.0, 1.0, -1.0), Crs::new("local"))
            .unwrap()
            .with_layer("elev", vec![10.0, 11.0, 12.0, f64::NAN])
            .unwrap()
    }

    fn sample(grid: &Grid<f64>, location: Coordinate<f64>) -> Vec<Value<f64>> {
        let cell = locate(grid, "s1", &location).unwrap();
        let mut out = Vec::new();
        sample_into(grid, cell, &mut out);
        out
    }

    #[test]
    fn test_sample_reads_containing_cell() {
        let grid = elevation();
        assert_eq!(sample(&grid, Coordinate::new(1.2, 1.8)), vec![Value::Numeric(11.0)]);
    }

    #[test]
    fn test_sample_nodata_is_missing() {
        let grid = elevation();
        assert_eq!(sample(&grid, Coordinate::new(1.5, 0.5)), vec![Value::Missing]);
    }

    #[test]
    fn test_locate_outside() {
        let grid = elevation();
        assert_eq!(
            locate(&grid, "s9", &Coordinate::new(5.0, 5.0)).unwrap_err(),
            RfspError::NoContainingCell {
                id: "s9".to_string(),
                grid: "dem".to_string()
            }
        );
    }
}
