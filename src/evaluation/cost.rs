//! Cost estimation for buffer-distance generation.
//!
//! ## Purpose
//!
//! Generating one distance layer per reference point costs O(N·M) time and
//! memory. This module exposes N, M and the derived totals so callers can
//! budget before generating.
//!
//! ## Design notes
//!
//! * **Advisory limit**: above `RECOMMENDED_MAX_REFERENCE_POINTS` the
//!   generator logs a warning but still runs.
//! * **Saturating**: products saturate at `usize::MAX` instead of overflowing.

use core::fmt;
use core::mem::size_of;

/// Reference-point count above which generation is considered impractical.
pub const RECOMMENDED_MAX_REFERENCE_POINTS: usize = 1000;

/// Estimated size of a buffer-distance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostEstimate {
    /// Number of layers to produce (N).
    pub layers: usize,
    /// Number of reference points the layers are computed from.
    pub reference_points: usize,
    /// Number of grid cells (M).
    pub cells: usize,
    /// Number of point-to-cell distance evaluations.
    pub distance_evaluations: usize,
    /// Bytes of layer values produced.
    pub output_bytes: usize,
}

impl CostEstimate {
    /// Estimate for `layers` layers over `cells` cells of `T`, computed from
    /// `reference_points` points.
    pub fn new<T>(reference_points: usize, layers: usize, cells: usize) -> Self {
        let values = layers.saturating_mul(cells);
        Self {
            layers,
            reference_points,
            cells,
            distance_evaluations: reference_points.saturating_mul(cells),
            output_bytes: values.saturating_mul(size_of::<T>()),
        }
    }

    /// True if the reference-point count exceeds the recommended limit.
    pub fn exceeds_recommended(&self) -> bool {
        self.reference_points > RECOMMENDED_MAX_REFERENCE_POINTS
    }
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cost estimate:")?;
        writeln!(f, "  Reference points:     {}", self.reference_points)?;
        writeln!(f, "  Layers:               {}", self.layers)?;
        writeln!(f, "  Cells:                {}", self.cells)?;
        writeln!(f, "  Distance evaluations: {}", self.distance_evaluations)?;
        write!(f, "  Output bytes:         {}", self.output_bytes)
    }
}
