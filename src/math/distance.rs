//! Planar distance kernels for buffer-distance layers.
//!
//! ## Purpose
//!
//! This module computes planar Euclidean distances from one reference
//! coordinate to every cell center of a grid. The cell centers are passed as
//! separate x and y arrays so the f64 path can process two cells per SIMD lane.
//!
//! ## Design notes
//!
//! * **Scalar and SIMD**: `f64` uses `wide::f64x2`; `f32` uses the generic
//!   scalar kernel. Both evaluate `sqrt(dx * dx + dy * dy)` with the same
//!   operation order, and every step is correctly rounded, so the two paths
//!   produce identical bits.
//! * **No allocation**: kernels write into caller-provided slices.
//!
//! ## Invariants
//!
//! * Distance is non-negative.
//! * `out.len() == xs.len() == ys.len()`.
//!
//! ## Non-goals
//!
//! * Geodesic (ellipsoidal) distance. Coordinates are assumed projected.

use num_traits::Float;
use wide::f64x2;

use crate::primitives::point::Coordinate;

// ============================================================================
// Distance Trait
// ============================================================================

/// Float types with a specialized distance-layer kernel.
pub trait DistanceLinalg: Float + Send + Sync + 'static {
    /// Write the distance from `origin` to each `(xs[j], ys[j])` into `out[j]`.
    fn fill_planar(xs: &[Self], ys: &[Self], origin: Coordinate<Self>, out: &mut [Self]);
}

impl DistanceLinalg for f64 {
    #[inline]
    fn fill_planar(xs: &[f64], ys: &[f64], origin: Coordinate<f64>, out: &mut [f64]) {
        fill_planar_simd(xs, ys, origin, out);
    }
}

impl DistanceLinalg for f32 {
    #[inline]
    fn fill_planar(xs: &[f32], ys: &[f32], origin: Coordinate<f32>, out: &mut [f32]) {
        fill_planar_scalar(xs, ys, origin, out);
    }
}

// ============================================================================
// Kernels
// ============================================================================

/// Planar Euclidean distance between two coordinates.
#[inline]
pub fn planar<T: Float>(a: &Coordinate<T>, b: &Coordinate<T>) -> T {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Scalar distance-layer kernel.
pub fn fill_planar_scalar<T: Float>(xs: &[T], ys: &[T], origin: Coordinate<T>, out: &mut [T]) {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert_eq!(xs.len(), out.len());
    for ((&x, &y), o) in xs.iter().zip(ys.iter()).zip(out.iter_mut()) {
        *o = planar(&Coordinate::new(x, y), &origin);
    }
}

/// SIMD distance-layer kernel for `f64`, two cells per step.
pub fn fill_planar_simd(xs: &[f64], ys: &[f64], origin: Coordinate<f64>, out: &mut [f64]) {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert_eq!(xs.len(), out.len());

    let px = f64x2::splat(origin.x);
    let py = f64x2::splat(origin.y);

    let paired = xs.len() / 2 * 2;
    for ((xc, yc), oc) in xs[..paired]
        .chunks_exact(2)
        .zip(ys[..paired].chunks_exact(2))
        .zip(out[..paired].chunks_exact_mut(2))
    {
        let dx = f64x2::new([xc[0], xc[1]]) - px;
        let dy = f64x2::new([yc[0], yc[1]]) - py;
        let d = (dx * dx + dy * dy).sqrt();
        oc.copy_from_slice(&d.to_array());
    }

    // Tail
    fill_planar_scalar(&xs[paired..], &ys[paired..], origin, &mut out[paired..]);
}

/// Lower `out[j]` to the distance from `origin` where that is smaller.
///
/// Used for class layers, where each cell holds the distance to the nearest
/// member of a class. `scratch` must have the same length as `out`.
pub fn fold_nearest<T: DistanceLinalg>(
    xs: &[T],
    ys: &[T],
    origin: Coordinate<T>,
    scratch: &mut [T],
    out: &mut [T],
) {
    T::fill_planar(xs, ys, origin, scratch);
    for (o, &d) in out.iter_mut().zip(scratch.iter()) {
        if d < *o {
            *o = d;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_pythagorean() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0);
        assert_eq!(planar(&a, &b), 5.0);
        assert_eq!(planar(&b, &a), 5.0);
    }

    #[test]
    fn test_simd_matches_scalar_bitwise() {
        let xs: Vec<f64> = (0..11).map(|i| 0.37 * i as f64 - 1.1).collect();
        let ys: Vec<f64> = (0..11).map(|i| 1.91 - 0.23 * i as f64).collect();
        let origin = Coordinate::new(0.123, -4.56);

        let mut simd = vec![0.0; xs.len()];
        let mut scalar = vec![0.0; xs.len()];
        fill_planar_simd(&xs, &ys, origin, &mut simd);
        fill_planar_scalar(&xs, &ys, origin, &mut scalar);

        for (a, b) in simd.iter().zip(scalar.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_fold_nearest_keeps_minimum() {
        let xs = [0.0, 10.0];
        let ys = [0.0, 0.0];
        let mut out = [f64::INFINITY; 2];
        let mut scratch = [0.0; 2];
        fold_nearest(&xs, &ys, Coordinate::new(1.0, 0.0), &mut scratch, &mut out);
        fold_nearest(&xs, &ys, Coordinate::new(9.0, 0.0), &mut scratch, &mut out);
        assert_eq!(out, [1.0, 1.0]);
    }
}
