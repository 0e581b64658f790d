#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use rfsp_rs::internals::math::distance::{
    DistanceLinalg, fill_planar_scalar, fill_planar_simd, fold_nearest, planar,
};
use rfsp_rs::internals::primitives::point::Coordinate;

// ============================================================================
// Planar Distance Tests
// ============================================================================

#[test]
fn test_planar_distance_zero() {
    let a = Coordinate::new(178_605.0, 330_349.0);
    assert_relative_eq!(planar(&a, &a), 0.0);
}

#[test]
fn test_planar_distance_axis_aligned() {
    let a = Coordinate::new(1.0, 2.0);
    assert_relative_eq!(planar(&a, &Coordinate::new(4.0, 2.0)), 3.0);
    assert_relative_eq!(planar(&a, &Coordinate::new(1.0, -3.0)), 5.0);
}

#[test]
fn test_planar_distance_large_coordinates() {
    // Projected metres; differences stay exact well below 2^53
    let a = Coordinate::new(4_321_000.0, 3_210_000.0);
    let b = Coordinate::new(4_321_300.0, 3_210_400.0);
    assert_relative_eq!(planar(&a, &b), 500.0);
}

// ============================================================================
// Layer Kernel Tests
// ============================================================================

#[test]
fn test_scalar_kernel() {
    let xs = [0.0, 3.0, -3.0];
    let ys = [0.0, 4.0, -4.0];
    let mut out = [0.0; 3];
    fill_planar_scalar(&xs, &ys, Coordinate::new(0.0, 0.0), &mut out);
    assert_eq!(out, [0.0, 5.0, 5.0]);
}

#[test]
fn test_simd_kernel_odd_length_tail() {
    let xs: Vec<f64> = (0..7).map(|i| i as f64).collect();
    let ys = vec![0.0; 7];
    let mut out = vec![f64::NAN; 7];
    fill_planar_simd(&xs, &ys, Coordinate::new(3.0, 0.0), &mut out);
    assert_eq!(out, [3.0, 2.0, 1.0, 0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_f32_and_f64_kernels_agree() {
    let xs64: Vec<f64> = (0..9).map(|i| 10.0 * i as f64).collect();
    let ys64: Vec<f64> = (0..9).map(|i| 5.0 * i as f64).collect();
    let xs32: Vec<f32> = xs64.iter().map(|&v| v as f32).collect();
    let ys32: Vec<f32> = ys64.iter().map(|&v| v as f32).collect();

    let mut out64 = vec![0.0; 9];
    let mut out32 = vec![0.0f32; 9];
    f64::fill_planar(&xs64, &ys64, Coordinate::new(12.0, 7.0), &mut out64);
    f32::fill_planar(&xs32, &ys32, Coordinate::new(12.0, 7.0), &mut out32);

    for (a, b) in out64.iter().zip(&out32) {
        assert_relative_eq!(*a, *b as f64, max_relative = 1e-6);
    }
}

#[test]
fn test_fold_nearest_keeps_minimum() {
    let xs = [0.0, 1.0, 2.0, 3.0];
    let ys = [0.0; 4];
    let mut scratch = [0.0; 4];
    let mut out = [f64::INFINITY; 4];

    fold_nearest(&xs, &ys, Coordinate::new(0.0, 0.0), &mut scratch, &mut out);
    assert_eq!(out, [0.0, 1.0, 2.0, 3.0]);

    fold_nearest(&xs, &ys, Coordinate::new(3.0, 0.0), &mut scratch, &mut out);
    assert_eq!(out, [0.0, 1.0, 1.0, 0.0]);
}
