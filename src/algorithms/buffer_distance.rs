//! Buffer-distance layer generation.
//!
//! ## Purpose
//!
//! This module computes the per-layer values of buffer-distance covariates:
//! for each reference point (or each class of reference points), one value per
//! grid cell holding the planar distance from the cell center to that point.
//!
//! ## Design notes
//!
//! * **Per-layer units**: every function here produces one layer from the
//!   shared cell-center arrays, so the executor can run layers sequentially or
//!   in parallel without any shared mutable state.
//! * **Stateless**: nothing is cached between calls; output is a pure function
//!   of the inputs.
//!
//! ## Key concepts
//!
//! * **Point layer**: distance to one reference point.
//! * **Class layer**: distance to the nearest reference point of one class.
//! * **Site**: observations repeated over time share one spatial identity and
//!   therefore one distance layer.
//!
//! ## Invariants
//!
//! * Every produced layer has exactly as many values as there are cell centers.
//! * Layer order follows reference order (point mode) or first-seen class
//!   order (class mode).
//!
//! ## Non-goals
//!
//! * This module does not validate inputs (handled by `validator`).
//! * This module does not decide between sequential and parallel execution.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::BTreeMap;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::distance::{DistanceLinalg, fold_nearest};
use crate::primitives::errors::RfspError;
use crate::primitives::point::{Coordinate, Observation, ReferencePoint};

// ============================================================================
// Layer Kernels
// ============================================================================

/// Distance from every cell center to `origin`.
pub fn point_layer<T: DistanceLinalg>(xs: &[T], ys: &[T], origin: Coordinate<T>) -> Vec<T> {
    let mut out = vec![T::zero(); xs.len()];
    T::fill_planar(xs, ys, origin, &mut out);
    out
}

/// Distance from every cell center to the nearest of `members`.
///
/// Returns infinity for every cell when `members` is empty.
pub fn nearest_layer<T, I>(xs: &[T], ys: &[T], members: I) -> Vec<T>
where
    T: DistanceLinalg,
    I: IntoIterator<Item = Coordinate<T>>,
{
    let mut out = vec![T::infinity(); xs.len()];
    let mut scratch = vec![T::zero(); xs.len()];
    for origin in members {
        fold_nearest(xs, ys, origin, &mut scratch, &mut out);
    }
    out
}

// ============================================================================
// Naming and Grouping
// ============================================================================

/// Layer name for a reference point or class.
#[inline]
pub fn layer_name(prefix: &str, id: &str) -> String {
    let mut name = String::with_capacity(prefix.len() + id.len());
    name.push_str(prefix);
    name.push_str(id);
    name
}

/// Distinct class labels in first-seen order.
pub fn distinct_classes(classes: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for class in classes {
        if !out.contains(&class.as_str()) {
            out.push(class);
        }
    }
    out
}

/// Coordinates of the reference points labelled `class`.
pub fn class_members<'a, T: DistanceLinalg>(
    points: &'a [ReferencePoint<T>],
    classes: &'a [String],
    class: &'a str,
) -> impl Iterator<Item = Coordinate<T>> + 'a {
    points
        .iter()
        .zip(classes.iter())
        .filter(move |(_, c)| c.as_str() == class)
        .map(|(p, _)| p.coordinate)
}

/// Collapse observations to one reference point per site.
///
/// Sites are kept in first-seen order and time stamps are dropped, since
/// buffer distances depend on location only. A site reported at two different
/// locations is an error.
pub fn unique_sites<T: Float>(
    observations: &[Observation<T>],
) -> Result<Vec<ReferencePoint<T>>, RfspError> {
    let mut sites: Vec<ReferencePoint<T>> = Vec::new();
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    for obs in observations {
        match index.get(obs.site.as_str()).map(|&i| &sites[i]) {
            Some(existing) => {
                if existing.coordinate != obs.location {
                    return Err(RfspError::InvalidGeometry {
                        id: obs.site.to_string(),
                        reason: format!(
                            "site observed at two locations ({}, {}) and ({}, {})",
                            existing.coordinate.x.to_f64().unwrap_or(f64::NAN),
                            existing.coordinate.y.to_f64().unwrap_or(f64::NAN),
                            obs.location.x.to_f64().unwrap_or(f64::NAN),
                            obs.location.y.to_f64().unwrap_or(f64::NAN)
                        ),
                    });
                }
            }
            None => {
                index.insert(obs.site.as_str(), sites.len());
                sites.push(ReferencePoint {
                    id: obs.site.clone(),
                    coordinate: obs.location,
                    time: None,
                });
            }
        }
    }
    Ok(sites)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_layer_values() {
        let xs = [0.0, 3.0];
        let ys = [0.0, 4.0];
        assert_eq!(point_layer(&xs, &ys, Coordinate::new(0.0, 0.0)), vec![0.0, 5.0]);
    }

    #[test]
    fn test_nearest_layer_empty_is_infinite() {
        let xs = [0.0_f64];
        let ys = [0.0_f64];
        let out = nearest_layer(&xs, &ys, core::iter::empty());
        assert!(out[0].is_infinite());
    }

    #[test]
    fn test_distinct_classes_first_seen() {
        let classes: Vec<String> = ["b", "a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(distinct_classes(&classes), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unique_sites() {
        let obs = vec![
            Observation::numeric("s1", 1.0, 2.0, 5.0).at_time(1.0),
            Observation::numeric("s2", 3.0, 4.0, 6.0).at_time(1.0),
            Observation::numeric("s1", 1.0, 2.0, 7.0).at_time(2.0),
        ];
        let sites = unique_sites(&obs).unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].id, "s1");
        assert_eq!(sites[1].id, "s2");
        assert!(sites[0].time.is_none());

        let moved = vec![
            Observation::numeric("s1", 1.0, 2.0, 5.0),
            Observation::numeric("s1", 1.5, 2.0, 5.0),
        ];
        assert!(matches!(
            unique_sites(&moved),
            Err(RfspError::InvalidGeometry { ref id, .. }) if id == "s1"
        ));
    }

    #[test]
    fn test_unique_sites_first_seen_across_time_slices() {
        let mut obs = Vec::new();
        for t in 0..50 {
            for (id, x) in [("z", 0.0), ("a", 1.0), ("m", 2.0)] {
                obs.push(Observation::numeric(id, x, 0.0, 1.0).at_time(t as f64));
            }
        }
        let sites = unique_sites(&obs).unwrap();
        let ids: Vec<&str> = sites.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["z", "a", "m"]);
        assert_eq!(sites[2].coordinate, Coordinate::new(2.0, 0.0));
    }
}
