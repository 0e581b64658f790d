//! Reference points and observations.
//!
//! ## Purpose
//!
//! This module defines the point inputs of the crate: `ReferencePoint` (a
//! location buffer distances are measured to) and `Observation` (a measured
//! target value at a site, optionally at a time). Both are grouped into sets
//! that carry the coordinate reference system of their coordinates.
//!
//! ## Key concepts
//!
//! * **Site**: a fixed spatial identity. In spatiotemporal data many
//!   observations share one site; buffer distances depend on the site only.
//! * **Set**: an ordered collection plus its `Crs`. Order is preserved through
//!   generation and assembly.
//!
//! ## Non-goals
//!
//! * This module does not validate coordinates (handled by `validator`).

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
use crate::primitives::value::Value;

// ============================================================================
// Coordinate
// ============================================================================

/// Planar coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate<T> {
    /// Easting.
    pub x: T,
    /// Northing.
    pub y: T,
}

impl<T: Float> Coordinate<T> {
    /// Create a coordinate.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// True when both components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ============================================================================
// Reference Point
// ============================================================================

/// A location that buffer distances are measured to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferencePoint<T> {
    /// Unique identifier; also used to name the generated distance layer.
    pub id: String,
    /// Location.
    pub coordinate: Coordinate<T>,
    /// Observation time, ignored by distance generation.
    pub time: Option<T>,
}

impl<T: Float> ReferencePoint<T> {
    /// Create a reference point without a time stamp.
    pub fn new(id: impl Into<String>, x: T, y: T) -> Self {
        Self {
            id: id.into(),
            coordinate: Coordinate::new(x, y),
            time: None,
        }
    }

    /// Attach a time stamp.
    pub fn at_time(mut self, time: T) -> Self {
        self.time = Some(time);
        self
    }
}

/// Ordered reference points sharing one CRS.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceSet<T> {
    /// CRS of every coordinate in `points`.
    pub crs: Crs,
    /// Points in layer order.
    pub points: Vec<ReferencePoint<T>>,
}

impl<T: Float> ReferenceSet<T> {
    /// Create a reference set.
    pub fn new(crs: Crs, points: Vec<ReferencePoint<T>>) -> Self {
        Self { crs, points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ============================================================================
// Observation
// ============================================================================

/// A measured target value at a site.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation<T> {
    /// Site identifier. Repeats across time slices of the same station.
    pub site: String,
    /// Site location.
    pub location: Coordinate<T>,
    /// Observation time; becomes the time column when the assembler has one.
    pub time: Option<T>,
    /// Target value.
    pub target: Value<T>,
}

impl<T: Float> Observation<T> {
    /// Observation with a numeric target.
    pub fn numeric(site: impl Into<String>, x: T, y: T, value: T) -> Self {
        Self::with_target(site, x, y, Value::Numeric(value))
    }

    /// Observation with a class target.
    pub fn categorical(site: impl Into<String>, x: T, y: T, class: impl Into<String>) -> Self {
        Self::with_target(site, x, y, Value::Categorical(class.into()))
    }

    /// Observation whose target was not measured.
    pub fn missing(site: impl Into<String>, x: T, y: T) -> Self {
        Self::with_target(site, x, y, Value::Missing)
    }

    /// Observation with an arbitrary target value.
    pub fn with_target(site: impl Into<String>, x: T, y: T, target: Value<T>) -> Self {
        Self {
            site: site.into(),
            location: Coordinate::new(x, y),
            time: None,
            target,
        }
    }

    /// Attach a time stamp.
    pub fn at_time(mut self, time: T) -> Self {
        self.time = Some(time);
        self
    }
}

/// Ordered observations sharing one CRS.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationSet<T> {
    /// CRS of every location in `observations`.
    pub crs: Crs,
    /// Observations in row order.
    pub observations: Vec<Observation<T>>,
}

impl<T: Float> ObservationSet<T> {
    /// Create an observation set.
    pub fn new(crs: Crs, observations: Vec<Observation<T>>) -> Self {
        Self { crs, observations }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True if there are no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
