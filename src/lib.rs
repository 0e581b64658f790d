//! # RFsp — Buffer-Distance Features for Spatial Random Forests
//!
//! Feature engineering for spatial and spatiotemporal prediction with an
//! off-the-shelf random forest: geographic buffer-distance covariates and the
//! regression matrix that joins them with ordinary covariates and a target.
//!
//! ## What is RFsp?
//!
//! A random forest knows nothing about space. RFsp ("random forest for spatial
//! prediction") makes spatial autocorrelation learnable by adding, for every
//! sampling location, a covariate layer holding the distance from each grid
//! cell to that location. The forest is then fitted on a table of observed
//! targets, overlaid covariates and these buffer distances, and predicts onto
//! the same grid.
//!
//! **What this crate does:**
//! - Generates buffer-distance layers for N reference points over a grid of
//!   M cells (one layer per point, or one per class of points)
//! - Overlays observations on covariate grids and distance layers
//! - Applies an explicit missing-value policy and reports dropped rows
//! - Melts several target variables into one stacked matrix
//! - Carries case weights through unmodified
//! - Describes the model to fit with an explicit, checked `ModelSpec`
//! - Scores predictions and builds reproducible k-fold partitions
//!
//! **What it does not do:** train forests, fit variograms, krige, read or
//! write raster formats, or reproject. Those are external collaborators; the
//! [`RegressionEngine`](prelude::RegressionEngine) trait is the seam for the
//! forest.
//!
//! **Cost:** generation is O(N·M) in time and memory. Above
//! [`RECOMMENDED_MAX_REFERENCE_POINTS`](prelude::RECOMMENDED_MAX_REFERENCE_POINTS)
//! points a warning is logged; use `estimate()` to budget first.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use rfsp_rs::prelude::*;
//!
//! let crs = Crs::epsg(28992);
//! let grid = Grid::new("meuse", 2, 2, GeoTransform::new(0.0, 2.0, 1.0, -1.0), crs.clone())?
//!     .with_layer("elev", vec![7.9, 8.2, 6.5, 7.1])?;
//!
//! // One distance layer per sampling location
//! let points = ReferenceSet::new(
//!     crs.clone(),
//!     vec![
//!         ReferencePoint::new("1", 0.5, 1.5),
//!         ReferencePoint::new("2", 1.5, 0.5),
//!     ],
//! );
//! let distances = BufferDistance::new().build()?.generate(&points, &grid)?;
//!
//! // Overlay observations on covariates and distances
//! let observations = ObservationSet::new(
//!     crs,
//!     vec![
//!         Observation::numeric("1", 0.5, 1.5, 1022.0),
//!         Observation::numeric("2", 1.5, 0.5, 1141.0),
//!     ],
//! );
//! let result = Assembler::new()
//!     .target("zinc")
//!     .covariates(&grid)
//!     .distances(&distances)
//!     .adapter(Single)
//!     .build()?
//!     .assemble(&observations)?;
//!
//! let names: Vec<&str> = result.matrix.schema().names().collect();
//! assert_eq!(names, ["zinc", "elev", "layer.1", "layer.2"]);
//! println!("{}", result);
//! # Result::<(), RfspError>::Ok(())
//! ```
//!
//! ### Stacked Targets
//!
//! ```rust
//! use rfsp_rs::prelude::*;
//!
//! let crs = Crs::epsg(28992);
//! let grid = Grid::new("meuse", 2, 2, GeoTransform::new(0.0, 2.0, 1.0, -1.0), crs.clone())?
//!     .with_layer("elev", vec![7.9, 8.2, 6.5, 7.1])?;
//!
//! let zinc = ObservationSet::new(
//!     crs.clone(),
//!     vec![
//!         Observation::numeric("1", 0.5, 1.5, 1022.0),
//!         Observation::numeric("2", 1.5, 0.5, 1141.0),
//!     ],
//! );
//! let lead = ObservationSet::new(
//!     crs,
//!     vec![
//!         Observation::numeric("1", 0.5, 1.5, 299.0),
//!         Observation::numeric("2", 1.5, 0.5, 277.0),
//!         Observation::numeric("3", 9.0, 9.0, 199.0), // outside the grid
//!     ],
//! );
//!
//! let result = Assembler::new()
//!     .covariates(&grid)
//!     .adapter(Stacked)
//!     .build()?
//!     .assemble_sets(&[("zinc", &zinc), ("lead", &lead)])?;
//!
//! assert_eq!(result.matrix.nrows(), 4);
//! assert_eq!(result.report.outside_coverage, 1);
//! assert_eq!(result.matrix.distinct_categories("type")?, ["zinc", "lead"]);
//!
//! // Explicit configuration for the external engine
//! let spec = ModelSpec::from_matrix(&result.matrix)?.mode(ModelMode::Quantile);
//! spec.validate_against(result.matrix.schema())?;
//! assert_eq!(spec.covariates, ["elev", "type"]);
//! # Result::<(), RfspError>::Ok(())
//! ```
//!
//! ## Column Order
//!
//! Every assembled matrix has the columns
//!
//! ```text
//! target, [time], covariates..., distances..., [weight], [group]
//! ```
//!
//! * `time` appears when observations carry time stamps.
//! * Covariates follow grid insertion order, then layer order within a grid.
//! * Distances follow reference-point (or first-seen class) order.
//! * `weight` appears when weights are supplied; `group` in stacked mode.
//!
//! ## Overlay and Missing Values
//!
//! Cells are half-open: a point on an interior vertical edge belongs to the
//! east cell, on an interior horizontal edge to the south cell. The outer
//! extent of the grid is closed. Rows are dropped, and counted in the
//! [`AssemblyReport`](prelude::AssemblyReport), when the observation is
//! outside any grid, its target is missing, its time stamp is missing while
//! the matrix has a time column, a covariate or distance is nodata
//! (non-finite), or its weight is missing.
//!
//! ## Features
//!
//! * `std` (default): standard library support; without it the crate is
//!   `no_std` with `alloc`.
//! * `parallel`: generate distance layers on the rayon pool.
//! * `serde`: `Serialize`/`Deserialize` for the data model.
//! * `dev`: exposes internal modules for testing.
//!
//! ## Logging
//!
//! Events are emitted through `tracing`; the library never installs a
//! subscriber.
//!
//! ## References
//!
//! - Hengl, T., Nussbaum, M., Wright, M. N., Heuvelink, G. B. M. & Gräler, B. (2018).
//!   "Random forest as a generic framework for predictive modeling of spatial and
//!   spatio-temporal variables". PeerJ 6:e5518.
//! - Meinshausen, N. (2006). "Quantile Regression Forests". JMLR 7.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data model.
//
// Contains the error type, CRS identifiers, points and observations,
// grids with named layers, cell values and the regression matrix.
mod primitives;

// Layer 2: Math - pure numerical functions.
//
// Contains planar distance kernels (scalar and SIMD), point-in-cell lookup
// and case-weight transforms.
mod math;

// Layer 3: Algorithms - feature-engineering core.
//
// Contains buffer-distance layer kernels, overlay and block stacking.
mod algorithms;

// Layer 4: Evaluation - measurement and reporting.
//
// Contains cost estimates, assembly reports, accuracy diagnostics and
// k-fold partitions.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
//
// Contains validation, the buffer-distance and assembly executors, output
// types and the model specification.
mod engine;

// Layer 6: Adapters - assembly modes.
//
// Contains the single-target and stacked assemblers.
mod adapters;

// High-level fluent API.
//
// Provides the `BufferDistance` and `Assembler` builders.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard RFsp prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use rfsp_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        Adapter::{Single, Stacked},
        AssemblerBuilder as Assembler, AssemblyReport, AssemblyResult, Block,
        BufferDistanceBuilder as BufferDistance, BufferDistanceGenerator, ColumnKind, ColumnRole,
        ColumnSpec, Coordinate, CostEstimate, Crs, DEFAULT_LAYER_PREFIX, DEFAULT_NUM_TREES,
        DEFAULT_QUANTILES, Diagnostics, DistanceLayers, DropReason, Fold, GeoTransform, Grid,
        KFold, Layer, LayerSource, ModelMode, ModelSpec, Observation, ObservationSet,
        PredictionMode, RECOMMENDED_MAX_REFERENCE_POINTS, ReferencePoint, ReferenceSet,
        RegressionEngine, RegressionMatrix, RegressionRow, RfspError, Schema, SingleAssembler,
        StackedAssembler, Value, inverse_variance_weights,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation and diagnostics.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal adapters.
    pub mod adapters {
        pub use crate::adapters::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
