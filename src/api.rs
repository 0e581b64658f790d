//! High-level API for buffer-distance features and regression matrices.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points. It implements fluent
//! builders for configuring buffer-distance generation and regression-matrix
//! assembly, and for choosing an assembly adapter (Single or Stacked).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builders with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Value semantics**: Builders consume and return themselves; grids are
//!   borrowed, never mutated.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`BufferDistanceBuilder`] via `BufferDistance::new()`, chain
//!    options, `.build()` and `.generate(&points, &grid)`.
//! 2. Create an [`AssemblerBuilder`] via `Assembler::new()`, add covariate
//!    grids and distance layers, then select an adapter via
//!    `.adapter(Adapter::Single)` or `.adapter(Adapter::Stacked)`.
//! 3. `.build()` the adapter and call `.assemble(...)`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::single::SingleAssemblerBuilder;
use crate::adapters::stacked::StackedAssemblerBuilder;
use crate::algorithms::buffer_distance::unique_sites;
use crate::engine::executor::{BufferDistanceConfig, BufferDistanceExecutor};
use crate::engine::validator::Validator;
use crate::math::distance::DistanceLinalg;

// Publicly re-exported types
pub use crate::adapters::single::SingleAssembler;
pub use crate::adapters::stacked::StackedAssembler;
pub use crate::engine::executor::Block;
pub use crate::engine::model::{
    DEFAULT_NUM_TREES, DEFAULT_QUANTILES, ModelMode, ModelSpec, PredictionMode, RegressionEngine,
};
pub use crate::engine::output::{AssemblyResult, DistanceLayers, LayerSource};
pub use crate::evaluation::cost::{CostEstimate, RECOMMENDED_MAX_REFERENCE_POINTS};
pub use crate::evaluation::cv::{Fold, KFold};
pub use crate::evaluation::diagnostics::Diagnostics;
pub use crate::evaluation::report::{AssemblyReport, DropReason};
pub use crate::math::weights::inverse_variance_weights;
pub use crate::primitives::crs::Crs;
pub use crate::primitives::errors::RfspError;
pub use crate::primitives::grid::{GeoTransform, Grid, Layer};
pub use crate::primitives::matrix::{ColumnRole, ColumnSpec, RegressionMatrix, RegressionRow, Schema};
pub use crate::primitives::point::{
    Coordinate, Observation, ObservationSet, ReferencePoint, ReferenceSet,
};
pub use crate::primitives::value::{ColumnKind, Value};

/// Default distance-layer name prefix.
pub const DEFAULT_LAYER_PREFIX: &str = "layer.";

/// Marker types for selecting assembly adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Single, Stacked};
}

// ============================================================================
// Buffer Distance Builder
// ============================================================================

/// Fluent builder for buffer-distance generation.
#[derive(Debug, Clone, Default)]
pub struct BufferDistanceBuilder {
    /// Layer name prefix (default `"layer."`).
    pub prefix: Option<String>,

    /// One class label per reference point; enables class mode.
    pub classes: Option<Vec<String>>,

    /// Parallel execution hint.
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl BufferDistanceBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layer name prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        if self.prefix.is_some() {
            self.duplicate_param = Some("prefix");
        }
        self.prefix = Some(prefix.into());
        self
    }

    /// Generate one layer per class instead of one per point.
    ///
    /// `classes[i]` labels reference point `i`; each class layer holds the
    /// distance to the nearest point of that class.
    pub fn classes<S: Into<String>>(mut self, classes: impl IntoIterator<Item = S>) -> Self {
        if self.classes.is_some() {
            self.duplicate_param = Some("classes");
        }
        self.classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    /// Set parallel execution hint (effective with the `parallel` feature).
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    /// Build the generator.
    pub fn build(self) -> Result<BufferDistanceGenerator, RfspError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Ok(BufferDistanceGenerator {
            config: BufferDistanceConfig {
                prefix: self
                    .prefix
                    .unwrap_or_else(|| DEFAULT_LAYER_PREFIX.to_string()),
                classes: self.classes,
                parallel: self.parallel.unwrap_or(cfg!(feature = "parallel")),
            },
        })
    }
}

// ============================================================================
// Buffer Distance Generator
// ============================================================================

/// Configured buffer-distance generator.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferDistanceGenerator {
    config: BufferDistanceConfig,
}

impl BufferDistanceGenerator {
    /// Generate one distance layer per reference point (or class).
    pub fn generate<T: DistanceLinalg>(
        &self,
        points: &ReferenceSet<T>,
        grid: &Grid<T>,
    ) -> Result<DistanceLayers<T>, RfspError> {
        BufferDistanceExecutor::run(points, grid, &self.config)
    }

    /// Generate one distance layer per unique site of `observations`.
    ///
    /// Repeated observations of a site (time slices) share one layer.
    pub fn generate_for_sites<T: DistanceLinalg>(
        &self,
        observations: &ObservationSet<T>,
        grid: &Grid<T>,
    ) -> Result<DistanceLayers<T>, RfspError> {
        let points = ReferenceSet::new(
            observations.crs.clone(),
            unique_sites(&observations.observations)?,
        );
        self.generate(&points, grid)
    }

    /// Cost of `generate` for these inputs, without computing anything.
    pub fn estimate<T: DistanceLinalg>(&self, points: &ReferenceSet<T>, grid: &Grid<T>) -> CostEstimate {
        BufferDistanceExecutor::estimate(points, grid, &self.config)
    }

    /// Layer name prefix.
    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }
}

// ============================================================================
// Assembler Builder
// ============================================================================

/// Fluent builder for regression-matrix assembly.
#[derive(Debug, Clone)]
pub struct AssemblerBuilder<'a, T> {
    /// Target (value) column name.
    pub target: Option<String>,

    /// Time column name (default `"time"`).
    pub time_column: Option<String>,

    /// Weight column name (default `"weight"`).
    pub weight_column: Option<String>,

    /// Group column name (Stacked only, default `"type"`).
    pub group_column: Option<String>,

    /// Covariate grids, in column order.
    pub covariates: Vec<&'a Grid<T>>,

    /// Distance layers, in column order.
    pub distances: Vec<&'a DistanceLayers<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for AssemblerBuilder<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Float + 'a> AssemblerBuilder<'a, T> {
    /// Select an assembly adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: AssemblerAdapter<'a, T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            target: None,
            time_column: None,
            weight_column: None,
            group_column: None,
            covariates: Vec::new(),
            distances: Vec::new(),
            duplicate_param: None,
        }
    }

    /// Set the target column name.
    pub fn target(mut self, name: impl Into<String>) -> Self {
        if self.target.is_some() {
            self.duplicate_param = Some("target");
        }
        self.target = Some(name.into());
        self
    }

    /// Set the time column name.
    pub fn time_column(mut self, name: impl Into<String>) -> Self {
        if self.time_column.is_some() {
            self.duplicate_param = Some("time_column");
        }
        self.time_column = Some(name.into());
        self
    }

    /// Set the weight column name.
    pub fn weight_column(mut self, name: impl Into<String>) -> Self {
        if self.weight_column.is_some() {
            self.duplicate_param = Some("weight_column");
        }
        self.weight_column = Some(name.into());
        self
    }

    /// Set the group column name (Stacked only).
    pub fn group_column(mut self, name: impl Into<String>) -> Self {
        if self.group_column.is_some() {
            self.duplicate_param = Some("group_column");
        }
        self.group_column = Some(name.into());
        self
    }

    /// Add a covariate grid; its layers become columns in insertion order.
    pub fn covariates(mut self, grid: &'a Grid<T>) -> Self {
        self.covariates.push(grid);
        self
    }

    /// Add buffer-distance layers; they follow all covariate columns.
    pub fn distances(mut self, distances: &'a DistanceLayers<T>) -> Self {
        self.distances.push(distances);
        self
    }
}

// ============================================================================
// Adapter Markers
// ============================================================================

/// Trait for transitioning from a generic builder to an adapter builder.
pub trait AssemblerAdapter<'a, T: Float + 'a> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`AssemblerBuilder`] into a specialized execution builder.
    fn convert(builder: AssemblerBuilder<'a, T>) -> Self::Output;
}

/// Marker for single-target assembly.
#[derive(Debug, Clone, Copy)]
pub struct Single;

impl<'a, T: Float + 'a> AssemblerAdapter<'a, T> for Single {
    type Output = SingleAssemblerBuilder<'a, T>;

    fn convert(builder: AssemblerBuilder<'a, T>) -> Self::Output {
        let mut result = SingleAssemblerBuilder::default();

        // Override with user-provided values
        if let Some(target) = builder.target {
            result.target = target;
        }
        if let Some(time_column) = builder.time_column {
            result.time_column = time_column;
        }
        if let Some(weight_column) = builder.weight_column {
            result.weight_column = weight_column;
        }
        result.covariates = builder.covariates;
        result.distances = builder.distances;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for stacked multivariate assembly.
#[derive(Debug, Clone, Copy)]
pub struct Stacked;

impl<'a, T: Float + 'a> AssemblerAdapter<'a, T> for Stacked {
    type Output = StackedAssemblerBuilder<'a, T>;

    fn convert(builder: AssemblerBuilder<'a, T>) -> Self::Output {
        let mut result = StackedAssemblerBuilder::default();

        // Override with user-provided values
        if let Some(target) = builder.target {
            result.target = target;
        }
        if let Some(time_column) = builder.time_column {
            result.time_column = time_column;
        }
        if let Some(weight_column) = builder.weight_column {
            result.weight_column = weight_column;
        }
        if let Some(group_column) = builder.group_column {
            result.group_column = group_column;
        }
        result.covariates = builder.covariates;
        result.distances = builder.distances;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}
