//! Single-target adapter for regression-matrix assembly.
//!
//! ## Purpose
//!
//! This module provides the standard assembly adapter: one target variable,
//! its observations, optional case weights, overlaid on covariate grids and
//! distance layers.
//!
//! ## Design notes
//!
//! * **Processing**: Overlays and filters all observations in a single pass.
//! * **Delegation**: Delegates computation to the assembly executor.
//! * **Validation**: Column names and grid CRS consistency are checked at
//!   `build()`; observation CRS and weights at `assemble()`.
//!
//! ## Invariants
//!
//! * Output row order matches observation order.
//! * Weights, when supplied, are carried through unmodified.
//!
//! ## Non-goals
//!
//! * This adapter does not stack several targets (use the stacked adapter).
//! * This adapter does not transform weights.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{AssemblyConfig, AssemblyExecutor, Block};
use crate::engine::output::{AssemblyResult, DistanceLayers};
use crate::engine::validator::Validator;
use crate::primitives::errors::RfspError;
use crate::primitives::grid::Grid;
use crate::primitives::point::ObservationSet;
use crate::primitives::value::ColumnKind;

/// Default target column name.
pub const DEFAULT_TARGET: &str = "target";

/// Default time column name.
pub const DEFAULT_TIME_COLUMN: &str = "time";

/// Default weight column name.
pub const DEFAULT_WEIGHT_COLUMN: &str = "weight";

// ============================================================================
// Shared Build Checks
// ============================================================================

/// Checks run by every assembler builder.
pub(crate) fn validate_config<T: Float>(
    config: &AssemblyConfig<'_, T>,
    duplicate_param: Option<&'static str>,
    stacked: bool,
) -> Result<(), RfspError> {
    // Check for duplicate parameter configuration
    Validator::validate_no_duplicates(duplicate_param)?;

    // Column names
    Validator::validate_column_name(&config.target)?;
    Validator::validate_column_name(&config.time_column)?;
    Validator::validate_column_name(&config.weight_column)?;
    if stacked {
        Validator::validate_column_name(&config.group_column)?;
    }

    // Every grid shares one CRS
    let crs = config
        .covariates
        .first()
        .map(|g| g.crs())
        .or_else(|| config.distances.first().map(|d| d.crs()));
    if let Some(crs) = crs {
        for grid in &config.covariates {
            Validator::validate_has_layers(grid)?;
            Validator::validate_grid_crs(crs, grid)?;
        }
        for distances in &config.distances {
            Validator::validate_grid_crs(crs, distances.as_grid())?;
        }
    }

    // Unique column names, with every optional column present
    let schema = AssemblyExecutor::schema(config, ColumnKind::Numeric, true, true)?;
    if stacked && schema.index_of(&config.group_column).is_some() {
        return Err(RfspError::DuplicateColumn(config.group_column.clone()));
    }
    Ok(())
}

// ============================================================================
// Single Assembler Builder
// ============================================================================

/// Builder for the single-target assembler.
#[derive(Debug, Clone)]
pub struct SingleAssemblerBuilder<'a, T> {
    /// Target column name.
    pub target: String,

    /// Time column name.
    pub time_column: String,

    /// Weight column name.
    pub weight_column: String,

    /// Covariate grids.
    pub covariates: Vec<&'a Grid<T>>,

    /// Distance layers.
    pub distances: Vec<&'a DistanceLayers<T>>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for SingleAssemblerBuilder<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Float> SingleAssemblerBuilder<'a, T> {
    /// Create a builder with default column names.
    fn new() -> Self {
        Self {
            target: String::from(DEFAULT_TARGET),
            time_column: String::from(DEFAULT_TIME_COLUMN),
            weight_column: String::from(DEFAULT_WEIGHT_COLUMN),
            covariates: Vec::new(),
            distances: Vec::new(),
            duplicate_param: None,
        }
    }

    /// Set the target column name.
    pub fn target(mut self, name: impl Into<String>) -> Self {
        self.target = name.into();
        self
    }

    /// Set the time column name.
    pub fn time_column(mut self, name: impl Into<String>) -> Self {
        self.time_column = name.into();
        self
    }

    /// Set the weight column name.
    pub fn weight_column(mut self, name: impl Into<String>) -> Self {
        self.weight_column = name.into();
        self
    }

    /// Add a covariate grid.
    pub fn covariates(mut self, grid: &'a Grid<T>) -> Self {
        self.covariates.push(grid);
        self
    }

    /// Add distance layers.
    pub fn distances(mut self, distances: &'a DistanceLayers<T>) -> Self {
        self.distances.push(distances);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the assembler.
    pub fn build(self) -> Result<SingleAssembler<'a, T>, RfspError> {
        let config = AssemblyConfig {
            target: self.target,
            time_column: self.time_column,
            weight_column: self.weight_column,
            group_column: String::new(),
            covariates: self.covariates,
            distances: self.distances,
        };
        validate_config(&config, self.duplicate_param, false)?;
        Ok(SingleAssembler { config })
    }
}

// ============================================================================
// Single Assembler
// ============================================================================

/// Single-target regression-matrix assembler.
#[derive(Debug, Clone)]
pub struct SingleAssembler<'a, T> {
    config: AssemblyConfig<'a, T>,
}

impl<T: Float> SingleAssembler<'_, T> {
    /// Assemble a matrix without case weights.
    pub fn assemble(&self, observations: &ObservationSet<T>) -> Result<AssemblyResult<T>, RfspError> {
        let block = Block {
            name: &self.config.target,
            observations,
            weights: None,
        };
        AssemblyExecutor::run(&self.config, &block)
    }

    /// Assemble a matrix with one case weight per observation.
    pub fn assemble_weighted(
        &self,
        observations: &ObservationSet<T>,
        weights: &[T],
    ) -> Result<AssemblyResult<T>, RfspError> {
        let block = Block {
            name: &self.config.target,
            observations,
            weights: Some(weights),
        };
        AssemblyExecutor::run(&self.config, &block)
    }

    /// Column names in output order for observations with or without time
    /// stamps and weights.
    pub fn column_names(&self, with_time: bool, with_weight: bool) -> Result<Vec<String>, RfspError> {
        let schema = AssemblyExecutor::schema(&self.config, ColumnKind::Numeric, with_time, with_weight)?;
        Ok(schema.names().map(String::from).collect())
    }
}
