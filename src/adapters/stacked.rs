//! Stacked (multivariate) adapter for regression-matrix assembly.
//!
//! ## Purpose
//!
//! This module provides the "melt and stack" adapter: K target variables,
//! each with its own observations, assembled against the same covariates and
//! combined into one matrix with a single value column and a categorical
//! group column naming the source target of each row.
//!
//! ## Design notes
//!
//! * **Per-block assembly**: each block is overlaid and filtered on its own,
//!   then blocks are checked for identical columns before stacking.
//! * **Fail fast**: a block whose columns differ (time stamps present in one
//!   block only, or a categorical target among numeric ones) is rejected with
//!   `SchemaMismatch` naming the block.
//!
//! ## Invariants
//!
//! * Row count equals the sum of valid rows per block.
//! * The group column has exactly K distinct values, one per block.
//! * Block rows are contiguous, blocks in input order.
//!
//! ## Non-goals
//!
//! * This adapter does not align observations across blocks by site.

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
use crate::adapters::single::{DEFAULT_TIME_COLUMN, DEFAULT_WEIGHT_COLUMN, validate_config};
use crate::engine::executor::{AssemblyConfig, AssemblyExecutor, Block};
use crate::engine::output::{AssemblyResult, DistanceLayers};
use crate::primitives::errors::RfspError;
use crate::primitives::grid::Grid;
use crate::primitives::point::ObservationSet;

/// Default value column name of a stacked matrix.
pub const DEFAULT_VALUE_COLUMN: &str = "value";

/// Default group column name of a stacked matrix.
pub const DEFAULT_GROUP_COLUMN: &str = "type";

// ============================================================================
// Stacked Assembler Builder
// ============================================================================

/// Builder for the stacked assembler.
#[derive(Debug, Clone)]
pub struct StackedAssemblerBuilder<'a, T> {
    /// Unified value column name.
    pub target: String,

    /// Time column name.
    pub time_column: String,

    /// Weight column name.
    pub weight_column: String,

    /// Group column name.
    pub group_column: String,

    /// Covariate grids.
    pub covariates: Vec<&'a Grid<T>>,

    /// Distance layers.
    pub distances: Vec<&'a DistanceLayers<T>>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for StackedAssemblerBuilder<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Float> StackedAssemblerBuilder<'a, T> {
    /// Create a builder with default column names.
    fn new() -> Self {
        Self {
            target: String::from(DEFAULT_VALUE_COLUMN),
            time_column: String::from(DEFAULT_TIME_COLUMN),
            weight_column: String::from(DEFAULT_WEIGHT_COLUMN),
            group_column: String::from(DEFAULT_GROUP_COLUMN),
            covariates: Vec::new(),
            distances: Vec::new(),
            duplicate_param: None,
        }
    }

    /// Set the unified value column name.
    pub fn target(mut self, name: impl Into<String>) -> Self {
        self.target = name.into();
        self
    }

    /// Set the group column name.
    pub fn group_column(mut self, name: impl Into<String>) -> Self {
        self.group_column = name.into();
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
    pub fn build(self) -> Result<StackedAssembler<'a, T>, RfspError> {
        let config = AssemblyConfig {
            target: self.target,
            time_column: self.time_column,
            weight_column: self.weight_column,
            group_column: self.group_column,
            covariates: self.covariates,
            distances: self.distances,
        };
        validate_config(&config, self.duplicate_param, true)?;
        Ok(StackedAssembler { config })
    }
}

// ============================================================================
// Stacked Assembler
// ============================================================================

/// Multivariate regression-matrix assembler.
#[derive(Debug, Clone)]
pub struct StackedAssembler<'a, T> {
    config: AssemblyConfig<'a, T>,
}

impl<T: Float> StackedAssembler<'_, T> {
    /// Assemble and stack named blocks.
    pub fn assemble(&self, blocks: &[Block<'_, T>]) -> Result<AssemblyResult<T>, RfspError> {
        AssemblyExecutor::run_stacked(&self.config, blocks)
    }

    /// Assemble and stack unweighted blocks given as `(name, observations)`.
    pub fn assemble_sets(
        &self,
        blocks: &[(&str, &ObservationSet<T>)],
    ) -> Result<AssemblyResult<T>, RfspError> {
        let blocks: Vec<Block<'_, T>> = blocks
            .iter()
            .map(|&(name, observations)| Block {
                name,
                observations,
                weights: None,
            })
            .collect();
        self.assemble(&blocks)
    }
}
