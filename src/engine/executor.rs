//! Execution engine for buffer-distance generation and matrix assembly.
//!
//! ## Purpose
//!
//! This module orchestrates the two operations of the crate. The
//! buffer-distance executor validates reference points, plans one job per
//! output layer and runs the jobs sequentially or in parallel. The assembly
//! executor overlays observations on covariate grids and distance layers,
//! applies the missing-value policy and builds the regression matrix.
//!
//! ## Design notes
//!
//! * **Layer jobs**: each distance layer is computed independently from the
//!   shared cell-center arrays; with the `parallel` feature, rayon runs jobs
//!   on its pool and collects them in job order, so output is identical to the
//!   sequential path.
//! * **Drop accounting**: excluded rows are counted by reason and summarised
//!   in a single warning per assembly.
//! * **No mutation**: input grids are only read; outputs are new values.
//!
//! ## Key concepts
//!
//! * **Column order**: `target, [time], covariates..., distances...,
//!   [weight]`, covariates in grid then layer insertion order, distances in
//!   reference order.
//! * **Drop order**: outside coverage, missing target, missing time, missing
//!   covariate or distance, missing weight. A row is counted once, under the
//!   first failing check.
//!
//! ## Invariants
//!
//! * Generated layers each hold exactly one value per grid cell.
//! * No `Missing` value is written to an assembled row.
//!
//! ## Non-goals
//!
//! * This module does not provide the public builders (see `api`).

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
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::buffer_distance::{
    class_members, distinct_classes, layer_name, nearest_layer, point_layer,
};
use crate::algorithms::overlay::{locate, sample_into};
use crate::algorithms::stacking::stack_blocks;
use crate::engine::output::{AssemblyResult, DistanceLayers, LayerSource};
use crate::engine::validator::Validator;
use crate::evaluation::cost::{CostEstimate, RECOMMENDED_MAX_REFERENCE_POINTS};
use crate::evaluation::report::{AssemblyReport, DropReason};
use crate::math::distance::DistanceLinalg;
use crate::primitives::crs::Crs;
use crate::primitives::errors::RfspError;
use crate::primitives::grid::{Grid, Layer};
use crate::primitives::matrix::{ColumnRole, ColumnSpec, RegressionMatrix, RegressionRow, Schema};
use crate::primitives::point::{Coordinate, ObservationSet, ReferenceSet};
use crate::primitives::value::{ColumnKind, Value};

// ============================================================================
// Buffer Distance Execution
// ============================================================================

/// Configuration for one buffer-distance run.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferDistanceConfig {
    /// Prefix prepended to point identifiers or class labels.
    pub prefix: String,

    /// One class label per reference point; enables class mode.
    pub classes: Option<Vec<String>>,

    /// Run layer jobs on the rayon pool (with the `parallel` feature).
    pub parallel: bool,
}

/// One output layer to compute.
struct LayerJob<T> {
    name: String,
    source: LayerSource,
    members: Vec<Coordinate<T>>,
}

/// Buffer-distance executor.
pub struct BufferDistanceExecutor;

impl BufferDistanceExecutor {
    /// Cost of a run, without computing anything.
    pub fn estimate<T: DistanceLinalg>(
        points: &ReferenceSet<T>,
        grid: &Grid<T>,
        config: &BufferDistanceConfig,
    ) -> CostEstimate {
        let layers = match &config.classes {
            Some(classes) => distinct_classes(classes).len(),
            None => points.len(),
        };
        CostEstimate::new::<T>(points.len(), layers, grid.cell_count())
    }

    /// Validate inputs and generate the distance layers.
    pub fn run<T: DistanceLinalg>(
        points: &ReferenceSet<T>,
        grid: &Grid<T>,
        config: &BufferDistanceConfig,
    ) -> Result<DistanceLayers<T>, RfspError> {
        Validator::validate_reference_points(&points.points)?;
        points.crs.ensure_matches(grid.crs(), grid.name())?;
        if let Some(classes) = &config.classes {
            Validator::validate_classes(classes, points.len())?;
        }

        let estimate = Self::estimate(points, grid, config);
        tracing::debug!(
            reference_points = estimate.reference_points,
            layers = estimate.layers,
            cells = estimate.cells,
            output_bytes = estimate.output_bytes,
            grid = grid.name(),
            "generating buffer distances"
        );
        if estimate.exceeds_recommended() {
            tracing::warn!(
                reference_points = estimate.reference_points,
                recommended = RECOMMENDED_MAX_REFERENCE_POINTS,
                output_bytes = estimate.output_bytes,
                "reference point count exceeds the recommended maximum; \
                 generation cost grows with points x cells"
            );
        }

        let jobs = Self::plan(points, config);
        let (xs, ys) = grid.cell_centers();
        let values = Self::execute(&jobs, &xs, &ys, config.parallel);

        let mut out = grid.empty_like(format!("distances({})", grid.name()));
        let mut sources = Vec::with_capacity(jobs.len());
        for (job, layer_values) in jobs.into_iter().zip(values) {
            out.push_layer(Layer::new(job.name, layer_values))?;
            sources.push(job.source);
        }
        Ok(DistanceLayers::new(out, sources))
    }

    fn plan<T: DistanceLinalg>(
        points: &ReferenceSet<T>,
        config: &BufferDistanceConfig,
    ) -> Vec<LayerJob<T>> {
        match &config.classes {
            None => points
                .points
                .iter()
                .map(|p| LayerJob {
                    name: layer_name(&config.prefix, &p.id),
                    source: LayerSource::Point(p.id.clone()),
                    members: vec![p.coordinate],
                })
                .collect(),
            Some(classes) => distinct_classes(classes)
                .into_iter()
                .map(|class| {
                    let members: Vec<Coordinate<T>> =
                        class_members(&points.points, classes, class).collect();
                    LayerJob {
                        name: layer_name(&config.prefix, class),
                        source: LayerSource::Class {
                            label: class.to_string(),
                            members: members.len(),
                        },
                        members,
                    }
                })
                .collect(),
        }
    }

    fn compute<T: DistanceLinalg>(job: &LayerJob<T>, xs: &[T], ys: &[T]) -> Vec<T> {
        match job.members.as_slice() {
            [single] => point_layer(xs, ys, *single),
            members => nearest_layer(xs, ys, members.iter().copied()),
        }
    }

    #[cfg(feature = "parallel")]
    fn execute<T: DistanceLinalg>(
        jobs: &[LayerJob<T>],
        xs: &[T],
        ys: &[T],
        parallel: bool,
    ) -> Vec<Vec<T>> {
        if parallel && jobs.len() > 1 {
            jobs.par_iter().map(|job| Self::compute(job, xs, ys)).collect()
        } else {
            jobs.iter().map(|job| Self::compute(job, xs, ys)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn execute<T: DistanceLinalg>(
        jobs: &[LayerJob<T>],
        xs: &[T],
        ys: &[T],
        _parallel: bool,
    ) -> Vec<Vec<T>> {
        jobs.iter().map(|job| Self::compute(job, xs, ys)).collect()
    }
}

// ============================================================================
// Assembly Execution
// ============================================================================

/// Configuration shared by every block of one assembly.
#[derive(Debug, Clone)]
pub struct AssemblyConfig<'a, T> {
    /// Target (value) column name.
    pub target: String,

    /// Time column name, used when observations carry time stamps.
    pub time_column: String,

    /// Weight column name, used when weights are supplied.
    pub weight_column: String,

    /// Group column name for stacked assembly.
    pub group_column: String,

    /// Covariate grids, in column order.
    pub covariates: Vec<&'a Grid<T>>,

    /// Distance layers, in column order.
    pub distances: Vec<&'a DistanceLayers<T>>,
}

/// One target block: a name, its observations and optional weights.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a, T> {
    /// Block name; becomes the group value in stacked assembly.
    pub name: &'a str,

    /// Observations of this target.
    pub observations: &'a ObservationSet<T>,

    /// One weight per observation.
    pub weights: Option<&'a [T]>,
}

/// Regression-matrix assembly executor.
pub struct AssemblyExecutor;

impl AssemblyExecutor {
    /// Grids to overlay, covariates first then distance layers.
    fn sources<'a, T: Float>(config: &AssemblyConfig<'a, T>) -> Vec<(&'a Grid<T>, ColumnRole)> {
        config
            .covariates
            .iter()
            .map(|g| (*g, ColumnRole::Covariate))
            .chain(
                config
                    .distances
                    .iter()
                    .map(|d| (DistanceLayers::as_grid(*d), ColumnRole::Distance)),
            )
            .collect()
    }

    /// Column schema of a block.
    pub fn schema<T: Float>(
        config: &AssemblyConfig<'_, T>,
        target_kind: ColumnKind,
        with_time: bool,
        with_weight: bool,
    ) -> Result<Schema, RfspError> {
        let mut columns = vec![ColumnSpec::new(
            config.target.as_str(),
            ColumnRole::Target,
            target_kind,
        )];
        if with_time {
            columns.push(ColumnSpec::new(
                config.time_column.as_str(),
                ColumnRole::Time,
                ColumnKind::Numeric,
            ));
        }
        for (grid, role) in Self::sources(config) {
            for name in grid.layer_names() {
                columns.push(ColumnSpec::new(name, role, ColumnKind::Numeric));
            }
        }
        if with_weight {
            columns.push(ColumnSpec::new(
                config.weight_column.as_str(),
                ColumnRole::Weight,
                ColumnKind::Numeric,
            ));
        }
        Schema::new(columns)
    }

    /// Kind of the target values of a block.
    ///
    /// Missing targets are ignored; a block with no present target is numeric.
    fn target_kind<T: Float>(block: &Block<'_, T>) -> Result<ColumnKind, RfspError> {
        let mut kind = None;
        for obs in &block.observations.observations {
            match (kind, obs.target.kind()) {
                (_, None) => {}
                (None, Some(k)) => kind = Some(k),
                (Some(a), Some(b)) if a != b => {
                    return Err(RfspError::SchemaMismatch {
                        block: block.name.to_string(),
                        reason: format!(
                            "target mixes numeric and categorical values (site '{}')",
                            obs.site
                        ),
                    });
                }
                _ => {}
            }
        }
        Ok(kind.unwrap_or(ColumnKind::Numeric))
    }

    /// Assemble one block into a matrix.
    pub fn run<T: Float>(
        config: &AssemblyConfig<'_, T>,
        block: &Block<'_, T>,
    ) -> Result<AssemblyResult<T>, RfspError> {
        let observations = &block.observations.observations;
        let crs: &Crs = &block.observations.crs;
        let sources = Self::sources(config);

        // Validation
        for (grid, _) in &sources {
            Validator::validate_grid_crs(crs, grid)?;
        }
        if let Some(weights) = block.weights {
            Validator::validate_weights(observations, weights)?;
        }

        let target_kind = Self::target_kind(block)?;
        let with_time = observations.iter().any(|o| o.time.is_some());
        let schema = Self::schema(config, target_kind, with_time, block.weights.is_some())?;

        tracing::debug!(
            block = block.name,
            observations = observations.len(),
            columns = schema.len(),
            grids = sources.len(),
            "assembling regression matrix"
        );

        let mut report = AssemblyReport::default();
        let mut rows = Vec::with_capacity(observations.len());
        let mut cells = Vec::with_capacity(sources.len());

        for (i, obs) in observations.iter().enumerate() {
            // Overlay
            cells.clear();
            let mut covered = true;
            for (grid, _) in &sources {
                match locate(grid, &obs.site, &obs.location) {
                    Ok(cell) => cells.push(cell),
                    Err(_) => {
                        covered = false;
                        break;
                    }
                }
            }

            let weight = block.weights.map(|w| w[i]);
            let mut values = Vec::with_capacity(schema.len());
            let reason = if !covered {
                Some(DropReason::OutsideCoverage)
            } else if obs.target.is_missing() {
                Some(DropReason::MissingTarget)
            } else if with_time && !obs.time.is_some_and(|t| t.is_finite()) {
                Some(DropReason::MissingTime)
            } else {
                values.push(obs.target.clone());
                if let Some(t) = obs.time.filter(|_| with_time) {
                    values.push(Value::Numeric(t));
                }
                for ((grid, _), &cell) in sources.iter().zip(cells.iter()) {
                    sample_into(grid, cell, &mut values);
                }
                if values.iter().any(Value::is_missing) {
                    Some(DropReason::MissingCovariate)
                } else {
                    match weight {
                        Some(w) if !w.is_finite() => Some(DropReason::MissingWeight),
                        Some(w) => {
                            values.push(Value::Numeric(w));
                            None
                        }
                        None => None,
                    }
                }
            };

            match reason {
                Some(reason) => {
                    tracing::trace!(block = block.name, site = %obs.site, ?reason, "row dropped");
                    report.drop_row(reason);
                }
                None => {
                    rows.push(RegressionRow {
                        site: obs.site.clone(),
                        time: obs.time,
                        values,
                    });
                    report.retain();
                }
            }
        }

        if report.dropped() > 0 {
            tracing::warn!(
                block = block.name,
                dropped = report.dropped(),
                outside_coverage = report.outside_coverage,
                missing_target = report.missing_target,
                missing_time = report.missing_time,
                missing_covariate = report.missing_covariate,
                missing_weight = report.missing_weight,
                retained = report.retained,
                "rows excluded from regression matrix"
            );
        }

        Ok(AssemblyResult {
            matrix: RegressionMatrix::new(schema, rows)?,
            report,
        })
    }

    /// Assemble several blocks and stack them with a group column.
    pub fn run_stacked<T: Float>(
        config: &AssemblyConfig<'_, T>,
        blocks: &[Block<'_, T>],
    ) -> Result<AssemblyResult<T>, RfspError> {
        if blocks.is_empty() {
            return Err(RfspError::EmptyInput);
        }

        let mut report = AssemblyReport::default();
        let mut matrices = Vec::with_capacity(blocks.len());
        for block in blocks {
            let result = Self::run(config, block)?;
            report = report.merge(&result.report);
            matrices.push((block.name.to_string(), result.matrix));
        }

        let matrix = stack_blocks(matrices, &config.group_column)?;
        tracing::debug!(
            blocks = blocks.len(),
            rows = matrix.nrows(),
            "stacked regression matrix"
        );
        Ok(AssemblyResult { matrix, report })
    }
}
