//! Model specification and the regression-engine seam.
//!
//! ## Purpose
//!
//! The crate never trains a forest. This module describes what an external
//! engine should fit (`ModelSpec`) and the interface such an engine exposes
//! (`RegressionEngine`), so the assembled matrix can be handed over with an
//! explicit, checked configuration instead of a free-form formula.
//!
//! ## Design notes
//!
//! * **Explicit columns**: target, predictors and weight are named; nothing
//!   is inferred from string formulas.
//! * **Checked against the schema**: `validate_against` verifies that every
//!   named column exists with the role and kind the mode requires.
//! * **Engine errors pass through**: `RegressionEngine::Error` is the
//!   engine's own type and is returned unchanged.
//!
//! ## Key concepts
//!
//! * **Quantile mode**: the engine reports lower/median/upper layers; the
//!   default quantiles `[0.159, 0.5, 0.841]` bracket one standard deviation.
//! * **Probability mode**: one probability layer per class of a categorical
//!   target.
//!
//! ## Non-goals
//!
//! * Fitting, prediction, or hyperparameter tuning.

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
use crate::primitives::errors::RfspError;
use crate::primitives::grid::{Grid, Layer};
use crate::primitives::matrix::{ColumnRole, RegressionMatrix, Schema};
use crate::primitives::value::ColumnKind;

/// Default number of trees.
pub const DEFAULT_NUM_TREES: usize = 500;

/// Default quantiles for quantile mode: one standard deviation around the median.
pub const DEFAULT_QUANTILES: [f64; 3] = [0.159, 0.5, 0.841];

// ============================================================================
// Modes
// ============================================================================

/// What kind of model the engine fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelMode {
    /// Numeric target, mean prediction.
    #[default]
    Regression,

    /// Categorical target, class prediction.
    Classification,

    /// Numeric target, quantile predictions.
    Quantile,

    /// Categorical target, per-class probabilities.
    Probability,
}

impl ModelMode {
    /// Target kind the mode requires.
    pub fn target_kind(self) -> ColumnKind {
        match self {
            Self::Regression | Self::Quantile => ColumnKind::Numeric,
            Self::Classification | Self::Probability => ColumnKind::Categorical,
        }
    }
}

/// What a prediction call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PredictionMode {
    /// One layer: mean or predicted class code.
    Point,

    /// One layer per configured quantile.
    Quantile,

    /// One layer per class.
    Probability,
}

// ============================================================================
// Model Specification
// ============================================================================

/// Explicit configuration handed to a regression engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelSpec<T> {
    /// Target column.
    pub target: String,

    /// Predictor columns, in matrix order.
    pub covariates: Vec<String>,

    /// Case-weight column.
    pub weight: Option<String>,

    /// Model mode.
    pub mode: ModelMode,

    /// Number of trees.
    pub num_trees: usize,

    /// Candidate predictors per split; `None` leaves the engine default.
    pub mtry: Option<usize>,

    /// Quantiles reported in quantile mode.
    pub quantiles: Vec<T>,

    /// Engine seed, for reproducible fits.
    pub seed: Option<u64>,
}

impl<T: Float> ModelSpec<T> {
    /// Specification with explicit target and predictors and default options.
    pub fn new<S: Into<String>>(target: impl Into<String>, covariates: impl IntoIterator<Item = S>) -> Self {
        Self {
            target: target.into(),
            covariates: covariates.into_iter().map(Into::into).collect(),
            weight: None,
            mode: ModelMode::default(),
            num_trees: DEFAULT_NUM_TREES,
            mtry: None,
            quantiles: DEFAULT_QUANTILES
                .iter()
                .filter_map(|&q| T::from(q))
                .collect(),
            seed: None,
        }
    }

    /// Specification using every predictor column of `matrix`.
    ///
    /// The mode follows the target kind (regression or classification) and
    /// the weight column is used when present.
    pub fn from_matrix(matrix: &RegressionMatrix<T>) -> Result<Self, RfspError> {
        let schema = matrix.schema();
        let target = schema
            .with_role(ColumnRole::Target)
            .ok_or_else(|| RfspError::InvalidModelSpec("matrix has no target column".to_string()))?;
        let covariates = schema
            .columns()
            .iter()
            .filter(|c| c.role.is_predictor())
            .map(|c| c.name.clone());

        let mut spec = Self::new(target.name.clone(), covariates);
        if target.kind == ColumnKind::Categorical {
            spec.mode = ModelMode::Classification;
        }
        spec.weight = schema.with_role(ColumnRole::Weight).map(|c| c.name.clone());
        Ok(spec)
    }

    /// Set the mode.
    pub fn mode(mut self, mode: ModelMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the number of trees.
    pub fn num_trees(mut self, num_trees: usize) -> Self {
        self.num_trees = num_trees;
        self
    }

    /// Set the per-split candidate count.
    pub fn mtry(mut self, mtry: usize) -> Self {
        self.mtry = Some(mtry);
        self
    }

    /// Set the quantiles for quantile mode.
    pub fn quantiles(mut self, quantiles: Vec<T>) -> Self {
        self.quantiles = quantiles;
        self
    }

    /// Set the case-weight column.
    pub fn weight(mut self, column: impl Into<String>) -> Self {
        self.weight = Some(column.into());
        self
    }

    /// Set the engine seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Prediction output matching the mode.
    pub fn prediction_mode(&self) -> PredictionMode {
        match self.mode {
            ModelMode::Regression | ModelMode::Classification => PredictionMode::Point,
            ModelMode::Quantile => PredictionMode::Quantile,
            ModelMode::Probability => PredictionMode::Probability,
        }
    }

    /// Check the options for internal consistency.
    pub fn validate(&self) -> Result<(), RfspError> {
        if self.covariates.is_empty() {
            return Err(RfspError::InvalidModelSpec("no predictor columns".to_string()));
        }
        if self.num_trees == 0 {
            return Err(RfspError::InvalidModelSpec(
                "number of trees must be at least 1".to_string(),
            ));
        }
        if let Some(mtry) = self.mtry {
            if mtry == 0 || mtry > self.covariates.len() {
                return Err(RfspError::InvalidModelSpec(format!(
                    "mtry {} must be between 1 and the predictor count {}",
                    mtry,
                    self.covariates.len()
                )));
            }
        }
        if self.mode == ModelMode::Quantile {
            if self.quantiles.is_empty() {
                return Err(RfspError::InvalidModelSpec(
                    "quantile mode needs at least one quantile".to_string(),
                ));
            }
            let mut prev = T::zero();
            for &q in &self.quantiles {
                if !q.is_finite() || q <= prev || q >= T::one() {
                    return Err(RfspError::InvalidModelSpec(format!(
                        "quantiles must be strictly increasing within (0, 1), got {}",
                        q.to_f64().unwrap_or(f64::NAN)
                    )));
                }
                prev = q;
            }
        }

        for (i, name) in self.covariates.iter().enumerate() {
            if *name == self.target || self.weight.as_deref() == Some(name.as_str()) {
                return Err(RfspError::InvalidModelSpec(format!(
                    "'{}' is used both as a predictor and as target or weight",
                    name
                )));
            }
            if self.covariates[..i].contains(name) {
                return Err(RfspError::DuplicateColumn(name.clone()));
            }
        }
        Ok(())
    }

    /// Check the specification against a matrix schema.
    pub fn validate_against(&self, schema: &Schema) -> Result<(), RfspError> {
        self.validate()?;

        let target = schema
            .column(&self.target)
            .ok_or_else(|| RfspError::UnknownColumn(self.target.clone()))?;
        if target.kind != self.mode.target_kind() {
            return Err(RfspError::InvalidModelSpec(format!(
                "{:?} mode needs a {:?} target, '{}' is {:?}",
                self.mode,
                self.mode.target_kind(),
                target.name,
                target.kind
            )));
        }

        for name in &self.covariates {
            let column = schema
                .column(name)
                .ok_or_else(|| RfspError::UnknownColumn(name.clone()))?;
            if !column.role.is_predictor() {
                return Err(RfspError::InvalidModelSpec(format!(
                    "'{}' has role {:?} and cannot be a predictor",
                    name, column.role
                )));
            }
        }

        if let Some(weight) = &self.weight {
            let column = schema
                .column(weight)
                .ok_or_else(|| RfspError::UnknownColumn(weight.clone()))?;
            if column.role != ColumnRole::Weight {
                return Err(RfspError::InvalidModelSpec(format!(
                    "'{}' is not a weight column",
                    weight
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Engine Seam
// ============================================================================

/// An external regression or classification engine.
///
/// Implementations fit on an assembled matrix and predict onto a grid whose
/// layers are named like the predictor columns.
pub trait RegressionEngine<T: Float> {
    /// Opaque fitted model, owned by the caller.
    type Model;

    /// Engine failure, propagated unchanged.
    type Error;

    /// Fit a model.
    fn fit(&self, matrix: &RegressionMatrix<T>, spec: &ModelSpec<T>) -> Result<Self::Model, Self::Error>;

    /// Predict output layers over `grid`.
    fn predict(
        &self,
        model: &Self::Model,
        grid: &Grid<T>,
        mode: PredictionMode,
    ) -> Result<Vec<Layer<T>>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::matrix::ColumnSpec;

    fn schema() -> Schema {
        Schema::new(vec![
            ColumnSpec::new("zinc", ColumnRole::Target, ColumnKind::Numeric),
            ColumnSpec::new("dist", ColumnRole::Covariate, ColumnKind::Numeric),
            ColumnSpec::new("layer.1", ColumnRole::Distance, ColumnKind::Numeric),
            ColumnSpec::new("weight", ColumnRole::Weight, ColumnKind::Numeric),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let spec: ModelSpec<f64> = ModelSpec::new("zinc", ["dist"]);
        assert_eq!(spec.num_trees, 500);
        assert_eq!(spec.quantiles, vec![0.159, 0.5, 0.841]);
        assert_eq!(spec.prediction_mode(), PredictionMode::Point);
    }

    #[test]
    fn test_validate_against_schema() {
        let spec: ModelSpec<f64> = ModelSpec::new("zinc", ["dist", "layer.1"]).weight("weight");
        assert!(spec.validate_against(&schema()).is_ok());

        let unknown: ModelSpec<f64> = ModelSpec::new("zinc", ["elev"]);
        assert_eq!(
            unknown.validate_against(&schema()).unwrap_err(),
            RfspError::UnknownColumn("elev".to_string())
        );

        let wrong_kind: ModelSpec<f64> =
            ModelSpec::new("zinc", ["dist"]).mode(ModelMode::Classification);
        assert!(matches!(
            wrong_kind.validate_against(&schema()),
            Err(RfspError::InvalidModelSpec(_))
        ));

        let weight_as_predictor: ModelSpec<f64> = ModelSpec::new("zinc", ["weight"]);
        assert!(weight_as_predictor.validate_against(&schema()).is_err());
    }

    #[test]
    fn test_quantile_validation() {
        let spec: ModelSpec<f64> = ModelSpec::new("zinc", ["dist"])
            .mode(ModelMode::Quantile)
            .quantiles(vec![0.5, 0.1]);
        assert!(spec.validate().is_err());
        assert_eq!(
            spec.clone().quantiles(vec![0.1, 0.5, 0.9]).prediction_mode(),
            PredictionMode::Quantile
        );
    }
}
