//! Melt-and-stack of per-target regression blocks.
//!
//! ## Purpose
//!
//! This module combines K regression matrices, one per target variable, into
//! one matrix with a single value column and a categorical group column that
//! records which target each row came from.
//!
//! ## Design notes
//!
//! * **Fail fast**: column sets are compared across all blocks before any row
//!   is copied. A block whose columns differ from the first block is rejected
//!   with `SchemaMismatch`, so no missing values are introduced for absent
//!   columns.
//! * **Contiguity**: rows of each block stay together, blocks in input order.
//!
//! ## Invariants
//!
//! * Output row count equals the sum of block row counts.
//! * The group column has exactly K distinct values.
//! * The group column is the last column.

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
use crate::primitives::matrix::{ColumnRole, ColumnSpec, RegressionMatrix, Schema};
use crate::primitives::value::{ColumnKind, Value};

/// Check that `schema` of block `name` has the same columns as `reference`.
pub fn ensure_same_columns(reference: &Schema, name: &str, schema: &Schema) -> Result<(), RfspError> {
    if reference.len() != schema.len() {
        return Err(RfspError::SchemaMismatch {
            block: name.to_string(),
            reason: format!(
                "has {} columns, expected {}",
                schema.len(),
                reference.len()
            ),
        });
    }
    for (expected, found) in reference.columns().iter().zip(schema.columns()) {
        if expected != found {
            return Err(RfspError::SchemaMismatch {
                block: name.to_string(),
                reason: format!(
                    "column '{}' ({:?}, {:?}) where '{}' ({:?}, {:?}) was expected",
                    found.name, found.role, found.kind, expected.name, expected.role, expected.kind
                ),
            });
        }
    }
    Ok(())
}

/// Stack named blocks into one matrix with a trailing group column.
pub fn stack_blocks<T: Float>(
    blocks: Vec<(String, RegressionMatrix<T>)>,
    group_column: &str,
) -> Result<RegressionMatrix<T>, RfspError> {
    let Some((_, first)) = blocks.first() else {
        return Err(RfspError::EmptyInput);
    };

    for (i, (name, _)) in blocks.iter().enumerate() {
        if blocks[..i].iter().any(|(other, _)| other == name) {
            return Err(RfspError::DuplicateIdentifier(name.clone()));
        }
    }

    let reference = first.schema().clone();
    for (name, matrix) in &blocks {
        ensure_same_columns(&reference, name, matrix.schema())?;
    }

    let mut columns = reference.columns().to_vec();
    columns.push(ColumnSpec::new(
        group_column,
        ColumnRole::Group,
        ColumnKind::Categorical,
    ));
    let schema = Schema::new(columns)?;

    let total: usize = blocks.iter().map(|(_, m)| m.nrows()).sum();
    let mut rows = Vec::with_capacity(total);
    for (name, matrix) in blocks {
        let (_, block_rows) = matrix.into_parts();
        for mut row in block_rows {
            row.values.push(Value::Categorical(name.clone()));
            rows.push(row);
        }
    }

    RegressionMatrix::new(schema, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::matrix::RegressionRow;

    fn block(target_kind: ColumnKind, n: usize) -> RegressionMatrix<f64> {
        let schema = Schema::new(vec![
            ColumnSpec::new("value", ColumnRole::Target, target_kind),
            ColumnSpec::new("elev", ColumnRole::Covariate, ColumnKind::Numeric),
        ])
        .unwrap();
        let rows = (0..n)
            .map(|i| RegressionRow {
                site: format!("s{}", i),
                time: None,
                values: vec![Value::Numeric(i as f64), Value::Numeric(1.0)],
            })
            .collect();
        RegressionMatrix::new(schema, rows).unwrap()
    }

    #[test]
    fn test_stack_appends_group_column() {
        let stacked = stack_blocks(
            vec![
                ("cd".to_string(), block(ColumnKind::Numeric, 2)),
                ("zn".to_string(), block(ColumnKind::Numeric, 3)),
            ],
            "type",
        )
        .unwrap();
        assert_eq!(stacked.nrows(), 5);
        assert_eq!(stacked.schema().columns().last().unwrap().name, "type");
        assert_eq!(
            stacked.categorical_column("type").unwrap(),
            vec!["cd", "cd", "zn", "zn", "zn"]
        );
    }

    #[test]
    fn test_stack_rejects_schema_mismatch() {
        let err = stack_blocks(
            vec![
                ("cd".to_string(), block(ColumnKind::Numeric, 2)),
                ("soil".to_string(), block(ColumnKind::Categorical, 2)),
            ],
            "type",
        )
        .unwrap_err();
        assert!(matches!(err, RfspError::SchemaMismatch { ref block, .. } if block == "soil"));
    }

    #[test]
    fn test_stack_rejects_empty_and_duplicates() {
        assert_eq!(
            stack_blocks::<f64>(Vec::new(), "type").unwrap_err(),
            RfspError::EmptyInput
        );
        assert_eq!(
            stack_blocks(
                vec![
                    ("cd".to_string(), block(ColumnKind::Numeric, 1)),
                    ("cd".to_string(), block(ColumnKind::Numeric, 1)),
                ],
                "type",
            )
            .unwrap_err(),
            RfspError::DuplicateIdentifier("cd".to_string())
        );
    }
}
