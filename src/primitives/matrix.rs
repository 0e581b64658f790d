//! Regression matrix: a fixed column schema and the rows built against it.
//!
//! ## Purpose
//!
//! This module defines the flat table handed to an external regression or
//! classification engine. Columns are described once by a `Schema`; every row
//! holds exactly one `Value` per schema column.
//!
//! ## Design notes
//!
//! * **Roles**: each column has a role (target, time, covariate, distance,
//!   weight, group) so a model specification can be derived without
//!   string conventions.
//! * **Stable order**: column order is decided when the schema is built and
//!   never depends on map iteration order.
//!
//! ## Invariants
//!
//! * Column names are unique.
//! * `row.values.len() == schema.len()` for every row.
//! * At most one target, one time, one weight and one group column.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::BTreeSet;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt;
use num_traits::Float;

use crate::primitives::errors::RfspError;
use crate::primitives::value::{ColumnKind, Value};

// ============================================================================
// Schema
// ============================================================================

/// What a column means to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnRole {
    /// Response variable.
    Target,
    /// Observation time, used as an ordinary numeric covariate.
    Time,
    /// Covariate sampled from a grid layer.
    Covariate,
    /// Buffer distance sampled from a distance layer.
    Distance,
    /// Case weight.
    Weight,
    /// Source block of a stacked matrix.
    Group,
}

impl ColumnRole {
    /// True for roles that are predictors of the target.
    pub fn is_predictor(self) -> bool {
        matches!(self, Self::Time | Self::Covariate | Self::Distance | Self::Group)
    }
}

/// Description of one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Column role.
    pub role: ColumnRole,
    /// Storage kind.
    pub kind: ColumnKind,
}

impl ColumnSpec {
    /// Create a column description.
    pub fn new(name: impl Into<String>, role: ColumnRole, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            role,
            kind,
        }
    }
}

/// Ordered column descriptions of a regression matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSchema"))]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

/// Unchecked schema as read from a serialized payload.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSchema {
    columns: Vec<ColumnSpec>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSchema> for Schema {
    type Error = RfspError;

    fn try_from(raw: RawSchema) -> Result<Self, Self::Error> {
        Schema::new(raw.columns)
    }
}

impl Schema {
    /// Create a schema, rejecting duplicate names and repeated singleton roles.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, RfspError> {
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(RfspError::DuplicateColumn(column.name.clone()));
            }
        }
        for role in [
            ColumnRole::Target,
            ColumnRole::Time,
            ColumnRole::Weight,
            ColumnRole::Group,
        ] {
            let mut with_role = columns.iter().filter(|c| c.role == role);
            if let (Some(_), Some(second)) = (with_role.next(), with_role.next()) {
                return Err(RfspError::DuplicateColumn(second.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Columns in order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// First column with the given role.
    pub fn with_role(&self, role: ColumnRole) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.role == role)
    }

    /// All columns with the given role, in order.
    pub fn all_with_role(&self, role: ColumnRole) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(move |c| c.role == role)
    }
}

// ============================================================================
// Rows and Matrix
// ============================================================================

/// One observation of a regression matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegressionRow<T> {
    /// Site the row was observed at.
    pub site: String,
    /// Observation time, if any.
    pub time: Option<T>,
    /// One value per schema column.
    pub values: Vec<Value<T>>,
}

/// Flat table of regression rows sharing one schema.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawMatrix<T>",
        bound(deserialize = "T: Float + serde::Deserialize<'de>")
    )
)]
pub struct RegressionMatrix<T> {
    schema: Schema,
    rows: Vec<RegressionRow<T>>,
}

/// Unchecked matrix as read from a serialized payload.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix<T> {
    schema: Schema,
    rows: Vec<RegressionRow<T>>,
}

#[cfg(feature = "serde")]
impl<T: Float> TryFrom<RawMatrix<T>> for RegressionMatrix<T> {
    type Error = RfspError;

    fn try_from(raw: RawMatrix<T>) -> Result<Self, Self::Error> {
        RegressionMatrix::new(raw.schema, raw.rows)
    }
}

impl<T: Float> RegressionMatrix<T> {
    /// Create a matrix, checking that every row matches the schema width.
    pub fn new(schema: Schema, rows: Vec<RegressionRow<T>>) -> Result<Self, RfspError> {
        if let Some(row) = rows.iter().find(|r| r.values.len() != schema.len()) {
            return Err(RfspError::SchemaMismatch {
                block: row.site.clone(),
                reason: format!(
                    "row has {} values, schema has {} columns",
                    row.values.len(),
                    schema.len()
                ),
            });
        }
        Ok(Self { schema, rows })
    }

    /// Column schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rows in order.
    pub fn rows(&self) -> &[RegressionRow<T>] {
        &self.rows
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.schema.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the matrix into its parts.
    pub fn into_parts(self) -> (Schema, Vec<RegressionRow<T>>) {
        (self.schema, self.rows)
    }

    fn column_index(&self, name: &str) -> Result<usize, RfspError> {
        self.schema
            .index_of(name)
            .ok_or_else(|| RfspError::UnknownColumn(name.to_string()))
    }

    /// Values of a numeric column in row order.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<T>, RfspError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .map(|row| {
                row.values[idx].as_numeric().ok_or_else(|| RfspError::SchemaMismatch {
                    block: row.site.clone(),
                    reason: format!("column '{}' is not numeric", name),
                })
            })
            .collect()
    }

    /// Values of a categorical column in row order.
    pub fn categorical_column(&self, name: &str) -> Result<Vec<&str>, RfspError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .map(|row| {
                row.values[idx].as_category().ok_or_else(|| RfspError::SchemaMismatch {
                    block: row.site.clone(),
                    reason: format!("column '{}' is not categorical", name),
                })
            })
            .collect()
    }

    /// Case weights, if the matrix has a weight column.
    pub fn weights(&self) -> Option<Vec<T>> {
        let name = &self.schema.with_role(ColumnRole::Weight)?.name;
        self.numeric_column(name).ok()
    }

    /// Distinct labels of a categorical column in first-seen order.
    pub fn distinct_categories(&self, name: &str) -> Result<Vec<String>, RfspError> {
        let mut out: Vec<String> = Vec::new();
        for label in self.categorical_column(name)? {
            if !out.iter().any(|l| l == label) {
                out.push(label.to_string());
            }
        }
        Ok(out)
    }

    /// Matrix with the selected rows, in the order given.
    pub fn subset(&self, indices: &[usize]) -> Result<Self, RfspError> {
        let rows = indices
            .iter()
            .map(|&index| {
                self.rows.get(index).cloned().ok_or(RfspError::RowOutOfRange {
                    index,
                    nrows: self.rows.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            schema: self.schema.clone(),
            rows,
        })
    }
}

impl<T: Float + fmt::Display> fmt::Display for RegressionMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Rows: {}", self.nrows())?;
        writeln!(f, "  Columns: {}", self.ncols())?;
        writeln!(f)?;

        write!(f, "  {:>10}", "site")?;
        for name in self.schema.names() {
            write!(f, " {:>12}", name)?;
        }
        writeln!(f)?;
        let width = 12 + 13 * self.ncols();
        writeln!(f, "  {}", "-".repeat(width))?;

        for row in &self.rows {
            write!(f, "  {:>10}", row.site)?;
            for value in &row.values {
                write!(f, " {:>12}", format!("{}", value))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
