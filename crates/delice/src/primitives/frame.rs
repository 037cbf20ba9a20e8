//! Named-column data frame used as plotting input.
//!
//! ## Purpose
//!
//! This module provides a minimal column store: every column has a name and
//! holds either categorical labels or numeric values, all of the same length.
//! Columns are looked up by name, the way the plotting calls address the group
//! and value fields.
//!
//! ## Design notes
//!
//! * **Column-oriented**: Rows are implicit; row `i` is index `i` of every column.
//! * **Typed lookup**: Asking for a numeric column that is categorical fails
//!   with `ColumnTypeMismatch` instead of coercing.
//! * **Explicit sort failure**: `sort_by` and sorted group ordering share
//!   [`Column::sort_rows`], which reports `UnorderableColumn` when the key
//!   column has NaN values; nothing is silently skipped.
//!
//! ## Invariants
//!
//! * All columns have the same length.
//! * Column names are unique.
//!
//! ## Non-goals
//!
//! * This module does not parse files or infer column types.
//! * This module does not group or aggregate rows (see `groups`).

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::DeliceError;

// ============================================================================
// Column
// ============================================================================

/// A single named column of a [`DataFrame`].
#[derive(Debug, Clone, PartialEq)]
pub enum Column<T> {
    /// Categorical labels (e.g. treatment names).
    Categorical(Vec<String>),

    /// Numeric values (measurements, or numeric group codes).
    Numeric(Vec<T>),
}

impl<T: Float> Column<T> {
    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Categorical(v) => v.len(),
            Column::Numeric(v) => v.len(),
        }
    }

    /// Returns `true` if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short description of the column kind, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Column::Categorical(_) => "categorical",
            Column::Numeric(_) => "numeric",
        }
    }

    /// Row `i` rendered as a label.
    ///
    /// Numeric values are printed in their shortest `f64` form, so a group
    /// code of `2.0` becomes `"2"`.
    pub fn label_at(&self, i: usize) -> String {
        match self {
            Column::Categorical(v) => v[i].clone(),
            Column::Numeric(v) => format_number(v[i].to_f64().unwrap_or(f64::NAN)),
        }
    }

    /// Stable ascending order of `rows` by this column's values.
    ///
    /// Categorical keys sort lexically, numeric keys numerically. A NaN key
    /// has no place in the order and is rejected with
    /// [`DeliceError::UnorderableColumn`] naming `name`.
    pub fn sort_rows(&self, rows: &[usize], name: &str) -> Result<Vec<usize>, DeliceError> {
        let mut order = rows.to_vec();
        match self {
            Column::Categorical(v) => order.sort_by(|&a, &b| v[a].cmp(&v[b])),
            Column::Numeric(v) => {
                if rows.iter().any(|&i| v[i].is_nan()) {
                    return Err(DeliceError::UnorderableColumn(name.to_string()));
                }
                order.sort_by(|&a, &b| v[a].partial_cmp(&v[b]).unwrap_or(Ordering::Equal));
            }
        }
        Ok(order)
    }

    fn take(&self, order: &[usize]) -> Self {
        match self {
            Column::Categorical(v) => Column::Categorical(order.iter().map(|&i| v[i].clone()).collect()),
            Column::Numeric(v) => Column::Numeric(order.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// Render a number the way group labels and tick labels show it.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ============================================================================
// Data Frame
// ============================================================================

/// Column store with named, equally long columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame<T> {
    names: Vec<String>,
    columns: Vec<Column<T>>,
}

impl<T: Float> Default for DataFrame<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> DataFrame<T> {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Add a categorical column.
    pub fn with_categorical<S: Into<String>>(
        self,
        name: &str,
        values: impl IntoIterator<Item = S>,
    ) -> Result<Self, DeliceError> {
        let values = values.into_iter().map(Into::into).collect();
        self.with_column(name, Column::Categorical(values))
    }

    /// Add a numeric column.
    pub fn with_numeric(self, name: &str, values: impl IntoIterator<Item = T>) -> Result<Self, DeliceError> {
        self.with_column(name, Column::Numeric(values.into_iter().collect()))
    }

    /// Add a column, checking the name is new and the length matches.
    pub fn with_column(mut self, name: &str, column: Column<T>) -> Result<Self, DeliceError> {
        if self.names.iter().any(|n| n == name) {
            return Err(DeliceError::DuplicateColumn(name.to_string()));
        }
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(DeliceError::MismatchedColumnLength {
                    column: name.to_string(),
                    got: column.len(),
                    expected: first.len(),
                });
            }
        }
        self.names.push(name.to_string());
        self.columns.push(column);
        Ok(self)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Returns `true` if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column<T>, DeliceError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| DeliceError::ColumnNotFound(name.to_string()))
    }

    /// Look up a numeric column by name.
    pub fn numeric(&self, name: &str) -> Result<&[T], DeliceError> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            Column::Categorical(_) => Err(DeliceError::ColumnTypeMismatch {
                column: name.to_string(),
                expected: "numeric",
            }),
        }
    }

    /// Row labels of a column (categorical values or formatted numbers).
    pub fn labels(&self, name: &str) -> Result<Vec<String>, DeliceError> {
        let column = self.column(name)?;
        Ok((0..column.len()).map(|i| column.label_at(i)).collect())
    }

    /// Return a copy of the frame with rows ordered by the given column.
    ///
    /// Categorical keys sort lexically, numeric keys numerically. The sort is
    /// stable. A numeric key column containing NaN has no total order and is
    /// rejected with [`DeliceError::UnorderableColumn`].
    pub fn sort_by(&self, name: &str, descending: bool) -> Result<Self, DeliceError> {
        let column = self.column(name)?;
        let rows: Vec<usize> = (0..column.len()).collect();
        let mut order = column.sort_rows(&rows, name)?;
        if descending {
            // Reverse while keeping equal keys in input order.
            order = stable_reverse(column, order);
        }

        Ok(Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(&order)).collect(),
        })
    }
}

/// Reverse a stable ascending order into a stable descending one.
fn stable_reverse<T: Float>(column: &Column<T>, ascending: Vec<usize>) -> Vec<usize> {
    let same = |a: usize, b: usize| match column {
        Column::Categorical(v) => v[a] == v[b],
        Column::Numeric(v) => v[a] == v[b],
    };

    let mut runs: Vec<Vec<usize>> = Vec::new();
    for idx in ascending {
        match runs.last_mut() {
            Some(run) if same(run[0], idx) => run.push(idx),
            _ => runs.push(vec![idx]),
        }
    }
    runs.into_iter().rev().flatten().collect()
}
