//! Observation sets: values partitioned by a categorical column.
//!
//! ## Purpose
//!
//! This module splits the value column of a [`DataFrame`] into one group per
//! distinct label of the group column. The order of the resulting groups fixes
//! both the pair enumeration order and the 1-based x position of each group.
//!
//! ## Design notes
//!
//! * **Order is explicit**: [`GroupOrder`] chooses sorted, first-appearance, or
//!   caller-supplied order; the default matches sorted unique labels.
//! * **Row order preserved**: Values inside a group keep input row order.
//! * **Validated**: Value columns must be numeric and finite.
//!
//! ## Invariants
//!
//! * Every group has a unique label.
//! * The sum of group sizes equals the number of rows (except for
//!   `Explicit` order, which may select a subset of labels).
//!
//! ## Non-goals
//!
//! * This module does not compute statistics on the groups.

// External dependencies
use num_traits::Float;
use std::collections::{HashMap, HashSet};

// Internal dependencies
use crate::primitives::errors::DeliceError;
use crate::primitives::frame::{Column, DataFrame};

// ============================================================================
// Group Order
// ============================================================================

/// Strategy for ordering the distinct groups of a column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupOrder {
    /// Sorted unique labels: lexical for categorical columns, numeric for
    /// numeric columns.
    #[default]
    Sorted,

    /// Labels in order of first appearance in the rows.
    FirstAppearance,

    /// Exactly these labels, in this order.
    Explicit(Vec<String>),
}

// ============================================================================
// Observation Set
// ============================================================================

/// A labeled group of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
    /// Group label.
    pub label: String,

    /// Values of the measured variable, in input row order.
    pub values: Vec<T>,
}

/// Ordered collection of groups derived from a data frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet<T> {
    /// Name of the group column the set was built from.
    pub group_column: String,

    /// Name of the value column the set was built from.
    pub value_column: String,

    /// Groups in plotting order.
    pub groups: Vec<Group<T>>,
}

impl<T: Float> ObservationSet<T> {
    /// Partition `value_column` by the labels of `group_column`.
    pub fn from_frame(
        frame: &DataFrame<T>,
        group_column: &str,
        value_column: &str,
        order: &GroupOrder,
    ) -> Result<Self, DeliceError> {
        let rows: Vec<usize> = (0..frame.len()).collect();
        Self::from_rows(frame, &rows, group_column, value_column, order)
    }

    /// Partition a subset of rows; used by faceted plots.
    pub fn from_rows(
        frame: &DataFrame<T>,
        rows: &[usize],
        group_column: &str,
        value_column: &str,
        order: &GroupOrder,
    ) -> Result<Self, DeliceError> {
        if frame.is_empty() {
            return Err(DeliceError::EmptyInput);
        }
        let row_labels = frame.labels(group_column)?;
        Self::from_labeled_rows(frame, &row_labels, rows, group_column, value_column, order)
    }

    /// Partition a subset of rows whose group labels are already rendered.
    ///
    /// `row_labels[i]` must be the label of frame row `i`.
    pub(crate) fn from_labeled_rows(
        frame: &DataFrame<T>,
        row_labels: &[String],
        rows: &[usize],
        group_column: &str,
        value_column: &str,
        order: &GroupOrder,
    ) -> Result<Self, DeliceError> {
        if frame.is_empty() {
            return Err(DeliceError::EmptyInput);
        }

        let keys = frame.column(group_column)?;
        let values = frame.numeric(value_column)?;

        for &i in rows {
            if !values[i].is_finite() {
                return Err(DeliceError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    value_column,
                    i,
                    values[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        let labels = ordered_labels(keys, row_labels, rows, group_column, order)?;

        let slot: HashMap<&str, usize> = labels.iter().enumerate().map(|(g, l)| (l.as_str(), g)).collect();
        let mut members: Vec<Vec<T>> = vec![Vec::new(); labels.len()];
        for &i in rows {
            if let Some(&g) = slot.get(row_labels[i].as_str()) {
                members[g].push(values[i]);
            }
        }
        let groups = labels
            .into_iter()
            .zip(members)
            .map(|(label, values)| Group { label, values })
            .collect();

        Ok(Self {
            group_column: group_column.to_string(),
            value_column: value_column.to_string(),
            groups,
        })
    }

    /// Build a set directly from labeled value lists, keeping their order.
    pub fn from_groups<S: Into<String>>(groups: impl IntoIterator<Item = (S, Vec<T>)>) -> Self {
        Self {
            group_column: String::from("group"),
            value_column: String::from("value"),
            groups: groups
                .into_iter()
                .map(|(label, values)| Group {
                    label: label.into(),
                    values,
                })
                .collect(),
        }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }

    /// Find a group by label.
    pub fn group(&self, label: &str) -> Option<&Group<T>> {
        self.groups.iter().find(|g| g.label == label)
    }
}

/// Distinct labels of the selected rows, ordered per `order`.
///
/// `row_labels` holds the label of every frame row; `keys` is only consulted
/// to sort numeric columns numerically.
fn ordered_labels<T: Float>(
    keys: &Column<T>,
    row_labels: &[String],
    rows: &[usize],
    name: &str,
    order: &GroupOrder,
) -> Result<Vec<String>, DeliceError> {
    let distinct = |rows: &[usize]| {
        let mut seen = HashSet::new();
        rows.iter()
            .map(|&i| &row_labels[i])
            .filter(|label| seen.insert(label.as_str()))
            .cloned()
            .collect::<Vec<String>>()
    };

    match order {
        GroupOrder::FirstAppearance => Ok(distinct(rows)),
        GroupOrder::Sorted => Ok(distinct(&keys.sort_rows(rows, name)?)),
        GroupOrder::Explicit(labels) => {
            let present: HashSet<&str> = rows.iter().map(|&i| row_labels[i].as_str()).collect();
            for label in labels {
                if !present.contains(label.as_str()) {
                    return Err(DeliceError::GroupNotFound(label.clone()));
                }
            }
            Ok(labels.clone())
        }
    }
}
