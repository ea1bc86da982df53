//! Domain models for the reshaping pipeline.
//!
//! - [`Table`] - raw rows of string cells, as read from a CSV file
//! - [`Record`] - one (entity, year, value) triple in long format
//! - [`LongTable`] - the records plus the name of their value column

use serde::{Deserialize, Serialize};

/// Label of the entity column in long output.
pub const ENTITY_LABEL: &str = "Country";

/// Label of the year column in long output.
pub const YEAR_LABEL: &str = "Year";

/// Value column name used when the caller does not supply one.
pub const DEFAULT_VALUE_LABEL: &str = "Value";

// =============================================================================
// Table
// =============================================================================

/// An ordered sequence of rows, each an ordered sequence of string cells.
///
/// Rows are not required to have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a table from string slices.
    pub fn from_str_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Record
// =============================================================================

/// A single country-year-value observation.
///
/// `value` is always non-empty and trimmed; `year` is always the exact
/// label of an all-digit header column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Record {
    pub entity: String,
    pub year: String,
    pub value: String,
}

impl Record {
    pub fn new(entity: impl Into<String>, year: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            year: year.into(),
            value: value.into(),
        }
    }

    /// The year as a number, if it fits.
    pub fn year_number(&self) -> Option<u16> {
        self.year.parse().ok()
    }

    /// The value as a finite float, if it parses.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

// =============================================================================
// Long Table
// =============================================================================

/// Long-format output: `Country`, `Year`, `<value_column>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongTable {
    /// Name of the value column, e.g. `LifeExpectancy`.
    pub value_column: String,
    pub records: Vec<Record>,
}

impl LongTable {
    pub fn new(value_column: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            value_column: value_column.into(),
            records,
        }
    }

    /// Header labels of the output table.
    pub fn headers(&self) -> [&str; 3] {
        [ENTITY_LABEL, YEAR_LABEL, self.value_column.as_str()]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct entities in first-seen order.
    pub fn entities(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.entity.as_str()) {
                seen.push(record.entity.as_str());
            }
        }
        seen
    }
}
