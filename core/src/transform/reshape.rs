//! Wide-to-long reshaping.
//!
//! Indicator exports come in wide format: one row per country, one column
//! per year. The reshaper turns them into one [`Record`] per non-blank
//! country-year cell.
//!
//! ```text
//! Country | 2020 | 2021            Country | Year | Value
//! --------+------+------    →      --------+------+------
//! X       | 5    |                 X       | 2020 | 5
//! Y       | 7    | 8               Y       | 2020 | 7
//!                                  Y       | 2021 | 8
//! ```
//!
//! Irregular input (short rows, blank cells, non-year columns) is dropped
//! silently and counted in [`ReshapeOutput`]. The only failure is a table
//! too short to contain the header row.

use serde::{Deserialize, Serialize};

use crate::error::{ReshapeError, ReshapeResult};
use crate::models::{Record, Table};

/// Options controlling where the header and entity column are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReshapeOptions {
    /// Rows to discard before the header row.
    pub metadata_rows_to_skip: usize,

    /// Column holding the entity (country) name.
    pub entity_column_index: usize,
}

impl ReshapeOptions {
    /// Layout of a World Bank `API_*.csv` export once blank lines are
    /// dropped: "Data Source" and "Last Updated Date" above the header.
    pub fn world_bank() -> Self {
        Self {
            metadata_rows_to_skip: 2,
            entity_column_index: 0,
        }
    }

    /// Load options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> ReshapeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A header column recognised as a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearColumn {
    pub index: usize,
    pub label: String,
}

/// A data row dropped because it cannot reach the first year column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Index of the row in the input table.
    pub row: usize,
    /// Number of cells the row had.
    pub len: usize,
}

/// Records plus bookkeeping from one reshape pass.
#[derive(Debug, Clone, Serialize)]
pub struct ReshapeOutput {
    pub header: Vec<String>,
    pub year_columns: Vec<YearColumn>,
    pub records: Vec<Record>,
    /// Rows after the header, skipped or not.
    pub data_rows: usize,
    pub skipped_rows: Vec<SkippedRow>,
    /// Year cells not emitted because they were blank or missing.
    pub dropped_cells: usize,
}

impl ReshapeOutput {
    pub fn summary(&self) -> String {
        format!(
            "Reshaped: {} records from {} rows x {} year columns, {} rows skipped, {} cells dropped",
            self.records.len(),
            self.data_rows,
            self.year_columns.len(),
            self.skipped_rows.len(),
            self.dropped_cells
        )
    }
}

/// True for a non-empty label made only of ASCII digits.
pub fn is_year_label(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

/// Year columns of `header`, scanning from the column after the entity column.
pub fn detect_year_columns(header: &[String], entity_column_index: usize) -> Vec<YearColumn> {
    header
        .iter()
        .enumerate()
        .skip(entity_column_index.saturating_add(1))
        .filter(|(_, label)| is_year_label(label))
        .map(|(index, label)| YearColumn {
            index,
            label: label.clone(),
        })
        .collect()
}

/// Index of the first row that looks like a header, i.e. the number of
/// metadata rows above it.
///
/// A row qualifies when some cell after the entity column is a year label.
pub fn detect_metadata_rows(rows: &[Vec<String>], entity_column_index: usize) -> Option<usize> {
    rows.iter().position(|row| {
        row.iter()
            .skip(entity_column_index.saturating_add(1))
            .any(|cell| is_year_label(cell))
    })
}

/// Reshapes wide indicator tables into long records.
#[derive(Debug, Clone, Default)]
pub struct WideToLongReshaper {
    options: ReshapeOptions,
}

impl WideToLongReshaper {
    pub fn new(options: ReshapeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReshapeOptions {
        &self.options
    }

    pub fn reshape_table(&self, table: &Table) -> ReshapeResult<ReshapeOutput> {
        self.reshape(&table.rows)
    }

    /// Run one pass over `rows`.
    ///
    /// Records come out row-major, then in header column order.
    pub fn reshape(&self, rows: &[Vec<String>]) -> ReshapeResult<ReshapeOutput> {
        let skip = self.options.metadata_rows_to_skip;
        let entity_index = self.options.entity_column_index;

        let header = rows.get(skip).ok_or(ReshapeError::MalformedInput {
            skip,
            available: rows.len(),
        })?;

        let year_columns = detect_year_columns(header, entity_index);
        // Year columns sit after the entity column, so reaching the first
        // one also reaches the entity.
        let min_len = year_columns.first().map(|col| col.index + 1);

        let data = &rows[skip + 1..];
        let mut records = Vec::new();
        let mut skipped_rows = Vec::new();
        let mut dropped_cells = 0;

        for (offset, row) in data.iter().enumerate() {
            let row_index = skip + 1 + offset;

            let reachable = min_len.is_some_and(|min| row.len() >= min);
            if !reachable {
                skipped_rows.push(SkippedRow {
                    row: row_index,
                    len: row.len(),
                });
                continue;
            }

            let entity = &row[entity_index];
            for column in &year_columns {
                let value = match row.get(column.index) {
                    Some(cell) => cell.trim(),
                    None => {
                        dropped_cells += 1;
                        continue;
                    }
                };
                if value.is_empty() {
                    dropped_cells += 1;
                    continue;
                }
                records.push(Record::new(entity.as_str(), column.label.as_str(), value));
            }
        }

        Ok(ReshapeOutput {
            header: header.clone(),
            year_columns,
            records,
            data_rows: data.len(),
            skipped_rows,
            dropped_cells,
        })
    }
}

/// Reshape `rows` and return only the records.
pub fn reshape_rows(rows: &[Vec<String>], options: &ReshapeOptions) -> ReshapeResult<Vec<Record>> {
    WideToLongReshaper::new(options.clone())
        .reshape(rows)
        .map(|output| output.records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_blank_cell_dropped() {
        let input = rows(&[&["Country", "2020", "2021"], &["X", "5", ""]]);
        let records = reshape_rows(&input, &ReshapeOptions::default()).unwrap();

        assert_eq!(records, vec![Record::new("X", "2020", "5")]);
    }

    #[test]
    fn test_missing_header_is_malformed() {
        let input = rows(&[&["Data Source", "WDI"], &["Last Updated Date", "2025-07-01"]]);
        let options = ReshapeOptions {
            metadata_rows_to_skip: 2,
            ..Default::default()
        };

        let err = reshape_rows(&input, &options).unwrap_err();
        match err {
            ReshapeError::MalformedInput { skip, available } => {
                assert_eq!(skip, 2);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_table_is_malformed() {
        let err = reshape_rows(&[], &ReshapeOptions::default()).unwrap_err();
        assert!(matches!(err, ReshapeError::MalformedInput { skip: 0, available: 0 }));
    }

    #[test]
    fn test_header_only_yields_nothing() {
        let input = rows(&[&["Country", "2020"]]);
        let output = WideToLongReshaper::default().reshape(&input).unwrap();

        assert!(output.records.is_empty());
        assert_eq!(output.data_rows, 0);
    }

    #[test]
    fn test_short_row_emits_present_cells() {
        let input = rows(&[&["Country", "2020", "2021", "2022"], &["X", "1", "2"]]);
        let output = WideToLongReshaper::default().reshape(&input).unwrap();

        assert_eq!(
            output.records,
            vec![Record::new("X", "2020", "1"), Record::new("X", "2021", "2")]
        );
        assert!(output.skipped_rows.is_empty());
        assert_eq!(output.dropped_cells, 1);
    }

    #[test]
    fn test_repeated_entity_not_deduplicated() {
        let input = rows(&[&["Country", "2020"], &["X", "1"], &["X", "2"]]);
        let records = reshape_rows(&input, &ReshapeOptions::default()).unwrap();

        assert_eq!(
            records,
            vec![Record::new("X", "2020", "1"), Record::new("X", "2020", "2")]
        );
    }

    #[test]
    fn test_metadata_columns_are_not_years() {
        let input = rows(&[
            &["Country Name", "Country Code", "Indicator Name", "Indicator Code", "1960", "1961", ""],
            &["World", "WLD", "Life expectancy at birth", "SP.DYN.LE00.IN", "52.6", "53.1", ""],
        ]);
        let output = WideToLongReshaper::default().reshape(&input).unwrap();

        let labels: Vec<&str> = output.year_columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["1960", "1961"]);
        assert_eq!(output.year_columns[0].index, 4);
        assert_eq!(
            output.records,
            vec![
                Record::new("World", "1960", "52.6"),
                Record::new("World", "1961", "53.1"),
            ]
        );
    }

    #[test]
    fn test_row_too_short_for_first_year_is_skipped() {
        let input = rows(&[
            &["Country Name", "Country Code", "1960"],
            &["World", "WLD"],
            &[],
            &["Aruba", "ABW", "64.1"],
        ]);
        let output = WideToLongReshaper::default().reshape(&input).unwrap();

        assert_eq!(output.records, vec![Record::new("Aruba", "1960", "64.1")]);
        assert_eq!(
            output.skipped_rows,
            vec![SkippedRow { row: 1, len: 2 }, SkippedRow { row: 2, len: 0 }]
        );
    }

    #[test]
    fn test_values_trimmed_and_whitespace_dropped() {
        let input = rows(&[&["Country", "2020", "2021"], &["X", "  4.5 ", "   "]]);
        let records = reshape_rows(&input, &ReshapeOptions::default()).unwrap();

        assert_eq!(records, vec![Record::new("X", "2020", "4.5")]);
    }

    #[test]
    fn test_non_numeric_values_are_kept() {
        // only blanks are filtered; the value is carried as text
        let input = rows(&[&["Country", "2020"], &["X", ".."]]);
        let records = reshape_rows(&input, &ReshapeOptions::default()).unwrap();

        assert_eq!(records, vec![Record::new("X", "2020", "..")]);
    }

    #[test]
    fn test_no_year_columns_skips_every_row() {
        let input = rows(&[&["Country", "Code"], &["X", "XXX"], &["Y", "YYY"]]);
        let output = WideToLongReshaper::default().reshape(&input).unwrap();

        assert!(output.records.is_empty());
        assert_eq!(output.skipped_rows.len(), 2);
    }

    #[test]
    fn test_entity_column_index() {
        let input = rows(&[&["Code", "Country", "2020"], &["XXX", "X", "1"]]);
        let options = ReshapeOptions {
            entity_column_index: 1,
            ..Default::default()
        };
        let records = reshape_rows(&input, &options).unwrap();

        assert_eq!(records, vec![Record::new("X", "2020", "1")]);
    }

    #[test]
    fn test_year_before_entity_column_ignored() {
        let input = rows(&[&["2019", "Country", "2020"], &["9", "X", "1"]]);
        let options = ReshapeOptions {
            entity_column_index: 1,
            ..Default::default()
        };
        let records = reshape_rows(&input, &options).unwrap();

        assert_eq!(records, vec![Record::new("X", "2020", "1")]);
    }

    #[test]
    fn test_entity_index_past_header_skips_rows() {
        let input = rows(&[&["Country", "2020"], &["X", "5"]]);
        let options =
            ReshapeOptions::from_json(r#"{"entityColumnIndex": 18446744073709551615}"#).unwrap();

        let output = WideToLongReshaper::new(options).reshape(&input).unwrap();
        assert!(output.year_columns.is_empty());
        assert!(output.records.is_empty());
        assert_eq!(output.skipped_rows, vec![SkippedRow { row: 1, len: 2 }]);
        assert_eq!(detect_metadata_rows(&input, usize::MAX), None);
    }

    #[test]
    fn test_world_bank_layout() {
        let input = rows(&[
            &["Data Source", "World Development Indicators", ""],
            &["Last Updated Date", "2025-07-01", ""],
            &["Country Name", "Country Code", "Indicator Name", "Indicator Code", "2022", "2023", "2024", ""],
            &["World", "WLD", "Individuals using the Internet (% of population)", "IT.NET.USER.ZS", "63.7", "65.4", "67.6", ""],
        ]);
        let output = WideToLongReshaper::new(ReshapeOptions::world_bank())
            .reshape(&input)
            .unwrap();

        assert_eq!(output.records.len(), 3);
        assert_eq!(output.records[2], Record::new("World", "2024", "67.6"));
    }

    #[test]
    fn test_year_label_detection() {
        assert!(is_year_label("1960"));
        assert!(is_year_label("2024"));
        assert!(!is_year_label(""));
        assert!(!is_year_label(" 2020"));
        assert!(!is_year_label("2020.0"));
        assert!(!is_year_label("YR2020"));
        assert!(!is_year_label("２０２０"));
    }

    #[test]
    fn test_detect_metadata_rows() {
        let input = rows(&[
            &["Data Source", "World Development Indicators"],
            &["Last Updated Date", "2025-07-01"],
            &["Country Name", "Country Code", "1960"],
            &["World", "WLD", "52.6"],
        ]);
        assert_eq!(detect_metadata_rows(&input, 0), Some(2));

        let plain = rows(&[&["Country", "2020"], &["X", "1"]]);
        assert_eq!(detect_metadata_rows(&plain, 0), Some(0));

        let none = rows(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(detect_metadata_rows(&none, 0), None);
    }

    #[test]
    fn test_options_from_json() {
        let options = ReshapeOptions::from_json(r#"{"metadataRowsToSkip": 4}"#).unwrap();
        assert_eq!(options.metadata_rows_to_skip, 4);
        assert_eq!(options.entity_column_index, 0);

        assert!(ReshapeOptions::from_json("{").is_err());
    }

    #[test]
    fn test_summary() {
        let input = rows(&[&["Country", "2020", "2021"], &["X", "5", ""], &["Y"]]);
        let output = WideToLongReshaper::default().reshape(&input).unwrap();

        let summary = output.summary();
        assert!(summary.contains("1 records"));
        assert!(summary.contains("1 rows skipped"));
        assert!(summary.contains("1 cells dropped"));
    }
}
