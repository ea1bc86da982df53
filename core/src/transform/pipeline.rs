//! High-level API: read an indicator CSV, reshape it, write it back out.
//!
//! # Example
//!
//! ```rust,ignore
//! use reshape::pipeline::{reshape_file_to, PipelineOptions};
//! use reshape::ReshapeOptions;
//!
//! let options = PipelineOptions {
//!     reshape: ReshapeOptions::world_bank(),
//!     value_column: "LifeExpectancy".to_string(),
//!     ..Default::default()
//! };
//! let output = reshape_file_to(
//!     "API_SP.DYN.LE00.IN_DS2_en_csv_v2.csv".as_ref(),
//!     "country_life_expectancy.csv".as_ref(),
//!     &options,
//! )?;
//! println!("{} records", output.table.len());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PipelineResult;
use crate::logs::{log_error, log_info, log_info_indent, log_success, log_warning};
use crate::models::{LongTable, DEFAULT_VALUE_LABEL};
use crate::parser::{parse_bytes, ParseResult};
use crate::transform::reshape::{detect_metadata_rows, ReshapeOptions, SkippedRow, WideToLongReshaper};
use crate::writer::write_csv_file;

/// Options for the reshaping pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineOptions {
    pub reshape: ReshapeOptions,

    /// Name of the value column in the output, e.g. `LifeExpectancy`
    pub value_column: String,

    /// Field delimiter of the input; detected when `None`
    pub delimiter: Option<char>,

    /// Locate the header row instead of trusting `reshape.metadata_rows_to_skip`
    pub detect_header: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            reshape: ReshapeOptions::default(),
            value_column: DEFAULT_VALUE_LABEL.to_string(),
            delimiter: None,
            detect_header: false,
        }
    }
}

impl PipelineOptions {
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}

/// CSV file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    /// Rows read, metadata and header included
    pub row_count: usize,
    /// Index of the header row
    pub header_row: usize,
    pub year_columns: Vec<String>,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub table: LongTable,
    pub csv_info: CsvInfo,
    pub skipped_rows: Vec<SkippedRow>,
    pub dropped_cells: usize,
}

/// Reshape a CSV file.
pub fn reshape_file(path: &Path, options: &PipelineOptions) -> PipelineResult<PipelineOutput> {
    log_info(format!("📖 Reading {}...", path.display()));
    let bytes = std::fs::read(path)?;
    reshape_bytes(&bytes, options)
}

/// Reshape a CSV file and write the long table to `output`.
pub fn reshape_file_to(
    input: &Path,
    output: &Path,
    options: &PipelineOptions,
) -> PipelineResult<PipelineOutput> {
    let result = reshape_file(input, options)?;

    write_csv_file(output, &result.table)?;
    log_success(format!("💾 Wrote {} records to {}", result.table.len(), output.display()));

    Ok(result)
}

/// Reshape raw CSV bytes.
pub fn reshape_bytes(bytes: &[u8], options: &PipelineOptions) -> PipelineResult<PipelineOutput> {
    log_info("Detecting encoding and separator...");
    let parse_result = parse_bytes(bytes, options.delimiter)?;
    reshape_parsed(parse_result, options)
}

/// Reshape an already-parsed table.
pub fn reshape_parsed(
    parse_result: ParseResult,
    options: &PipelineOptions,
) -> PipelineResult<PipelineOutput> {
    log_success(format!("Encoding: {}", parse_result.encoding));
    log_success(format!("Separator: '{}'", format_delimiter(parse_result.delimiter)));
    log_success(format!("Read {} rows", parse_result.table.len()));

    let rows = &parse_result.table.rows;
    let mut reshape_options = options.reshape.clone();

    if options.detect_header {
        match detect_metadata_rows(rows, reshape_options.entity_column_index) {
            Some(skip) => {
                log_success(format!("Header found after {} metadata row(s)", skip));
                reshape_options.metadata_rows_to_skip = skip;
            }
            None => log_warning(format!(
                "No year header found, skipping {} row(s) as configured",
                reshape_options.metadata_rows_to_skip
            )),
        }
    }

    log_info("⚙️  Reshaping wide → long...");
    let header_row = reshape_options.metadata_rows_to_skip;
    let output = WideToLongReshaper::new(reshape_options)
        .reshape(rows)
        .map_err(|e| {
            log_error(e.to_string());
            e
        })?;

    match (output.year_columns.first(), output.year_columns.last()) {
        (Some(first), Some(last)) => log_success(format!(
            "{} year columns ({}–{})",
            output.year_columns.len(),
            first.label,
            last.label
        )),
        _ => log_warning("No year columns in header"),
    }

    if !output.skipped_rows.is_empty() {
        log_warning(format!(
            "{} rows skipped (too short to reach a year column)",
            output.skipped_rows.len()
        ));
        let sample: Vec<String> = output
            .skipped_rows
            .iter()
            .take(5)
            .map(|skip| skip.row.to_string())
            .collect();
        let more = if output.skipped_rows.len() > 5 {
            format!("... +{}", output.skipped_rows.len() - 5)
        } else {
            String::new()
        };
        log_info_indent(format!("rows: {}{}", sample.join(", "), more), 1);
    }

    log_success(output.summary());

    let csv_info = CsvInfo {
        encoding: parse_result.encoding,
        delimiter: parse_result.delimiter,
        row_count: rows.len(),
        header_row,
        year_columns: output.year_columns.iter().map(|c| c.label.clone()).collect(),
    };

    Ok(PipelineOutput {
        table: LongTable::new(options.value_column.clone(), output.records),
        csv_info,
        skipped_rows: output.skipped_rows,
        dropped_cells: output.dropped_cells,
    })
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}
