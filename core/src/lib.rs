//! # Indicator Reshape - wide-to-long reshaping of indicator CSV exports
//!
//! World Bank style indicator files hold one row per country and one
//! column per year. This crate turns them into tidy
//! `Country, Year, <Value>` tables that charting code can consume directly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Reshape   │────▶│  Long CSV   │
//! │ (wide, WDI) │     │  (auto-enc) │     │ (wide→long) │     │   / JSON    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reshape::{reshape_file_to, PipelineOptions, ReshapeOptions};
//!
//! let options = PipelineOptions {
//!     reshape: ReshapeOptions::world_bank(),
//!     value_column: "InternetPenetration".into(),
//!     ..Default::default()
//! };
//! let output = reshape_file_to(
//!     "API_IT.NET.USER.ZS_DS2_en_csv_v2.csv".as_ref(),
//!     "country_internet.csv".as_ref(),
//!     &options,
//! )?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per layer
//! - [`models`] - Table, Record, LongTable
//! - [`parser`] - CSV reading with encoding/delimiter detection
//! - [`transform`] - Reshape, pivot, series, and pipeline
//! - [`writer`] - CSV and JSON output
//! - [`logs`] - Pipeline log stream

// Core modules
pub mod error;
pub mod models;

// Input / output
pub mod parser;
pub mod writer;

// Transformation
pub mod transform;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError,
    ReshapeError,
    PipelineError,
    CsvResult,
    ReshapeResult,
    PipelineResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Table,
    Record,
    LongTable,
    ENTITY_LABEL,
    YEAR_LABEL,
    DEFAULT_VALUE_LABEL,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    parse_table,
    parse_bytes,
    parse_bytes_auto,
    parse_file_auto,
    detect_encoding,
    detect_delimiter,
    decode_content,
    ParseResult,
};

// =============================================================================
// Re-exports - Reshape
// =============================================================================

pub use transform::reshape::{
    WideToLongReshaper,
    ReshapeOptions,
    ReshapeOutput,
    YearColumn,
    SkippedRow,
    reshape_rows,
    is_year_label,
    detect_year_columns,
    detect_metadata_rows,
};

pub use transform::pivot::pivot_wide;
pub use transform::series::{entity_series, latest_point};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use writer::{
    write_csv,
    write_csv_file,
    to_csv_string,
    to_json,
    to_json_string,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    reshape_file,
    reshape_file_to,
    reshape_bytes,
    reshape_parsed,
    PipelineOptions,
    PipelineOutput,
    CsvInfo,
};

pub mod pipeline {
    pub use crate::transform::pipeline::*;
}
