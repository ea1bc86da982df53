//! Transformation module.
//!
//! - Reshape: wide indicator table to long records
//! - Pivot: long records back to a wide table
//! - Series: per-entity numeric series
//! - Pipeline: read, reshape, write

pub mod pipeline;
pub mod pivot;
pub mod reshape;
pub mod series;

pub use pipeline::*;
pub use pivot::pivot_wide;
pub use reshape::*;
pub use series::{entity_series, latest_point};
