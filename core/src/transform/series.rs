//! Numeric series for a single entity, ready for charting.

use crate::models::Record;

/// `(year, value)` points for `entity`, in record order.
///
/// Records whose year or value does not parse as a number are left out.
pub fn entity_series(records: &[Record], entity: &str) -> Vec<(u16, f64)> {
    records
        .iter()
        .filter(|record| record.entity == entity)
        .filter_map(|record| Some((record.year_number()?, record.numeric_value()?)))
        .collect()
}

/// The most recent point of an entity's series.
pub fn latest_point(records: &[Record], entity: &str) -> Option<(u16, f64)> {
    entity_series(records, entity)
        .into_iter()
        .max_by_key(|(year, _)| *year)
}
