//! Long-to-wide pivot, the inverse of [`super::reshape`].
//!
//! Rebuilds a wide [`Table`] from records: one row per entity, one column
//! per year. Feeding the result back through the reshaper with default
//! options gives the same set of records back.

use std::collections::HashMap;

use crate::models::{Record, Table};

/// Pivot records into a wide table headed `[entity_label, years...]`.
///
/// Years and entities keep their first-seen order. Cells with no record
/// are empty; if an (entity, year) pair repeats, the last value wins.
pub fn pivot_wide(records: &[Record], entity_label: &str) -> Table {
    let mut years: Vec<&str> = Vec::new();
    let mut year_index: HashMap<&str, usize> = HashMap::new();
    let mut entities: Vec<&str> = Vec::new();
    let mut entity_index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        year_index.entry(record.year.as_str()).or_insert_with(|| {
            years.push(record.year.as_str());
            years.len() - 1
        });
        entity_index.entry(record.entity.as_str()).or_insert_with(|| {
            entities.push(record.entity.as_str());
            entities.len() - 1
        });
    }

    let mut grid = vec![vec![String::new(); years.len()]; entities.len()];
    for record in records {
        let row = entity_index[record.entity.as_str()];
        let col = year_index[record.year.as_str()];
        grid[row][col] = record.value.clone();
    }

    let mut header = Vec::with_capacity(years.len() + 1);
    header.push(entity_label.to_string());
    header.extend(years.iter().map(|year| year.to_string()));

    let mut rows = Vec::with_capacity(entities.len() + 1);
    rows.push(header);
    for (entity, cells) in entities.iter().zip(grid) {
        let mut row = Vec::with_capacity(cells.len() + 1);
        row.push(entity.to_string());
        row.extend(cells);
        rows.push(row);
    }

    Table::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::reshape::{reshape_rows, ReshapeOptions};

    #[test]
    fn test_pivot_fills_gaps() {
        let records = vec![
            Record::new("X", "2020", "1"),
            Record::new("Y", "2021", "2"),
            Record::new("X", "2021", "3"),
        ];
        let table = pivot_wide(&records, "Country");

        assert_eq!(
            table,
            Table::from_str_rows([
                vec!["Country", "2020", "2021"],
                vec!["X", "1", "3"],
                vec!["Y", "", "2"],
            ])
        );
    }

    #[test]
    fn test_duplicate_pair_last_wins() {
        let records = vec![Record::new("X", "2020", "1"), Record::new("X", "2020", "9")];
        let table = pivot_wide(&records, "Country");

        assert_eq!(table.rows[1], vec!["X", "9"]);
    }

    #[test]
    fn test_empty_records_gives_header_only() {
        let table = pivot_wide(&[], "Country");
        assert_eq!(table.rows, vec![vec!["Country".to_string()]]);
    }

    #[test]
    fn test_round_trip_through_reshaper() {
        let records = vec![
            Record::new("World", "1960", "52.6"),
            Record::new("World", "1961", "53.1"),
            Record::new("Aruba", "1961", "64.2"),
        ];
        let wide = pivot_wide(&records, "Country");
        let mut back = reshape_rows(&wide.rows, &ReshapeOptions::default()).unwrap();

        let mut expected = records.clone();
        back.sort();
        expected.sort();
        assert_eq!(back, expected);
    }
}
