//! Output for long tables.
//!
//! CSV is written with a `Country,Year,<value column>` header, comma
//! delimiters and `\n` line endings. JSON is an array of objects with the
//! same keys, with years and values as numbers where they parse, which is
//! how chart code wants to consume them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use serde_json::{json, Map, Value};

use crate::error::{CsvError, CsvResult};
use crate::models::{LongTable, ENTITY_LABEL, YEAR_LABEL};

/// Write `table` as CSV to any writer.
pub fn write_csv<W: Write>(writer: W, table: &LongTable) -> CsvResult<()> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(table.headers())?;
    for record in &table.records {
        wtr.write_record([&record.entity, &record.year, &record.value])?;
    }
    wtr.flush()?;

    Ok(())
}

/// Write `table` as CSV to a file, replacing it if it exists.
pub fn write_csv_file<P: AsRef<Path>>(path: P, table: &LongTable) -> CsvResult<()> {
    let file = File::create(path.as_ref())?;
    write_csv(BufWriter::new(file), table)
}

pub fn to_csv_string(table: &LongTable) -> CsvResult<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, table)?;
    String::from_utf8(buf).map_err(|e| CsvError::Encoding(e.to_string()))
}

/// Convert `table` to a JSON array of row objects.
pub fn to_json(table: &LongTable) -> Value {
    let rows = table
        .records
        .iter()
        .map(|record| {
            let year = match record.year_number() {
                Some(year) => json!(year),
                None => json!(record.year),
            };
            let value = record
                .numeric_value()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| json!(record.value));

            let mut obj = Map::new();
            obj.insert(ENTITY_LABEL.to_string(), json!(record.entity));
            obj.insert(YEAR_LABEL.to_string(), year);
            obj.insert(table.value_column.clone(), value);
            Value::Object(obj)
        })
        .collect();

    Value::Array(rows)
}

pub fn to_json_string(table: &LongTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_json(table))
}
