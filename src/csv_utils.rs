//! CSV utilities.
//!
//! The session uses CSV twice: command lines are split like space-delimited
//! CSV records (so quoted names may contain spaces), and account listings are
//! written as comma-delimited CSV.

use serde::Serialize;
use std::io::Write;

/// Splits one command line into its fields. Fields are separated by spaces;
/// double quotes group words into one field. Runs of spaces do not produce
/// empty fields.
pub fn split_fields(line: &str) -> csv::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Ok(Vec::new());
    }
    Ok(record
        .iter()
        .filter(|field| !field.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Writes an iterator of records to a CSV writer.
/// Each record must implement Serialize.
pub fn write_csv<T, W>(writer: W, records: impl Iterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
