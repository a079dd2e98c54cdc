//! JSON serialization and deserialization utilities.
//!
//! Provides generic functions for reading and writing whole JSON documents.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Error;

/// Reads a whole file and deserializes it into type T. Failing to read the
/// file is an [`Error::Io`]; failing to parse it is an [`Error::Json`].
pub fn read_json<T, P>(path: P) -> Result<T, Error>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Writes a value as pretty-printed JSON with 4-space indentation,
/// truncating whatever the file held before.
pub fn write_json<T, P>(path: P, value: &T) -> Result<(), Error>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut ser)?;
    writer.flush()?;
    Ok(())
}
