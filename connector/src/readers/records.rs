use super::{ColumnReader, FormatOptions};
use common::{Error, Result};
use serde_json::{Deserializer, Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Column names of JSON record files.
///
/// Accepts either one top-level array of objects or newline-delimited objects. The
/// columns are the union of all keys, in the order each key is first seen.
pub struct JsonColumnReader;

impl JsonColumnReader {
    fn collect_keys(columns: &mut Vec<String>, record: &Map<String, Value>) {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
}

impl ColumnReader for JsonColumnReader {
    fn read_columns(&self, path: &Path, _options: &FormatOptions) -> Result<Vec<String>> {
        let reader = BufReader::new(File::open(path)?);
        let mut columns = Vec::new();

        for value in Deserializer::from_reader(reader).into_iter::<Value>() {
            match value? {
                Value::Object(record) => Self::collect_keys(&mut columns, &record),
                Value::Array(records) => {
                    for record in records {
                        match record {
                            Value::Object(record) => Self::collect_keys(&mut columns, &record),
                            other => {
                                return Err(Error::InvalidInput(format!(
                                    "Expected JSON object record in {}, found {}",
                                    path.display(),
                                    other
                                )));
                            }
                        }
                    }
                }
                other => {
                    return Err(Error::InvalidInput(format!(
                        "Expected JSON records in {}, found {}",
                        path.display(),
                        other
                    )));
                }
            }
        }

        Ok(columns)
    }
}
