use crate::readers::{ColumnReader, FormatOptions};
use common::{Error, Result};
use std::collections::HashSet;
use std::path::PathBuf;

/// Checks that every file matched by `pattern` has the first file's columns, in order.
///
/// Files are read one at a time and reading stops at the first mismatch. Returns the
/// shared column list, empty when `paths` is empty.
pub fn validate_schema_consistency(
    reader: &dyn ColumnReader,
    paths: &[PathBuf],
    options: &FormatOptions,
    pattern: &str,
) -> Result<Vec<String>> {
    let mut base_schema: Option<Vec<String>> = None;

    for path in paths {
        let schema = reader.read_columns(path, options)?;
        match &base_schema {
            None => base_schema = Some(schema),
            Some(base) if *base != schema => {
                return Err(Error::SchemaMismatch {
                    pattern: pattern.to_string(),
                    path: path.display().to_string(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(base_schema.unwrap_or_default())
}

/// Checks that each workbook shares at least one sheet name with the one before it.
///
/// Only neighbouring files are compared: `[{A,B}, {B,C}, {C,D}]` passes even though no
/// sheet is common to all three.
pub fn validate_sheet_consistency<S: AsRef<str>>(
    sheets_per_file: &[Vec<S>],
    pattern: &str,
) -> Result<()> {
    for pair in sheets_per_file.windows(2) {
        let previous: HashSet<&str> = pair[0].iter().map(AsRef::as_ref).collect();
        if !pair[1].iter().any(|sheet| previous.contains(sheet.as_ref())) {
            return Err(Error::SheetMismatch(pattern.to_string()));
        }
    }
    Ok(())
}
