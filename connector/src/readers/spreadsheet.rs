use super::{ColumnReader, FormatOptions};
use calamine::{Reader, open_workbook_auto};
use common::{Error, Result};
use std::path::Path;

/// Header row of an Excel/ODS sheet.
pub struct ExcelColumnReader;

fn spreadsheet_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Spreadsheet(format!("{}: {}", path.display(), err))
}

impl ColumnReader for ExcelColumnReader {
    fn read_columns(&self, path: &Path, options: &FormatOptions) -> Result<Vec<String>> {
        let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(path, e))?;

        let sheet = match &options.sheet_name {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| spreadsheet_error(path, "workbook has no sheets"))?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| spreadsheet_error(path, e))?;

        let Some(first_row) = range.rows().next() else {
            return Ok(Vec::new());
        };

        if options.has_header {
            Ok(first_row.iter().map(|cell| cell.to_string()).collect())
        } else {
            Ok((0..first_row.len()).map(|i| i.to_string()).collect())
        }
    }

    fn sheet_names(&self, path: &Path) -> Result<Option<Vec<String>>> {
        let workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(path, e))?;
        Ok(Some(workbook.sheet_names()))
    }
}
