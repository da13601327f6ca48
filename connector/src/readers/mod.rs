pub mod columnar;
pub mod delimited;
pub mod records;
pub mod spreadsheet;

use common::config::ImportConfig;
use common::{Error, Result};
use std::path::Path;
use std::str::FromStr;

pub use columnar::ParquetColumnReader;
pub use delimited::DelimitedColumnReader;
pub use records::JsonColumnReader;
pub use spreadsheet::ExcelColumnReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Csv,
    Plaintext,
    Excel,
    Parquet,
    Json,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Plaintext => "plaintext",
            FileType::Excel => "excel",
            FileType::Parquet => "parquet",
            FileType::Json => "json",
        }
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(FileType::Csv),
            "plaintext" => Ok(FileType::Plaintext),
            "excel" => Ok(FileType::Excel),
            "parquet" => Ok(FileType::Parquet),
            "json" => Ok(FileType::Json),
            _ => Err(Error::UnsupportedFileType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub delimiter: u8,
    pub has_header: bool,
    /// Spreadsheet sheet to read. The first sheet of each file when unset.
    pub sheet_name: Option<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            sheet_name: None,
        }
    }
}

impl TryFrom<&ImportConfig> for FormatOptions {
    type Error = Error;

    fn try_from(config: &ImportConfig) -> Result<Self> {
        let delimiter = match config.delimiter {
            Some(c) if c.is_ascii() => c as u8,
            Some(c) => {
                return Err(Error::InvalidInput(format!(
                    "Delimiter must be an ASCII character: {:?}",
                    c
                )));
            }
            None => b',',
        };

        Ok(Self {
            delimiter,
            has_header: config.has_header,
            sheet_name: config.sheet_name.clone(),
        })
    }
}

/// Produces the ordered column names of one file of a given format.
pub trait ColumnReader: Send + Sync {
    fn read_columns(&self, path: &Path, options: &FormatOptions) -> Result<Vec<String>>;

    /// Sheet names for workbook formats, `None` for everything else.
    fn sheet_names(&self, _path: &Path) -> Result<Option<Vec<String>>> {
        Ok(None)
    }
}

pub fn reader_for(file_type: FileType) -> Box<dyn ColumnReader> {
    match file_type {
        FileType::Csv | FileType::Plaintext => Box::new(DelimitedColumnReader),
        FileType::Excel => Box::new(ExcelColumnReader),
        FileType::Parquet => Box::new(ParquetColumnReader),
        FileType::Json => Box::new(JsonColumnReader),
    }
}
