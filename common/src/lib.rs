use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;
use url::ParseError;

pub mod config;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid format filename: {}", .0.join(", "))]
    InvalidPattern(Vec<String>),

    #[error(
        "All the files with the format '{pattern}' must have identical columns in the same order (mismatch in '{path}')"
    )]
    SchemaMismatch { pattern: String, path: String },

    #[error("All the excel files with the format '{0}' must have the same sheet name")]
    SheetMismatch(String),

    #[error("No files found matching the format '{0}'")]
    NoMatchingFiles(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid Uri: {0}")]
    InvalidUri(String),
}

impl From<object_store::Error> for Error {
    fn from(err: object_store::Error) -> Self {
        Error::Storage(format!("Object store error: {}", err))
    }
}

impl From<object_store::path::Error> for Error {
    fn from(err: object_store::path::Error) -> Self {
        Error::Storage(format!("Object path error: {}", err))
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::InvalidUri(format!("URL parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_lists_every_token() {
        let err = Error::InvalidPattern(vec!["{{ foo }}".to_string(), "{{ bar }}".to_string()]);
        assert_eq!(err.to_string(), "Invalid format filename: {{ foo }}, {{ bar }}");
    }

    #[test]
    fn test_validation_errors_name_the_pattern() {
        let schema = Error::SchemaMismatch {
            pattern: "sales_{{ * }}.csv".to_string(),
            path: "sales_3.csv".to_string(),
        };
        assert!(schema.to_string().contains("'sales_{{ * }}.csv'"));
        assert!(schema.to_string().contains("sales_3.csv"));

        let sheet = Error::SheetMismatch("book_{{ * }}.xlsx".to_string());
        assert!(sheet.to_string().contains("'book_{{ * }}.xlsx'"));
    }

    #[test]
    fn test_url_parse_error_maps_to_invalid_uri() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::InvalidUri(_)));
    }
}
