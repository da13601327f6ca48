use super::{ColumnReader, FormatOptions};
use arrow::csv::reader::Format;
use common::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Column names of CSV and other delimited text files, as arrow infers them.
pub struct DelimitedColumnReader;

impl ColumnReader for DelimitedColumnReader {
    fn read_columns(&self, path: &Path, options: &FormatOptions) -> Result<Vec<String>> {
        let file = BufReader::new(File::open(path)?);
        let format = Format::default()
            .with_header(options.has_header)
            .with_delimiter(options.delimiter);

        // Only the header matters; one data row is enough for arrow to size the record.
        let (schema, _) = format.infer_schema(file, Some(1))?;

        Ok(schema.fields().iter().map(|f| f.name().clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_header() {
        let file = write_file("id,name,amount\n1,alice,3.5\n2,bob,4\n");
        let columns = DelimitedColumnReader
            .read_columns(file.path(), &FormatOptions::default())
            .unwrap();
        assert_eq!(columns, vec!["id", "name", "amount"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let file = write_file("id;name\n1;alice\n");
        let options = FormatOptions {
            delimiter: b';',
            ..FormatOptions::default()
        };
        let columns = DelimitedColumnReader.read_columns(file.path(), &options).unwrap();
        assert_eq!(columns, vec!["id", "name"]);
    }

    #[test]
    fn test_headerless_file_gets_generated_names() {
        let file = write_file("1,alice\n2,bob\n");
        let options = FormatOptions {
            has_header: false,
            ..FormatOptions::default()
        };
        let columns = DelimitedColumnReader.read_columns(file.path(), &options).unwrap();
        assert_eq!(columns, vec!["column_1", "column_2"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DelimitedColumnReader
            .read_columns(Path::new("/nonexistent/file.csv"), &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(err, common::Error::Io(_)));
    }
}
