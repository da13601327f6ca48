use super::{ColumnReader, FormatOptions};
use common::Result;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

/// Top-level field names from a parquet footer. No row groups are read.
pub struct ParquetColumnReader;

impl ColumnReader for ParquetColumnReader {
    fn read_columns(&self, path: &Path, _options: &FormatOptions) -> Result<Vec<String>> {
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

        Ok(builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::sync::Arc;

    #[test]
    fn test_reads_schema_fields_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vendors.parquet");

        let batch = RecordBatch::try_from_iter(vec![
            ("code", Arc::new(StringArray::from(vec!["a1", "b2"])) as ArrayRef),
            ("rating", Arc::new(Int64Array::from(vec![4, 5])) as ArrayRef),
            ("city", Arc::new(StringArray::from(vec!["BKK", "HAN"])) as ArrayRef),
        ])
        .unwrap();

        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let columns = ParquetColumnReader
            .read_columns(&path, &FormatOptions::default())
            .unwrap();
        assert_eq!(columns, vec!["code", "rating", "city"]);
    }

    #[test]
    fn test_non_parquet_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.parquet");
        std::fs::write(&path, b"not parquet at all").unwrap();

        let err = ParquetColumnReader
            .read_columns(&path, &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(err, common::Error::Parquet(_)));
    }
}
