use crate::clock::Clock;
use crate::pattern::{filter_by_pattern, listing_prefix, resolve_macro};
use crate::readers::{ColumnReader, FileType, FormatOptions, reader_for};
use crate::schema::{validate_schema_consistency, validate_sheet_consistency};
use crate::storage::FileSource;
use common::config::ImportConfig;
use common::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub name: String,
    pub pattern: String,
    pub file_type: FileType,
    pub options: FormatOptions,
}

impl TryFrom<&ImportConfig> for ImportRequest {
    type Error = Error;

    fn try_from(config: &ImportConfig) -> Result<Self> {
        Ok(Self {
            name: config.name.clone(),
            pattern: config.pattern.clone(),
            file_type: config.file_type.parse()?,
            options: FormatOptions::try_from(config)?,
        })
    }
}

/// What an import would load: the matched files and the columns they share.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportPlan {
    pub name: String,
    pub pattern: String,
    pub resolved_pattern: String,
    pub file_type: &'static str,
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets: Option<Vec<Vec<String>>>,
    pub columns: Vec<String>,
}

pub struct FileImporter {
    source: Arc<dyn FileSource>,
    clock: Arc<dyn Clock>,
}

impl FileImporter {
    pub fn new(source: Arc<dyn FileSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    pub async fn plan(&self, request: &ImportRequest) -> Result<ImportPlan> {
        let resolved = resolve_macro(&request.pattern, self.clock.now())?;
        let prefix = listing_prefix(&resolved);
        debug!(name = %request.name, %resolved, prefix, "Resolved filename pattern");

        let candidates = self.source.list_files(prefix).await?;
        let files = filter_by_pattern(&candidates, &resolved)?;
        if files.is_empty() {
            return Err(Error::NoMatchingFiles(resolved));
        }

        let mut paths = Vec::with_capacity(files.len());
        let mut staged = Ok(());
        for key in &files {
            match self.source.local_path(key).await {
                Ok(path) => paths.push(path),
                Err(e) => {
                    staged = Err(e);
                    break;
                }
            }
        }

        // Staged copies are released whether or not validation passes.
        let reader = reader_for(request.file_type);
        let validated =
            staged.and_then(|()| Self::validate_files(reader.as_ref(), &paths, request));

        for key in &files {
            self.source.release(key).await?;
        }
        let (sheets, columns) = validated?;

        info!(
            name = %request.name,
            files = files.len(),
            columns = columns.len(),
            "Import plan ready"
        );

        Ok(ImportPlan {
            name: request.name.clone(),
            pattern: request.pattern.clone(),
            resolved_pattern: resolved,
            file_type: request.file_type.as_str(),
            files,
            sheets,
            columns,
        })
    }

    fn validate_files(
        reader: &dyn ColumnReader,
        paths: &[PathBuf],
        request: &ImportRequest,
    ) -> Result<(Option<Vec<Vec<String>>>, Vec<String>)> {
        let mut sheets = Vec::new();
        for path in paths {
            if let Some(names) = reader.sheet_names(path)? {
                sheets.push(names);
            }
        }
        let sheets = if sheets.is_empty() {
            None
        } else {
            validate_sheet_consistency(&sheets, &request.pattern)?;
            Some(sheets)
        };

        let columns =
            validate_schema_consistency(reader, paths, &request.options, &request.pattern)?;

        Ok((sheets, columns))
    }
}
