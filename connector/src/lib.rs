pub mod clock;
pub mod import;
pub mod logging;
pub mod macros;
pub mod pattern;
pub mod readers;
pub mod schema;
pub mod storage;

use clock::SystemClock;
use common::config::Settings;
use common::{Error, Result};
use import::{FileImporter, ImportPlan, ImportRequest};
use std::sync::Arc;
use storage::FileStore;
use tracing::{error, info};

/// Plans every configured import, or only the one called `only` when given.
pub async fn run_file_import(settings: &Settings, only: Option<&str>) -> Result<Vec<ImportPlan>> {
    let store = Arc::new(FileStore::from_config(&settings.store)?);
    let clock = Arc::new(SystemClock::new(settings.clock.utc_offset_hours)?);
    let importer = FileImporter::new(store, clock);

    let selected: Vec<_> = settings
        .imports
        .iter()
        .filter(|config| only.is_none_or(|name| config.name == name))
        .collect();

    if selected.is_empty() {
        return Err(Error::InvalidInput(match only {
            Some(name) => format!("No import named '{}' in configuration", name),
            None => "No imports configured".to_string(),
        }));
    }

    let mut plans = Vec::with_capacity(selected.len());
    for config in selected {
        let request = ImportRequest::try_from(config)?;
        info!(name = %request.name, pattern = %request.pattern, "Planning import");

        match importer.plan(&request).await {
            Ok(plan) => plans.push(plan),
            Err(e) => {
                error!(name = %request.name, error = %e, "Import failed");
                return Err(e);
            }
        }
    }

    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ClockConfig, ImportConfig, LoggingConfig, StoreConfig, StoreKind};

    fn settings(root: &std::path::Path, imports: Vec<ImportConfig>) -> Settings {
        Settings {
            store: StoreConfig {
                kind: StoreKind::Local,
                root: root.to_str().unwrap().to_string(),
                s3: None,
            },
            clock: ClockConfig::default(),
            logging: LoggingConfig::default(),
            imports,
        }
    }

    fn import(name: &str, pattern: &str) -> ImportConfig {
        ImportConfig {
            name: name.to_string(),
            pattern: pattern.to_string(),
            file_type: "csv".to_string(),
            delimiter: None,
            has_header: true,
            sheet_name: None,
        }
    }

    #[tokio::test]
    async fn test_runs_selected_import_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("customers.csv"), "id,email\n1,a@b.c\n").unwrap();

        let settings = settings(
            dir.path(),
            vec![
                import("customers", "customers.csv"),
                import("orders", "orders_{{ * }}.csv"),
            ],
        );

        let plans = run_file_import(&settings, Some("customers")).await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].files, vec!["customers.csv"]);
        assert_eq!(plans[0].columns, vec!["id", "email"]);

        // "orders" has no files, so running everything fails.
        assert!(matches!(
            run_file_import(&settings, None).await,
            Err(Error::NoMatchingFiles(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_import_name() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), vec![import("customers", "customers.csv")]);
        assert!(matches!(
            run_file_import(&settings, Some("missing")).await,
            Err(Error::InvalidInput(_))
        ));
    }
}
