use config::{Config, ConfigError};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub store: StoreConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub imports: Vec<ImportConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Local,
    S3,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub kind: StoreKind,
    #[serde(default = "default_store_root")]
    pub root: String,
    pub s3: Option<S3Config>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    #[serde(default = "default_s3_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_s3_region")]
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClockConfig {
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// One configured file import: a filename pattern plus how to read the files it matches.
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    pub name: String,
    pub pattern: String,
    pub file_type: String,
    pub delimiter: Option<char>,
    #[serde(default = "default_has_header")]
    pub has_header: bool,
    pub sheet_name: Option<String>,
}

fn default_store_root() -> String {
    ".".to_string()
}

fn default_s3_endpoint() -> String {
    "http://localhost:9000".to_string()
}

fn default_s3_region() -> String {
    "us-east-1".to_string()
}

fn default_utc_offset_hours() -> i32 {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_has_header() -> bool {
    true
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let config = builder.build()?;

        let settings: Settings = config.try_deserialize()?;

        debug!(
            store = ?settings.store.kind,
            imports = settings.imports.len(),
            "Loaded connector settings"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_applied() {
        let file = write_config(
            r#"
[store]
kind = "local"
"#,
        );

        let settings = Settings::new(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.store.kind, StoreKind::Local);
        assert_eq!(settings.store.root, ".");
        assert!(settings.store.s3.is_none());
        assert_eq!(settings.clock.utc_offset_hours, 7);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.imports.is_empty());
    }

    #[test]
    fn test_imports_and_s3_parsed() {
        let file = write_config(
            r#"
[store]
kind = "s3"

[store.s3]
bucket = "landing"
access_key = "minio"
secret_key = "minio123"

[[imports]]
name = "monthly"
pattern = "reports/{{ YYYY }}_{{ MM }}_report.csv"
file_type = "csv"
delimiter = ";"

[[imports]]
name = "books"
pattern = "books/{{ * }}.xlsx"
file_type = "excel"
has_header = false
sheet_name = "Summary"
"#,
        );

        let settings = Settings::new(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.store.kind, StoreKind::S3);
        let s3 = settings.store.s3.unwrap();
        assert_eq!(s3.bucket, "landing");
        assert_eq!(s3.endpoint, "http://localhost:9000");
        assert_eq!(s3.region, "us-east-1");

        assert_eq!(settings.imports.len(), 2);
        assert_eq!(settings.imports[0].delimiter, Some(';'));
        assert!(settings.imports[0].has_header);
        assert!(!settings.imports[1].has_header);
        assert_eq!(settings.imports[1].sheet_name.as_deref(), Some("Summary"));
    }
}
