use async_trait::async_trait;
use common::config::{StoreConfig, StoreKind};
use common::{Error, Result};
use futures::TryStreamExt;
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, info};
use url::Url;

#[async_trait]
pub trait FileSource: Send + Sync {
    /// Every key under `prefix`, sorted.
    async fn list_files(&self, prefix: &str) -> Result<Vec<String>>;

    /// A local filesystem path holding the object's bytes.
    async fn local_path(&self, key: &str) -> Result<PathBuf>;

    /// Drops any local copy made by [`FileSource::local_path`] for `key`.
    async fn release(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

enum Backend {
    Local { root: PathBuf },
    Remote { bucket: String, staging: TempDir },
}

pub struct FileStore {
    store: Arc<dyn ObjectStore>,
    backend: Backend,
}

impl FileStore {
    pub fn local(root: &str) -> Result<Self> {
        let root = std::fs::canonicalize(root)?;
        let store = LocalFileSystem::new_with_prefix(&root)?;
        Ok(Self {
            store: Arc::new(store),
            backend: Backend::Local { root },
        })
    }

    pub fn s3(
        endpoint: &str,
        region: &str,
        bucket: &str,
        access_key: &str,
        secret_key: &str,
    ) -> Result<Self> {
        let endpoint_url = Url::parse(endpoint)?;

        let s3 = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_region(region)
            .with_access_key_id(access_key)
            .with_secret_access_key(secret_key)
            .with_endpoint(endpoint)
            .with_allow_http(endpoint_url.scheme() == "http")
            .build()?;

        Self::remote(Arc::new(s3), bucket)
    }

    /// Wraps a non-local store. Objects are copied into a private staging directory to be read.
    pub fn remote(store: Arc<dyn ObjectStore>, bucket: &str) -> Result<Self> {
        Ok(Self {
            store,
            backend: Backend::Remote {
                bucket: bucket.to_string(),
                staging: tempfile::tempdir()?,
            },
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        match config.kind {
            StoreKind::Local => Self::local(&config.root),
            StoreKind::S3 => {
                let s3 = config.s3.as_ref().ok_or_else(|| {
                    Error::InvalidInput("store.kind = \"s3\" requires a [store.s3] section".to_string())
                })?;
                Self::s3(&s3.endpoint, &s3.region, &s3.bucket, &s3.access_key, &s3.secret_key)
            }
        }
    }

    fn location(&self) -> String {
        match &self.backend {
            Backend::Local { root } => root.display().to_string(),
            Backend::Remote { bucket, .. } => format!("s3://{}", bucket),
        }
    }
}

#[async_trait]
impl FileSource for FileStore {
    async fn list_files(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = if prefix.is_empty() {
            None
        } else {
            Some(ObjectPath::parse(prefix)?)
        };

        let objects: Vec<_> = self.store.list(prefix.as_ref()).try_collect().await?;
        let mut files: Vec<String> = objects.into_iter().map(|o| o.location.to_string()).collect();
        files.sort();

        if files.is_empty() {
            info!(location = %self.location(), ?prefix, "No files found");
        } else {
            debug!(location = %self.location(), count = files.len(), "Listed files");
        }

        Ok(files)
    }

    async fn local_path(&self, key: &str) -> Result<PathBuf> {
        match &self.backend {
            Backend::Local { root } => Ok(root.join(key)),
            Backend::Remote { staging, .. } => {
                let target = staging.path().join(key);
                if let Some(parent) = target.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }

                let data = self.store.get(&ObjectPath::parse(key)?).await?.bytes().await?;
                tokio::fs::write(&target, &data).await?;
                debug!(key, bytes = data.len(), "Staged remote object");

                Ok(target)
            }
        }
    }

    async fn release(&self, key: &str) -> Result<()> {
        if let Backend::Remote { staging, .. } = &self.backend {
            match tokio::fs::remove_file(staging.path().join(key)).await {
                Ok(()) => debug!(key, "Released staged object"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
