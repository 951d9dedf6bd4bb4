use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use rocket::tokio::fs;

use crate::model::error::remote_errors::RemoteError;
use crate::remote::BlobStorage;

/// [`BlobStorage`] that keeps every blob as a plain file under `root`.
/// Download urls are `public_base_url` joined with the blob's path, and are served back by the blob handler
pub struct DiskBlobStorage {
    root: PathBuf,
    public_base_url: String,
}

impl DiskBlobStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// resolves `path` under the storage root. Absolute paths and anything containing `..` are rejected
    fn local_path(&self, path: &str) -> Result<PathBuf, RemoteError> {
        let relative = Path::new(path);
        let is_plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if path.trim().is_empty() || !is_plain {
            return Err(RemoteError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStorage for DiskBlobStorage {
    async fn download_url(&self, path: &str) -> Result<String, RemoteError> {
        let local = self.local_path(path)?;
        match fs::metadata(&local).await {
            Ok(meta) if meta.is_file() => Ok(format!("{}/{path}", self.public_base_url)),
            _ => Err(RemoteError::NotFound(path.to_string())),
        }
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<(), RemoteError> {
        let local = self.local_path(path)?;
        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&local, bytes).await?;
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, RemoteError> {
        let local = self.local_path(path)?;
        match fs::read(&local).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(RemoteError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
