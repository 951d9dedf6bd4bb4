use std::backtrace::Backtrace;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::files::listing::{fields, COLLECTION_FILES};
use crate::files::{FileRecord, Visibility};
use crate::identity::Identity;
use crate::model::error::file_errors::UploadError;
use crate::remote::{BlobStorage, DocumentCollection, Fields};

//language=RegExp
static RESERVED_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(CON|PRN|AUX|NUL|COM[1-9]|LPT[1-9])(\\..*)?$").unwrap());
//language=RegExp
static BANNED_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("[/\\\\<>|:&;#?*%\"]").unwrap());

/// Stores uploaded bytes in blob storage and records them in the file collection, which is where
/// [`crate::files::FileListing`] picks them up.
pub struct FileUploader {
    collection: Arc<dyn DocumentCollection>,
    blobs: Arc<dyn BlobStorage>,
}

impl FileUploader {
    pub fn new(collection: Arc<dyn DocumentCollection>, blobs: Arc<dyn BlobStorage>) -> Self {
        Self { collection, blobs }
    }

    /// Uploads `bytes` as `file_name` for `owner`, returning the file as its owner would see it.
    /// The record keeps the name as given (trimmed); only the storage path uses the sanitized one.
    ///
    /// # Errors
    /// - [`UploadError::InvalidFileName`] if nothing usable is left of the name once sanitized
    /// - [`UploadError::Storage`] if the bytes can't be stored or their url can't be resolved
    /// - [`UploadError::Record`] if the file record can't be written. The stored bytes are left behind
    pub async fn upload(
        &self,
        owner: &Identity,
        file_name: &str,
        bytes: Vec<u8>,
        visibility: Visibility,
    ) -> Result<FileRecord, UploadError> {
        let name = file_name.trim().to_string();
        let Some(safe_name) = sanitize_file_name(&name) else {
            return Err(UploadError::InvalidFileName(file_name.to_string()));
        };
        let path = storage_path(&owner.uid, &safe_name);
        self.blobs.put(&path, bytes).await.map_err(|e| {
            log::error!(
                "Failed to write {path} to blob storage: {e:?}\n{}",
                Backtrace::force_capture()
            );
            UploadError::Storage(e)
        })?;
        let download_url = self
            .blobs
            .download_url(&path)
            .await
            .map_err(UploadError::Storage)?;

        let mut record = Fields::new();
        record.insert(fields::FILE_NAME.into(), name.clone().into());
        record.insert(fields::DOWNLOAD_URL.into(), download_url.clone().into());
        record.insert(fields::VISIBILITY.into(), visibility.as_str().into());
        record.insert(fields::OWNER_UID.into(), owner.uid.clone().into());
        record.insert(fields::OWNER_NAME.into(), owner.display_name.clone().into());
        record.insert(
            fields::TIMESTAMP.into(),
            chrono::Utc::now().timestamp_millis().into(),
        );
        let id = self
            .collection
            .add(COLLECTION_FILES, record)
            .await
            .map_err(|e| {
                log::error!(
                    "Failed to create file record for {path}: {e:?}\n{}",
                    Backtrace::force_capture()
                );
                UploadError::Record(e)
            })?;
        log::info!("Uploaded {name} as {id} for {}", owner.uid);
        Ok(FileRecord {
            id,
            name,
            download_url,
            visibility,
            owner_id: owner.uid.clone(),
            owner_display_name: owner.display_name.clone(),
            is_owned_by_viewer: true,
        })
    }
}

/// `uploads/{owner}/{random}_{name}`, so two uploads of the same name never collide
pub fn storage_path(owner_uid: &str, file_name: &str) -> String {
    format!(
        "uploads/{owner_uid}/{}_{file_name}",
        uuid::Uuid::new_v4().simple()
    )
}

/// strips anything from `name` that can't safely be a single path segment or url component.
/// Only used for storage paths. Returns `None` if the whole name is unsafe
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.starts_with("..") || RESERVED_NAME_REGEX.is_match(&trimmed.to_uppercase()) {
        return None;
    }
    let replaced = BANNED_CHARS_REGEX.replace_all(trimmed, "");
    let replaced: String = replaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if replaced.is_empty() || replaced.chars().all(|c| c == '.') {
        None
    } else {
        Some(replaced)
    }
}

/// name used when the upload didn't come with one
pub fn fallback_file_name() -> String {
    format!("file_{}", chrono::Utc::now().timestamp_millis())
}
