use std::sync::Arc;

use rocket::serde::json::serde_json::Value;

use crate::files::{FileRecord, Visibility};
use crate::identity::Identity;
use crate::remote::{Document, DocumentCollection};

pub const COLLECTION_FILES: &str = "files";

pub mod fields {
    pub const FILE_NAME: &str = "fileName";
    pub const DOWNLOAD_URL: &str = "downloadUrl";
    pub const VISIBILITY: &str = "visibility";
    pub const OWNER_UID: &str = "ownerUid";
    pub const OWNER_NAME: &str = "ownerName";
    pub const TIMESTAMP: &str = "timestamp";
}

/// Builds the single list of files a viewer is allowed to see: every public file, plus the
/// viewer's own private files.
pub struct FileListing {
    collection: Arc<dyn DocumentCollection>,
}

impl FileListing {
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    /// Lists every file visible to `viewer`, sorted by name.
    ///
    /// Public files come first, then the viewer's private files, before the (stable) sort. The two
    /// sets are never checked against each other for duplicates; their filters can't overlap.
    /// A failing query only loses its own half of the list. No viewer means no files.
    pub async fn load_files(&self, viewer: Option<&Identity>) -> Vec<FileRecord> {
        let Some(viewer) = viewer else {
            log::debug!("No current identity, not loading files");
            return Vec::new();
        };
        let mut files = self.public_files(viewer).await;
        files.extend(self.private_files(viewer).await);
        files.sort_by(|a, b| a.name.cmp(&b.name));
        files
    }

    /// a single file, if `viewer` is allowed to see it
    pub async fn get_file(&self, viewer: Option<&Identity>, id: &str) -> Option<FileRecord> {
        let document = match self.collection.get(COLLECTION_FILES, id).await {
            Ok(document) => document?,
            Err(e) => {
                log::warn!("Failed to read file {id}: {e}");
                return None;
            }
        };
        let viewer_uid = viewer.map(|v| v.uid.as_str());
        let is_owner = viewer_uid.is_some() && document.get_string(fields::OWNER_UID) == viewer_uid;
        match document.get_string(fields::VISIBILITY) {
            Some("PUBLIC") => parse_file_document(&document, Visibility::Public, is_owner),
            Some("PRIVATE") if is_owner => parse_file_document(&document, Visibility::Private, true),
            _ => None,
        }
    }

    async fn public_files(&self, viewer: &Identity) -> Vec<FileRecord> {
        let filters = [(fields::VISIBILITY, Value::from(Visibility::Public.as_str()))];
        match self.collection.where_equal_to(COLLECTION_FILES, &filters).await {
            Ok(documents) => documents
                .iter()
                .filter_map(|doc| {
                    let is_owner = doc.get_string(fields::OWNER_UID) == Some(viewer.uid.as_str());
                    parse_file_document(doc, Visibility::Public, is_owner)
                })
                .collect(),
            Err(e) => {
                log::warn!("Failed to load public files, continuing without them: {e}");
                Vec::new()
            }
        }
    }

    async fn private_files(&self, viewer: &Identity) -> Vec<FileRecord> {
        let filters = [
            (fields::OWNER_UID, Value::from(viewer.uid.as_str())),
            (fields::VISIBILITY, Value::from(Visibility::Private.as_str())),
        ];
        match self.collection.where_equal_to(COLLECTION_FILES, &filters).await {
            Ok(documents) => documents
                .iter()
                // the owner filter already guarantees ownership
                .filter_map(|doc| parse_file_document(doc, Visibility::Private, true))
                .collect(),
            Err(e) => {
                log::warn!("Failed to load private files for {}, continuing without them: {e}", viewer.uid);
                Vec::new()
            }
        }
    }
}

/// maps a raw file record, tagging it with the visibility of the query it came from.
/// Records without a download url are half-written uploads and get dropped
pub fn parse_file_document(
    document: &Document,
    visibility: Visibility,
    is_owned_by_viewer: bool,
) -> Option<FileRecord> {
    let text = |field: &str| document.get_string(field).unwrap_or_default().to_string();
    let download_url = text(fields::DOWNLOAD_URL);
    if download_url.is_empty() {
        log::debug!("Dropping file {}, it has no download url", document.id);
        return None;
    }
    Some(FileRecord {
        id: document.id.clone(),
        name: text(fields::FILE_NAME),
        download_url,
        visibility,
        owner_id: text(fields::OWNER_UID),
        owner_display_name: text(fields::OWNER_NAME),
        is_owned_by_viewer,
    })
}
