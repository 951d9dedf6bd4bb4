//! The remote collaborators the resolution pipelines talk to. Nothing in here knows about tiles or
//! files, it only moves schemaless documents and blobs around.

use async_trait::async_trait;
use rocket::serde::json::serde_json::{Map, Value};

use crate::model::error::remote_errors::{FieldTypeError, RemoteError};

pub mod disk_blobs;
pub mod sqlite_collection;

pub use disk_blobs::DiskBlobStorage;
pub use sqlite_collection::SqliteCollection;

/// the raw field map of a document, in the store's native (json) format
pub type Fields = Map<String, Value>;

/// a single schemaless record in a remote collection
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// source-assigned and stable across reads
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// returns the field as a string, or `None` if it's missing or not a string
    pub fn get_string(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Strict version of [`Document::get_string`]. Missing and `null` fields are `Ok(None)`,
    /// anything that isn't a string is an error
    pub fn read_string(&self, field: &str) -> Result<Option<&str>, FieldTypeError> {
        self.read_typed(field, "string", Value::as_str)
    }

    /// the field as an integer. Fractional numbers are truncated
    pub fn read_long(&self, field: &str) -> Result<Option<i64>, FieldTypeError> {
        self.read_typed(field, "number", |value| {
            value.as_i64().or_else(|| value.as_f64().map(|n| n as i64))
        })
    }

    pub fn read_bool(&self, field: &str) -> Result<Option<bool>, FieldTypeError> {
        self.read_typed(field, "boolean", Value::as_bool)
    }

    fn read_typed<'a, T>(
        &'a self,
        field: &str,
        expected: &'static str,
        read: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, FieldTypeError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => read(value).map(Some).ok_or_else(|| FieldTypeError {
                field: field.to_string(),
                expected,
            }),
        }
    }
}

/// A server-hosted collection of schemaless documents, queryable by field ordering and equality.
///
/// Every method is a suspension point; implementations decide their own timeouts.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// every document in `collection`, ascending by `field`. Documents missing the field sort first
    async fn order_by(&self, collection: &str, field: &str) -> Result<Vec<Document>, RemoteError>;

    /// every document in `collection` whose fields equal all of `filters`
    async fn where_equal_to(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
    ) -> Result<Vec<Document>, RemoteError>;

    /// a single document, `Ok(None)` if it doesn't exist
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, RemoteError>;

    /// writes all `documents` (overwriting any with the same id) or none of them
    async fn commit_batch(&self, collection: &str, documents: Vec<Document>)
        -> Result<(), RemoteError>;

    /// stores `fields` under a freshly generated id and returns that id
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, RemoteError>;
}

/// path-addressed binary object storage that hands out fetchable urls
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// a publicly fetchable url for the blob at `path`, or an error if it can't be resolved
    async fn download_url(&self, path: &str) -> Result<String, RemoteError>;

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<(), RemoteError>;

    async fn read(&self, path: &str) -> Result<Vec<u8>, RemoteError>;
}
