use std::collections::HashMap;
use std::fs::{remove_dir_all, remove_file};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rocket::local::blocking::Client;
use rocket::serde::json::serde_json::Value;

use crate::config::TileConfig;
use crate::identity::SqliteIdentityProvider;
use crate::model::error::remote_errors::RemoteError;
use crate::remote::{BlobStorage, Document, DocumentCollection, Fields};
use crate::repository::initialize_db;
use crate::service::Services;


/// ada:secret1
pub static AUTH: &str = "Basic YWRhOnNlY3JldDE=";
/// bob:secret2
pub static OTHER_AUTH: &str = "Basic Ym9iOnNlY3JldDI=";

pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread
        .name()
        .unwrap_or("unnamed")
        .replace("::", "_")
}

/// a database file only the current test uses
pub fn test_db_location() -> String {
    format!("./{}.sqlite", current_thread_name())
}

/// a blob directory only the current test uses
pub fn test_blob_dir() -> String {
    format!("./{}_blobs", current_thread_name())
}

/// wipes this test's database and creates it fresh, returning its location
pub fn refresh_db() -> String {
    let location = test_db_location();
    remove_file(Path::new(&location)).unwrap_or(());
    initialize_db(&location).unwrap();
    location
}

pub fn cleanup() {
    remove_file(Path::new(&test_db_location())).unwrap_or(());
    remove_dir_all(Path::new(&test_blob_dir())).unwrap_or(());
}

/// unwraps a `json!` object into its field map
pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("{other} is not a json object"),
    }
}

pub fn tile_config() -> TileConfig {
    TileConfig {
        max_visible: 6,
        placeholder_base_url: "https://picsum.photos".to_string(),
        seed_retry_delay_millis: 0,
    }
}

/// services over in-memory fakes, with identities in this test's own database
pub fn test_services(collection: Arc<MemoryCollection>, blobs: Arc<MemoryBlobStorage>) -> Services {
    let location = refresh_db();
    Services::new(
        collection,
        blobs,
        Arc::new(SqliteIdentityProvider::new(location)),
        &tile_config(),
    )
}

pub fn client(collection: Arc<MemoryCollection>, blobs: Arc<MemoryBlobStorage>) -> Client {
    Client::tracked(crate::build_rocket(test_services(collection, blobs))).unwrap()
}

// ---------------------------- fakes

/// a [`DocumentCollection`] kept in memory, in insertion order. Can be told to fail
#[derive(Default)]
pub struct MemoryCollection {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    fail_queries: AtomicBool,
    fail_writes: AtomicBool,
    /// a `where_equal_to` whose filters include this pair fails
    fail_filter: Mutex<Option<(String, Value)>>,
    pub order_by_calls: AtomicUsize,
    pub batch_commits: AtomicUsize,
}

impl MemoryCollection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_documents(collection: &str, documents: Vec<Document>) -> Arc<Self> {
        let store = Self::default();
        store
            .collections
            .lock()
            .unwrap()
            .insert(collection.to_string(), documents);
        Arc::new(store)
    }

    pub fn insert(&self, collection: &str, document: Document) {
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_filter(&self, field: &str, value: Value) {
        *self.fail_filter.lock().unwrap() = Some((field.to_string(), value));
    }

    fn check_queries(&self) -> Result<(), RemoteError> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("queries are failing".to_string()));
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<(), RemoteError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("writes are failing".to_string()));
        }
        Ok(())
    }
}

/// numbers sort before strings, missing values before everything
fn sort_key(value: Option<&Value>) -> (u8, f64, String) {
    match value {
        None | Some(Value::Null) => (0, 0.0, String::new()),
        Some(Value::Number(n)) => (1, n.as_f64().unwrap_or_default(), String::new()),
        Some(other) => (2, 0.0, other.to_string()),
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn order_by(&self, collection: &str, field: &str) -> Result<Vec<Document>, RemoteError> {
        self.order_by_calls.fetch_add(1, Ordering::SeqCst);
        self.check_queries()?;
        let mut documents = self.documents(collection);
        documents.sort_by(|a, b| {
            sort_key(a.fields.get(field))
                .partial_cmp(&sort_key(b.fields.get(field)))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(documents)
    }

    async fn where_equal_to(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
    ) -> Result<Vec<Document>, RemoteError> {
        self.check_queries()?;
        let failing = self.fail_filter.lock().unwrap().clone();
        if let Some((field, value)) = failing {
            if filters.iter().any(|(f, v)| *f == field && *v == value) {
                return Err(RemoteError::Unavailable(format!("filter on {field} failed")));
            }
        }
        Ok(self
            .documents(collection)
            .into_iter()
            .filter(|doc| {
                filters
                    .iter()
                    .all(|(field, value)| doc.fields.get(*field) == Some(value))
            })
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, RemoteError> {
        self.check_queries()?;
        Ok(self.documents(collection).into_iter().find(|d| d.id == id))
    }

    async fn commit_batch(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<(), RemoteError> {
        self.check_writes()?;
        self.batch_commits.fetch_add(1, Ordering::SeqCst);
        for document in documents {
            self.insert(collection, document);
        }
        Ok(())
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, RemoteError> {
        self.check_writes()?;
        let id = format!("doc{}", self.documents(collection).len() + 1);
        self.insert(collection, Document::new(id.clone(), fields));
        Ok(id)
    }
}

/// a [`BlobStorage`] kept in memory that counts how often urls are looked up
#[derive(Default)]
pub struct MemoryBlobStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    fail: AtomicBool,
    pub lookups: AtomicUsize,
}

impl MemoryBlobStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_blob(path: &str, bytes: &[u8]) -> Arc<Self> {
        let storage = Self::default();
        storage
            .blobs
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Arc::new(storage)
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn paths(&self) -> Vec<String> {
        self.blobs.lock().unwrap().keys().cloned().collect()
    }

    pub fn url_for(path: &str) -> String {
        format!("https://blobs.test/{path}")
    }
}

#[async_trait]
impl BlobStorage for MemoryBlobStorage {
    async fn download_url(&self, path: &str) -> Result<String, RemoteError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("blob storage is failing".to_string()));
        }
        if self.blobs.lock().unwrap().contains_key(path) {
            Ok(Self::url_for(path))
        } else {
            Err(RemoteError::NotFound(path.to_string()))
        }
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<(), RemoteError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("blob storage is failing".to_string()));
        }
        self.blobs.lock().unwrap().insert(path.to_string(), bytes);
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, RemoteError> {
        self.blobs
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(path.to_string()))
    }
}
