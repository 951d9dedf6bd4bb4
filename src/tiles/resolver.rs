use std::backtrace::Backtrace;
use std::sync::Arc;

use crate::model::error::remote_errors::FieldTypeError;
use crate::model::error::tile_errors::TileResolutionError;
use crate::remote::{BlobStorage, Document, DocumentCollection};
use crate::tiles::seed::sample_tile_documents;
use crate::tiles::{TileDraft, TileKind, TileRecord};

pub const COLLECTION_HOME_TILES: &str = "home_tiles";
pub const MAX_VISIBLE_TILES: usize = 6;
pub const DEFAULT_PLACEHOLDER_BASE_URL: &str = "https://picsum.photos";

pub mod fields {
    pub const TITLE: &str = "title";
    pub const TYPE: &str = "type";
    pub const VISIBLE: &str = "visible";
    pub const ORDER: &str = "order";
    pub const TARGET_URL: &str = "targetUrl";
    pub const IMAGE_URL: &str = "imageUrl";
    pub const IMAGE_PATH: &str = "imagePath";
    pub const YOUTUBE_ID: &str = "youtubeId";
}

/// Turns the raw records of the tile collection into a bounded, ordered list of tiles whose images
/// are always displayable.
pub struct TileResolver {
    collection: Arc<dyn DocumentCollection>,
    blobs: Arc<dyn BlobStorage>,
    max_visible: usize,
    placeholder_base_url: String,
}

impl TileResolver {
    pub fn new(collection: Arc<dyn DocumentCollection>, blobs: Arc<dyn BlobStorage>) -> Self {
        Self {
            collection,
            blobs,
            max_visible: MAX_VISIBLE_TILES,
            placeholder_base_url: DEFAULT_PLACEHOLDER_BASE_URL.to_string(),
        }
    }

    /// lowers the visible limit. It can never go above [`MAX_VISIBLE_TILES`]
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible.min(MAX_VISIBLE_TILES);
        self
    }

    pub fn with_placeholder_base_url(mut self, base_url: &str) -> Self {
        self.placeholder_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetches the visible tiles, ascending by their order, truncated to the visible limit.
    ///
    /// If the collection turns out to be empty it gets seeded with the sample tiles and an empty list
    /// is returned; the caller is expected to fetch again.
    ///
    /// # Errors
    ///
    /// Any failure to query or seed the collection fails the whole fetch. Records without a title and
    /// images that can't be loaded from blob storage are not errors.
    pub async fn fetch_tiles(&self) -> Result<Vec<TileRecord>, TileResolutionError> {
        log::debug!("Fetching tiles from {COLLECTION_HOME_TILES}...");
        let documents = self
            .collection
            .order_by(COLLECTION_HOME_TILES, fields::ORDER)
            .await
            .map_err(|e| {
                log::error!(
                    "Error fetching tiles: {e:?}\n{}",
                    Backtrace::force_capture()
                );
                TileResolutionError::Query(e)
            })?;
        log::debug!("Query successful: {} documents found", documents.len());

        if documents.is_empty() {
            log::info!("No tiles found, initializing with sample data...");
            self.insert_sample_tiles().await?;
            return Ok(Vec::new());
        }

        let mut drafts: Vec<TileDraft> = documents
            .iter()
            .filter_map(parse_tile_document)
            .filter(|draft| draft.visible)
            .collect();
        // stable, so records sharing an order keep the collection's order
        drafts.sort_by_key(|draft| draft.sort_order);
        drafts.truncate(self.max_visible);

        // one at a time, there's at most `max_visible` of them
        let mut tiles = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let image_url = self
                .resolve_image_url(
                    draft.stored_image_url.as_deref(),
                    draft.image_path.as_deref(),
                    &draft.title,
                )
                .await;
            tiles.push(draft.resolve(image_url));
        }
        log::debug!("Loaded {} visible tiles", tiles.len());
        Ok(tiles)
    }

    /// writes the sample tiles in a single batch, keyed `tile1` through `tile6`.
    /// Any tiles already stored under those ids are overwritten
    pub async fn insert_sample_tiles(&self) -> Result<(), TileResolutionError> {
        let samples = sample_tile_documents(&self.placeholder_base_url);
        let count = samples.len();
        self.collection
            .commit_batch(COLLECTION_HOME_TILES, samples)
            .await
            .map_err(|e| {
                log::error!(
                    "Error inserting sample tiles: {e:?}\n{}",
                    Backtrace::force_capture()
                );
                TileResolutionError::Seed(e)
            })?;
        log::info!("Successfully inserted {count} sample tiles");
        Ok(())
    }

    /// Picks the image for a tile, first match wins:
    /// 1. the record's stored url, if it isn't blank
    /// 2. the blob at `image_path`, if there is one and it resolves
    /// 3. a placeholder generated from the title
    ///
    /// never fails, blob storage errors are logged and skipped
    pub async fn resolve_image_url(
        &self,
        stored_image_url: Option<&str>,
        image_path: Option<&str>,
        title: &str,
    ) -> String {
        if let Some(url) = stored_image_url.filter(|url| !url.trim().is_empty()) {
            return url.to_string();
        }
        if let Some(path) = image_path.filter(|path| !path.trim().is_empty()) {
            match self.blobs.download_url(path).await {
                Ok(url) => {
                    log::debug!("Loaded image from blob storage: {path}");
                    return url;
                }
                Err(e) => log::warn!("Failed to load image from blob storage: {path}. {e}"),
            }
        }
        placeholder_image_url(&self.placeholder_base_url, title)
    }

    pub fn placeholder_image_url(&self, title: &str) -> String {
        placeholder_image_url(&self.placeholder_base_url, title)
    }
}

/// a placeholder image url that's always the same for the same title
pub fn placeholder_image_url(base_url: &str, title: &str) -> String {
    let seed = title.to_lowercase().replace(' ', "");
    format!("{base_url}/seed/{seed}/600/400")
}

/// maps a raw tile record, returning `None` if it has no title or any field has the wrong type
pub fn parse_tile_document(document: &Document) -> Option<TileDraft> {
    match read_tile_document(document) {
        Ok(draft) => draft,
        Err(e) => {
            log::debug!("Dropping malformed tile {}: {e}", document.id);
            None
        }
    }
}

fn read_tile_document(document: &Document) -> Result<Option<TileDraft>, FieldTypeError> {
    let Some(title) = document.read_string(fields::TITLE)? else {
        log::debug!("Dropping tile {}, it has no title", document.id);
        return Ok(None);
    };
    let owned = |field: &str| document.read_string(field).map(|v| v.map(str::to_string));
    Ok(Some(TileDraft {
        id: document.id.clone(),
        title: title.to_string(),
        kind: TileKind::from_raw(
            document.read_string(fields::TYPE)?,
            owned(fields::TARGET_URL)?,
            owned(fields::YOUTUBE_ID)?,
        ),
        stored_image_url: owned(fields::IMAGE_URL)?,
        image_path: owned(fields::IMAGE_PATH)?,
        sort_order: document.read_long(fields::ORDER)?.unwrap_or(0),
        visible: document.read_bool(fields::VISIBLE)?.unwrap_or(true),
    }))
}
