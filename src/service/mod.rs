use std::sync::Arc;

use crate::config::TileConfig;
use crate::files::{FileListing, FileUploader};
use crate::identity::{Identity, IdentityProvider};
use crate::presentation::{FileBoard, TileBoard};
use crate::remote::{BlobStorage, DocumentCollection};
use crate::tiles::TileResolver;

/// everything the handlers need, built once at startup and managed by rocket.
/// Pipelines only ever get the collaborators handed to them here
pub struct Services {
    pub tile_board: TileBoard,
    pub listing: Arc<FileListing>,
    pub uploader: Arc<FileUploader>,
    pub identities: Arc<dyn IdentityProvider>,
    pub blobs: Arc<dyn BlobStorage>,
}

impl Services {
    pub fn new(
        collection: Arc<dyn DocumentCollection>,
        blobs: Arc<dyn BlobStorage>,
        identities: Arc<dyn IdentityProvider>,
        tile_config: &TileConfig,
    ) -> Self {
        let resolver = TileResolver::new(collection.clone(), blobs.clone())
            .with_max_visible(tile_config.max_visible)
            .with_placeholder_base_url(&tile_config.placeholder_base_url);
        Self {
            tile_board: TileBoard::new(Arc::new(resolver), tile_config.seed_retry_delay()),
            listing: Arc::new(FileListing::new(collection.clone())),
            uploader: Arc::new(FileUploader::new(collection, blobs.clone())),
            identities,
            blobs,
        }
    }

    /// a fresh file board for one request, already signed in as `viewer` when there is one
    pub fn file_board(&self, viewer: Option<Identity>) -> FileBoard {
        let board = FileBoard::new(
            self.identities.clone(),
            self.listing.clone(),
            self.uploader.clone(),
        );
        match viewer {
            Some(identity) => board.with_identity(identity),
            None => board,
        }
    }
}
