use std::sync::Arc;
use std::time::Duration;

use rocket::tokio::sync::watch;
use rocket::tokio::time::sleep;

use crate::tiles::{TileRecord, TileResolver};

pub const UNABLE_TO_LOAD_TILES: &str = "Unable to load tiles. Check your connection.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileBoardState {
    pub tiles: Vec<TileRecord>,
    pub is_loading: bool,
    /// the last fetch error, cleared when a refresh starts
    pub error: Option<String>,
    /// set when a fetch fails while nothing was being shown
    pub notification: Option<String>,
}

pub struct TileBoard {
    resolver: Arc<TileResolver>,
    seed_retry_delay: Duration,
    state: watch::Sender<TileBoardState>,
}

impl TileBoard {
    pub fn new(resolver: Arc<TileResolver>, seed_retry_delay: Duration) -> Self {
        let (state, _) = watch::channel(TileBoardState::default());
        Self {
            resolver,
            seed_retry_delay,
            state,
        }
    }

    pub fn snapshot(&self) -> TileBoardState {
        self.state.borrow().clone()
    }

    /// Fetches the tiles and publishes them. An empty result most likely means the collection was
    /// just seeded, so after `seed_retry_delay` it fetches once more.
    ///
    /// On failure the tiles are cleared and the error published. A notification is only raised if
    /// the board was already empty; otherwise the failure is just logged.
    pub async fn refresh(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
            state.notification = None;
        });

        let result = match self.resolver.fetch_tiles().await {
            Ok(tiles) if tiles.is_empty() => {
                self.state.send_modify(|state| state.tiles = Vec::new());
                sleep(self.seed_retry_delay).await;
                self.resolver.fetch_tiles().await
            }
            other => other,
        };

        self.state.send_modify(|state| {
            match result {
                Ok(tiles) => state.tiles = tiles,
                Err(e) => {
                    if state.tiles.is_empty() {
                        state.notification = Some(UNABLE_TO_LOAD_TILES.to_string());
                    } else {
                        log::warn!(
                            "Tile refresh failed while {} tiles were shown: {e}",
                            state.tiles.len()
                        );
                    }
                    state.error = Some(e.to_string());
                    state.tiles = Vec::new();
                }
            }
            state.is_loading = false;
        });
    }
}
