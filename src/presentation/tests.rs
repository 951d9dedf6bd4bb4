use std::sync::Arc;
use std::time::Duration;

use rocket::serde::json::serde_json::json;

use crate::files::{FileListing, FileUploader, Visibility};
use crate::identity::{Credentials, Identity, SqliteIdentityProvider};
use crate::model::error::identity_errors::IdentityError;
use crate::model::error::file_errors::UploadError;
use crate::presentation::tile_board::UNABLE_TO_LOAD_TILES;
use crate::presentation::{FileBoard, TileBoard};
use crate::remote::Document;
use crate::test::{cleanup, fields, refresh_db, MemoryBlobStorage, MemoryCollection};
use crate::tiles::resolver::COLLECTION_HOME_TILES;
use crate::tiles::TileResolver;

fn tile_board(collection: &Arc<MemoryCollection>) -> TileBoard {
    let resolver = TileResolver::new(collection.clone(), MemoryBlobStorage::new());
    TileBoard::new(Arc::new(resolver), Duration::ZERO)
}

mod tile_board_tests {
    use super::*;

    #[rocket::async_test]
    async fn first_refresh_seeds_and_shows_the_samples() {
        let collection = MemoryCollection::new();
        let board = tile_board(&collection);
        board.refresh().await;
        let state = board.snapshot();
        assert_eq!(6, state.tiles.len());
        assert_eq!("tile1", state.tiles[0].id);
        assert!(!state.is_loading);
        assert_eq!(None, state.error);
        assert_eq!(None, state.notification);
    }

    #[rocket::async_test]
    async fn failure_on_an_empty_board_notifies() {
        let collection = MemoryCollection::new();
        collection.fail_queries(true);
        let board = tile_board(&collection);
        board.refresh().await;
        let state = board.snapshot();
        assert!(state.tiles.is_empty());
        assert_eq!(Some(UNABLE_TO_LOAD_TILES.to_string()), state.notification);
        assert_eq!(
            Some("Failed to fetch tiles: remote store unavailable: queries are failing".to_string()),
            state.error
        );
        assert!(!state.is_loading);
    }

    #[rocket::async_test]
    async fn failure_on_a_filled_board_clears_it_without_notifying() {
        let collection = MemoryCollection::with_documents(
            COLLECTION_HOME_TILES,
            vec![Document::new("a", fields(json!({"title": "A", "order": 1})))],
        );
        let board = tile_board(&collection);
        board.refresh().await;
        assert_eq!(1, board.snapshot().tiles.len());

        collection.fail_queries(true);
        board.refresh().await;
        let state = board.snapshot();
        assert!(state.tiles.is_empty());
        assert_eq!(None, state.notification);
        assert!(state.error.is_some());
    }

    #[rocket::async_test]
    async fn a_successful_refresh_clears_the_last_error() {
        let collection = MemoryCollection::with_documents(
            COLLECTION_HOME_TILES,
            vec![Document::new("a", fields(json!({"title": "A"})))],
        );
        collection.fail_queries(true);
        let board = tile_board(&collection);
        board.refresh().await;
        assert!(board.snapshot().error.is_some());

        collection.fail_queries(false);
        board.refresh().await;
        let state = board.snapshot();
        assert_eq!(None, state.error);
        assert_eq!(None, state.notification);
        assert_eq!(1, state.tiles.len());
    }

    #[rocket::async_test]
    async fn failed_seed_is_reported() {
        let collection = MemoryCollection::new();
        collection.fail_writes(true);
        let board = tile_board(&collection);
        board.refresh().await;
        let state = board.snapshot();
        assert_eq!(
            Some("Failed to insert sample tiles: remote store unavailable: writes are failing".to_string()),
            state.error
        );
        assert_eq!(Some(UNABLE_TO_LOAD_TILES.to_string()), state.notification);
    }
}

mod file_board_tests {
    use super::*;

    fn file_board(collection: &Arc<MemoryCollection>, blobs: &Arc<MemoryBlobStorage>) -> FileBoard {
        let location = refresh_db();
        FileBoard::new(
            Arc::new(SqliteIdentityProvider::new(location)),
            Arc::new(FileListing::new(collection.clone())),
            Arc::new(FileUploader::new(collection.clone(), blobs.clone())),
        )
    }

    #[rocket::async_test]
    async fn first_login_creates_the_account() {
        let board = file_board(&MemoryCollection::new(), &MemoryBlobStorage::new());
        let identity = board.login(Credentials::new("ada", "secret1")).await.unwrap();
        let state = board.snapshot();
        assert_eq!("Account created successfully!", state.message);
        assert_eq!("ada", identity.display_name);
        assert_eq!(Some(identity), state.current_identity);
        assert!(!state.is_loading);
        cleanup();
    }

    #[rocket::async_test]
    async fn second_login_welcomes_back() {
        let board = file_board(&MemoryCollection::new(), &MemoryBlobStorage::new());
        board.login(Credentials::new("ada", "secret1")).await.unwrap();
        let created = board.snapshot().current_identity;
        board.logout();
        board.login(Credentials::new("ada", "secret1")).await.unwrap();
        let state = board.snapshot();
        assert_eq!("Welcome back!", state.message);
        assert_eq!(created, state.current_identity);
        cleanup();
    }

    #[rocket::async_test]
    async fn wrong_password_does_not_sign_in() {
        let board = file_board(&MemoryCollection::new(), &MemoryBlobStorage::new());
        board.login(Credentials::new("ada", "secret1")).await.unwrap();
        board.logout();
        let err = board.login(Credentials::new("ada", "secret2")).await.unwrap_err();
        assert_eq!(IdentityError::InvalidCredentials, err);
        let state = board.snapshot();
        assert_eq!("Login failed: Invalid username or password", state.message);
        assert_eq!(None, state.current_identity);
        cleanup();
    }

    #[rocket::async_test]
    async fn short_passwords_cannot_create_accounts() {
        let board = file_board(&MemoryCollection::new(), &MemoryBlobStorage::new());
        assert!(board.login(Credentials::new("ada", "abc")).await.is_err());
        let state = board.snapshot();
        assert_eq!("Login failed: Password must be at least 6 characters", state.message);
        assert_eq!(None, state.current_identity);
        cleanup();
    }

    #[rocket::async_test]
    async fn upload_requires_a_login() {
        let blobs = MemoryBlobStorage::new();
        let board = file_board(&MemoryCollection::new(), &blobs);
        let err = board
            .upload("a.txt", b"a".to_vec(), Visibility::Public)
            .await
            .unwrap_err();
        assert_eq!(UploadError::NotSignedIn, err);
        assert_eq!("Please login first", board.snapshot().message);
        assert!(blobs.paths().is_empty());
        cleanup();
    }

    #[rocket::async_test]
    async fn upload_reloads_the_files() {
        let board = file_board(&MemoryCollection::new(), &MemoryBlobStorage::new());
        board.login(Credentials::new("ada", "secret1")).await.unwrap();
        let uploaded = board
            .upload("a.txt", b"a".to_vec(), Visibility::Private)
            .await
            .unwrap();
        let state = board.snapshot();
        assert_eq!("File uploaded successfully!", state.message);
        assert_eq!(uploaded.id, state.files[0].id);
        assert_eq!(1, state.files.len());
        assert_eq!("a.txt", state.files[0].name);
        assert!(state.files[0].is_owned_by_viewer);
        assert!(!state.is_loading);
        cleanup();
    }

    #[rocket::async_test]
    async fn failed_upload_reports_why() {
        let blobs = MemoryBlobStorage::new();
        let board = file_board(&MemoryCollection::new(), &blobs);
        board.login(Credentials::new("ada", "secret1")).await.unwrap();
        blobs.fail(true);
        assert!(board
            .upload("a.txt", b"a".to_vec(), Visibility::Public)
            .await
            .is_err());
        assert_eq!(
            "Upload failed: failed to store file: remote store unavailable: blob storage is failing",
            board.snapshot().message
        );
        cleanup();
    }

    #[rocket::async_test]
    async fn logout_forgets_the_files() {
        let board = file_board(&MemoryCollection::new(), &MemoryBlobStorage::new());
        board.login(Credentials::new("ada", "secret1")).await.unwrap();
        board
            .upload("a.txt", b"a".to_vec(), Visibility::Public)
            .await
            .unwrap();
        board.logout();
        let state = board.snapshot();
        assert_eq!("Logged out successfully", state.message);
        assert_eq!(None, state.current_identity);
        assert!(state.files.is_empty());
        board.clear_message();
        assert_eq!("", board.snapshot().message);
        cleanup();
    }

    #[rocket::async_test]
    async fn a_board_built_with_an_identity_can_upload_right_away() {
        let identity = Identity {
            uid: "uid-ada".to_string(),
            display_name: "ada".to_string(),
        };
        let board = file_board(&MemoryCollection::new(), &MemoryBlobStorage::new())
            .with_identity(identity.clone());
        let uploaded = board
            .upload("b.txt", b"b".to_vec(), Visibility::Public)
            .await
            .unwrap();
        assert_eq!("uid-ada", uploaded.owner_id);
        let state = board.snapshot();
        assert_eq!(Some(identity), state.current_identity);
        assert_eq!(1, state.files.len());
        cleanup();
    }
}
