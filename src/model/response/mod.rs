use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::files::{FileRecord, Visibility};
use crate::presentation::file_board::FileBoardState;
use crate::tiles::viewer::{Viewer, ViewerTarget};
use crate::tiles::TileRecord;

pub mod api_responses;
pub mod file_responses;
pub mod tile_responses;

/// represents a basic json message
#[derive(Responder, Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BasicMessage {
    pub message: String,
}

/// a display-ready tile
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct TileApi {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(rename = "targetUrl", skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(rename = "youtubeId", skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub order: i64,
}

/// what a client needs to open a tile
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ViewerApi {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(rename = "targetUrl")]
    pub target_url: Option<String>,
    #[serde(rename = "youtubeId")]
    pub youtube_id: Option<String>,
    /// the url to load, `None` if there's nothing to show
    pub url: Option<String>,
    /// why there's nothing to show
    pub reason: Option<String>,
}

/// a shared file as seen by whoever asked for it
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FileApi {
    pub id: String,
    pub name: String,
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
    pub visibility: Visibility,
    #[serde(rename = "ownerUid")]
    pub owner_uid: String,
    #[serde(rename = "ownerName")]
    pub owner_name: String,
    #[serde(rename = "isOwner")]
    pub is_owner: bool,
}

/// who signed in, what happened, and the files they can now see
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct SessionApi {
    pub uid: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub message: String,
    pub files: Vec<FileApi>,
}

// ----------------------------------

impl BasicMessage {
    pub fn new(message: &str) -> Json<BasicMessage> {
        Json::from(BasicMessage {
            message: message.to_string(),
        })
    }
}

impl From<&str> for BasicMessage {
    fn from(value: &str) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl From<String> for BasicMessage {
    fn from(value: String) -> Self {
        Self { message: value }
    }
}

impl From<&TileRecord> for TileApi {
    fn from(value: &TileRecord) -> Self {
        Self {
            id: value.id.clone(),
            title: value.title.clone(),
            type_tag: value.kind.type_tag().to_string(),
            target_url: value.kind.target_url().map(str::to_string),
            youtube_id: value.kind.video_id().map(str::to_string),
            image_url: value.resolved_image_url.clone(),
            order: value.sort_order,
        }
    }
}

impl From<ViewerTarget> for ViewerApi {
    fn from(value: ViewerTarget) -> Self {
        let (url, reason) = match value.resolve() {
            Viewer::Video { embed_url } => (Some(embed_url), None),
            Viewer::Page { url } => (Some(url), None),
            Viewer::Unavailable { reason } => (None, Some(reason.to_string())),
        };
        Self {
            type_tag: value.type_tag.to_string(),
            target_url: value.target_url,
            youtube_id: value.youtube_id,
            url,
            reason,
        }
    }
}

impl From<FileRecord> for FileApi {
    fn from(value: FileRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            download_url: value.download_url,
            visibility: value.visibility,
            owner_uid: value.owner_id,
            owner_name: value.owner_display_name,
            is_owner: value.is_owned_by_viewer,
        }
    }
}

impl From<FileBoardState> for SessionApi {
    /// logged-out states have no identity, so they come through with blank `uid` and `displayName`
    fn from(value: FileBoardState) -> Self {
        let (uid, display_name) = value
            .current_identity
            .map(|identity| (identity.uid, identity.display_name))
            .unwrap_or_default();
        Self {
            uid,
            display_name,
            message: value.message,
            files: value.files.into_iter().map(FileApi::from).collect(),
        }
    }
}
