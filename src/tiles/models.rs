/// the two kinds of tile, each carrying only what it needs to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileKind {
    /// a regular web page
    Content { target_url: Option<String> },
    /// an embedded video. `target_url` is only kept so a video id can be pulled out of it when `video_id` is missing
    Youtube {
        video_id: Option<String>,
        target_url: Option<String>,
    },
}

impl TileKind {
    pub const CONTENT: &'static str = "content";
    pub const YOUTUBE: &'static str = "youtube";

    /// builds the kind from a record's raw `type` field. Anything other than `youtube` (including nothing) is content
    pub fn from_raw(
        type_tag: Option<&str>,
        target_url: Option<String>,
        youtube_id: Option<String>,
    ) -> Self {
        match type_tag {
            Some(Self::YOUTUBE) => TileKind::Youtube {
                video_id: youtube_id,
                target_url,
            },
            _ => TileKind::Content { target_url },
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            TileKind::Content { .. } => Self::CONTENT,
            TileKind::Youtube { .. } => Self::YOUTUBE,
        }
    }

    pub fn target_url(&self) -> Option<&str> {
        match self {
            TileKind::Content { target_url } | TileKind::Youtube { target_url, .. } => {
                target_url.as_deref()
            }
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        match self {
            TileKind::Content { .. } => None,
            TileKind::Youtube { video_id, .. } => video_id.as_deref(),
        }
    }
}

/// A tile parsed out of a remote record, before its image has been resolved.
/// The only way to get a [`TileRecord`] out of one is [`TileDraft::resolve`]
#[derive(Debug, Clone, PartialEq)]
pub struct TileDraft {
    pub id: String,
    pub title: String,
    pub kind: TileKind,
    /// the record's own `imageUrl`, which may be blank
    pub stored_image_url: Option<String>,
    pub image_path: Option<String>,
    pub sort_order: i64,
    pub visible: bool,
}

impl TileDraft {
    pub fn resolve(self, resolved_image_url: String) -> TileRecord {
        TileRecord {
            id: self.id,
            title: self.title,
            kind: self.kind,
            image_path: self.image_path,
            resolved_image_url,
            sort_order: self.sort_order,
            visible: self.visible,
        }
    }
}

/// one displayable content entry. Rebuilt on every fetch, never cached
#[derive(Debug, Clone, PartialEq)]
pub struct TileRecord {
    /// the id of the backing record
    pub id: String,
    pub title: String,
    pub kind: TileKind,
    /// reference into blob storage, if the record has one
    pub image_path: Option<String>,
    /// never empty
    pub resolved_image_url: String,
    pub sort_order: i64,
    pub visible: bool,
}
