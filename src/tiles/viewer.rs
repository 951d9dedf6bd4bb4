use once_cell::sync::Lazy;
use regex::Regex;

use crate::tiles::{TileKind, TileRecord};

//language=RegExp
static YOUTUBE_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("v=([^&]+)|be/([^?&]+)").unwrap());

/// what the presentation layer carries to the viewer screen when a tile is activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerTarget {
    pub type_tag: &'static str,
    pub target_url: Option<String>,
    pub youtube_id: Option<String>,
}

/// what the viewer ends up showing for a [`ViewerTarget`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Video { embed_url: String },
    Page { url: String },
    Unavailable { reason: &'static str },
}

impl TileRecord {
    pub fn viewer_target(&self) -> ViewerTarget {
        ViewerTarget {
            type_tag: self.kind.type_tag(),
            target_url: self.kind.target_url().map(str::to_string),
            youtube_id: self.kind.video_id().map(str::to_string),
        }
    }
}

impl ViewerTarget {
    pub fn resolve(&self) -> Viewer {
        if self.type_tag == TileKind::YOUTUBE {
            let video_id = self
                .youtube_id
                .clone()
                .or_else(|| extract_youtube_id(self.target_url.as_deref()?));
            return match video_id {
                Some(id) if !id.trim().is_empty() => Viewer::Video {
                    embed_url: format!(
                        "https://www.youtube.com/embed/{id}?autoplay=0&modestbranding=1"
                    ),
                },
                _ => Viewer::Unavailable {
                    reason: "Invalid YouTube ID",
                },
            };
        }
        match &self.target_url {
            Some(url) if !url.trim().is_empty() => Viewer::Page { url: url.clone() },
            _ => Viewer::Unavailable {
                reason: "No content available",
            },
        }
    }
}

/// pulls the video id out of a `watch?v=` or `youtu.be/` url, falling back to the last 11 characters
pub fn extract_youtube_id(url: &str) -> Option<String> {
    if let Some(captures) = YOUTUBE_ID_REGEX.captures(url) {
        return captures
            .get(1)
            .or_else(|| captures.get(2))
            .map(|m| m.as_str().to_string());
    }
    let chars: Vec<char> = url.chars().collect();
    if chars.len() >= 11 {
        Some(chars[chars.len() - 11..].iter().collect())
    } else {
        None
    }
}
