use rocket::serde::json::serde_json::Value;

use crate::remote::{Document, Fields};
use crate::tiles::resolver::{fields, placeholder_image_url};
use crate::tiles::TileKind;

/// a tile written to an empty collection so there's something to show
struct SampleTile {
    title: &'static str,
    order: i64,
    kind: &'static str,
    target_url: Option<&'static str>,
    youtube_id: Option<&'static str>,
}

const SAMPLE_TILES: [SampleTile; 6] = [
    SampleTile {
        title: "Robotics",
        order: 1,
        kind: TileKind::CONTENT,
        target_url: Some("https://www.youtube.com/watch?v=UObzWjPb6XM"),
        youtube_id: None,
    },
    SampleTile {
        title: "Science",
        order: 2,
        kind: TileKind::CONTENT,
        target_url: Some("https://www.sciencedaily.com"),
        youtube_id: None,
    },
    SampleTile {
        title: "Math",
        order: 3,
        kind: TileKind::CONTENT,
        target_url: Some("https://www.khanacademy.org/math"),
        youtube_id: None,
    },
    SampleTile {
        title: "Art",
        order: 4,
        kind: TileKind::CONTENT,
        target_url: Some("https://artsandculture.google.com"),
        youtube_id: None,
    },
    SampleTile {
        title: "Coding",
        order: 5,
        kind: TileKind::CONTENT,
        target_url: Some("https://www.freecodecamp.org"),
        youtube_id: None,
    },
    SampleTile {
        title: "Intro to AI",
        order: 6,
        kind: TileKind::YOUTUBE,
        target_url: None,
        youtube_id: Some("mOYN9HlfTgo"),
    },
];

fn optional(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_string()))
}

/// the sample tiles as documents, keyed `tile1`.. in order. Each one carries its placeholder as its stored image url
pub fn sample_tile_documents(placeholder_base_url: &str) -> Vec<Document> {
    SAMPLE_TILES
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let mut tile_fields = Fields::new();
            tile_fields.insert(fields::TITLE.into(), tile.title.into());
            tile_fields.insert(fields::TYPE.into(), tile.kind.into());
            tile_fields.insert(fields::VISIBLE.into(), true.into());
            tile_fields.insert(fields::ORDER.into(), tile.order.into());
            tile_fields.insert(fields::TARGET_URL.into(), optional(tile.target_url));
            tile_fields.insert(
                fields::IMAGE_URL.into(),
                placeholder_image_url(placeholder_base_url, tile.title).into(),
            );
            tile_fields.insert(fields::YOUTUBE_ID.into(), optional(tile.youtube_id));
            Document::new(format!("tile{}", index + 1), tile_fields)
        })
        .collect()
}
