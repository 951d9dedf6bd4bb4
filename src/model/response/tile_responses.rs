use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, TileApi, ViewerApi};

#[derive(Responder)]
pub enum GetTilesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<TileApi>>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum GetTileTargetResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<ViewerApi>),
    /// the tile isn't one of the tiles currently shown
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
}
