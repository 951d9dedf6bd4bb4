use rocket::serde::json::Json;
use rocket::State;

use crate::model::response::tile_responses::{GetTileTargetResponse, GetTilesResponse};
use crate::model::response::{BasicMessage, TileApi, ViewerApi};
use crate::service::Services;

/// refreshes the tile board and returns whatever it ends up showing
#[get("/")]
pub async fn get_tiles(services: &State<Services>) -> GetTilesResponse {
    let board = &services.tile_board;
    board.refresh().await;
    let state = board.snapshot();
    if let Some(error) = state.error {
        return GetTilesResponse::GenericError(BasicMessage::new(&error));
    }
    GetTilesResponse::Success(Json::from(
        state.tiles.iter().map(TileApi::from).collect::<Vec<_>>(),
    ))
}

/// where activating a tile leads. Only tiles from the latest refresh can be opened
#[get("/<id>/target")]
pub fn get_tile_target(id: &str, services: &State<Services>) -> GetTileTargetResponse {
    let state = services.tile_board.snapshot();
    match state.tiles.iter().find(|tile| tile.id == id) {
        Some(tile) => GetTileTargetResponse::Success(Json::from(ViewerApi::from(
            tile.viewer_target(),
        ))),
        None => GetTileTargetResponse::NotFound(BasicMessage::new(
            "The tile with the passed id is not currently shown.",
        )),
    }
}
