use rocket::serde::{json::Json, Serialize};
use rocket::State;

use crate::guard::Viewer;
use crate::identity::Credentials;
use crate::model::request::SessionRequest;
use crate::model::response::api_responses::CreateSessionResponse;
use crate::model::response::{BasicMessage, SessionApi};
use crate::service::Services;

static API_VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiVersion {
    version: &'static str,
}

#[get("/version")]
pub fn api_version() -> Json<ApiVersion> {
    Json(ApiVersion {
        version: API_VERSION_NUMBER,
    })
}

/// signs in with the passed credentials, creating the identity if the username is new.
/// Responds with the identity, a welcome message and the files it can see
#[post("/session", data = "<request>")]
pub async fn create_session(
    request: Json<SessionRequest>,
    services: &State<Services>,
) -> CreateSessionResponse {
    let credentials: Credentials = request.into_inner().into();
    let username = credentials.username.clone();
    let board = services.file_board(None);
    match board.login(credentials).await {
        Ok(_) => CreateSessionResponse::Success(Json::from(SessionApi::from(board.snapshot()))),
        Err(e) => {
            log::info!("Session request for {username} failed: {e}");
            e.into()
        }
    }
}

/// sessions are per request, so this only confirms the credentials and says goodbye
#[delete("/session")]
pub fn delete_session(viewer: Viewer, services: &State<Services>) -> Json<BasicMessage> {
    let Viewer(identity) = viewer;
    let board = services.file_board(Some(identity));
    board.logout();
    BasicMessage::new(&board.snapshot().message)
}
