use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::tokio::io::AsyncReadExt;
use rocket::State;

use crate::files::upload::fallback_file_name;
use crate::files::Visibility;
use crate::guard::Viewer;
use crate::model::request::FileUpload;
use crate::model::response::file_responses::{GetFileResponse, UploadFileResponse};
use crate::model::response::{BasicMessage, FileApi};
use crate::service::Services;

/// every file visible to the requester. Without valid credentials that's nothing
#[get("/")]
pub async fn list_files(viewer: Option<Viewer>, services: &State<Services>) -> Json<Vec<FileApi>> {
    let board = services.file_board(viewer.map(|Viewer(identity)| identity));
    board.refresh().await;
    let files = board.snapshot().files;
    Json::from(files.into_iter().map(FileApi::from).collect::<Vec<_>>())
}

#[get("/<id>")]
pub async fn get_file(
    id: &str,
    viewer: Option<Viewer>,
    services: &State<Services>,
) -> GetFileResponse {
    let identity = viewer.map(|Viewer(identity)| identity);
    match services.listing.get_file(identity.as_ref(), id).await {
        Some(file) => GetFileResponse::Success(Json::from(FileApi::from(file))),
        None => GetFileResponse::NotFound(BasicMessage::new(
            "The file with the passed id could not be found.",
        )),
    }
}

/// accepts a file via multipart body and shares it. Files are private unless `visibility=public` is passed
#[post("/?<visibility>", data = "<file_input>")]
pub async fn upload_file(
    visibility: Option<&str>,
    file_input: Form<FileUpload<'_>>,
    viewer: Viewer,
    services: &State<Services>,
) -> UploadFileResponse {
    let Viewer(owner) = viewer;
    let visibility = match visibility.map(str::parse::<Visibility>) {
        None => Visibility::Private,
        Some(Ok(v)) => v,
        Some(Err(message)) => return UploadFileResponse::BadRequest(BasicMessage::new(&message)),
    };
    let upload = file_input.into_inner();
    let file_name = upload
        .file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .unwrap_or_else(fallback_file_name);
    let mut bytes = Vec::new();
    let read = match upload.file.open().await {
        Ok(reader) => Box::pin(reader).read_to_end(&mut bytes).await,
        Err(e) => Err(e),
    };
    if let Err(e) = read {
        log::error!("Failed to read uploaded file {file_name}: {e:?}");
        return UploadFileResponse::GenericError(BasicMessage::new(
            "Failed to read the uploaded file. Check server logs for details",
        ));
    }
    let board = services.file_board(Some(owner));
    match board.upload(&file_name, bytes, visibility).await {
        Ok(file) => UploadFileResponse::Created(Json::from(FileApi::from(file))),
        Err(e) => e.into(),
    }
}
