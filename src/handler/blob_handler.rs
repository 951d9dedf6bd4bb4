use std::path::PathBuf;

use rocket::State;

use crate::model::error::remote_errors::RemoteError;
use crate::model::response::file_responses::GetBlobResponse;
use crate::model::response::BasicMessage;
use crate::service::Services;

/// serves the bytes behind a download url handed out by blob storage
#[get("/<path..>")]
pub async fn get_blob(path: PathBuf, services: &State<Services>) -> GetBlobResponse {
    let path = path.to_string_lossy().replace('\\', "/");
    match services.blobs.read(&path).await {
        Ok(bytes) => GetBlobResponse::Success(bytes),
        Err(RemoteError::NotFound(_)) | Err(RemoteError::InvalidPath(_)) => {
            GetBlobResponse::NotFound(BasicMessage::new("No blob exists at the passed path."))
        }
        Err(e) => {
            log::error!("Failed to read blob {path}: {e:?}");
            GetBlobResponse::GenericError(BasicMessage::new(
                "Failed to read the blob. Check server logs for details",
            ))
        }
    }
}
