use rocket::serde::json::Json;

use crate::model::error::file_errors::UploadError;
use crate::model::response::{BasicMessage, FileApi};

#[derive(Responder)]
pub enum GetFileResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<FileApi>),
    /// the file doesn't exist, or the requester isn't allowed to see it
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum UploadFileResponse {
    #[response(status = 201, content_type = "json")]
    Created(Json<FileApi>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
}

impl From<UploadError> for UploadFileResponse {
    fn from(value: UploadError) -> Self {
        let message = BasicMessage::new(&value.to_string());
        match value {
            UploadError::InvalidFileName(_) => UploadFileResponse::BadRequest(message),
            UploadError::NotSignedIn => UploadFileResponse::Unauthorized(message),
            UploadError::Storage(_) | UploadError::Record(_) => {
                UploadFileResponse::GenericError(message)
            }
        }
    }
}

#[derive(Responder)]
pub enum GetBlobResponse {
    #[response(status = 200, content_type = "application/octet-stream")]
    Success(Vec<u8>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
}
