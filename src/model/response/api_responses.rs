use rocket::serde::json::Json;

use crate::model::error::identity_errors::IdentityError;
use crate::model::response::{BasicMessage, SessionApi};

#[derive(Responder)]
pub enum CreateSessionResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<SessionApi>),
    /// the credentials themselves are unusable
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
}

impl From<IdentityError> for CreateSessionResponse {
    fn from(value: IdentityError) -> Self {
        let message = BasicMessage::new(&value.to_string());
        match value {
            IdentityError::BlankCredentials
            | IdentityError::PasswordTooShort(_)
            | IdentityError::AlreadyExists => CreateSessionResponse::BadRequest(message),
            IdentityError::UnknownUser | IdentityError::InvalidCredentials => {
                CreateSessionResponse::Unauthorized(message)
            }
            IdentityError::Unavailable(_) => CreateSessionResponse::GenericError(message),
        }
    }
}
