use rocket::fs::TempFile;
use rocket::serde::Deserialize;
use rocket::FromForm;

use crate::identity::Credentials;

/// Credentials sent in a post body to sign in or create an identity.
/// Everything else authenticates with a basic auth header instead
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SessionRequest {
    pub username: String,
    pub password: String,
}

impl From<SessionRequest> for Credentials {
    fn from(value: SessionRequest) -> Self {
        Credentials::new(&value.username, &value.password)
    }
}

#[derive(FromForm)]
pub struct FileUpload<'a> {
    pub file: TempFile<'a>,
}
