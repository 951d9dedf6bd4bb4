use base64::{engine::general_purpose, Engine as _};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{async_trait, Request};

use crate::identity::{Credentials, Identity};
use crate::service::Services;

/// credentials pulled out of a basic auth header
#[derive(Debug)]
pub struct HeaderAuth {
    pub username: String,
    pub password: String,
}

impl HeaderAuth {
    /// creates a `HeaderAuth` object from the passed header value.
    /// The value of header must be base64-encoded basic auth.
    pub fn from(header: &str) -> Result<HeaderAuth, &str> {
        // remove the "Basic " from the header, leaving only the base64 part
        let stripped_header = header.trim_start_matches("Basic ").trim();
        let Ok(value) = general_purpose::STANDARD.decode(stripped_header) else {
            return Err("Invalid basic auth format: not base64");
        };
        let Ok(combined) = String::from_utf8(value) else {
            return Err("Invalid basic auth format: not utf-8");
        };
        // passwords may contain a colon, usernames may not
        match combined.split_once(':') {
            Some((username, password))
                if !username.trim().is_empty() && !password.trim().is_empty() =>
            {
                Ok(HeaderAuth {
                    username: username.trim().to_string(),
                    password: password.trim().to_string(),
                })
            }
            _ => Err("Invalid basic auth format: missing username or password"),
        }
    }
}

impl From<HeaderAuth> for Credentials {
    fn from(value: HeaderAuth) -> Self {
        Credentials::new(&value.username, &value.password)
    }
}

/// The identity making the request, signed in through the basic auth header.
///
/// Use `Option<Viewer>` for routes that still work without an identity
#[derive(Debug)]
pub struct Viewer(pub Identity);

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
    /// the identity store couldn't be asked
    Unavailable,
}

#[async_trait]
impl<'a> FromRequest<'a> for Viewer {
    type Error = AuthError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(header) = request.headers().get_one("Authorization") else {
            return Outcome::Error((Status::Unauthorized, AuthError::Missing));
        };
        if !header.starts_with("Basic") {
            return Outcome::Error((Status::BadRequest, AuthError::Invalid));
        }
        let credentials: Credentials = match HeaderAuth::from(header) {
            Ok(auth) => auth.into(),
            Err(_) => return Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
        };
        let Some(services) = request.rocket().state::<Services>() else {
            log::error!("Services are not managed, cannot authenticate requests");
            return Outcome::Error((Status::InternalServerError, AuthError::Unavailable));
        };
        match services.identities.sign_in(&credentials).await {
            Ok(identity) => Outcome::Success(Viewer(identity)),
            Err(e) => {
                log::debug!("Rejected credentials for {}: {e}", credentials.username);
                Outcome::Error((Status::Unauthorized, AuthError::Invalid))
            }
        }
    }
}
