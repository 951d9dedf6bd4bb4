use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::model::error::identity_errors::IdentityError;

mod sqlite_provider;

pub use sqlite_provider::SqliteIdentityProvider;

/// passwords for new identities must be at least this long
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// the authenticated principal making a request. Used for ownership and private visibility checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub display_name: String,
}

/// how [`IdentityProvider::sign_in_or_create`] got hold of its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn(Identity),
    Created(Identity),
}

/// a username / password pair
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        }
    }

    /// checks that neither half of the credentials is blank
    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(IdentityError::BlankCredentials);
        }
        Ok(())
    }

    /// same as [`Credentials::validate`], plus the rules a brand-new password has to follow
    pub fn validate_new(&self) -> Result<(), IdentityError> {
        self.validate()?;
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityError::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }
        Ok(())
    }

    /// sha256 of `username:password`, hex-encoded. This is what gets stored, never the password
    pub fn hash(&self) -> String {
        let combined = format!("{}:{}", self.username, self.password);
        format!("{:x}", Sha256::digest(combined.as_bytes()))
    }
}

/// An external identity provider. Tiles don't need one at all; file listing and uploading
/// only ever see the [`Identity`] it hands back.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// signs in an existing identity. Fails with [`IdentityError::UnknownUser`] if there's no such username
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, IdentityError>;

    /// creates a brand-new identity whose display name is the username
    async fn create(&self, credentials: &Credentials) -> Result<Identity, IdentityError>;

    /// signs in, or creates the identity if the username has never been seen.
    /// A known username with the wrong password is still an error
    async fn sign_in_or_create(
        &self,
        credentials: &Credentials,
    ) -> Result<SignInOutcome, IdentityError> {
        match self.sign_in(credentials).await {
            Ok(identity) => Ok(SignInOutcome::SignedIn(identity)),
            Err(IdentityError::UnknownUser) => {
                self.create(credentials).await.map(SignInOutcome::Created)
            }
            Err(e) => Err(e),
        }
    }
}
