use std::backtrace::Backtrace;

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};

use crate::identity::{Credentials, Identity, IdentityProvider};
use crate::model::error::identity_errors::IdentityError;
use crate::repository::open_connection;

/// [`IdentityProvider`] backed by the `identities` table
pub struct SqliteIdentityProvider {
    location: String,
}

/// (uid, display name, credential hash)
type IdentityRow = (String, String, String);

impl SqliteIdentityProvider {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    fn connection(&self) -> Result<Connection, IdentityError> {
        open_connection(&self.location).map_err(|e| {
            log::error!(
                "Failed to open identity database at {}! Error is {e:?}\n{}",
                self.location,
                Backtrace::force_capture()
            );
            IdentityError::from(e)
        })
    }

    fn find_by_username(con: &Connection, username: &str) -> Result<Option<IdentityRow>, IdentityError> {
        let row = con
            .query_row(
                include_str!("../assets/queries/identities/get_by_username.sql"),
                rusqlite::params![username],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        Ok(row)
    }
}

#[async_trait]
impl IdentityProvider for SqliteIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, IdentityError> {
        credentials.validate()?;
        let con = self.connection()?;
        let row = Self::find_by_username(&con, &credentials.username);
        con.close().map_err(|(_, e)| IdentityError::from(e))?;
        match row? {
            None => Err(IdentityError::UnknownUser),
            Some((uid, display_name, hash)) if hash == credentials.hash() => {
                Ok(Identity { uid, display_name })
            }
            Some(_) => {
                log::info!("Rejected sign in for {}", credentials.username);
                Err(IdentityError::InvalidCredentials)
            }
        }
    }

    async fn create(&self, credentials: &Credentials) -> Result<Identity, IdentityError> {
        credentials.validate_new()?;
        let con = self.connection()?;
        if Self::find_by_username(&con, &credentials.username)?.is_some() {
            con.close().map_err(|(_, e)| IdentityError::from(e))?;
            return Err(IdentityError::AlreadyExists);
        }
        let identity = Identity {
            uid: uuid::Uuid::new_v4().simple().to_string(),
            display_name: credentials.username.clone(),
        };
        con.execute(
            include_str!("../assets/queries/identities/create_identity.sql"),
            rusqlite::params![
                identity.uid,
                credentials.username,
                identity.display_name,
                credentials.hash()
            ],
        )?;
        con.close().map_err(|(_, e)| IdentityError::from(e))?;
        log::info!("Created identity {} for {}", identity.uid, credentials.username);
        Ok(identity)
    }
}
