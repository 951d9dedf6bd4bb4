use thiserror::Error;

#[derive(Error, PartialEq, Debug, Clone)]
pub enum IdentityError {
    #[error("Username and password cannot be empty")]
    BlankCredentials,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    /// no identity exists for the username
    #[error("No account exists for that username")]
    UnknownUser,
    /// the username exists but the password doesn't match
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("An account already exists for that username")]
    AlreadyExists,
    #[error("Identity store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for IdentityError {
    fn from(value: rusqlite::Error) -> Self {
        IdentityError::Unavailable(value.to_string())
    }
}
