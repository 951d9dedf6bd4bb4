use thiserror::Error;

/// failures reported by the remote collaborators (document collection, blob storage).
/// Anything that reaches the caller as one of these is considered a remote-access failure
#[derive(Error, PartialEq, Debug, Clone)]
pub enum RemoteError {
    /// the backing store could not be reached or rejected the operation
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
    /// nothing exists at the requested path / id
    #[error("nothing found at {0}")]
    NotFound(String),
    /// the path escapes the storage root or is otherwise unusable
    #[error("invalid storage path {0}")]
    InvalidPath(String),
}

impl From<rusqlite::Error> for RemoteError {
    fn from(value: rusqlite::Error) -> Self {
        RemoteError::Unavailable(value.to_string())
    }
}

impl From<std::io::Error> for RemoteError {
    fn from(value: std::io::Error) -> Self {
        RemoteError::Unavailable(value.to_string())
    }
}

/// a document field holds a value of the wrong json type
#[derive(Error, PartialEq, Debug, Clone)]
#[error("field {field} is not a {expected}")]
pub struct FieldTypeError {
    pub field: String,
    pub expected: &'static str,
}
