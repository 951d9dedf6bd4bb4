use thiserror::Error;

use super::remote_errors::RemoteError;

#[derive(Error, PartialEq, Debug, Clone)]
pub enum UploadError {
    /// there's no identity to own the file
    #[error("no identity is signed in")]
    NotSignedIn,
    /// nothing usable was left of the file name after sanitizing it
    #[error("the file name {0} is not allowed")]
    InvalidFileName(String),
    /// the bytes couldn't be written to blob storage or its url couldn't be resolved
    #[error("failed to store file: {0}")]
    Storage(RemoteError),
    /// the bytes were stored but the file record couldn't be written
    #[error("failed to save file record: {0}")]
    Record(RemoteError),
}
