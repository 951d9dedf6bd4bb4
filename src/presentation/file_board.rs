use std::sync::Arc;

use rocket::tokio::sync::watch;

use crate::files::{FileListing, FileRecord, FileUploader, Visibility};
use crate::identity::{Credentials, Identity, IdentityProvider, SignInOutcome};
use crate::model::error::file_errors::UploadError;
use crate::model::error::identity_errors::IdentityError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileBoardState {
    /// `None` while logged out
    pub current_identity: Option<Identity>,
    pub files: Vec<FileRecord>,
    pub is_loading: bool,
    /// the latest user-facing message, empty when there's nothing to say
    pub message: String,
}

/// A single session's view of the shared files. Handlers build one per request, signed in as
/// whoever the request authenticated as
pub struct FileBoard {
    identities: Arc<dyn IdentityProvider>,
    listing: Arc<FileListing>,
    uploader: Arc<FileUploader>,
    state: watch::Sender<FileBoardState>,
}

impl FileBoard {
    pub fn new(
        identities: Arc<dyn IdentityProvider>,
        listing: Arc<FileListing>,
        uploader: Arc<FileUploader>,
    ) -> Self {
        let (state, _) = watch::channel(FileBoardState::default());
        Self {
            identities,
            listing,
            uploader,
            state,
        }
    }

    pub fn snapshot(&self) -> FileBoardState {
        self.state.borrow().clone()
    }

    fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().current_identity.clone()
    }

    fn set_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.state.send_modify(|state| state.message = message);
    }

    /// a board that starts out signed in, for callers that already authenticated `identity`
    pub fn with_identity(self, identity: Identity) -> Self {
        self.state
            .send_modify(|state| state.current_identity = Some(identity));
        self
    }

    /// signs in (or creates the account on first use), then loads the files
    pub async fn login(&self, credentials: Credentials) -> Result<Identity, IdentityError> {
        self.clear_message();
        self.state.send_modify(|state| state.is_loading = true);
        let signed_in = self
            .identities
            .sign_in_or_create(&credentials)
            .await
            .map(|outcome| match outcome {
                SignInOutcome::SignedIn(identity) => (identity, "Welcome back!"),
                SignInOutcome::Created(identity) => (identity, "Account created successfully!"),
            });
        let result = match signed_in {
            Ok((identity, message)) => {
                let current = identity.clone();
                self.state.send_modify(|state| {
                    state.current_identity = Some(current);
                    state.message = message.to_string();
                });
                self.refresh().await;
                Ok(identity)
            }
            Err(e) => {
                self.set_message(format!("Login failed: {e}"));
                Err(e)
            }
        };
        self.state.send_modify(|state| state.is_loading = false);
        result
    }

    pub fn logout(&self) {
        self.state.send_modify(|state| {
            state.current_identity = None;
            state.files = Vec::new();
            state.message = "Logged out successfully".to_string();
        });
    }

    /// uploads a file for the current identity, then reloads the files
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        visibility: Visibility,
    ) -> Result<FileRecord, UploadError> {
        self.clear_message();
        let Some(owner) = self.current_identity() else {
            self.set_message("Please login first");
            return Err(UploadError::NotSignedIn);
        };
        self.state.send_modify(|state| state.is_loading = true);
        let result = self.uploader.upload(&owner, file_name, bytes, visibility).await;
        match &result {
            Ok(_) => {
                self.set_message("File uploaded successfully!");
                self.refresh().await;
            }
            Err(e) => self.set_message(format!("Upload failed: {e}")),
        }
        self.state.send_modify(|state| state.is_loading = false);
        result
    }

    /// reloads the files for whoever is logged in right now
    pub async fn refresh(&self) {
        let viewer = self.current_identity();
        let files = self.listing.load_files(viewer.as_ref()).await;
        self.state.send_modify(|state| state.files = files);
    }

    pub fn clear_message(&self) {
        self.set_message(String::new());
    }
}
