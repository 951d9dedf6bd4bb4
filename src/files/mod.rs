pub mod handler;
pub mod listing;
pub mod models;
pub mod upload;

#[cfg(test)]
mod tests;

pub use listing::FileListing;
pub use models::*;
pub use upload::FileUploader;
