pub mod api_handler;
pub mod blob_handler;
