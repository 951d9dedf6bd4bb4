pub mod file_errors;
pub mod identity_errors;
pub mod remote_errors;
pub mod tile_errors;
