pub mod handler;
pub mod models;
pub mod resolver;
pub mod seed;
pub mod viewer;


// make it easier to just use models
pub use models::*;
pub use resolver::TileResolver;
