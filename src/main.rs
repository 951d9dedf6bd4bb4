#[macro_use]
extern crate rocket;

use std::sync::Arc;

use rocket::{Build, Rocket};

use crate::config::{ContentShareConfig, CONTENT_SHARE_CONFIG};
use crate::files::handler::{get_file, list_files, upload_file};
use crate::handler::{
    api_handler::{api_version, create_session, delete_session},
    blob_handler::get_blob,
};
use crate::identity::SqliteIdentityProvider;
use crate::remote::{DiskBlobStorage, SqliteCollection};
use crate::repository::initialize_db;
use crate::service::Services;
use crate::tiles::handler::{get_tile_target, get_tiles};

mod config;
mod files;
mod guard;
mod handler;
mod identity;
mod model;
mod presentation;
mod remote;
mod repository;
mod service;
mod tiles;
#[cfg(test)]
mod test;

/// sends every log line to stdout as `[timestamp LEVEL target] message`.
/// Runs before config is read, so the configured level is applied afterwards through [`log::set_max_level`]
fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        // rocket is chatty enough on its own
        .level_for("rocket", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

/// unrecognized levels fall back to info
fn log_level(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or(log::LevelFilter::Info)
}

/// wires the sqlite collection, disk blobs and sqlite identities together from config
fn services_from_config(config: &ContentShareConfig) -> Services {
    let location = config.database.location.clone();
    if let Err(e) = initialize_db(&location) {
        panic!("Failed to initialize the database at {location}: {e}");
    }
    Services::new(
        Arc::new(SqliteCollection::new(location.clone())),
        Arc::new(DiskBlobStorage::new(
            config.blobs.directory.clone(),
            &config.blobs.public_base_url,
        )),
        Arc::new(SqliteIdentityProvider::new(location)),
        &config.tiles,
    )
}

/// mounts every route on top of the passed services
pub fn build_rocket(services: Services) -> Rocket<Build> {
    rocket::build()
        .manage(services)
        .mount("/api", routes![api_version, create_session, delete_session])
        .mount("/tiles", routes![get_tiles, get_tile_target])
        .mount("/files", routes![list_files, get_file, upload_file])
        .mount("/blobs", routes![get_blob])
}

#[launch]
fn rocket() -> Rocket<Build> {
    if let Err(e) = setup_logger() {
        eprintln!("Failed to set up logging, continuing without it: {e}");
    }
    // reading config may warn about a missing file, so this comes after the logger is up
    let config = CONTENT_SHARE_CONFIG.clone();
    log::set_max_level(log_level(&config.logging.level));
    log::info!("Starting up with database {}", config.database.location);
    build_rocket(services_from_config(&config))
}
