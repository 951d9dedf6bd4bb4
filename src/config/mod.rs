use std::time::Duration;

use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
#[serde(crate = "rocket::serde")]
pub struct DbConfig {
    pub location: String,
}

/// config properties for the on-disk blob storage
#[derive(Deserialize, Clone, Debug)]
#[serde(crate = "rocket::serde")]
pub struct BlobConfig {
    pub directory: String,
    /// prefix of every download url handed out, without a trailing slash
    #[serde(rename = "publicbaseurl")]
    pub public_base_url: String,
}

/// config properties for tile resolution
#[derive(Deserialize, Clone, Debug)]
#[serde(crate = "rocket::serde")]
pub struct TileConfig {
    #[serde(rename = "maxvisible")]
    pub max_visible: usize,
    #[serde(rename = "placeholderbaseurl")]
    pub placeholder_base_url: String,
    /// how long to wait before fetching again after a fetch that seeded the collection
    #[serde(rename = "seedretrydelaymillis")]
    pub seed_retry_delay_millis: u64,
}

impl TileConfig {
    pub fn seed_retry_delay(&self) -> Duration {
        Duration::from_millis(self.seed_retry_delay_millis)
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(crate = "rocket::serde")]
pub struct LoggingConfig {
    pub level: String,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ContentShareConfig {
    pub database: DbConfig,
    pub blobs: BlobConfig,
    pub tiles: TileConfig,
    pub logging: LoggingConfig,
}

/// Parses the config file located at ./ContentShare.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> ContentShareConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./ContentShare.toml"))
        .build();
    let settings = match builder {
        Ok(settings) => settings,
        // some errors are fine, such as not found
        Err(ConfigError::Foreign(e)) if e.to_string().contains("not found") => {
            log::warn!("No config file found. Continuing startup...");
            return CS_CONFIG_DEFAULT.clone();
        }
        // basically everything else is unrecoverable, though
        Err(e) => {
            log::error!("Failed to parse config file. Exception is {e}");
            panic!("Failed to parse config file. Exception is {e}");
        }
    };
    settings.try_deserialize().unwrap_or_else(|e| {
        log::warn!("Config file is incomplete ({e}), falling back to defaults");
        CS_CONFIG_DEFAULT.clone()
    })
}

/// global variable for config, that way it doesn't need to be repeatedly parsed.
/// Only startup reads this; everything else gets its values passed in
pub static CONTENT_SHARE_CONFIG: Lazy<ContentShareConfig> = Lazy::new(parse_config);
static CS_CONFIG_DEFAULT: Lazy<ContentShareConfig> = Lazy::new(|| ContentShareConfig {
    database: DbConfig {
        location: "./content_share.sqlite".to_string(),
    },
    blobs: BlobConfig {
        directory: "./blobs".to_string(),
        public_base_url: "http://localhost:8000/blobs".to_string(),
    },
    tiles: TileConfig {
        max_visible: 6,
        placeholder_base_url: "https://picsum.photos".to_string(),
        seed_retry_delay_millis: 1_000,
    },
    logging: LoggingConfig {
        level: "info".to_string(),
    },
});
