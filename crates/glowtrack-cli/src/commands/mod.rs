pub mod config;
pub mod profile;
pub mod reports;
pub mod routine;

use glowtrack_core::{Config, Database};

/// Open the database named by the current configuration.
pub fn open_database() -> Result<(Config, Database), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open(&config)?;
    Ok((config, db))
}
