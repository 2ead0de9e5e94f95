//! Application configuration, fixed in source.

use crate::logging::default_log_level;
use crate::model::entity::EntityKind;
use std::path::{Path, PathBuf};

/// Database file created in the working directory.
pub const DATABASE_FILE_NAME: &str = "ticket_office.sqlite3";
/// Log directory name under the working directory.
pub const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
    pub collections: Vec<&'static str>,
}

impl AppConfig {
    /// Configuration rooted at `base_dir`.
    pub fn rooted_at(base_dir: &Path) -> Self {
        Self {
            database_path: base_dir.join(DATABASE_FILE_NAME),
            log_level: default_log_level(),
            log_dir: base_dir.join(LOG_DIR_NAME),
            collections: EntityKind::collection_names(),
        }
    }
}
