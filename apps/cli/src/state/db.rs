//! # Database State
//!
//! Opens the numbering database for the commands that issue or administer
//! document numbers. `quote` and `rates` never touch it.
//!
//! ```rust,ignore
//! let db = open_database(&config, None).await?;
//! let number = db.sequences().next(DocumentType::Invoice).await?;
//! ```

use lustre_db::{Database, DbConfig};
use std::path::Path;
use tracing::info;

use super::AppConfig;
use crate::error::CliResult;

/// Opens (creating if needed) the database, `path_override` winning over config.
pub async fn open_database(config: &AppConfig, path_override: Option<&Path>) -> CliResult<Database> {
    let path = match path_override {
        Some(p) => p.to_path_buf(),
        None => config.database_path()?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    info!(path = %path.display(), "Opening numbering database");
    Ok(Database::new(DbConfig::new(path)).await?)
}
