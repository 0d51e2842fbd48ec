//! Runtime configuration from the environment.
//!
//! `.env` is loaded first (if present), then individual variables are
//! read with baked-in defaults. Configuration is resolved once at startup
//! and passed down; nothing else reads the environment.

use std::path::PathBuf;

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the SQLite database and the log file.
    pub data_dir: PathBuf,
    /// Tracing filter directive (e.g. `info`, `limone_store=debug`).
    pub log_filter: String,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn load() -> Self {
        // A missing .env file is fine; variables may come from the shell.
        dotenvy::dotenv().ok();

        let data_dir = std::env::var("LIMONE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let log_filter = std::env::var("LIMONE_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            data_dir,
            log_filter,
        }
    }

    /// Path of the SQLite database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("limone.db")
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_is_under_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/limone-test"),
            log_filter: "info".to_string(),
        };
        assert_eq!(config.db_path(), PathBuf::from("/tmp/limone-test/limone.db"));
    }
}
