//! Source table loading.
//!
//! The two CSV exports are the source of truth:
//! - Round-level match records (one row per team-map instance)
//! - Player-level records (one row per player-agent-map instance)
//!
//! Schema validation happens once here so the aggregation layer only ever
//! sees typed values.

use std::path::PathBuf;

use thiserror::Error;

mod tables;

pub use tables::{load_picks, load_rounds, read_picks, read_rounds};

/// Errors that can occur while loading the source tables.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV decode error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

/// Configuration for table paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub rounds_file: String,
    pub players_file: String,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            rounds_file: "rounds.csv".to_string(),
            players_file: "players.csv".to_string(),
        }
    }

    pub fn rounds_path(&self) -> PathBuf {
        self.data_dir.join(&self.rounds_file)
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join(&self.players_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.rounds_path(), PathBuf::from("/data/rounds.csv"));
        assert_eq!(config.players_path(), PathBuf::from("/data/players.csv"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_storage_config_custom_files() {
        let mut config = StorageConfig::new(PathBuf::from("/data"));
        config.rounds_file = "cleaned_score.csv".to_string();
        assert_eq!(
            config.rounds_path(),
            PathBuf::from("/data/cleaned_score.csv")
        );
    }
}
