//! Shell configuration resolved from CLI flags and environment

use std::path::{Path, PathBuf};

/// Default account file location
pub const DEFAULT_DATA_FILE: &str = "data/accounts.json";

/// Environment variable overriding the account file location
pub const DATA_FILE_ENV: &str = "CASHDESK_DATA_FILE";

/// Runtime configuration for the interactive shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Account file read at startup and written on save
    pub data_file: PathBuf,
}

impl ShellConfig {
    pub fn new(data_file: impl AsRef<Path>) -> Self {
        Self {
            data_file: data_file.as_ref().to_path_buf(),
        }
    }

    /// Resolve the account file: explicit flag, then `CASHDESK_DATA_FILE`,
    /// then [`DEFAULT_DATA_FILE`].
    pub fn resolve(data_file: Option<PathBuf>) -> Self {
        Self::from_sources(data_file, std::env::var(DATA_FILE_ENV).ok())
    }

    fn from_sources(flag: Option<PathBuf>, env: Option<String>) -> Self {
        let data_file = flag
            .or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Self { data_file }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}
