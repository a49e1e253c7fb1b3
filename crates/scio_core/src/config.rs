//! Store configuration.
//!
//! # Responsibility
//! - Hold the store root and logging settings.
//! - Read them from `SCIO_ROOT`, `SCIO_LOG_LEVEL` and `SCIO_LOG_DIR`.
//!
//! # Invariants
//! - `root_dir` and `log_dir` are absolute.
//! - `log_level` is one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, init_logging, normalize_dir, normalize_level};
use crate::service::KnowledgeService;
use crate::storage::{LocalFileSystem, Storage, StorageError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ROOT_ENV: &str = "SCIO_ROOT";
pub const LOG_LEVEL_ENV: &str = "SCIO_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SCIO_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, message: String },
    Logging(String),
    Storage(StorageError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::Invalid { key, message } => write!(f, "invalid `{key}`: {message}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for ConfigError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub root_dir: PathBuf,
    pub log_level: &'static str,
    /// File logging is only started when set.
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Config for `root_dir` with the build's default log level and no file
    /// logging.
    pub fn new(root_dir: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            root_dir: normalize_dir(root_dir, ROOT_ENV).map_err(|message| {
                ConfigError::Invalid {
                    key: ROOT_ENV,
                    message,
                }
            })?,
            log_level: default_log_level(),
            log_dir: None,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; empty values count as unset.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let root = read(ROOT_ENV).ok_or(ConfigError::Missing(ROOT_ENV))?;
        let mut config = Self::new(&root)?;

        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(|message| {
                ConfigError::Invalid {
                    key: LOG_LEVEL_ENV,
                    message,
                }
            })?;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = Some(normalize_dir(&dir, LOG_DIR_ENV).map_err(|message| {
                ConfigError::Invalid {
                    key: LOG_DIR_ENV,
                    message,
                }
            })?);
        }
        Ok(config)
    }

    /// Starts logging if configured, prepares the root layout and returns a
    /// ready service over the local disk.
    pub fn open(&self) -> Result<KnowledgeService<LocalFileSystem>, ConfigError> {
        if let Some(log_dir) = &self.log_dir {
            init_logging(self.log_level, &log_dir.to_string_lossy())
                .map_err(ConfigError::Logging)?;
        }
        let storage = Storage::local(&self.root_dir);
        storage.init_roots()?;
        Ok(KnowledgeService::new(storage))
    }
}
