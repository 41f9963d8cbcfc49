//! Gallery settings: defaults, then an optional TOML file, then environment.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::protocol::{Endpoints, DEFAULT_BASE_URL};
use thiserror::Error;

use crate::state::DEFAULT_ITEMS_PER_ROW;

pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PRINT_COMMAND: &str = "lp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySettings {
    pub base_url: String,
    pub items_per_row: usize,
    pub request_timeout_secs: u64,
    pub download_dir: PathBuf,
    pub print_command: String,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            items_per_row: DEFAULT_ITEMS_PER_ROW,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            download_dir: PathBuf::from("."),
            print_command: DEFAULT_PRINT_COMMAND.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    base_url: Option<String>,
    items_per_row: Option<usize>,
    request_timeout_secs: Option<u64>,
    download_dir: Option<PathBuf>,
    print_command: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: String, value: String },
    #[error("items_per_row must be at least 1")]
    ZeroItemsPerRow,
    #[error(transparent)]
    BaseUrl(#[from] shared::error::ValidationError),
}

impl GallerySettings {
    /// Loads `explicit_path` if given (it must exist), otherwise `gallery.toml`
    /// in the working directory when present, then applies the environment.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit_path.map(Path::to_path_buf).or_else(|| {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            fallback.exists().then_some(fallback)
        });
        Self::from_sources(path.as_deref(), |key| std::env::var(key).ok())
    }

    pub fn from_sources<F>(path: Option<&Path>, mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(path) = path {
            let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            settings.apply_toml(path, &raw)?;
        }

        settings.apply_env(&mut lookup)?;
        settings.validate()?;
        Ok(settings)
    }

    fn apply_toml(&mut self, path: &Path, raw: &str) -> Result<(), ConfigError> {
        let file: FileSettings = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(v) = file.base_url {
            self.base_url = v;
        }
        if let Some(v) = file.items_per_row {
            self.items_per_row = v;
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file.download_dir {
            self.download_dir = v;
        }
        if let Some(v) = file.print_command {
            self.print_command = v;
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, lookup: &mut F) -> Result<(), ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(v) = non_empty(lookup("GALLERY_BASE_URL")) {
            self.base_url = v;
        }
        if let Some(v) = non_empty(lookup("APP__BASE_URL")) {
            self.base_url = v;
        }
        if let Some(v) = parse_number::<usize, _>("GALLERY_ITEMS_PER_ROW", lookup)? {
            self.items_per_row = v;
        }
        if let Some(v) = parse_number::<u64, _>("GALLERY_REQUEST_TIMEOUT_SECS", lookup)? {
            self.request_timeout_secs = v;
        }
        if let Some(v) = non_empty(lookup("GALLERY_DOWNLOAD_DIR")) {
            self.download_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty(lookup("GALLERY_PRINT_COMMAND")) {
            self.print_command = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_row == 0 {
            return Err(ConfigError::ZeroItemsPerRow);
        }
        Endpoints::parse(&self.base_url)?;
        Ok(())
    }

    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Ok(Endpoints::parse(&self.base_url)?)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T, F>(key: &str, lookup: &mut F) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: FnMut(&str) -> Option<String>,
{
    let Some(value) = non_empty(lookup(key)) else {
        return Ok(None);
    };
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value,
        })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
