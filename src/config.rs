use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// Optional overrides, read from the working directory when present.
pub const CONFIG_FILE: &str = "movielens-genres.toml";

/// What to do with a non-blank line that has too few fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    #[default]
    Skip,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub malformed: MalformedPolicy,
    /// How many records to echo in the progress report.
    pub sample_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("public/u.item"),
            output_path: PathBuf::from("public/movies-with-genres.csv"),
            malformed: MalformedPolicy::Skip,
            sample_size: 5,
        }
    }
}

pub fn load() -> Result<Config> {
    load_from(CONFIG_FILE)
}

/// Loads `path` if it exists, otherwise returns the defaults. Never creates the file.
pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_error = |reason: String| ConvertError::Config {
        path: path.to_path_buf(),
        reason,
    };

    let data = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    let cfg: Config = toml::from_str(&data).map_err(|e| config_error(e.to_string()))?;
    tracing::info!("loaded config from {}", path.display());

    Ok(cfg)
}
