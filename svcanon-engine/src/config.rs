use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use svcanon_core::consts::DEFAULT_SV_MIN_SIZE;

/// Files backing one auxiliary annotation track.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct AnnotationTrack {
    pub label: String,
    /// The file as downloaded from its provider.
    pub downloaded: PathBuf,
    /// The file after formatting for annotation.
    pub formatted: PathBuf,
}

///
/// Settings for one normalization run.
///
/// Every field is optional in the TOML file; missing fields take the defaults.
///
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(default)]
pub struct RunConfig {
    /// Sequence-notation events shorter than this are indels, not SVs.
    #[serde(alias = "SVminSize")]
    pub sv_min_size: u64,
    /// Widen intervals with CIPOS/CIEND.
    #[serde(alias = "includeCI")]
    pub include_ci: bool,
    /// Carry every input column from ID onward, instead of only REF, ALT and FORMAT.
    #[serde(alias = "SVinputInfo")]
    pub sv_input_info: bool,
    /// Emit the comma-separated carrier samples column.
    pub samples_id: bool,
    pub annotation_tracks: Vec<AnnotationTrack>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            sv_min_size: DEFAULT_SV_MIN_SIZE,
            include_ci: true,
            sv_input_info: true,
            samples_id: true,
            annotation_tracks: Vec::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("SV minimum size must be at least 1, got {0}")]
    InvalidMinSize(u64),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl RunConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sv_min_size < 1 {
            return Err(ConfigError::InvalidMinSize(self.sv_min_size));
        }
        Ok(())
    }
}

impl TryFrom<&Path> for RunConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: RunConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
