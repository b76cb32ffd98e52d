//! Configuration types

use std::collections::BTreeMap;
use std::path::PathBuf;

use mmr_application::PipelineConfig;
use mmr_providers::constants::FFMPEG_BINARY;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_MAX_FILES};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Extraction pipeline settings
    pub pipeline: PipelineConfig,
    /// Audio extraction settings
    pub audio: AudioConfig,
    /// Component configuration tree, keyed by category name
    ///
    /// Each value holds `implementation_type` plus one section per
    /// implementation name.
    pub components: BTreeMap<String, Value>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to file in addition to the console
    pub file_output: Option<PathBuf>,

    /// Maximum number of rotated files to keep
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
            max_files: LOG_MAX_FILES,
        }
    }
}

/// Audio extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// ffmpeg binary, as a path or a name on `PATH`
    pub ffmpeg_path: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(FFMPEG_BINARY),
        }
    }
}
