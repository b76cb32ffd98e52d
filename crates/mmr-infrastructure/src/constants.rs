//! Infrastructure constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "mmr.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "mmr";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "MMR";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "MMR_LOG";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 5;

/// Log file name prefix when the configured path has no file stem
pub const LOG_FILE_PREFIX: &str = "mmr";
