/// Configuration default values
///
/// Rule table defaults live with the tables in `normalization::tables`;
/// this module only holds the scalar settings.
// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Import defaults
pub const DEFAULT_STARTING_NUMBER: u32 = 1;

// Config file
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

pub fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

pub fn default_starting_number() -> u32 {
    DEFAULT_STARTING_NUMBER
}
