//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default URL for new HTTP requests
pub const DEFAULT_HTTP_URL: &str = "https://httpbin.org/get";

/// Directory under the user's home holding config and the saved-request file
pub const CONFIG_DIR_NAME: &str = ".courier";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Saved-request catalog file name (config directory or working directory)
pub const CATALOG_FILE_NAME: &str = "requests.txt";

/// Log file written to the working directory
pub const LOG_FILE_NAME: &str = "courier.log";

/// Request timeout when the config file does not override it
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Courier TUI";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
