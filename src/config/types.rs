// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub share: ShareConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// Port 0 asks the OS for an ephemeral port (used by tests)
    pub port: u16,
}

/// Share configuration - what gets served and how
#[derive(Debug, Deserialize, Clone)]
pub struct ShareConfig {
    /// Path the mobile build tool writes the package to
    pub apk_path: String,
    /// Directory served for all non-alias requests
    pub static_root: String,
    /// Public alias for the package, e.g. "/app-release.apk".
    /// None means the package is reachable only via its real sub-path.
    #[serde(default)]
    pub alias: Option<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common, or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Materialised routing table, built once from `Config`
#[derive(Debug, Clone)]
pub struct RoutesConfig {
    /// Exact-match routes evaluated before the fallback
    pub custom_routes: HashMap<String, RouteHandler>,
    /// Handler for every path without an exact match
    pub fallback: RouteHandler,
    /// Index files tried when a directory is requested
    pub index_files: Vec<String>,
}

/// Route handler types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteHandler {
    /// Stream a single file with forced attachment headers
    Download {
        path: String,
        filename: String,
        content_type: String,
    },
    /// Serve a directory tree with default static behavior
    Dir { path: String },
}
