// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub page: PageConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level written: error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
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

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
}

/// Page assembly configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PageConfig {
    /// Local file appended verbatim after `</html>`
    pub appended_file: PathBuf,
    /// Path of the project title endpoint on the derived domain
    pub fragment_path: String,
    /// Redirects followed before the fetch is abandoned
    pub max_redirects: usize,
    /// Fetch timeout in seconds; unset waits for the upstream indefinitely
    #[serde(default)]
    pub fetch_timeout: Option<u64>,
    /// `User-Agent` sent upstream; unset sends none
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl PageConfig {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout.map(Duration::from_secs)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            appended_file: PathBuf::from("stops.html"),
            fragment_path: "/export/projtitl.php".to_string(),
            max_redirects: 20,
            fetch_timeout: None,
            user_agent: None,
        }
    }
}
