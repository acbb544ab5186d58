//! Access log format module
//!
//! Supports multiple log formats:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format - CLF)
//! - `json` (one JSON object per line)
//! - Custom patterns with `$variables`

use chrono::{DateTime, Local};
use serde_json::json;

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Custom pattern variables; `$request_*` precede `$request`
const VARIABLES: [&str; 12] = [
    "$remote_addr",
    "$time_local",
    "$time_iso8601",
    "$request_time",
    "$request_method",
    "$request_uri",
    "$request",
    "$host",
    "$status",
    "$body_bytes_sent",
    "$http_referer",
    "$http_user_agent",
];

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: DateTime<Local>,
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Host the page was rendered for
    pub host: Option<String>,
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            host: None,
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => format!(
                "{} \"{}\" \"{}\"",
                self.format_common(),
                dash_if_none(self.referer.as_deref()),
                dash_if_none(self.user_agent.as_deref()),
            ),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    fn request_line(&self) -> String {
        format!(
            "{} {} HTTP/{}",
            self.method,
            self.request_uri(),
            self.http_version
        )
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "host": self.host,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables: `$remote_addr`, `$time_local`, `$time_iso8601`,
    /// `$request`, `$request_method`, `$request_uri`, `$request_time`
    /// (seconds, 3 decimals), `$host`, `$status`, `$body_bytes_sent`,
    /// `$http_referer`, `$http_user_agent`. The pattern is scanned once, so
    /// substituted values are never expanded again.
    fn format_custom(&self, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len());
        let mut rest = pattern;
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];
            match VARIABLES.iter().find(|name| rest.starts_with(**name)) {
                Some(name) => {
                    out.push_str(&self.variable(name));
                    rest = &rest[name.len()..];
                }
                None => {
                    out.push('$');
                    rest = &rest[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn variable(&self, name: &str) -> String {
        match name {
            "$remote_addr" => self.remote_addr.clone(),
            "$time_local" => self.time.format(CLF_TIME).to_string(),
            "$time_iso8601" => self.time.to_rfc3339(),
            "$request_time" => {
                #[allow(clippy::cast_precision_loss)]
                let request_time = self.request_time_us as f64 / 1_000_000.0;
                format!("{request_time:.3}")
            }
            "$request_method" => self.method.clone(),
            "$request_uri" => self.request_uri(),
            "$request" => self.request_line(),
            "$host" => dash_if_none(self.host.as_deref()).to_string(),
            "$status" => self.status.to_string(),
            "$body_bytes_sent" => self.body_bytes.to_string(),
            "$http_referer" => dash_if_none(self.referer.as_deref()).to_string(),
            "$http_user_agent" => dash_if_none(self.user_agent.as_deref()).to_string(),
            _ => String::new(),
        }
    }
}

fn dash_if_none(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
