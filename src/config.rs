//! Logger configuration
//!
//! Fixed at construction. `from_env` reads the same variables the services
//! have always used.

use serde::{Deserialize, Serialize};

/// Remote syslog endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyslogConfig {
    /// `host:port` of the syslog receiver
    pub host_and_port: String,

    /// Hostname reported in each frame
    #[serde(default = "default_syslog_name")]
    pub name: String,

    /// Program reported in each frame
    #[serde(default = "default_syslog_program")]
    pub program: String,
}

/// Settings for a `Logger`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Console (and syslog) verbosity floor
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// IANA timezone of console timestamps
    #[serde(default = "default_timestamp_timezone")]
    pub timestamp_timezone: String,

    /// Least severe level forwarded to the bus
    #[serde(default = "default_remote_log_level")]
    pub remote_log_level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syslog: Option<SyslogConfig>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timestamp_timezone() -> String {
    "Europe/Stockholm".to_string()
}

fn default_remote_log_level() -> String {
    "error".to_string()
}

fn default_syslog_name() -> String {
    "syslog-name-na".to_string()
}

fn default_syslog_program() -> String {
    "syslog-program-na".to_string()
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            timestamp_timezone: default_timestamp_timezone(),
            remote_log_level: default_remote_log_level(),
            syslog: None,
        }
    }
}

impl LoggerConfig {
    /// Read `LOG_LEVEL`, `LOG_TIMESTAMP_TIMEZONE`, `REMOTE_LOG_LEVEL`,
    /// `SYSLOG`, `SYSLOG_NAME` and `SYSLOG_PROGRAM`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let syslog = get("SYSLOG").map(|host_and_port| SyslogConfig {
            host_and_port,
            name: get("SYSLOG_NAME").unwrap_or_else(default_syslog_name),
            program: get("SYSLOG_PROGRAM").unwrap_or_else(default_syslog_program),
        });

        Self {
            log_level: get("LOG_LEVEL").unwrap_or_else(default_log_level),
            timestamp_timezone: get("LOG_TIMESTAMP_TIMEZONE")
                .unwrap_or_else(default_timestamp_timezone),
            remote_log_level: get("REMOTE_LOG_LEVEL").unwrap_or_else(default_remote_log_level),
            syslog,
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timestamp_timezone = timezone.into();
        self
    }

    pub fn with_remote_log_level(mut self, level: impl Into<String>) -> Self {
        self.remote_log_level = level.into();
        self
    }
}
