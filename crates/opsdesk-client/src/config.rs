//! Client configuration.

use std::time::Duration;

use crate::error::ClientError;

/// Environment variable holding the backend base URL.
pub const ENV_BASE_API: &str = "OPSDESK_BASE_API";
/// Environment variable holding the CMDB path prefix.
pub const ENV_CMDB_PREFIX: &str = "OPSDESK_CMDB_PREFIX";
/// Environment variable holding the task service path prefix.
pub const ENV_TASK_PREFIX: &str = "OPSDESK_TASK_PREFIX";
/// Environment variable holding the alert service path prefix.
pub const ENV_ALERT_PREFIX: &str = "OPSDESK_ALERT_PREFIX";
/// Environment variable holding the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "OPSDESK_TIMEOUT_MS";

/// Backend service a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Configuration management database.
    Cmdb,
    /// Distributed task service (executors and agents).
    Task,
    /// Alerting service.
    Alert,
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL shared by all services.
    pub base_url: String,

    /// Path prefix of the CMDB service.
    pub cmdb_prefix: String,

    /// Path prefix of the task service.
    pub task_prefix: String,

    /// Path prefix of the alert service.
    pub alert_prefix: String,

    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            cmdb_prefix: "/api/cmdb".to_string(),
            task_prefix: "/api/task".to_string(),
            alert_prefix: "/api/alert".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = lookup(ENV_BASE_API) {
            config.base_url = v;
        }
        if let Some(v) = lookup(ENV_CMDB_PREFIX) {
            config.cmdb_prefix = v;
        }
        if let Some(v) = lookup(ENV_TASK_PREFIX) {
            config.task_prefix = v;
        }
        if let Some(v) = lookup(ENV_ALERT_PREFIX) {
            config.alert_prefix = v;
        }
        if let Some(v) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = v
                .trim()
                .parse()
                .map_err(|_| ClientError::Config(format!("{ENV_TIMEOUT_MS}={v}")))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ClientError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ClientError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Path prefix for a service.
    pub fn prefix(&self, service: Service) -> &str {
        match service {
            Service::Cmdb => &self.cmdb_prefix,
            Service::Task => &self.task_prefix,
            Service::Alert => &self.alert_prefix,
        }
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of `path` on `service`.
    pub fn url(&self, service: Service, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.prefix(service).trim_end_matches('/'),
            path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_lookup_overrides_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_API, "https://ops.example.com/"),
            (ENV_TASK_PREFIX, "/etask"),
            (ENV_TIMEOUT_MS, "2500"),
        ]);
        let config = ClientConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.cmdb_prefix, "/api/cmdb");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(
            config.url(Service::Task, "/executor/list"),
            "https://ops.example.com/etask/executor/list"
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_timeout = ClientConfig::from_lookup(|k| {
            (k == ENV_TIMEOUT_MS).then(|| "soon".to_string())
        });
        assert!(matches!(bad_timeout, Err(ClientError::Config(_))));

        let bad_url = ClientConfig::from_lookup(|k| {
            (k == ENV_BASE_API).then(|| "ftp://ops".to_string())
        });
        assert!(matches!(bad_url, Err(ClientError::Config(_))));
    }
}
