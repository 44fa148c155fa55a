use std::time::Duration;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local API server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API base URL (default: `http://localhost:3001`).
    pub api_url: String,
    /// Verbose logging toggle (default: `false`).
    pub debug: bool,
    /// Notification webhook. When unset, notifications are only logged.
    pub webhook_url: Option<String>,
    /// Query cache staleness window in seconds (default: `300`).
    pub stale_secs: u64,
    /// HTTP request timeout in seconds. No timeout unless set.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001".into(),
            debug: false,
            webhook_url: None,
            stale_secs: 300,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `WHEELHOUSE_API_URL`      | `http://localhost:3001` |
    /// | `WHEELHOUSE_DEBUG`        | `false`                 |
    /// | `WHEELHOUSE_WEBHOOK_URL`  | unset                   |
    /// | `WHEELHOUSE_STALE_SECS`   | `300`                   |
    /// | `WHEELHOUSE_TIMEOUT_SECS` | unset                   |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = std::env::var("WHEELHOUSE_API_URL").unwrap_or(defaults.api_url);

        let debug = std::env::var("WHEELHOUSE_DEBUG")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.debug);

        let webhook_url = std::env::var("WHEELHOUSE_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let stale_secs: u64 = std::env::var("WHEELHOUSE_STALE_SECS")
            .unwrap_or_else(|_| defaults.stale_secs.to_string())
            .parse()
            .expect("WHEELHOUSE_STALE_SECS must be a valid u64");

        let timeout_secs = std::env::var("WHEELHOUSE_TIMEOUT_SECS").ok().map(|v| {
            v.parse::<u64>()
                .expect("WHEELHOUSE_TIMEOUT_SECS must be a valid u64")
        });

        Self {
            api_url,
            debug,
            webhook_url,
            stale_secs,
            timeout_secs,
        }
    }

    pub fn stale_window(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// `true`, `1`, `yes` and `on` (any case) enable a flag.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_api() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:3001");
        assert_eq!(config.stale_window(), Duration::from_secs(300));
        assert!(config.timeout().is_none());
        assert!(!config.debug);
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
