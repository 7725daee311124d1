use zchedule_backend::DEFAULT_BACKEND_URL;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, one event per line.
    #[default]
    Pretty,
    /// One JSON object per event, for log shippers.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Upper bound on a whole generate request, in seconds. `None` (the
    /// default) lets the caller wait as long as the backend takes.
    pub request_timeout_secs: Option<u64>,
    /// Base URL of the schedule-generation backend, without trailing slash.
    pub backend_url: String,
    /// Outbound timeout for backend calls. `None` leaves the transport default.
    pub backend_timeout_secs: Option<u64>,
    /// Log output format (default: pretty).
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | unset                      |
    /// | `BACKEND_URL`          | `http://localhost:8000`    |
    /// | `BACKEND_TIMEOUT_SECS` | unset                      |
    /// | `LOG_FORMAT`           | `pretty` (or `json`)       |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through
    /// `lookup`. Panics on unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = var("PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: Option<u64> = var("REQUEST_TIMEOUT_SECS").map(|v| {
            v.parse()
                .expect("REQUEST_TIMEOUT_SECS must be a valid u64")
        });

        let backend_url = var("BACKEND_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.into())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let backend_timeout_secs: Option<u64> = var("BACKEND_TIMEOUT_SECS").map(|v| {
            v.parse()
                .expect("BACKEND_TIMEOUT_SECS must be a valid u64")
        });

        let log_format = var("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v).expect("LOG_FORMAT must be 'pretty' or 'json'"))
            .unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            backend_url,
            backend_timeout_secs,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.backend_timeout_secs, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn blank_backend_url_falls_back_to_default() {
        let config = config_from(&[("BACKEND_URL", "  ")]);
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("BACKEND_URL", "https://scheduler.internal/"),
            ("BACKEND_TIMEOUT_SECS", "90"),
            ("REQUEST_TIMEOUT_SECS", "120"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.backend_url, "https://scheduler.internal");
        assert_eq!(config.backend_timeout_secs, Some(90));
        assert_eq!(config.request_timeout_secs, Some(120));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    #[should_panic(expected = "PORT must be a valid u16")]
    fn invalid_port_fails_fast() {
        config_from(&[("PORT", "eighty")]);
    }

    #[test]
    #[should_panic(expected = "LOG_FORMAT")]
    fn unknown_log_format_fails_fast() {
        config_from(&[("LOG_FORMAT", "xml")]);
    }
}
