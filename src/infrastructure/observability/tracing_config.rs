const DEFAULT_FILTER: &str = "info,workroom_edge=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output regardless of `json_format`.
    pub fn new(environment: impl Into<String>, json_format: bool, level: Option<&str>) -> Self {
        let env_json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            environment: environment.into(),
            json_format: json_format || env_json,
            default_filter: level
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| format!("{},tower_http=debug", l))
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(
            std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            false,
            None,
        )
    }
}
