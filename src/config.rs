//! Server configuration.
//!
//! A [`ServerConfig`] is built once at startup, either through the builder or
//! from the process environment, and handed to [`crate::routes::create_router`].

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::error::ConfigError;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["https://wilovy.com", "https://gofiber.io"];

/// Methods advertised to cross-origin callers.
pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
];

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Only the listed origins get an `Access-Control-Allow-Origin` header.
    AllowList(Vec<HeaderValue>),
    /// Every origin is allowed (`*`).
    Permissive,
}

impl CorsPolicy {
    pub fn allow_list<I, S>(origins: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origins = origins
            .into_iter()
            .map(|origin| {
                let origin = origin.as_ref();
                if origin == "*" {
                    return Err(ConfigError::WildcardInList);
                }
                HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CorsPolicy::AllowList(origins))
    }

    /// Parses a comma separated origin list. A lone `*` means [`CorsPolicy::Permissive`];
    /// `*` next to other origins is an error.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let entries: Vec<&str> = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
        if entries == ["*"] {
            return Ok(CorsPolicy::Permissive);
        }
        Self::allow_list(entries)
    }

    pub fn layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(ALLOWED_METHODS);
        match self {
            CorsPolicy::AllowList(origins) => layer.allow_origin(AllowOrigin::list(origins.iter().cloned())),
            CorsPolicy::Permissive => layer.allow_origin(Any),
        }
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        CorsPolicy::AllowList(
            DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| HeaderValue::from_static(origin))
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Cross-origin policy applied to every route.
    pub cors: CorsPolicy,
    /// Export traces and metrics over OTLP.
    pub otlp_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors: CorsPolicy::default(),
            otlp_enabled: false,
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Reads `BIND_ADDR`, `CORS_ALLOWED_ORIGINS` and `OTEL_EXPORTER_OTLP_ENDPOINT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(raw) = lookup("BIND_ADDR") {
            let addr = raw
                .parse()
                .map_err(|source| ConfigError::InvalidAddr { value: raw.clone(), source })?;
            builder = builder.addr(addr);
        }

        if let Some(raw) = lookup("CORS_ALLOWED_ORIGINS") {
            builder = builder.cors(CorsPolicy::parse(&raw)?);
        }

        let otlp = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").is_some_and(|v| !v.trim().is_empty());
        Ok(builder.otlp_enabled(otlp).build())
    }
}

#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    addr: Option<SocketAddr>,
    cors: Option<CorsPolicy>,
    otlp_enabled: Option<bool>,
}

impl ServerConfigBuilder {
    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    pub fn cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = Some(cors);
        self
    }

    pub fn otlp_enabled(mut self, enabled: bool) -> Self {
        self.otlp_enabled = Some(enabled);
        self
    }

    pub fn build(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            addr: self.addr.unwrap_or(defaults.addr),
            cors: self.cors.unwrap_or(defaults.cors),
            otlp_enabled: self.otlp_enabled.unwrap_or(defaults.otlp_enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_listen_on_port_8000_with_allow_list() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse().unwrap());
        assert_eq!(config.cors, CorsPolicy::allow_list(DEFAULT_ALLOWED_ORIGINS).unwrap());
        assert!(!config.otlp_enabled);
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("CORS_ALLOWED_ORIGINS", " https://a.example , ,https://b.example"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(
            config.cors,
            CorsPolicy::AllowList(vec![
                HeaderValue::from_static("https://a.example"),
                HeaderValue::from_static("https://b.example"),
            ])
        );
        assert!(config.otlp_enabled);
    }

    #[test]
    fn wildcard_selects_permissive_policy() {
        assert_eq!(CorsPolicy::parse(" * ").unwrap(), CorsPolicy::Permissive);
    }

    #[test]
    fn wildcard_mixed_with_origins_is_an_error() {
        let err = CorsPolicy::parse("*,https://a.example").unwrap_err();
        assert!(matches!(err, ConfigError::WildcardInList));

        let err = ServerConfig::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", "https://a.example, *")])).unwrap_err();
        assert!(matches!(err, ConfigError::WildcardInList));
    }

    #[test]
    fn allow_list_rejects_wildcard() {
        assert!(matches!(CorsPolicy::allow_list(["*"]), Err(ConfigError::WildcardInList)));
    }

    #[test]
    fn invalid_bind_addr_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[("BIND_ADDR", ":8000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));
    }

    #[test]
    fn origin_with_control_characters_is_an_error() {
        let err = CorsPolicy::parse("https://ok.example,https://bad\n.example").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin(_)));
    }
}
