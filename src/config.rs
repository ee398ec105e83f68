// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! Every setting has a local-development default. Values that are present
//! but malformed are treated as deployment errors and fail startup.

use anyhow::Result;
use std::net::SocketAddr;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable, falling back to a default string.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key).unwrap_or_else(|_| $default.to_string())
    };
}

/// Reads an optional environment variable and parses it.
///
/// A missing variable yields the provided default. A present value that
/// does not parse is a deployment error naming the variable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        match std::env::var($key) {
            Ok(raw) => raw.parse::<$ty>().map_err(|err| {
                anyhow::anyhow!(concat!("Invalid configuration: ", $key, "={:?} ({})"), raw, err)
            })?,
            Err(_) => $default,
        }
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails and names the offending
/// environment variable in its error.
macro_rules! assert_invalid_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Invalid configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo: mongo::MongoConfig,
    pub http: http::HttpConfig,
    pub metrics: metrics::MetricsConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any configured value is invalid.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            mongo: mongo::MongoConfig::from_env()?,
            http: http::HttpConfig::from_env()?,
            metrics: metrics::MetricsConfig::from_env()?,
        })
    }
}

// ============================================================
// MongoDB configuration
// ============================================================

mod mongo {
    // ---
    use super::*;

    pub const DEFAULT_URI: &str = "mongodb://localhost:27017/tech_challenge";

    /// Document store settings for visit persistence.
    #[derive(Debug, Clone)]
    pub struct MongoConfig {
        /// MongoDB connection string.
        pub uri: String,

        /// Database used when the URI does not name one. Defaults to `tech_challenge`.
        pub database: String,

        /// Collection receiving visit documents. Defaults to `visits`.
        pub collection: String,
    }

    impl MongoConfig {
        /// Builds a [`MongoConfig`] from environment variables.
        pub fn from_env() -> Result<Self> {
            // ---
            Ok(Self {
                uri: optional_env!("MONGODB_URI", DEFAULT_URI),
                database: optional_env!("VISITOR_MONGODB_DATABASE", "tech_challenge"),
                collection: optional_env!("VISITOR_MONGODB_COLLECTION", "visits"),
            })
        }
    }
}
pub use mongo::MongoConfig;

// ============================================================
// HTTP configuration
// ============================================================

mod http {
    // ---
    use super::*;

    /// Listener and request-interpretation settings.
    #[derive(Debug, Clone)]
    pub struct HttpConfig {
        /// Socket address the server binds to. Defaults to `127.0.0.1:3000`.
        pub bind_addr: SocketAddr,

        /// Whether forwarding headers set by a reverse proxy name the client.
        ///
        /// When false the client address always comes from the socket.
        pub trust_proxy: bool,
    }

    impl HttpConfig {
        /// Builds an [`HttpConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `API_BIND_ADDR` is set but is not a socket address,
        /// or if `VISITOR_TRUST_PROXY` is set but is not `true` or `false`.
        pub fn from_env() -> Result<Self> {
            // ---
            let bind_addr = optional_env_parse!(
                "API_BIND_ADDR",
                SocketAddr,
                SocketAddr::from(([127, 0, 0, 1], 3000))
            );
            let trust_proxy = optional_env_parse!("VISITOR_TRUST_PROXY", bool, false);

            Ok(Self {
                bind_addr,
                trust_proxy,
            })
        }
    }
}
pub use http::HttpConfig;

// ============================================================
// Metrics configuration
// ============================================================

mod metrics {
    // ---
    use super::*;

    /// Which metrics backend records request samples.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsBackend {
        /// Prometheus registry rendered at `/metrics`.
        Prometheus,
        /// Discard every sample.
        Noop,
    }

    #[derive(Debug, Clone)]
    pub struct MetricsConfig {
        pub backend: MetricsBackend,
    }

    impl MetricsConfig {
        /// Builds a [`MetricsConfig`] from `VISITOR_METRICS_TYPE` (`prom` or `noop`).
        ///
        /// # Errors
        /// Returns an error for any other value.
        pub fn from_env() -> Result<Self> {
            // ---
            let raw = optional_env!("VISITOR_METRICS_TYPE", "prom");
            let backend = match raw.as_str() {
                "prom" => MetricsBackend::Prometheus,
                "noop" => MetricsBackend::Noop,
                other => anyhow::bail!(
                    "Invalid configuration: VISITOR_METRICS_TYPE={other:?} (expected \"prom\" or \"noop\")"
                ),
            };

            Ok(Self { backend })
        }
    }
}
pub use self::metrics::{MetricsBackend, MetricsConfig};

// ============================================================
// Tests
// ============================================================
