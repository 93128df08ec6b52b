//! # Runtime Configuration Module
//!
//! Environment-variable configuration for the pipeline.
//!
//! ## Environment Variables
//!
//! ### `ROUTEQ_PORT`
//!
//! Port handed to `Transport::start` at startup. Default: `8080`.
//!
//! ### `ROUTEQ_QUEUE_WARN_DEPTH`
//!
//! Request-queue depth above which the intake step logs a warning. Intake
//! itself is never refused; the warning exists so a host that stops draining
//! shows up in the logs before memory does. Default: `1024`.
//!
//! ## Usage
//!
//! ```rust
//! use routeq::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! assert!(config.queue_warn_depth > 0);
//! ```

use std::env;

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup with [`RuntimeConfig::from_env()`] and pass it to
/// the pipeline constructor.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Port handed to the transport at startup (default: 8080)
    pub port: u16,
    /// Request-queue depth that triggers an intake warning (default: 1024)
    pub queue_warn_depth: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let port = env::var("ROUTEQ_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let queue_warn_depth = env::var("ROUTEQ_QUEUE_WARN_DEPTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1024);

        Self {
            port,
            queue_warn_depth,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            queue_warn_depth: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.queue_warn_depth, 1024);
    }
}
