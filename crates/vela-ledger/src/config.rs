//! # Gateway Configuration
//!
//! Configuration for the remote service clients.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     VELA_LEDGER_URL=https://ledger.internal                             │
//! │     VELA_SHIPPING_URL=https://shipping.internal                         │
//! │     VELA_HTTP_TIMEOUT_SECS=10                                           │
//! │     VELA_SEARCH_DEBOUNCE_MS=400                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     gateway.toml next to the deployment                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # gateway.toml
//! [ledger]
//! base_url = "https://ledger.internal"
//! bearer_token = "..."     # optional
//!
//! [shipping]
//! base_url = "https://shipping.internal"
//!
//! [client]
//! timeout_secs = 10
//! search_debounce_ms = 400
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};

/// Default HTTP timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default quiet period for search debouncing.
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 400;

// =============================================================================
// Gateway Config
// =============================================================================

/// Endpoint and client settings for all remote collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub ledger: LedgerEndpoint,
    pub shipping: ShippingEndpoint,
    pub client: ClientSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerEndpoint {
    pub base_url: String,
    pub bearer_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingEndpoint {
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub timeout_secs: u64,
    pub search_debounce_ms: u64,
}

impl Default for LedgerEndpoint {
    fn default() -> Self {
        LedgerEndpoint {
            base_url: "http://localhost:8080".to_string(),
            bearer_token: None,
        }
    }
}

impl Default for ShippingEndpoint {
    fn default() -> Self {
        ShippingEndpoint {
            base_url: "http://localhost:8081".to_string(),
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            ledger: LedgerEndpoint::default(),
            shipping: ShippingEndpoint::default(),
            client: ClientSettings::default(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration: file (if present) layered under environment
    /// variable overrides, defaults at the bottom.
    pub fn load(path: Option<&Path>) -> LedgerResult<Self> {
        let mut config = match path {
            Some(p) if p.exists() => {
                debug!(path = %p.display(), "Loading gateway config file");
                let raw = std::fs::read_to_string(p).map_err(|e| {
                    LedgerError::MalformedResponse(format!("cannot read config: {}", e))
                })?;
                toml::from_str(&raw).map_err(|e| {
                    LedgerError::MalformedResponse(format!("cannot parse config: {}", e))
                })?
            }
            Some(p) => {
                warn!(path = %p.display(), "Config file not found, using defaults");
                GatewayConfig::default()
            }
            None => GatewayConfig::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment variables win over the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("VELA_LEDGER_URL") {
            self.ledger.base_url = url;
        }
        if let Ok(token) = std::env::var("VELA_LEDGER_TOKEN") {
            self.ledger.bearer_token = Some(token);
        }
        if let Ok(url) = std::env::var("VELA_SHIPPING_URL") {
            self.shipping.base_url = url;
        }
        if let Ok(secs) = std::env::var("VELA_HTTP_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(v) => self.client.timeout_secs = v,
                Err(_) => warn!(value = %secs, "Ignoring invalid VELA_HTTP_TIMEOUT_SECS"),
            }
        }
        if let Ok(ms) = std::env::var("VELA_SEARCH_DEBOUNCE_MS") {
            match ms.parse() {
                Ok(v) => self.client.search_debounce_ms = v,
                Err(_) => warn!(value = %ms, "Ignoring invalid VELA_SEARCH_DEBOUNCE_MS"),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = GatewayConfig::default();
        assert_eq!(c.client.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(c.client.search_debounce_ms, DEFAULT_SEARCH_DEBOUNCE_MS);
        assert!(c.ledger.bearer_token.is_none());
    }

    #[test]
    fn test_parse_partial_file() {
        let raw = r#"
            [ledger]
            base_url = "https://ledger.example"

            [client]
            timeout_secs = 5
        "#;
        let c: GatewayConfig = toml::from_str(raw).unwrap();
        assert_eq!(c.ledger.base_url, "https://ledger.example");
        assert_eq!(c.client.timeout_secs, 5);
        // Unspecified sections fall back to defaults
        assert_eq!(c.client.search_debounce_ms, DEFAULT_SEARCH_DEBOUNCE_MS);
        assert_eq!(c.shipping.base_url, "http://localhost:8081");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let c = GatewayConfig::load(Some(Path::new("/nonexistent/gateway.toml"))).unwrap();
        assert_eq!(c.ledger.base_url, GatewayConfig::default().ledger.base_url);
    }
}
