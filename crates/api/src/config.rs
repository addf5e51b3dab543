//! Process configuration read from the environment.

use std::net::SocketAddr;

use thiserror::Error;

use sale_revoke_sales::RevokeVariant;

pub const BIND_ADDR_VAR: &str = "SALE_REVOKE_BIND_ADDR";
pub const VARIANT_VAR: &str = "SALE_REVOKE_VARIANT";
pub const SEED_DEMO_VAR: &str = "SALE_REVOKE_SEED_DEMO";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address '{value}'")]
    BindAddr { var: &'static str, value: String },

    #[error("{var}: {message}")]
    Variant { var: &'static str, message: String },

    #[error("{var}: expected a boolean, got '{value}'")]
    Flag { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Rule set for revocation and pending orders; fixed for the process.
    pub variant: RevokeVariant,
    /// Populate the in-memory store with demo orders on startup.
    pub seed_demo: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError::BindAddr {
            var: BIND_ADDR_VAR,
            value: raw_addr.clone(),
        })?;

        let variant = match lookup(VARIANT_VAR) {
            Some(raw) => raw.parse().map_err(|e: sale_revoke_core::DomainError| ConfigError::Variant {
                var: VARIANT_VAR,
                message: e.to_string(),
            })?,
            None => RevokeVariant::default(),
        };

        let seed_demo = match lookup(SEED_DEMO_VAR) {
            None => true,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::Flag { var: SEED_DEMO_VAR, value: raw }),
            },
        };

        Ok(Self {
            bind_addr,
            variant,
            seed_demo,
        })
    }
}
