use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tfy_board::DEFAULT_MAX_PHOTO_BYTES;
use tfy_gate::AuthConfig;

use crate::error::{ServerError, ServerResult};

/// Runtime configuration, loadable from a TOML file.
///
/// Every field has a default, so a file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Largest accepted profile photo, in bytes.
    pub max_photo_bytes: usize,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 4741)),
            log_filter: "info,tower_http=debug".into(),
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ServerResult<()> {
        self.auth
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        if self.max_photo_bytes == 0 {
            return Err(ServerError::Config("max_photo_bytes must be positive".into()));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }
}
