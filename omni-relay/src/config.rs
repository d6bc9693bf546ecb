use config::{ConfigError, Environment, Source};
use eyre::{eyre, Result};
use serde::Deserialize;
use std::time::Duration;

/// Service configuration structure
///
/// Built once at startup and shared read-only with the RPC client, the relay
/// and the auth middleware. Nothing reads configuration from anywhere else.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Host address to bind the server to (default: 0.0.0.0)
    pub host: String,

    /// Port to listen on (default: 8000)
    pub port: u16,

    /// Omni daemon JSON-RPC endpoint
    pub rpc_url: String,

    /// Basic auth user for the daemon
    pub rpc_user: String,

    /// Basic auth password for the daemon
    pub rpc_password: String,

    /// Omni property id of the relayed token
    pub asset_id: u64,

    /// Address tokens are sent from
    pub admin_address: String,

    /// Shared secret(s) for `X-API-KEY`, comma separated
    pub api_key: String,

    /// Upper bound on a single upstream call
    pub rpc_timeout_secs: u64,

    /// Number of HTTP worker threads
    pub workers: usize,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Environment Variables
    ///
    /// * `HOST` - Server host address (default: "0.0.0.0")
    /// * `PORT` - Server port (default: 8000)
    /// * `RPC_URL` - Daemon RPC URL (default: "http://127.0.0.1:8332/")
    /// * `RPC_USER` / `RPC_PASSWORD` - Daemon credentials (required)
    /// * `ASSET_ID` - Omni property id (default: 2147483661)
    /// * `ADMIN_ADDRESS` - Source address for sends (required)
    /// * `API_KEY` - Shared secret(s) for `/send` (required)
    /// * `RPC_TIMEOUT_SECS` - Upstream timeout (default: 30)
    /// * `WORKERS` - HTTP workers (default: 4)
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        Self::from_source(Environment::default())
    }

    /// Build configuration from an arbitrary `config` source, applying defaults
    /// and rejecting empty values.
    pub fn from_source<S>(source: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let config: Config = Self::defaults()?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn defaults() -> std::result::Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("rpc_url", "http://127.0.0.1:8332/")?
            .set_default("asset_id", 2147483661i64)?
            .set_default("rpc_timeout_secs", 30)?
            .set_default("workers", 4)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("host", &self.host),
            ("rpc_url", &self.rpc_url),
            ("rpc_user", &self.rpc_user),
            ("rpc_password", &self.rpc_password),
            ("admin_address", &self.admin_address),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(eyre!("configuration value `{}` must not be empty", name));
            }
        }
        if self.api_keys().next().is_none() {
            return Err(eyre!("configuration value `api_key` must not be empty"));
        }
        if self.workers == 0 {
            return Err(eyre!("configuration value `workers` must be at least 1"));
        }
        if self.rpc_timeout_secs == 0 {
            return Err(eyre!("configuration value `rpc_timeout_secs` must be at least 1"));
        }
        Ok(())
    }

    /// Accepted API keys, in configured order
    pub fn api_keys(&self) -> impl Iterator<Item = &str> {
        self.api_key
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
