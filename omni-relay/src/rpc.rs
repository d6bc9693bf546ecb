use crate::{config::Config, error::ServiceError, models::jsonrpc::JsonRpcRequest};
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// JSON-RPC client for the Omni daemon
///
/// Every call is a single HTTP POST with basic auth. There are no retries:
/// a transport failure or an unreadable reply is returned to the caller at once.
#[derive(Clone)]
pub struct OmniClient {
    /// Pooled HTTP client, shared by all calls
    http: Client,
    rpc_url: String,
    rpc_user: String,
    rpc_password: String,
}

impl OmniClient {
    /// Create a client for the daemon at `rpc_url`
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - Daemon JSON-RPC endpoint
    /// * `rpc_user` / `rpc_password` - Basic auth credentials
    /// * `timeout` - Bound on a whole request, connect included
    pub fn new(
        rpc_url: &str,
        rpc_user: &str,
        rpc_password: &str,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::RpcConnection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            rpc_url: rpc_url.to_string(),
            rpc_user: rpc_user.to_string(),
            rpc_password: rpc_password.to_string(),
        })
    }

    /// Create a client from the service configuration
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        Self::new(
            &config.rpc_url,
            &config.rpc_user,
            &config.rpc_password,
            config.rpc_timeout(),
        )
    }

    /// Call `method` with positional `params` and return the daemon's reply
    ///
    /// The reply is the full JSON-RPC envelope exactly as the daemon sent it,
    /// including replies that carry an `error` object. The HTTP status is
    /// ignored because bitcoind-style daemons report RPC errors with a 500.
    #[instrument(skip(self, params), err)]
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ServiceError> {
        let request = JsonRpcRequest::new(method, params);

        debug!("Sending {} to {}", method, self.rpc_url);
        let response = self
            .http
            .post(&self.rpc_url)
            .basic_auth(&self.rpc_user, Some(&self.rpc_password))
            // Set before `json`, which only fills in a missing content type.
            .header(CONTENT_TYPE, "text/plain")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("RPC request {} failed: {}", method, e);
                ServiceError::RpcConnection(format!("{method}: {e}"))
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!("Failed to read RPC response for {}: {}", method, e);
            ServiceError::RpcConnection(format!("{method}: {e}"))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                "RPC response for {} is not JSON (HTTP {}): {}",
                method,
                status,
                String::from_utf8_lossy(&bytes)
            );
            ServiceError::InvalidRpcResponse(format!("{method} (HTTP {status}): {e}"))
        })
    }
}
