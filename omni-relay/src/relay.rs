use crate::{config::Config, error::ServiceError, models::jsonrpc::Amount, rpc::OmniClient};
use serde_json::{json, Value};
use tracing::{info, instrument};

/// Page size requested from `omni_listtransactions`
pub const TRANSACTION_PAGE_SIZE: u64 = 10;

/// Offset requested from `omni_listtransactions`
pub const TRANSACTION_OFFSET: u64 = 0;

/// Relay for the token operations exposed over HTTP
///
/// Each operation is exactly one upstream call. The token parameters are
/// fixed at construction; replies come back untouched.
#[derive(Clone)]
pub struct OmniRelay {
    /// Client for the Omni daemon
    client: OmniClient,
    /// Omni property id of the relayed token
    asset_id: u64,
    /// Address tokens are sent from
    admin_address: String,
}

impl OmniRelay {
    pub fn new(client: OmniClient, asset_id: u64, admin_address: &str) -> Self {
        Self {
            client,
            asset_id,
            admin_address: admin_address.to_string(),
        }
    }

    /// Build the relay and its RPC client from the service configuration
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self::new(
            OmniClient::from_config(config)?,
            config.asset_id,
            &config.admin_address,
        ))
    }

    /// Send `amount` of the token from the admin address to `to_address`
    #[instrument(skip(self))]
    pub async fn send(&self, to_address: &str, amount: &Amount) -> Result<Value, ServiceError> {
        info!("Sending {} of property {} to {}", amount, self.asset_id, to_address);
        self.client
            .call(
                "omni_send",
                vec![
                    json!(self.admin_address),
                    json!(to_address),
                    json!(self.asset_id),
                    json!(amount.to_string()),
                ],
            )
            .await
    }

    /// Token balance of `address`
    pub async fn balance(&self, address: &str) -> Result<Value, ServiceError> {
        self.client
            .call("omni_getbalance", vec![json!(address), json!(self.asset_id)])
            .await
    }

    /// Most recent transactions touching `address`
    pub async fn transactions(&self, address: &str) -> Result<Value, ServiceError> {
        self.client
            .call(
                "omni_listtransactions",
                vec![
                    json!(address),
                    json!(TRANSACTION_PAGE_SIZE),
                    json!(TRANSACTION_OFFSET),
                ],
            )
            .await
    }

    /// Daemon and network state
    pub async fn info(&self) -> Result<Value, ServiceError> {
        self.client.call("omni_getinfo", Vec::new()).await
    }
}
