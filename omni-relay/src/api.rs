use crate::{
    auth::require_api_key,
    error::ServiceError,
    models::jsonrpc::{envelope_error, envelope_result, SendRequest},
    relay::OmniRelay,
};
use actix_web::{
    error::JsonPayloadError, get, middleware::from_fn, web, HttpRequest, HttpResponse,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Send tokens from the admin address. Mounted behind the API key gate.
async fn send(
    relay: web::Data<Arc<OmniRelay>>,
    request: web::Json<SendRequest>,
) -> Result<HttpResponse, ServiceError> {
    let SendRequest { to_address, amount } = request.into_inner();

    let tx = relay.send(&to_address, &amount).await?;
    Ok(HttpResponse::Ok().json(tx))
}

/// Token balance of an address
#[get("/balance/{address}")]
async fn balance(
    relay: web::Data<Arc<OmniRelay>>,
    address: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    debug!("Balance requested for {}", address);
    let balance = relay.balance(&address).await?;
    Ok(HttpResponse::Ok().json(balance))
}

/// Latest transactions of an address
#[get("/transactions/{address}")]
async fn transactions(
    relay: web::Data<Arc<OmniRelay>>,
    address: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    debug!("Transactions requested for {}", address);
    let txs = relay.transactions(&address).await?;
    Ok(HttpResponse::Ok().json(txs))
}

/// Daemon and network information
#[get("/info")]
async fn info(relay: web::Data<Arc<OmniRelay>>) -> Result<HttpResponse, ServiceError> {
    let info = relay.info().await?;
    Ok(HttpResponse::Ok().json(info))
}

/// Service health check endpoint that verifies the daemon answers RPC calls
#[get("/health")]
async fn health_check(relay: web::Data<Arc<OmniRelay>>) -> Result<HttpResponse, ServiceError> {
    info!("Health check requested");

    let response = relay.info().await?;
    if let Some(rpc_error) = envelope_error(&response) {
        error!("Health check failed: daemon returned {:?}", rpc_error);
        return Err(ServiceError::RpcConnection(format!(
            "omni_getinfo returned error {}: {}",
            rpc_error.code, rpc_error.message
        )));
    }

    let block = envelope_result(&response)
        .and_then(|result| result.get("block"))
        .cloned()
        .unwrap_or_default();
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "block": block,
    })))
}

/// Map body extraction failures onto the service's error format
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ServiceError::InvalidRequest(err.to_string()).into()
}

/// Configure the API routes for the service
///
/// Expects `web::Data<Arc<OmniRelay>>` and `web::Data<ApiKeys>` to be registered
/// on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::resource("/send")
                .wrap(from_fn(require_api_key))
                .route(web::post().to(send)),
        )
        .service(balance)
        .service(transactions)
        .service(info)
        .service(health_check);
}
