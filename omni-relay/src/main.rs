use actix_web::{web, App, HttpServer};
use eyre::Result;
use omni_relay::{api, auth::ApiKeys, config::Config, relay::OmniRelay};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

/// Application entry point
///
/// Sets up logging, loads configuration, builds the relay and serves the
/// HTTP API until shutdown.
#[actix_web::main] // Actix will build a multithreaded runtime
async fn main() -> Result<()> {
    // Our own spans at info, dependencies only when something goes wrong
    let filter = EnvFilter::from_default_env()
        .add_directive("omni_relay=info".parse()?)
        .add_directive("actix_web=error".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    // One relay (and one pooled HTTP client) shared by every worker
    let relay = Arc::new(OmniRelay::from_config(&config)?);
    let api_keys = web::Data::new(ApiKeys::from_config(&config));

    info!(
        "Relaying property {} via {} on {}",
        config.asset_id,
        config.rpc_url,
        config.bind_addr()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(relay.clone()))
            .app_data(api_keys.clone())
            .configure(api::configure)
    })
    .workers(config.workers)
    .bind(config.bind_addr())?
    .run()
    .await?;

    Ok(())
}
