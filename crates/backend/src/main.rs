pub mod api;
pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;
pub mod usecases;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::AppState;
use crate::shared::config::{load_config, resolve_static_dir};
use crate::shared::erp::ErpClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = load_config()?;
    if !config.has_credentials() {
        tracing::warn!("ERP API key/secret not configured, requests go without authorization");
    }
    if config.tax_account().is_none() && config.pos.tax_rate > 0.0 {
        tracing::warn!(
            "[erp] tax_account not set, tax rate {} is ignored and invoices go without tax",
            config.pos.tax_rate
        );
    }

    let erp = ErpClient::new(&config.erp)?;
    tracing::info!("ERP backend: {}", config.erp.url);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let static_dir = resolve_static_dir(&config);
    tracing::info!("Serving static files from {}", static_dir.display());

    let state = AppState::new(config, Arc::new(erp));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes()
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors)
        .with_state(state);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
