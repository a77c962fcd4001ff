use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use hostmap_core::inventory::InventoryService;
use tracing::info;

use crate::api::HostsResponse;

pub fn router(service: Arc<InventoryService>) -> Router {
    Router::new()
        .route("/api/hosts", get(api_hosts))
        .with_state(service)
}

/// Always answers 200; a total source failure is an empty list.
async fn api_hosts(State(service): State<Arc<InventoryService>>) -> Response {
    let hosts = service.snapshot().await;
    Json(HostsResponse::new(&hosts)).into_response()
}

pub async fn serve(service: InventoryService, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Serving inventory on http://{addr}/api/hosts");

    axum::serve(listener, router(Arc::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
