use std::net::SocketAddr;

use mathpati_backend::{
    build_router,
    config::{get_config, init_config},
    metrics::registry::register_metrics,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    register_metrics()?;

    let app = build_router();

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Metrics server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
