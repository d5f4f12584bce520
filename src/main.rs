use consulate_careers::{config::Config, routes, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config loads `.env`, so RUST_LOG and LOG_FORMAT may come from it.
    let config = Config::from_env()?;
    init_tracing(config.json_logs);
    info!(
        variant = ?config.form_variant,
        bucket = %config.storage_bucket,
        "Loaded configuration"
    );

    let addr: SocketAddr = config.server_address.parse()?;
    let app_state = AppState::from_config(config)?;
    let app = routes::build_router(app_state)?;

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
