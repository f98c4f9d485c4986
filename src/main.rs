use campusgate::logging::init_tracing;
use campusgate::metrics::init_metrics;
use campusgate::router::init_router;
use campusgate::sessions::spawn_session_sweeper;
use campusgate::state::init_app_state;
use campusgate_config::ServerConfig;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await?;
    spawn_session_sweeper(
        state.sessions.clone(),
        state.access_config.session_sweep_interval,
    );
    let metrics_handle = init_metrics();
    let app = init_router(state, metrics_handle);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Server running");
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await?;
    Ok(())
}
