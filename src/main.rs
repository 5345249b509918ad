use quizforge_backend::{
    config::{get_config, init_config, LogFormat},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(&config.log_format);

    let app_state = AppState::new(config)?;
    if !app_state.completion_configured {
        tracing::warn!("UPSTAGE_API_KEY is not set; /api/generate will answer 500");
    }
    info!("Quiz storage at {}", config.mockapi_url);

    let app = routes::build_router(app_state, config.max_body_bytes);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
