use std::net::SocketAddr;
use std::time::Duration;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use tutoratlas::config::Config;
use tutoratlas::state::SharedState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting TutorAtlas lead service");

    let addr = SocketAddr::new(config.host, config.port);
    let init_headers = config.sheets.init_headers && config.sheets.is_configured();
    let state = tutoratlas::build_state(config)?;

    if init_headers {
        let outcome = state.handler.sheet().initialize_headers().await;
        if !outcome.is_success() {
            tracing::warn!(
                "Sheet header initialization failed: {}",
                outcome.detail.as_deref().unwrap_or("no detail")
            );
        }
    }

    spawn_limiter_cleanup(state.clone());

    let app = tutoratlas::build_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn spawn_limiter_cleanup(state: SharedState) {
    let max_age = Duration::from_secs(state.config.rate_limit_window_secs.max(60) * 2);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            state.submission_limiter.cleanup(max_age);
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
