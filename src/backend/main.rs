/**
 * sessiongate Server Entry Point
 *
 * Loads `.env`, sets up tracing, builds the app from the environment and
 * serves it until SIGINT/SIGTERM, then drains in-flight requests for a
 * bounded time.
 */

#[cfg(feature = "ssr")]
const SHUTDOWN_GRACE: std::time::Duration = std::time::Duration::from_secs(5);

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use sessiongate::backend::server::{create_app, ServerConfig};

    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sessiongate=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;
    let app = create_app(&config).await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                stop_rx.await.ok();
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("Shutdown signal received, draining connections");
    stop_tx.send(()).ok();

    match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
        Ok(result) => {
            result??;
            tracing::info!("Server stopped");
        }
        Err(_) => {
            tracing::warn!("Connections still open after {:?}, exiting anyway", SHUTDOWN_GRACE);
        }
    }

    Ok(())
}

#[cfg(feature = "ssr")]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin sessiongate-server --features ssr");
    std::process::exit(1);
}
