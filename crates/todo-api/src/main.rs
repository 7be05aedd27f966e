//! todo-api バイナリのエントリポイント
//! ローカルでは HTTP サーバを起動し、サーバーレスでは Lambda ランタイムに委ねます。

use infrastructure::open_store;
use shared::{init_tracing, Config, DeploymentMode};
use std::net::SocketAddr;
use todo_api::{app, AppState};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = Config::from_env()?;
    init_tracing(config.mode)?;

    let store = open_store(&config).await?;
    let router = app(AppState::new(store), &config.public_dir);

    match config.mode {
        DeploymentMode::Local => {
            let addr = SocketAddr::new(config.host, config.port);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "Todo app is running on http://{addr}");

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            tracing::info!("Server stopped");
        }
        DeploymentMode::Serverless => {
            tracing::info!("Starting Lambda runtime");
            lambda_http::run(router).await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
