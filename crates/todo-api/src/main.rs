//! todo-api バイナリのエントリポイント
//! ローカル開発用に HTTP サーバを起動します。

use anyhow::Context;
use todo_api::{app_with_state, telemetry, AppState, Config};
use todo_domain::TodoStore;

// リクエストは 1 スレッド上で順に完了させる
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    telemetry::init(config.log_format);

    let store = if config.seed_samples {
        TodoStore::with_samples()
    } else {
        TodoStore::new()
    };
    tracing::info!(todos = store.len(), "store initialized");

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server starting");

    axum::serve(listener, app_with_state(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
