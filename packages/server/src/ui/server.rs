//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{ConnectionHandler, RegisterAccountUseCase};

use super::{
    handler::{connect_handler, health_check, index, register_account},
    signal::shutdown_signal,
    state::AppState,
};

/// Messaging server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(register_account_usecase, connection_handler);
/// server.run("127.0.0.1".to_string(), 8000).await?;
/// ```
pub struct Server {
    /// RegisterAccountUseCase（アカウント登録のユースケース）
    register_account_usecase: Arc<RegisterAccountUseCase>,
    /// ConnectionHandler（接続ごとの制御ループ）
    connection_handler: Arc<ConnectionHandler>,
}

impl Server {
    pub fn new(
        register_account_usecase: Arc<RegisterAccountUseCase>,
        connection_handler: Arc<ConnectionHandler>,
    ) -> Self {
        Self {
            register_account_usecase,
            connection_handler,
        }
    }

    /// Build the router with every endpoint mounted.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            register_account_usecase: self.register_account_usecase,
            connection_handler: self.connection_handler,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/connect/{name}/{credential}", get(connect_handler))
            // HTTP エンドポイント
            .route("/", get(index))
            .route("/api/health", get(health_check))
            .route("/accounts/{name}", post(register_account))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `host:port` and serve until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Messaging server listening on {}", listener.local_addr()?);
        tracing::info!("Register: POST http://{}/accounts/{{name}}", bind_addr);
        tracing::info!("Connect to: ws://{}/connect/{{name}}/{{credential}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
