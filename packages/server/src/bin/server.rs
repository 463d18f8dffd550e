//! Besedka messaging server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin besedka-server
//! cargo run --bin besedka-server -- --host 0.0.0.0 --port 3000 --database chat.db
//! ```

use std::sync::Arc;

use besedka_server::{
    config::ServerConfig,
    domain::{AccountStore, ConnectionRegistry},
    infrastructure::{
        account_store::{InMemoryAccountStore, SqliteAccountStore},
        registry::InMemoryConnectionRegistry,
    },
    ui::Server,
    usecase::{ConnectionHandler, MessageRouter, RegisterAccountUseCase},
};
use besedka_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(
        &["besedka_server", "besedka_shared", "tower_http"],
        &config.log_level,
    );

    // Initialize dependencies in order:
    // 1. AccountStore
    // 2. ConnectionRegistry
    // 3. UseCases
    // 4. Server

    // 1. Create AccountStore
    let account_store: Arc<dyn AccountStore> = match &config.database {
        Some(path) => match SqliteAccountStore::open(path) {
            Ok(store) => {
                tracing::info!("Accounts stored in {}", path.display());
                Arc::new(store)
            }
            Err(e) => {
                tracing::error!("Failed to open database {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("Accounts kept in memory; they are lost on restart");
            Arc::new(InMemoryAccountStore::new())
        }
    };

    // 2. Create ConnectionRegistry
    let registry: Arc<dyn ConnectionRegistry> = Arc::new(InMemoryConnectionRegistry::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 3. Create UseCases
    let register_account_usecase = Arc::new(RegisterAccountUseCase::new(account_store.clone()));
    let router = Arc::new(MessageRouter::new(
        account_store.clone(),
        registry.clone(),
        clock.clone(),
    ));
    let connection_handler = Arc::new(
        ConnectionHandler::new(account_store, registry, router, clock)
            .with_idle_timeout(config.idle_timeout()),
    );
    if let Some(limit) = config.idle_timeout() {
        tracing::info!("Idle connections are closed after {:?}", limit);
    }

    // 4. Create and run the server
    let server = Server::new(register_account_usecase, connection_handler);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
