//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{
    api,
    domain::{should_attempt_reconnect, should_exit_immediately},
    formatter::MessageFormatter,
    session::run_client_session,
    ui::spawn_input_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the chat client with reconnection logic
///
/// Registers `name` first when no credential is given.
pub async fn run_client(
    server: String,
    name: String,
    credential: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let credential = match credential {
        Some(credential) => credential,
        None => {
            let credential = api::register(&server, &name).await?;
            print!("{}", MessageFormatter::format_registered(&name, &credential));
            credential
        }
    };
    let url = api::websocket_url(&server, &name, &credential)?;
    let mut input = spawn_input_reader(&name);
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            server,
            name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &name, &mut input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}. Exiting.", e);
                    return Err(e.into());
                }

                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e.into());
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
