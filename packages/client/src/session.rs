//! WebSocket client session management.

use besedka_shared::time::now_millis;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    domain::{classify_close, parse_input},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one WebSocket session.
///
/// Lines arriving on `input` are sent to the server; inbound text is printed. Returns
/// `Ok(())` when `input` closes (the user quit) and an error when the connection ends
/// for any other reason.
pub async fn run_client_session(
    url: &str,
    name: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    print!("{}", MessageFormatter::format_banner(name));
    redisplay_prompt(name);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    print!("{}", MessageFormatter::format_incoming(&text, now_millis()));
                    redisplay_prompt(name);
                }
                Some(Ok(Message::Close(frame))) => {
                    let error = match frame {
                        Some(frame) => classify_close(u16::from(frame.code), name),
                        None => ClientError::ConnectionError("closed by server".to_string()),
                    };
                    tracing::info!("Server closed the connection: {}", error);
                    return Err(error);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                None => {
                    return Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
            },
            line = input.recv() => match line {
                Some(line) => {
                    let Some(frame) = parse_input(&line) else {
                        continue;
                    };
                    let json = match serde_json::to_string(&frame) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("Failed to serialize message: {}", e);
                            continue;
                        }
                    };
                    if let Err(e) = write.send(Message::Text(json.into())).await {
                        tracing::warn!("Failed to send message: {}", e);
                        return Err(ClientError::ConnectionError(e.to_string()));
                    }
                }
                None => {
                    let _ = write.close().await;
                    return Ok(());
                }
            },
        }
    }
}
