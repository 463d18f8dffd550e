//! WebSocket connection handlers.
//!
//! The socket is split in two: a pusher task owns the sink and drains the connection's
//! outbound queue, while the [`ConnectionHandler`](crate::usecase::ConnectionHandler)
//! pulls inbound frames through [`WebSocketFrameReceiver`].

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    extract::{
        Path, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{FrameReceiver, ReceivedFrame},
    infrastructure::{
        connection::{OutboundFrame, WebSocketConnection},
        dto::websocket::{decode_binary_frame, decode_text_frame},
    },
    ui::state::AppState,
};

/// How long queued frames may take to reach the peer once the session ended.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn connect_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path((name, credential)): Path<(String, String)>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, name, credential))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, name: String, credential: String) {
    let (sink, stream) = socket.split();
    let (handle, rx) = WebSocketConnection::new();
    let (done_tx, done_rx) = oneshot::channel();

    let mut send_task = pusher_loop(rx, sink, done_tx);
    let receiver = WebSocketFrameReceiver {
        stream,
        pusher_done: done_rx,
        pusher_finished: false,
    };

    let outcome = state
        .connection_handler
        .run(&name, &credential, Arc::new(handle), receiver)
        .await;
    tracing::debug!("Session for '{}' ended: {:?}", name, outcome);

    if tokio::time::timeout(FLUSH_TIMEOUT, &mut send_task)
        .await
        .is_err()
    {
        tracing::warn!("Pusher for '{}' did not finish in time, aborting", name);
        send_task.abort();
    }
}

/// Spawns a task that drains the outbound queue into the WebSocket sink.
///
/// The task stops after writing a close frame, when the sink fails, or when every
/// handle to the queue is gone. `done` fires in all three cases.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundFrame>,
    mut sink: SplitSink<WebSocket, Message>,
    done: oneshot::Sender<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let (message, last) = match frame {
                OutboundFrame::Text(text) => (Message::Text(text.into()), false),
                OutboundFrame::Close(code) => (
                    Message::Close(Some(CloseFrame {
                        code: code.value(),
                        reason: code.reason().into(),
                    })),
                    true,
                ),
            };
            if let Err(e) = sink.send(message).await {
                tracing::debug!("WebSocket write failed: {}", e);
                break;
            }
            if last {
                break;
            }
        }
        let _ = done.send(());
    })
}

/// Inbound half of a split WebSocket.
///
/// Yields [`ReceivedFrame::PeerClosed`] once the peer goes away or the pusher task has
/// stopped, so closing the handle always unblocks a pending receive.
struct WebSocketFrameReceiver {
    stream: SplitStream<WebSocket>,
    pusher_done: oneshot::Receiver<()>,
    pusher_finished: bool,
}

#[async_trait]
impl FrameReceiver for WebSocketFrameReceiver {
    async fn recv(&mut self) -> ReceivedFrame {
        if self.pusher_finished {
            return ReceivedFrame::PeerClosed;
        }

        tokio::select! {
            message = self.stream.next() => match message {
                Some(Ok(Message::Text(text))) => decode_text_frame(text.as_str()),
                Some(Ok(Message::Binary(bytes))) => decode_binary_frame(&bytes),
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => ReceivedFrame::Ignored,
                Some(Ok(Message::Close(_))) | None => ReceivedFrame::PeerClosed,
                Some(Err(e)) => {
                    tracing::debug!("WebSocket read failed: {}", e);
                    ReceivedFrame::PeerClosed
                }
            },
            _ = &mut self.pusher_done => {
                self.pusher_finished = true;
                ReceivedFrame::PeerClosed
            }
        }
    }
}
