//! Shared helpers: a scripted one-connection WebSocket server.
#![allow(dead_code)]

use std::future::Future;

use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

pub type ServerWs = WebSocketStream<TcpStream>;

pub const LOGIN_JSON: &str =
    r#"{"command":"login","arguments":{"userId":"user123","password":"password123","appName":"web"}}"#;
pub const LOGIN_OK: &str = r#"{"status":true,"streamSessionId":"abc123"}"#;

/// Start a one-connection server running `script`.
///
/// The handle resolves to whatever the script returns, normally the text
/// frames it received.
pub async fn spawn_server<F, Fut>(script: F) -> (String, JoinHandle<Vec<String>>)
where
    F: FnOnce(ServerWs) -> Fut + Send + 'static,
    Fut: Future<Output = Vec<String>> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = accept_async(stream).await.unwrap();
        script(ws).await
    });
    (format!("ws://{addr}"), handle)
}

/// An address nothing listens on.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("ws://{addr}")
}

/// Next text frame, or `None` once the client closes.
pub async fn next_text(ws: &mut ServerWs) -> Option<String> {
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => return Some(text.as_str().to_owned()),
            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return None,
            Some(Ok(_)) => continue,
        }
    }
}

/// Collect text frames until the client goes away.
pub async fn drain(ws: &mut ServerWs, received: &mut Vec<String>) {
    while let Some(text) = next_text(ws).await {
        received.push(text);
    }
    // Let tungstenite flush the close reply.
    while let Some(Ok(_)) = ws.next().await {}
}

/// Close from the server side and wait for the client to go away.
pub async fn close(ws: &mut ServerWs) {
    let _ = ws.close(None).await;
    while let Some(Ok(_)) = ws.next().await {}
}
