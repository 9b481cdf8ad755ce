//! Session relay for the xStation streaming WebSocket.
//!
//! Opens one connection, sends the login command as soon as the handshake
//! completes, then runs two activity streams against that connection until
//! the session ends:
//!
//! ```text
//!   input lines ──strip──▶ OutboundWriter ──▶ ┌────────────┐
//!                          (owned sink)       │ WebSocket  │
//!   output lines ◀──classify── inbound frames ◀┘            │
//!                                              └────────────┘
//! ```
//!
//! Both streams are polled from a single `tokio::select!` loop, which is the
//! only owner of the write half. Sends are therefore never concurrent.
//!
//! # Example
//!
//! ```no_run
//! use xtb_relay::input::BlockingLines;
//! use xtb_relay::ws::relay::SessionRelayBuilder;
//!
//! # #[tokio::main]
//! # async fn main() -> xtb_relay::error::Result<()> {
//! let relay = SessionRelayBuilder::new("user123", "password123", "wss://ws.xtb.com/demo")
//!     .await_login_reply(true)
//!     .close_on_eof(true)
//!     .build();
//!
//! let input = BlockingLines::stdin();
//! let summary = relay.run_lines(input, tokio::io::stdout()).await?;
//! println!("forwarded {} lines", summary.forwarded);
//! # Ok(())
//! # }
//! ```

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::error::{RelayError, Result};
use crate::input::{BlockingLines, LineSource, strip_line};
use crate::types::{Credentials, ServerMessage};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a [`SessionRelay`].
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Hold operator input until the first server reply has been processed.
    pub await_login_reply: bool,
    /// Send a close frame once input reaches end-of-file.
    pub close_on_eof: bool,
    /// Treat a malformed inbound payload as a fatal error.
    pub strict_json: bool,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`SessionRelay`] with custom configuration.
pub struct SessionRelayBuilder {
    credentials: Credentials,
    endpoint: String,
    config: RelayConfig,
}

impl SessionRelayBuilder {
    /// Create a new builder with the given credentials and endpoint.
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(user_id, password),
            endpoint: endpoint.into(),
            config: RelayConfig::default(),
        }
    }

    /// Gate input forwarding on the login reply. Default: false.
    pub fn await_login_reply(mut self, enable: bool) -> Self {
        self.config.await_login_reply = enable;
        self
    }

    /// Close the session when input ends. Default: false.
    pub fn close_on_eof(mut self, enable: bool) -> Self {
        self.config.close_on_eof = enable;
        self
    }

    /// Fail the session on a malformed inbound payload. Default: false.
    pub fn strict_json(mut self, enable: bool) -> Self {
        self.config.strict_json = enable;
        self
    }

    /// Build the [`SessionRelay`].
    pub fn build(self) -> SessionRelay {
        SessionRelay::with_config(self.credentials, self.endpoint, self.config)
    }
}

// ---------------------------------------------------------------------------
// Outbound writer
// ---------------------------------------------------------------------------

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WriterHalf = SplitSink<WsStream, Message>;

/// The single write path to the connection, owned by the relay loop.
struct OutboundWriter {
    inner: WriterHalf,
}

impl OutboundWriter {
    fn new(inner: WriterHalf) -> Self {
        Self { inner }
    }

    async fn send_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text: String = text.into();
        self.inner.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Send a close frame and flush anything still queued.
    async fn close(&mut self) -> Result<()> {
        self.inner.close().await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session summary
// ---------------------------------------------------------------------------

/// Counters collected over one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Input lines sent to the server.
    pub forwarded: usize,
    /// Inbound messages classified and printed.
    pub replies: usize,
    /// Replies that were login acknowledgments.
    pub authenticated: usize,
    /// Inbound payloads that were not valid JSON.
    pub malformed: usize,
    /// Input lines dropped because they were not valid UTF-8.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// SessionRelay
// ---------------------------------------------------------------------------

/// One login-then-relay session against the streaming API.
#[derive(Debug, Clone)]
pub struct SessionRelay {
    credentials: Credentials,
    endpoint: String,
    config: RelayConfig,
}

impl SessionRelay {
    /// Create a relay with default configuration.
    ///
    /// Prefer [`SessionRelayBuilder`] to change the defaults.
    pub fn new(credentials: Credentials, endpoint: impl Into<String>) -> Self {
        Self::with_config(credentials, endpoint, RelayConfig::default())
    }

    /// Create a relay with explicit configuration.
    pub fn with_config(
        credentials: Credentials,
        endpoint: impl Into<String>,
        config: RelayConfig,
    ) -> Self {
        Self {
            credentials,
            endpoint: endpoint.into(),
            config,
        }
    }

    /// Run a session on the process's stdin and stdout.
    ///
    /// Returns once the server closes the connection.
    pub async fn connect(user_id: &str, password: &str, endpoint: &str) -> Result<SessionSummary> {
        let relay = Self::new(Credentials::new(user_id, password), endpoint);
        relay
            .run_lines(BlockingLines::stdin(), tokio::io::stdout())
            .await
    }

    /// Returns the endpoint this relay connects to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Run a session, reading operator lines from `input` and printing server
    /// replies to `output`.
    ///
    /// The session ends when the server closes the connection or the stream
    /// ends. Transport errors end it with an error.
    pub async fn run<R, W>(&self, input: R, output: W) -> Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.run_lines(input.lines(), output).await
    }

    /// Run a session over any [`LineSource`].
    ///
    /// Use this with [`BlockingLines::stdin`] for interactive input, so a
    /// pending terminal read never holds the runtime open after the session.
    pub async fn run_lines<S, W>(&self, mut lines: S, mut output: W) -> Result<SessionSummary>
    where
        S: LineSource,
        W: AsyncWrite + Unpin,
    {
        let (ws, _resp) = connect_async(self.endpoint.as_str()).await?;
        tracing::info!(endpoint = %self.endpoint, "WebSocket connection open");

        let (write, mut read) = ws.split();
        let mut writer = OutboundWriter::new(write);

        let login = self.credentials.login_request().to_json()?;
        writer.send_text(login).await?;
        tracing::debug!(user_id = self.credentials.user_id(), "Login request sent");

        let mut summary = SessionSummary::default();
        let mut input_open = true;
        let mut gate_open = !self.config.await_login_reply;

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open && gate_open => {
                    match line {
                        Ok(Some(line)) => {
                            let line = strip_line(&line);
                            writer.send_text(line).await?;
                            summary.forwarded += 1;
                            tracing::debug!(len = line.len(), "Forwarded input line");
                        }
                        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                            summary.skipped += 1;
                            tracing::warn!(error = %e, "Skipped input line that is not UTF-8");
                        }
                        Err(e) => return Err(e.into()),
                        Ok(None) => {
                            input_open = false;
                            tracing::info!("Input reached end-of-file");
                            if self.config.close_on_eof {
                                writer.close().await?;
                                tracing::info!("Close frame sent");
                            }
                        }
                    }
                }
                frame = read.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_payload(text.as_bytes(), &mut output, &mut summary).await?;
                            gate_open = true;
                        }
                        Some(Ok(Message::Binary(data))) => {
                            self.handle_payload(&data, &mut output, &mut summary).await?;
                            gate_open = true;
                        }
                        Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                            // Ping/pong handled automatically by tungstenite
                        }
                        Some(Ok(Message::Close(frame))) => {
                            tracing::info!(?frame, "WebSocket closed by server");
                            // Flushes the queued close reply; the peer may already be gone.
                            let _ = writer.close().await;
                            break;
                        }
                        Some(Ok(Message::Frame(_))) => {}
                        Some(Err(e)) => {
                            tracing::error!(error = %e, "WebSocket error");
                            return Err(RelayError::WebSocket(e));
                        }
                        None => {
                            tracing::info!("WebSocket stream ended");
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!(
            forwarded = summary.forwarded,
            replies = summary.replies,
            malformed = summary.malformed,
            skipped = summary.skipped,
            "Session finished"
        );
        Ok(summary)
    }

    /// Classify one inbound payload and print the resulting line.
    async fn handle_payload<W>(
        &self,
        payload: &[u8],
        output: &mut W,
        summary: &mut SessionSummary,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let reply = match ServerMessage::parse(payload) {
            Ok(reply) => reply,
            Err(e) if !self.config.strict_json => {
                summary.malformed += 1;
                tracing::warn!(
                    error = %e,
                    raw = %String::from_utf8_lossy(payload),
                    "Failed to parse server message"
                );
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        summary.replies += 1;
        if reply.is_authenticated() {
            summary.authenticated += 1;
            tracing::info!("Login acknowledged");
        } else {
            tracing::debug!(%reply, "Server reported an error");
        }

        output.write_all(format!("{reply}\n").as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }
}
