//! Operator input sources for the relay.
//!
//! [`LineSource`] is what the relay loop polls for the next line. Two
//! implementations are provided:
//!
//! - `tokio::io::Lines<R>` for any async buffered reader (tests, pipes)
//! - [`BlockingLines`], which reads a blocking reader (normally stdin) on a
//!   dedicated OS thread and hands lines over an `mpsc` channel
//!
//! `tokio::io::stdin()` parks its read on the runtime's blocking pool, and
//! that read cannot be cancelled, so dropping the runtime waits for the next
//! Enter key. A detached `std::thread` does not hold the runtime open.

use std::io::{self, BufRead, BufReader, Read};
use std::thread;

use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;

/// Lines buffered between the reader thread and the relay loop.
const INPUT_CHANNEL_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// LineSource
// ---------------------------------------------------------------------------

/// A cancel-safe source of operator lines.
///
/// `Ok(None)` marks end-of-file. An `InvalidData` error covers a single line
/// that was not UTF-8, and the source can still be polled after it.
pub trait LineSource {
    /// Wait for the next line, without its line terminator.
    fn next_line(&mut self) -> impl Future<Output = io::Result<Option<String>>>;
}

impl<R> LineSource for Lines<R>
where
    R: AsyncBufRead + Unpin,
{
    fn next_line(&mut self) -> impl Future<Output = io::Result<Option<String>>> {
        Lines::next_line(self)
    }
}

// ---------------------------------------------------------------------------
// BlockingLines
// ---------------------------------------------------------------------------

/// Lines read from a blocking reader on a dedicated thread.
///
/// The thread is detached. If it is still parked in `read` when the process
/// exits, it is simply torn down with it.
pub struct BlockingLines {
    rx: mpsc::Receiver<io::Result<String>>,
}

impl BlockingLines {
    /// Read the process's standard input.
    pub fn stdin() -> Self {
        Self::spawn(io::stdin())
    }

    /// Read `reader` line by line on a new thread.
    pub fn spawn<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);

        let spawned = thread::Builder::new()
            .name("xtb-relay-input".into())
            .spawn(move || read_lines(BufReader::new(reader), tx));
        if let Err(e) = spawned {
            // The receiver sees a closed channel and reports end-of-file.
            tracing::error!(error = %e, "Failed to spawn input thread");
        }

        Self { rx }
    }
}

impl LineSource for BlockingLines {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        match self.rx.recv().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}

/// Thread body: forward lines until EOF, a read error, or the relay hanging up.
fn read_lines<R: BufRead>(mut reader: R, tx: mpsc::Sender<io::Result<String>>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let item = match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return,
            Ok(_) => {
                strip_terminator(&mut buf);
                String::from_utf8(std::mem::take(&mut buf))
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                let _ = tx.blocking_send(Err(e));
                return;
            }
        };
        if tx.blocking_send(item).is_err() {
            return;
        }
    }
}

fn strip_terminator(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

// ---------------------------------------------------------------------------
// Stripping
// ---------------------------------------------------------------------------

/// Strip leading and trailing ASCII whitespace and NUL.
///
/// Only `\0`, `\t`, `\n`, `\x0B`, `\x0C`, `\r` and space are removed; other
/// Unicode whitespace such as U+00A0 is relayed as typed.
pub fn strip_line(line: &str) -> &str {
    line.trim_matches(|c: char| matches!(c, '\0' | '\t' | '\n' | '\x0B' | '\x0C' | '\r' | ' '))
}
