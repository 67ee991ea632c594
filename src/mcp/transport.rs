//! stdio transport for MCP server.
//!
//! This module implements the stdio transport as specified by MCP:
//!
//! - Messages are UTF-8 encoded JSON-RPC
//! - Messages are delimited by newlines
//! - Messages must not contain embedded newlines
//! - stdin: receives messages from client
//! - stdout: sends messages to client
//! - stderr: may be used for logging (not MCP messages)
//!
//! # Concurrency
//!
//! Reading stays on the server loop. Writing is owned by a dedicated task fed
//! through an [`Outbox`], so request handlers running on other tasks can reply
//! whenever they finish without contending for stdout.

use std::io;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Sending half of the writer task's queue. Each item is one encoded message.
pub type Outbox = mpsc::UnboundedSender<String>;

/// Reads newline-delimited messages.
pub struct LineReader<R> {
    reader: BufReader<R>,
}

impl LineReader<tokio::io::Stdin> {
    /// Creates a reader over stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Wraps an arbitrary byte source.
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
        }
    }

    /// Reads the next message line.
    ///
    /// Returns `None` if the input is closed (EOF).
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let bytes_read = self.reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(Some(line))
    }
}

/// Writes newline-delimited messages.
pub struct LineWriter<W> {
    writer: W,
}

impl LineWriter<tokio::io::Stdout> {
    /// Creates a writer over stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    /// Wraps an arbitrary byte sink.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one encoded message followed by a newline, then flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub async fn write_line(&mut self, json: &str) -> io::Result<()> {
        // MCP spec: messages must not contain embedded newlines
        debug_assert!(
            !json.contains('\n'),
            "JSON message must not contain embedded newlines"
        );

        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        Ok(())
    }
}

/// Serialises a message onto a single line.
///
/// # Errors
///
/// Returns an error if serialisation fails.
pub fn encode<T: Serialize>(message: &T) -> io::Result<String> {
    serde_json::to_string(message).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Spawns the task that owns the writer.
///
/// The task drains the queue in order and exits once every [`Outbox`] clone
/// has been dropped, or on the first write error.
pub fn spawn_writer<W>(mut writer: LineWriter<W>) -> (Outbox, JoinHandle<io::Result<()>>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (outbox, mut queue) = mpsc::unbounded_channel::<String>();

    let task = tokio::spawn(async move {
        while let Some(line) = queue.recv().await {
            writer.write_line(&line).await?;
        }
        Ok(())
    });

    (outbox, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::{JsonRpcError, JsonRpcResponse, OutgoingMessage, RequestId};

    #[tokio::test]
    async fn read_lines_strips_terminators() {
        let input: &[u8] = b"first\r\nsecond\nthird";
        let mut reader = LineReader::new(input);

        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("second"));
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("third"));
        assert_eq!(reader.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_line_appends_newline() {
        let mut writer = LineWriter::new(Vec::new());
        writer.write_line(r#"{"a":1}"#).await.unwrap();
        writer.write_line(r#"{"b":2}"#).await.unwrap();
        assert_eq!(writer.writer, b"{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn encoded_messages_have_no_newlines() {
        let response: OutgoingMessage = JsonRpcResponse::success(
            RequestId::Number(1),
            serde_json::json!({
                "contents": [{"text": "# Title\n\nBody\n"}],
            }),
        )
        .into();
        assert!(!encode(&response).unwrap().contains('\n'));

        let error: OutgoingMessage =
            JsonRpcError::method_not_found(RequestId::Number(1), "test/method").into();
        assert!(!encode(&error).unwrap().contains('\n'));
    }

    #[tokio::test]
    async fn writer_task_finishes_when_outbox_dropped() {
        let (outbox, task) = spawn_writer(LineWriter::new(tokio::io::sink()));
        outbox.send("{}".to_string()).unwrap();
        drop(outbox);
        assert!(task.await.unwrap().is_ok());
    }
}
