//! Transport abstraction over the engine's two byte streams
//!
//! Provides the EngineIo trait so the session logic never touches the OS
//! process directly; tests substitute a scripted engine without spawning
//! anything.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;
use uci_core::{EngineError, Result};

/// Capability interface over an engine's command sink and output source
///
/// The protocol is half-duplex line-buffered: exactly one command is
/// outstanding at a time, and its response must be fully consumed before
/// the next send.
#[async_trait]
pub trait EngineIo: Send {
    /// Write one command followed by a line terminator and flush.
    ///
    /// The flush is mandatory: the peer will not act on unflushed input.
    async fn send_line(&mut self, command: &str) -> Result<()>;

    /// Read the next full line, blocking until it arrives.
    ///
    /// Returns `Ok(None)` at end of stream. The trailing line terminator is
    /// stripped. No read deadline is applied; a stalled engine blocks the
    /// caller indefinitely.
    async fn read_line(&mut self) -> Result<Option<String>>;

    /// Release the underlying resource.
    ///
    /// Must be safe to call when the peer has already gone away.
    async fn shutdown(&mut self) -> Result<()>;
}

/// Line-oriented transport over any buffered reader / writer pair
#[derive(Debug)]
pub struct LineStream<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> LineStream<R, W> {
    /// Wrap an output source and a command sink
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

#[async_trait]
impl<R, W> EngineIo for LineStream<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn send_line(&mut self, command: &str) -> Result<()> {
        debug!("[gui -> engine] {}", command);
        self.writer
            .write_all(command.as_bytes())
            .await
            .map_err(|e| EngineError::Write(format!("Failed to write command: {}", e)))?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| EngineError::Write(format!("Failed to write newline: {}", e)))?;
        self.writer
            .flush()
            .await
            .map_err(|e| EngineError::Write(format!("Failed to flush: {}", e)))?;
        Ok(())
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let bytes_read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| EngineError::Protocol(format!("Failed to read from engine: {}", e)))?;

        if bytes_read == 0 {
            return Ok(None);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        debug!("[engine -> gui] {}", line);
        Ok(Some(line))
    }

    async fn shutdown(&mut self) -> Result<()> {
        let _ = self.writer.shutdown().await;
        Ok(())
    }
}
