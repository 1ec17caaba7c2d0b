//! Engine process lifecycle
//!
//! Owns the external engine as a child process with piped stdin/stdout.
//! All chess computation happens out-of-process; this module only moves
//! lines across the boundary and guarantees the process is released on
//! every exit path.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::BufReader;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::info;
use uci_core::{EngineError, Result};

use crate::transport::{EngineIo, LineStream};

/// Configuration for launching the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the engine executable (Stockfish or UCI-compatible)
    pub executable: PathBuf,
}

impl EngineConfig {
    /// Configure an engine at the given path
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

/// A live engine process and its two streams
///
/// Exactly one instance exists per running session. The streams are closed
/// and the process killed on [`EngineIo::shutdown`]; dropping the value
/// kills the process as a last resort.
#[derive(Debug)]
pub struct EngineProcess {
    child: Child,
    io: LineStream<BufReader<ChildStdout>, ChildStdin>,
}

impl EngineProcess {
    /// Spawn the engine executable with piped stdin/stdout.
    ///
    /// stderr is inherited so engine diagnostics reach the operator.
    pub fn spawn(config: &EngineConfig) -> Result<Self> {
        info!("Launching engine: {}", config.executable.display());

        let mut child = Command::new(&config.executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                EngineError::Launch(format!(
                    "Failed to spawn {}: {}",
                    config.executable.display(),
                    e
                ))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::Launch("Engine stdin not captured".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Launch("Engine stdout not captured".into()))?;

        Ok(Self {
            child,
            io: LineStream::new(BufReader::new(stdout), stdin),
        })
    }

    /// OS process id, while the child is still running
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }
}

#[async_trait]
impl EngineIo for EngineProcess {
    async fn send_line(&mut self, command: &str) -> Result<()> {
        self.io.send_line(command).await
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        self.io.read_line().await
    }

    async fn shutdown(&mut self) -> Result<()> {
        let _ = self.io.shutdown().await;
        let _ = self.child.start_kill();
        let _ = self.child.wait().await;
        info!("Engine process terminated");
        Ok(())
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        // Kill the child process if still running
        let _ = self.child.start_kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawn_of_missing_executable_is_a_launch_error() {
        let config = EngineConfig::new("/no/such/engine/binary");
        let err = EngineProcess::spawn(&config).unwrap_err();
        assert!(matches!(err, EngineError::Launch(_)));
    }
}
