//! Prefix-based synchronization on the engine output stream
//!
//! The protocol is untyped line text with no framing or message ids, so
//! every response is located by scanning for a line prefix. A scan never
//! reads past the line it consumes: the next scan resumes exactly where
//! the previous one stopped. Lines discarded while scanning are gone for
//! good.
//!
//! No read deadline is applied anywhere here; a stalled or crashed engine
//! blocks the caller indefinitely.

use uci_core::{EngineError, Result};

use crate::transport::EngineIo;

/// Discard lines until one starts with `prefix`, and return that line.
///
/// Fails with a protocol error if the stream ends first.
pub async fn scan_for_prefix<E>(io: &mut E, prefix: &str) -> Result<String>
where
    E: EngineIo + ?Sized,
{
    while let Some(line) = io.read_line().await? {
        if line.starts_with(prefix) {
            return Ok(line);
        }
    }
    Err(EngineError::Protocol(format!(
        "Engine stream ended before a {prefix:?} line"
    )))
}

/// Collect the block of lines between `start_marker` and `end_marker`.
///
/// Per line, in this order: a line starting with `end_marker` terminates
/// the scan and is discarded; otherwise the line is collected if the
/// latch is set; otherwise a line starting with `start_marker` sets the
/// latch. The latch line itself is never collected — accumulation begins
/// on the line after it. Fails with a protocol error if the stream ends
/// before `end_marker` appears.
pub async fn scan_board_block<E>(
    io: &mut E,
    start_marker: &str,
    end_marker: &str,
) -> Result<Vec<String>>
where
    E: EngineIo + ?Sized,
{
    let mut collected = Vec::new();
    let mut collecting = false;

    while let Some(line) = io.read_line().await? {
        if line.starts_with(end_marker) {
            return Ok(collected);
        }
        if collecting {
            collected.push(line);
        } else if line.starts_with(start_marker) {
            collecting = true;
        }
    }
    Err(EngineError::Protocol(format!(
        "Engine stream ended before a {end_marker:?} line"
    )))
}
