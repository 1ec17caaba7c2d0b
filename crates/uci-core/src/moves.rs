//! Move list: the authoritative game state
//!
//! The engine holds the real position, but the bridge can only reconstruct
//! it by replaying the full move history. The list therefore mirrors
//! exactly the moves the engine has acknowledged since the last reset.

use serde::{Deserialize, Serialize};

use crate::protocol;

/// Ordered sequence of move tokens, append-only except on reset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveList {
    moves: Vec<String>,
}

impl MoveList {
    /// Create an empty move list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an acknowledged move
    pub fn push(&mut self, token: impl Into<String>) {
        self.moves.push(token.into());
    }

    /// Drop the whole history (new game)
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Number of recorded moves
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether any move has been recorded
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The recorded tokens, oldest first
    pub fn as_slice(&self) -> &[String] {
        &self.moves
    }

    /// Render the position command replaying the recorded history
    pub fn position_command(&self) -> String {
        if self.moves.is_empty() {
            return protocol::POSITION_START.to_owned();
        }
        format!(
            "{} moves {}",
            protocol::POSITION_START,
            self.moves.join(" ")
        )
    }

    /// Render the position command with `pending` appended after the
    /// recorded history, without recording it
    pub fn position_command_with(&self, pending: &str) -> String {
        let mut command = format!("{} moves", protocol::POSITION_START);
        for token in self.moves.iter().map(String::as_str).chain([pending]) {
            command.push(' ');
            command.push_str(token);
        }
        command
    }
}
