//! Board snapshot types

use std::fmt;

use serde::{Deserialize, Serialize};

/// The engine's textual rendering of the current position
///
/// Captured verbatim from the `d` diagnostic output and replaced wholesale
/// on every query; snapshots have no identity across queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    lines: Vec<String>,
}

impl BoardSnapshot {
    /// Wrap the collected board lines
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// The board lines, top rank first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the engine reported any board content
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_preserves_line_order() {
        let board = BoardSnapshot::new(vec!["rank8".into(), "rank7".into()]);
        assert_eq!(board.to_string(), "rank8\nrank7\n");
    }

    #[test]
    fn serializes_as_plain_line_array() {
        let board = BoardSnapshot::new(vec!["a".into(), "b".into()]);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"{"lines":["a","b"]}"#);
    }
}
