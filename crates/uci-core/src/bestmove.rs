//! Best-move result parsing

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::protocol::marker;

/// The engine's most recent search outcome
///
/// Overwritten on every move request; never historical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BestMove {
    /// The engine's top recommendation
    Move(String),
    /// The engine reported `(none)`: no legal move in the position
    None,
}

impl BestMove {
    /// Parse a `bestmove` line.
    ///
    /// The move is the second whitespace-delimited field; anything after it
    /// (`ponder ...`) is ignored. A line with no second field is malformed.
    pub fn parse(line: &str) -> Result<Self> {
        match line.split_whitespace().nth(1) {
            Some(marker::NO_MOVE) => Ok(Self::None),
            Some(token) => Ok(Self::Move(token.to_owned())),
            None => Err(EngineError::Protocol(format!(
                "bestmove line carries no move: {line:?}"
            ))),
        }
    }

    /// The move token, if the engine found one
    pub fn as_move(&self) -> Option<&str> {
        match self {
            Self::Move(token) => Some(token),
            Self::None => None,
        }
    }
}

impl fmt::Display for BestMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(token) => f.write_str(token),
            Self::None => f.write_str(marker::NO_MOVE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_field_is_the_move() {
        let best = BestMove::parse("bestmove e2e4 ponder e7e5").unwrap();
        assert_eq!(best, BestMove::Move("e2e4".into()));
        assert_eq!(best.as_move(), Some("e2e4"));
    }

    #[test]
    fn none_sentinel_is_recognized() {
        let best = BestMove::parse("bestmove (none)").unwrap();
        assert_eq!(best, BestMove::None);
        assert_eq!(best.as_move(), None);
    }

    #[test]
    fn missing_move_is_a_protocol_error() {
        let err = BestMove::parse("bestmove").unwrap_err();
        assert!(matches!(err, EngineError::Protocol(_)));
    }

    #[test]
    fn display_round_trips_the_token() {
        assert_eq!(BestMove::Move("g1f3".into()).to_string(), "g1f3");
        assert_eq!(BestMove::None.to_string(), "(none)");
    }
}
