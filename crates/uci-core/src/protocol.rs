//! UCI command vocabulary and inbound line markers
//!
//! Commands are sent verbatim, one per line. The protocol has no message
//! framing; inbound synchronization is prefix matching on whole lines.

/// Handshake sent once after the engine starts
pub const HANDSHAKE: &str = "uci";

/// Reset the engine's internal game state
pub const NEW_GAME: &str = "ucinewgame";

/// Set the initial position with an empty move history
pub const POSITION_START: &str = "position startpos";

/// Request the engine's textual board diagnostic
pub const SHOW_BOARD: &str = "d";

/// Graceful shutdown request
pub const QUIT: &str = "quit";

/// Wall-clock search budget per move, in milliseconds.
/// A fixed policy value: searches are time-limited, never depth-limited.
pub const MOVE_TIME_MS: u64 = 1000;

/// Inbound line markers
pub mod marker {
    /// Prefix of the line carrying the search result
    pub const BESTMOVE: &str = "bestmove";

    /// Sentinel the engine reports when no legal move exists
    pub const NO_MOVE: &str = "(none)";

    /// Line that latches board collection in the `d` output; board content
    /// starts on the line after it
    pub const BOARD_START: &str = " \"";

    /// Line that terminates the `d` board block (discarded, not collected)
    pub const BOARD_END: &str = "Legal moves";
}

/// Render the fixed-time search command
pub fn go_command() -> String {
    format!("go movetime {}", MOVE_TIME_MS)
}
