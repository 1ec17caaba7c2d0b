//! Game session: move-list state and the protocol round-trips
//!
//! A session exclusively owns one engine transport and drives it strictly
//! half-duplex: every send is followed by a blocking scan before the next
//! command goes out. All methods take `&mut self`, so concurrent
//! collaborators are serialized by ownership; the protocol has no message
//! ids and cannot disambiguate interleaved responses.

use tracing::{debug, info};
use uci_core::{BestMove, BoardSnapshot, EngineError, MoveList, Result, protocol};

use crate::process::{EngineConfig, EngineProcess};
use crate::scan;
use crate::transport::EngineIo;

/// A running session against one engine
///
/// Created open; [`GameSession::close`] vacates the transport, after which
/// every protocol operation fails with [`EngineError::Closed`].
pub struct GameSession<E: EngineIo = EngineProcess> {
    io: Option<E>,
    moves: MoveList,
}

impl GameSession<EngineProcess> {
    /// Launch the engine and perform the handshake.
    ///
    /// Launch failure is fatal to the session: without an engine there is
    /// no functionality, so no recovery is attempted. The handshake
    /// response is not awaited; its lines are discarded by the next scan.
    pub async fn connect(config: &EngineConfig) -> Result<Self> {
        let process = EngineProcess::spawn(config)?;
        let mut session = Self::with_io(process);
        session.handshake().await?;
        Ok(session)
    }
}

impl<E: EngineIo> GameSession<E> {
    /// Wrap an already-open transport without sending the handshake
    pub fn with_io(io: E) -> Self {
        Self {
            io: Some(io),
            moves: MoveList::new(),
        }
    }

    /// Send the `uci` handshake
    pub async fn handshake(&mut self) -> Result<()> {
        let io = self.io.as_mut().ok_or(EngineError::Closed)?;
        io.send_line(protocol::HANDSHAKE).await
    }

    /// The moves the engine has acknowledged since the last reset
    pub fn moves(&self) -> &MoveList {
        &self.moves
    }

    /// Whether [`GameSession::close`] has run
    pub fn is_closed(&self) -> bool {
        self.io.is_none()
    }

    /// Start a new game: clear the move list and reinitialize the engine
    pub async fn reset(&mut self) -> Result<()> {
        let io = self.io.as_mut().ok_or(EngineError::Closed)?;
        self.moves.clear();
        io.send_line(protocol::NEW_GAME).await?;
        io.send_line(protocol::POSITION_START).await?;
        debug!("Session reset, move list cleared");
        Ok(())
    }

    /// Play one move and return the engine's reply.
    ///
    /// A whitespace-only token is a user no-op: nothing is sent and
    /// `Ok(None)` is returned. Otherwise the full history plus the new
    /// token is replayed to the engine, a fixed-time search is started,
    /// and the output stream is scanned for the `bestmove` line. The token
    /// is committed to the move list only after that scan succeeds; on any
    /// failure the list keeps its pre-call contents.
    ///
    /// Callers should refresh their board view after this call whether or
    /// not it succeeded. After a failure the move list and the engine's
    /// actual position may have diverged; that risk is accepted rather
    /// than papered over.
    pub async fn apply_move(&mut self, token: &str) -> Result<Option<BestMove>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        let io = self.io.as_mut().ok_or(EngineError::Closed)?;
        io.send_line(&self.moves.position_command_with(token)).await?;
        io.send_line(&protocol::go_command()).await?;

        let line = scan::scan_for_prefix(io, protocol::marker::BESTMOVE).await?;
        let best = BestMove::parse(&line)?;

        self.moves.push(token);
        debug!("Move {} accepted, engine replies {}", token, best);
        Ok(Some(best))
    }

    /// Fetch the engine's textual rendering of the current position
    pub async fn query_board(&mut self) -> Result<BoardSnapshot> {
        let io = self.io.as_mut().ok_or(EngineError::Closed)?;
        io.send_line(protocol::SHOW_BOARD).await?;
        let lines = scan::scan_board_block(
            io,
            protocol::marker::BOARD_START,
            protocol::marker::BOARD_END,
        )
        .await?;
        Ok(BoardSnapshot::new(lines))
    }

    /// Ask the engine to quit and release the transport.
    ///
    /// Idempotent: later calls are no-ops. The quit send is best-effort;
    /// the transport is released even if the engine is already gone.
    pub async fn close(&mut self) -> Result<()> {
        let Some(mut io) = self.io.take() else {
            return Ok(());
        };
        let _ = io.send_line(protocol::QUIT).await;
        io.shutdown().await?;
        info!("Engine session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted engine: records every command, replays canned output lines
    struct ScriptedEngine {
        log: Arc<Mutex<Vec<String>>>,
        replies: VecDeque<String>,
        fail_writes: bool,
    }

    impl ScriptedEngine {
        fn replying(lines: &[&str]) -> Self {
            Self {
                log: Arc::new(Mutex::new(Vec::new())),
                replies: lines.iter().map(|l| l.to_string()).collect(),
                fail_writes: false,
            }
        }

        fn broken_pipe() -> Self {
            Self {
                fail_writes: true,
                ..Self::replying(&[])
            }
        }

        /// Handle onto the command log, usable after the session consumes
        /// the engine
        fn log(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.log)
        }
    }

    #[async_trait]
    impl EngineIo for ScriptedEngine {
        async fn send_line(&mut self, command: &str) -> Result<()> {
            if self.fail_writes {
                return Err(EngineError::Write("scripted pipe failure".into()));
            }
            self.log.lock().unwrap().push(command.to_owned());
            Ok(())
        }

        async fn read_line(&mut self) -> Result<Option<String>> {
            Ok(self.replies.pop_front())
        }

        async fn shutdown(&mut self) -> Result<()> {
            self.log.lock().unwrap().push("<released>".to_owned());
            Ok(())
        }
    }

    #[tokio::test]
    async fn nth_move_replays_the_full_history() {
        let engine = ScriptedEngine::replying(&[
            "bestmove e7e5",
            "bestmove g1f3",
            "bestmove b8c6",
        ]);
        let log = engine.log();
        let mut session = GameSession::with_io(engine);

        session.apply_move("e2e4").await.unwrap();
        session.apply_move("e7e5").await.unwrap();
        session.apply_move("g1f3").await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            [
                "position startpos moves e2e4",
                "go movetime 1000",
                "position startpos moves e2e4 e7e5",
                "go movetime 1000",
                "position startpos moves e2e4 e7e5 g1f3",
                "go movetime 1000",
            ]
        );
        assert_eq!(session.moves().len(), 3);
    }

    #[tokio::test]
    async fn blank_submission_sends_nothing() {
        let engine = ScriptedEngine::replying(&[]);
        let log = engine.log();
        let mut session = GameSession::with_io(engine);

        assert!(session.apply_move("").await.unwrap().is_none());
        assert!(session.apply_move("   ").await.unwrap().is_none());

        assert!(log.lock().unwrap().is_empty());
        assert!(session.moves().is_empty());
    }

    #[tokio::test]
    async fn best_move_is_the_second_field() {
        let engine = ScriptedEngine::replying(&[
            "info depth 12 score cp 31",
            "bestmove e2e4 ponder e7e5",
        ]);
        let mut session = GameSession::with_io(engine);

        let best = session.apply_move("d2d4").await.unwrap();
        assert_eq!(best, Some(BestMove::Move("e2e4".into())));
    }

    #[tokio::test]
    async fn mated_position_reports_no_move() {
        let mut session = GameSession::with_io(ScriptedEngine::replying(&["bestmove (none)"]));

        let best = session.apply_move("d8h4").await.unwrap();
        assert_eq!(best, Some(BestMove::None));
        assert_eq!(session.moves().len(), 1);
    }

    #[tokio::test]
    async fn reset_clears_history_before_reinitializing() {
        let engine = ScriptedEngine::replying(&["bestmove e7e5", "bestmove e7e5"]);
        let log = engine.log();
        let mut session = GameSession::with_io(engine);

        session.apply_move("e2e4").await.unwrap();
        session.reset().await.unwrap();
        assert!(session.moves().is_empty());

        session.apply_move("d2d4").await.unwrap();
        let sent = log.lock().unwrap();
        assert_eq!(sent[2], "ucinewgame");
        assert_eq!(sent[3], "position startpos");
        assert_eq!(sent[4], "position startpos moves d2d4");
        assert_eq!(session.moves().len(), 1);
    }

    #[tokio::test]
    async fn write_failure_leaves_move_list_untouched() {
        let mut session = GameSession::with_io(ScriptedEngine::broken_pipe());

        let err = session.apply_move("e2e4").await.unwrap_err();
        assert!(matches!(err, EngineError::Write(_)));
        assert!(session.moves().is_empty());
    }

    #[tokio::test]
    async fn missing_bestmove_reply_is_not_committed() {
        // Stream ends without a bestmove line
        let engine = ScriptedEngine::replying(&["info depth 1 score cp 10"]);
        let mut session = GameSession::with_io(engine);

        let err = session.apply_move("e2e4").await.unwrap_err();
        assert!(matches!(err, EngineError::Protocol(_)));
        assert!(session.moves().is_empty());
    }

    #[tokio::test]
    async fn board_query_collects_the_diagnostic_block() {
        let engine = ScriptedEngine::replying(&[
            "uciok",
            " \"rnbqkbnr/...\"",
            " +---+---+",
            " | r | n |",
            "Legal moves: e2e4 d2d4",
        ]);
        let log = engine.log();
        let mut session = GameSession::with_io(engine);

        let board = session.query_board().await.unwrap();
        assert_eq!(board.lines(), [" +---+---+", " | r | n |"]);
        assert_eq!(*log.lock().unwrap(), ["d"]);
    }

    #[tokio::test]
    async fn truncated_board_output_is_a_protocol_error() {
        let engine = ScriptedEngine::replying(&[" \"fen\"", " | r | n |"]);
        let mut session = GameSession::with_io(engine);

        let err = session.query_board().await.unwrap_err();
        assert!(matches!(err, EngineError::Protocol(_)));
    }

    #[tokio::test]
    async fn close_sends_quit_and_guards_further_use() {
        let engine = ScriptedEngine::replying(&[]);
        let log = engine.log();
        let mut session = GameSession::with_io(engine);

        session.close().await.unwrap();
        assert!(session.is_closed());
        assert_eq!(*log.lock().unwrap(), ["quit", "<released>"]);

        assert!(matches!(
            session.apply_move("e2e4").await,
            Err(EngineError::Closed)
        ));
        assert!(matches!(session.reset().await, Err(EngineError::Closed)));
        assert!(matches!(
            session.query_board().await,
            Err(EngineError::Closed)
        ));

        // Second close is a no-op
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn handshake_sends_uci() {
        let engine = ScriptedEngine::replying(&[]);
        let log = engine.log();
        let mut session = GameSession::with_io(engine);
        session.handshake().await.unwrap();
        assert_eq!(*log.lock().unwrap(), ["uci"]);
    }
}
