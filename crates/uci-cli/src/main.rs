//! Interactive shell around a UCI engine session
//!
//! Thin collaborator over the protocol core: reads move tokens from stdin,
//! prints the engine's board rendering and best reply to stdout. No
//! protocol logic lives here.
//!
//! Usage: `uci-shell [--json] <engine-path>`; the path may also come from
//! the `UCI_ENGINE` environment variable. Logs go to stderr so stdout
//! stays machine-readable.

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uci_client::{EngineConfig, GameSession};
use uci_core::BestMove;

struct Args {
    engine: EngineConfig,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut json = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => path = Some(arg),
        }
    }
    let path = match path {
        Some(p) => p,
        None => std::env::var("UCI_ENGINE")
            .context("engine path required: pass it as an argument or set UCI_ENGINE")?,
    };
    Ok(Args {
        engine: EngineConfig::new(path),
        json,
    })
}

/// One refreshed view, for machine consumers (`--json`)
#[derive(Serialize)]
struct Update<'a> {
    board: &'a [String],
    best_move: Option<&'a str>,
}

/// Print the current board, with the latest best move if one was produced.
///
/// Called after every move attempt regardless of whether the search
/// succeeded; a failed query logs and leaves the previous view standing.
async fn refresh(session: &mut GameSession, best: Option<&BestMove>, json: bool) {
    let board = match session.query_board().await {
        Ok(board) => board,
        Err(e) => {
            error!("Board query failed: {}", e);
            return;
        }
    };

    if json {
        let update = Update {
            board: board.lines(),
            best_move: best.and_then(BestMove::as_move),
        };
        match serde_json::to_string(&update) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("Failed to serialize update: {}", e),
        }
    } else {
        print!("{board}");
        if let Some(best) = best {
            println!("Best move: {best}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs to stderr; stdout carries only board output
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = parse_args()?;

    // No engine means no functionality: launch failure aborts outright
    let mut session = GameSession::connect(&args.engine)
        .await
        .context("failed to start the engine")?;
    session.reset().await?;
    refresh(&mut session, None, args.json).await;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        if !args.json {
            eprint!("move> ");
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "" => continue,
            "quit" => break,
            "reset" => {
                if let Err(e) = session.reset().await {
                    error!("Reset failed: {}", e);
                }
                refresh(&mut session, None, args.json).await;
            }
            token => {
                let best = match session.apply_move(token).await {
                    Ok(best) => best,
                    Err(e) => {
                        error!("Move failed: {}", e);
                        None
                    }
                };
                // Board view refreshes even when the search failed
                refresh(&mut session, best.as_ref(), args.json).await;
            }
        }
    }

    session.close().await?;
    Ok(())
}
