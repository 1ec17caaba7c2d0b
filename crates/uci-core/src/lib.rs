//! # uci-core
//!
//! Core types for the UCI engine bridge.
//!
//! This crate provides the foundational types shared by every part of the
//! bridge:
//! - Command vocabulary and inbound line markers
//! - Move list (the authoritative game state)
//! - Board snapshots and best-move results
//! - Error taxonomy

pub mod bestmove;
pub mod board;
pub mod error;
pub mod moves;
pub mod protocol;

pub use bestmove::BestMove;
pub use board::BoardSnapshot;
pub use error::{EngineError, Result};
pub use moves::MoveList;
