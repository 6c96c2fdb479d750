//! # nardgammon
//!
//! A two-player long-nardgammon engine: board model, move-legality engine,
//! and per-match turn state machine.
//!
//! ## Design Principles
//!
//! 1. **Core only**: no transport, persistence, or rendering. The
//!    surrounding server feeds player intents in and broadcasts the
//!    result values that come back.
//!
//! 2. **Rejections are values**: illegal intents never mutate state and
//!    never panic; every operation is total over its input domain.
//!
//! 3. **Simulation on clones**: the rule engine decides compound-move
//!    legality by playing the first leg on a structurally-shared board
//!    clone, never by mutating the authoritative board.
//!
//! ## Concurrency
//!
//! Nothing here blocks or suspends. A match is not internally
//! synchronized: the caller serializes intents per room. Independent
//! matches share no mutable state.
//!
//! ## Modules
//!
//! - `core`: colors, point-index arithmetic, dice and rolls
//! - `board`: checker placement, bars, off trays, snapshots
//! - `rules`: move enumeration and validation
//! - `game`: the `Match` turn state machine
//! - `session`: room registry and player pairing

pub mod core;
pub mod board;
pub mod rules;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use crate::core::{ByColor, Color, DiceRng, DiceRngState, Roll};

pub use crate::board::{Board, BoardState, PointState, CHECKERS_PER_SIDE};

pub use crate::rules::{
    available_moves, can_bear_off, validate_move, Endpoint, LegalMove, Move, MoveRequest,
    RuleViolation,
};

pub use crate::game::{
    GameOverReport, Match, MatchSnapshot, MoveOutcome, Phase, RollReport, TurnUpdate,
};

pub use crate::session::{Forfeit, JoinOutcome, RoomId, SessionManager};
