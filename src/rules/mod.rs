//! The move-rule engine: pure functions over a board snapshot.
//!
//! The engine enumerates legal moves for a color and a set of die values,
//! and validates player intents against that set. It never mutates the
//! board it is given; compound moves are simulated on disposable clones.

pub mod engine;
pub mod moves;

pub use engine::{available_moves, can_bear_off, validate_move, LegalMove, RuleViolation};
pub use moves::{Endpoint, Move, MoveRequest};
