//! Core engine types: colors, point arithmetic, dice.
//!
//! The leaf building blocks shared by the board, rules, and match layers.
//! Nothing here knows about turns or move legality.

pub mod color;
pub mod point;
pub mod dice;

pub use color::{ByColor, Color};
pub use point::{destination, index_to_point, point_to_index, POINT_COUNT};
pub use dice::{DiceRng, DiceRngState, Roll};
