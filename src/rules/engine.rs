//! Pure move legality over a board snapshot.
//!
//! Everything here is stateless relative to the board it is handed: the
//! engine enumerates and validates, the caller mutates. Compound legality
//! cannot be decided by distance alone because the intermediate landing
//! may be blocked even when both endpoints are open, so both die orderings
//! are simulated on a disposable board clone. The clone is mandatory: the
//! board passed in is never mutated.

use thiserror::Error;

use crate::board::Board;
use crate::core::{destination, Color, Roll};

use super::moves::{Endpoint, Move, MoveRequest};

/// Why a move intent was rejected. Rejections are values for the
/// transport layer to surface; the engine never panics over its input
/// domain.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// Checkers on the bar must re-enter before any other move.
    #[error("must move pieces from the bar first")]
    BarFirst,
    /// The request matched no legal move for the current roll.
    #[error("move is not in the available moves")]
    NotAvailable,
}

/// A validated move plus the dice left after playing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    pub mv: Move,
    pub remaining: Roll,
}

/// Enumerate every legal move for `color` given the remaining `roll`.
///
/// Bar entries take precedence unconditionally: while any checker of
/// `color` sits on the bar, nothing else is offered. Otherwise the list
/// holds single-die moves, compound moves for a non-doubles pair (one
/// candidate per workable die ordering, carrying its intermediate point),
/// and bear-offs once the home board is assembled.
#[must_use]
pub fn available_moves(board: &Board, color: Color, roll: &Roll) -> Vec<Move> {
    let mut moves = Vec::new();

    if board.bar_count(color) > 0 {
        let entry = color.entry_point();
        if board.is_open_for(entry, color) {
            for die in roll.distinct_values() {
                moves.push(Move::Enter { to: entry, die });
            }
        }
        return moves;
    }

    let points = board.occupied_points(color);

    for &from in &points {
        for die in roll.distinct_values() {
            if let Some(to) = destination(from, color, die) {
                if board.is_open_for(to, color) {
                    moves.push(Move::Single { from, to, die });
                }
            }
        }
    }

    if let Some((d1, d2)) = roll.distinct_pair() {
        for &from in &points {
            if let Some(to) = destination(from, color, d1 + d2) {
                for (first, second) in [(d1, d2), (d2, d1)] {
                    if let Some(via) = compound_via(board, from, to, color, first) {
                        moves.push(Move::Compound { from, to, via, dice: [first, second] });
                    }
                }
            }
        }
    }

    if board.can_bear_off(color) {
        push_bear_off_moves(board, color, roll, &mut moves);
    }

    moves
}

/// Validate a player's move intent against the current roll.
///
/// A point-to-point request spanning the sum of two distinct dice is
/// accepted whenever either die ordering simulates cleanly, consuming both
/// dice. Any other request must match an enumerated move by from/to; a
/// single-die match consumes that die by value (order preserving), a
/// compound match consumes both.
pub fn validate_move(
    board: &Board,
    request: &MoveRequest,
    color: Color,
    roll: &Roll,
) -> Result<LegalMove, RuleViolation> {
    if board.bar_count(color) > 0 && request.from != Endpoint::Bar {
        return Err(RuleViolation::BarFirst);
    }

    if let (Endpoint::Point(from), Endpoint::Point(to)) = (request.from, request.to) {
        if let Some((d1, d2)) = roll.distinct_pair() {
            if destination(from, color, d1 + d2) == Some(to) {
                for (first, second) in [(d1, d2), (d2, d1)] {
                    if let Some(via) = compound_via(board, from, to, color, first) {
                        return Ok(LegalMove {
                            mv: Move::Compound { from, to, via, dice: [first, second] },
                            remaining: Roll::empty(),
                        });
                    }
                }
            }
        }
    }

    let mv = available_moves(board, color, roll)
        .into_iter()
        .find(|m| m.matches(request))
        .ok_or(RuleViolation::NotAvailable)?;

    let mut remaining = roll.clone();
    match mv {
        Move::Enter { die, .. } | Move::Single { die, .. } | Move::BearOff { die, .. } => {
            remaining.consume(die);
        }
        Move::Compound { dice, .. } => {
            remaining.consume_pair(dice[0], dice[1]);
        }
    }

    Ok(LegalMove { mv, remaining })
}

/// Bear-off legality for a specific checker: the board-wide check plus the
/// moving checker's own point lying inside the home range.
#[must_use]
pub fn can_bear_off(board: &Board, from: u8, color: Color) -> bool {
    color.home_contains(from) && board.can_bear_off(color)
}

/// Simulate the first leg of a compound move on a clone and check the
/// second leg against the clone, never the original. Returns the
/// intermediate point when the ordering works.
fn compound_via(board: &Board, from: u8, to: u8, color: Color, first_die: u8) -> Option<u8> {
    let via = destination(from, color, first_die)?;
    if !board.is_open_for(via, color) {
        return None;
    }
    let mut sim = board.clone();
    if !sim.make_move(from, via) {
        return None;
    }
    if sim.is_open_for(to, color) {
        Some(via)
    } else {
        None
    }
}

/// Exact-pip bear-offs, plus the over-roll rule: a die larger than the
/// farthest occupied point's distance bears off from that farthest point.
fn push_bear_off_moves(board: &Board, color: Color, roll: &Roll, moves: &mut Vec<Move>) {
    let by_distance: Vec<(u8, u8)> = board
        .occupied_points(color)
        .iter()
        .map(|&p| (color.bear_off_distance(p), p))
        .collect();
    let farthest = by_distance.iter().copied().max();

    for die in roll.distinct_values() {
        if let Some(&(_, from)) = by_distance.iter().find(|&&(dist, _)| dist == die) {
            moves.push(Move::BearOff { from, die });
        } else if let Some((max_dist, from)) = farthest {
            if die > max_dist {
                moves.push(Move::BearOff { from, die });
            }
        }
    }
}
