//! The per-match turn state machine.
//!
//! A [`Match`] owns one board, the active color, the current roll, and a
//! cache of legal moves. The transport layer feeds player intents in
//! (`roll_dice`, `move_piece`); the match delegates legality to
//! [`crate::rules`], mutates the board on success, and hands back a result
//! value for the caller to broadcast. Illegal intents never mutate
//! anything and come back as typed rejections; there is no retry policy
//! here, retrying is the caller's decision.
//!
//! ## Phases
//!
//! `Rolling` (waiting for the active color to roll) -> `Moving` (dice
//! pending) -> back to `Rolling` with the turn switched, or the terminal
//! `GameOver` once a color has borne off all 15 checkers. The turn switch
//! happens only inside the match's own post-move bookkeeping: when the
//! roll is exhausted, when no legal moves remain, or immediately after a
//! roll that yields no moves at all (otherwise a fully blocked player
//! would deadlock the match).

use serde::Serialize;

use crate::board::{Board, BoardState};
use crate::core::{ByColor, Color, DiceRng, Roll};
use crate::rules::{self, Move, MoveRequest};

/// Turn phase of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Rolling,
    Moving,
    GameOver,
}

/// One game instance between two opaque external player identifiers.
#[derive(Clone, Debug)]
pub struct Match {
    players: ByColor<String>,
    board: Board,
    current_color: Color,
    roll: Option<Roll>,
    available: Vec<Move>,
    phase: Phase,
    dice: DiceRng,
}

/// Broadcast payload for a successful roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollReport {
    pub roll: Vec<u8>,
    pub current_player: String,
    pub current_player_color: Color,
    pub available_moves: Vec<Move>,
    /// True when the roll produced no legal moves and the turn passed
    /// immediately.
    pub turn_ended: bool,
}

/// Broadcast payload after a successfully applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnUpdate {
    pub board: BoardState,
    pub current_player: String,
    pub current_player_color: Color,
    /// Die values still playable; empty when the turn just ended.
    pub current_roll: Vec<u8>,
    pub available_moves: Vec<Move>,
    pub turn_ended: bool,
}

/// Final payload when the moving color bears off its 15th checker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverReport {
    pub winner: String,
    pub winner_color: Color,
    pub board: BoardState,
}

/// Result of a move intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MoveOutcome {
    /// The intent was illegal; nothing changed.
    Rejected { message: String },
    /// The move was applied; normal state update.
    Applied(TurnUpdate),
    /// The move won the game; the match is terminal hereafter.
    GameOver(GameOverReport),
}

impl MoveOutcome {
    /// Whether the intent was accepted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected { .. })
    }
}

/// Read-only match snapshot for reconnect/sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub board: BoardState,
    pub current_player: String,
    pub current_player_color: Color,
    pub current_roll: Option<Vec<u8>>,
    #[serde(rename = "gameState")]
    pub phase: Phase,
    pub available_moves: Vec<Move>,
}

impl Match {
    /// Create a match; `player1` plays white and moves first.
    #[must_use]
    pub fn new(player1: impl Into<String>, player2: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(player1, player2, DiceRng::new(seed))
    }

    /// Create a match with an externally forked dice RNG.
    #[must_use]
    pub fn with_rng(player1: impl Into<String>, player2: impl Into<String>, dice: DiceRng) -> Self {
        Self {
            players: ByColor {
                white: player1.into(),
                black: player2.into(),
            },
            board: Board::new(),
            current_color: Color::White,
            roll: None,
            available: Vec::new(),
            phase: Phase::Rolling,
            dice,
        }
    }

    /// Player identifiers by color.
    #[must_use]
    pub fn players(&self) -> &ByColor<String> {
        &self.players
    }

    /// The authoritative board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_color(&self) -> Color {
        self.current_color
    }

    /// The identifier of the player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &str {
        &self.players[self.current_color]
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Roll the dice for the active player.
    ///
    /// Returns `None` (no state change) unless `player_id` is the current
    /// player and the phase is `Rolling`. On success the match enters
    /// `Moving` with the legal moves cached; if the roll yields no moves
    /// the turn passes immediately and the report says so.
    pub fn roll_dice(&mut self, player_id: &str) -> Option<RollReport> {
        if player_id != self.current_player() || self.phase != Phase::Rolling {
            return None;
        }

        let roll = self.dice.roll();
        self.phase = Phase::Moving;
        self.available = rules::available_moves(&self.board, self.current_color, &roll);

        let report = RollReport {
            roll: roll.values().to_vec(),
            current_player: self.current_player().to_string(),
            current_player_color: self.current_color,
            available_moves: self.available.clone(),
            turn_ended: self.available.is_empty(),
        };
        self.roll = Some(roll);

        if report.turn_ended {
            self.switch_turn();
        }
        Some(report)
    }

    /// Apply a move intent for the active player.
    ///
    /// Delegates legality to the rule engine, applies the move through the
    /// board operation matching its endpoints, replaces the roll with the
    /// remaining dice, and recomputes the move cache. The turn switches
    /// when the roll is exhausted or no moves remain; bearing off the 15th
    /// checker ends the game instead.
    pub fn move_piece(&mut self, player_id: &str, request: &MoveRequest) -> MoveOutcome {
        if player_id != self.current_player() || self.phase != Phase::Moving {
            return MoveOutcome::Rejected {
                message: "not your turn or wrong game state".to_string(),
            };
        }
        let Some(roll) = self.roll.clone() else {
            return MoveOutcome::Rejected {
                message: "no active roll".to_string(),
            };
        };

        let mover = self.current_color;
        let legal = match rules::validate_move(&self.board, request, mover, &roll) {
            Ok(legal) => legal,
            Err(violation) => {
                return MoveOutcome::Rejected {
                    message: violation.to_string(),
                }
            }
        };

        let applied = match legal.mv {
            Move::Enter { to, .. } => self.board.move_from_bar(to, mover),
            Move::BearOff { from, .. } => self.board.bear_off(from, mover),
            Move::Single { from, to, .. } | Move::Compound { from, to, .. } => {
                self.board.make_move(from, to)
            }
        };
        if !applied {
            return MoveOutcome::Rejected {
                message: "move could not be applied".to_string(),
            };
        }

        if self.board.has_won(mover) {
            self.phase = Phase::GameOver;
            self.roll = None;
            self.available.clear();
            return MoveOutcome::GameOver(GameOverReport {
                winner: self.players[mover].clone(),
                winner_color: mover,
                board: self.board.state(),
            });
        }

        self.available = rules::available_moves(&self.board, mover, &legal.remaining);
        let turn_ended = legal.remaining.is_empty() || self.available.is_empty();
        self.roll = Some(legal.remaining);
        if turn_ended {
            self.switch_turn();
        }

        MoveOutcome::Applied(TurnUpdate {
            board: self.board.state(),
            current_player: self.current_player().to_string(),
            current_player_color: self.current_color,
            current_roll: self
                .roll
                .as_ref()
                .map(|r| r.values().to_vec())
                .unwrap_or_default(),
            available_moves: self.available.clone(),
            turn_ended,
        })
    }

    /// Read-only snapshot for reconnect/sync.
    #[must_use]
    pub fn game_state(&self) -> MatchSnapshot {
        MatchSnapshot {
            board: self.board.state(),
            current_player: self.current_player().to_string(),
            current_player_color: self.current_color,
            current_roll: self.roll.as_ref().map(|r| r.values().to_vec()),
            phase: self.phase,
            available_moves: self.available.clone(),
        }
    }

    // The only place the active color flips.
    fn switch_turn(&mut self) {
        self.current_color = self.current_color.opponent();
        self.roll = None;
        self.available.clear();
        self.phase = Phase::Rolling;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Endpoint;

    fn scripted(mut m: Match, color: Color, roll: &[u8]) -> Match {
        m.current_color = color;
        m.phase = Phase::Moving;
        let roll = Roll::from_values(roll);
        m.available = rules::available_moves(&m.board, color, &roll);
        m.roll = Some(roll);
        m
    }

    #[test]
    fn test_new_match() {
        let m = Match::new("alice", "bob", 42);

        assert_eq!(m.current_player(), "alice");
        assert_eq!(m.current_color(), Color::White);
        assert_eq!(m.phase(), Phase::Rolling);
        assert!(m.game_state().current_roll.is_none());
    }

    #[test]
    fn test_roll_rejects_wrong_player() {
        let mut m = Match::new("alice", "bob", 42);
        assert!(m.roll_dice("bob").is_none());
        assert_eq!(m.phase(), Phase::Rolling);
    }

    #[test]
    fn test_roll_then_reroll_rejected() {
        let mut m = Match::new("alice", "bob", 42);
        let report = m.roll_dice("alice").unwrap();

        if !report.turn_ended {
            assert_eq!(m.phase(), Phase::Moving);
            assert!(m.roll_dice("alice").is_none());
        }
    }

    #[test]
    fn test_roll_report_shape() {
        let mut m = Match::new("alice", "bob", 42);
        let report = m.roll_dice("alice").unwrap();

        assert_eq!(report.current_player, "alice");
        assert_eq!(report.current_player_color, Color::White);
        assert!(matches!(report.roll.len(), 2 | 4));
        assert!(report.roll.iter().all(|d| (1..=6).contains(d)));
        // The opening position always has moves for the roller.
        assert!(!report.turn_ended);
        assert!(!report.available_moves.is_empty());
    }

    #[test]
    fn test_move_rejects_wrong_player_without_mutation() {
        let mut m = Match::new("alice", "bob", 42);
        m.roll_dice("alice").unwrap();
        let before = m.game_state();

        let outcome = m.move_piece("bob", &MoveRequest::between(24, 23));
        assert!(!outcome.is_valid());
        assert_eq!(m.game_state(), before);
    }

    #[test]
    fn test_move_rejects_in_rolling_phase() {
        let mut m = Match::new("alice", "bob", 42);
        let outcome = m.move_piece("alice", &MoveRequest::between(24, 23));
        assert!(matches!(outcome, MoveOutcome::Rejected { .. }));
    }

    #[test]
    fn test_illegal_move_leaves_state_unchanged() {
        let m = Match::new("alice", "bob", 42);
        let mut m = scripted(m, Color::White, &[6, 3]);
        let before = m.game_state();

        let outcome = m.move_piece("alice", &MoveRequest::between(24, 16));
        assert!(!outcome.is_valid());
        assert_eq!(m.game_state(), before);
    }

    #[test]
    fn test_single_move_consumes_die_and_keeps_turn() {
        let m = Match::new("alice", "bob", 42);
        let mut m = scripted(m, Color::White, &[6, 3]);

        let outcome = m.move_piece("alice", &MoveRequest::between(24, 18));
        let MoveOutcome::Applied(update) = outcome else {
            panic!("expected applied outcome");
        };
        assert_eq!(update.current_roll, vec![3]);
        assert!(!update.turn_ended);
        assert_eq!(update.current_player, "alice");
        assert_eq!(m.phase(), Phase::Moving);
    }

    #[test]
    fn test_compound_move_ends_turn() {
        let m = Match::new("alice", "bob", 42);
        let mut m = scripted(m, Color::White, &[6, 3]);

        let outcome = m.move_piece("alice", &MoveRequest::between(24, 15));
        let MoveOutcome::Applied(update) = outcome else {
            panic!("expected applied outcome");
        };
        assert!(update.turn_ended);
        assert_eq!(update.current_player, "bob");
        assert_eq!(update.current_player_color, Color::Black);
        assert!(update.current_roll.is_empty());
        assert_eq!(m.phase(), Phase::Rolling);
    }

    #[test]
    fn test_exhausted_roll_switches_turn() {
        let m = Match::new("alice", "bob", 42);
        let mut m = scripted(m, Color::White, &[1]);

        let outcome = m.move_piece("alice", &MoveRequest::between(24, 23));
        let MoveOutcome::Applied(update) = outcome else {
            panic!("expected applied outcome");
        };
        assert!(update.turn_ended);
        assert_eq!(m.current_player(), "bob");
    }

    #[test]
    fn test_bar_entry_through_match() {
        let mut m = Match::new("alice", "bob", 42);
        m.board.clear();
        m.board.place_on_bar(Color::White);
        m.board.place(10, Color::White, 14);
        m.board.place(1, Color::Black, 15);
        let mut m = scripted(m, Color::White, &[2]);

        let outcome =
            m.move_piece("alice", &MoveRequest::new(Endpoint::Bar, Endpoint::Point(24)));
        assert!(outcome.is_valid());
        assert_eq!(m.board.bar_count(Color::White), 0);
        assert_eq!(m.board.checkers_at(24), &[Color::White]);
    }

    #[test]
    fn test_bear_off_win_on_fifteenth_checker() {
        let mut m = Match::new("alice", "bob", 42);
        m.board.clear();
        m.board.place(2, Color::White, 15);
        m.board.place(1, Color::Black, 15);
        for _ in 0..14 {
            assert!(m.board.bear_off(2, Color::White));
        }
        assert!(!m.board.has_won(Color::White));
        let mut m = scripted(m, Color::White, &[2]);

        let outcome = m.move_piece("alice", &MoveRequest::new(Endpoint::Point(2), Endpoint::Off));
        let MoveOutcome::GameOver(report) = outcome else {
            panic!("expected game over, got {outcome:?}");
        };
        assert_eq!(report.winner, "alice");
        assert_eq!(report.winner_color, Color::White);
        assert!(m.is_over());

        // Terminal: further intents bounce.
        assert!(m.roll_dice("bob").is_none());
        let rejected = m.move_piece("bob", &MoveRequest::between(1, 2));
        assert!(!rejected.is_valid());
    }

    #[test]
    fn test_roll_with_no_moves_passes_turn() {
        let mut m = Match::new("alice", "bob", 42);
        m.board.clear();
        // White stuck on the bar with a blocked entry point.
        m.board.place_on_bar(Color::White);
        m.board.place(10, Color::White, 14);
        m.board.place(24, Color::Black, 15);

        let report = m.roll_dice("alice").unwrap();
        assert!(report.turn_ended);
        assert!(report.available_moves.is_empty());
        assert_eq!(m.current_player(), "bob");
        assert_eq!(m.phase(), Phase::Rolling);
    }

    #[test]
    fn test_snapshot_serialization_keys() {
        let mut m = Match::new("alice", "bob", 42);
        m.roll_dice("alice").unwrap();

        let json = serde_json::to_value(m.game_state()).unwrap();
        assert_eq!(json["currentPlayer"], "alice");
        assert_eq!(json["currentPlayerColor"], "white");
        assert_eq!(json["gameState"], "moving");
        assert!(json["availableMoves"].is_array());
        assert!(json["currentRoll"].is_array());
    }
}
