//! Authoritative checker placement: 24 point stacks, two bars, two offs.
//!
//! The board owns occupancy and nothing else. It knows "a destination with
//! two or more opposing checkers is blocked" but has no notion of dice,
//! turns, or the bar-first rule; those live in [`crate::rules`].
//!
//! ## Cloning
//!
//! The point array is an `im::Vector`, so `Board::clone` is structurally
//! shared. The rule engine clones the board for every compound-move
//! simulation; the clone-then-mutate path must never touch the original.
//!
//! ## Invariants
//!
//! - For each color, points + bar + off always hold exactly 15 checkers.
//! - A point's stack holds at most one color; a lone opposing checker is a
//!   blot and is sent to the bar when landed on.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{index_to_point, point_to_index, ByColor, Color, POINT_COUNT};

/// Checkers per side.
pub const CHECKERS_PER_SIDE: u8 = 15;

/// One point's checker stack, bottom to top.
pub type Stack = SmallVec<[Color; 16]>;

/// The board: 24 points, two bars, two off trays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    points: Vector<Stack>,
    bar: ByColor<u8>,
    off: ByColor<u8>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board in the variant's starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self {
            points: (0..POINT_COUNT).map(|_| Stack::new()).collect(),
            bar: ByColor::default(),
            off: ByColor::default(),
        };
        board.setup_initial_position();
        board
    }

    /// Reset to the long-nardgammon opening: all 15 white checkers on
    /// point 24, all 15 black checkers on point 1.
    pub fn setup_initial_position(&mut self) {
        self.clear();
        self.place(Color::White.entry_point(), Color::White, CHECKERS_PER_SIDE);
        self.place(Color::Black.entry_point(), Color::Black, CHECKERS_PER_SIDE);
    }

    /// Empty every point, bar, and off tray. Scenario/test setup only;
    /// a cleared board violates the 15-checker invariant until refilled.
    pub fn clear(&mut self) {
        self.points = (0..POINT_COUNT).map(|_| Stack::new()).collect();
        self.bar = ByColor::default();
        self.off = ByColor::default();
    }

    /// Stack `count` checkers of `color` on `point`.
    ///
    /// Returns false (board unchanged) for an invalid point number.
    pub fn place(&mut self, point: u8, color: Color, count: u8) -> bool {
        let Some(idx) = point_to_index(point) else {
            return false;
        };
        if let Some(stack) = self.points.get_mut(idx) {
            for _ in 0..count {
                stack.push(color);
            }
            true
        } else {
            false
        }
    }

    /// Put a checker of `color` directly on its bar. Scenario/test setup.
    pub fn place_on_bar(&mut self, color: Color) {
        self.bar[color] += 1;
    }

    /// The checkers on `point`, bottom to top. Empty for invalid points.
    #[must_use]
    pub fn checkers_at(&self, point: u8) -> &[Color] {
        point_to_index(point)
            .and_then(|idx| self.points.get(idx))
            .map_or(&[], |stack| stack.as_slice())
    }

    /// The color of the top checker on `point`, if any.
    #[must_use]
    pub fn top_color(&self, point: u8) -> Option<Color> {
        self.checkers_at(point).last().copied()
    }

    /// Whether `color` may land on `point`: empty, a lone checker of
    /// either color (a blot is hittable), or the mover's own stack.
    #[must_use]
    pub fn is_open_for(&self, point: u8, color: Color) -> bool {
        let stack = self.checkers_at(point);
        match stack.len() {
            0 | 1 => point_to_index(point).is_some(),
            _ => stack[0] == color,
        }
    }

    /// Whether `from` holds a top checker of `color` and `to` is not
    /// blocked by two or more opposing checkers.
    #[must_use]
    pub fn is_valid_move(&self, from: u8, to: u8, color: Color) -> bool {
        if point_to_index(from).is_none() || point_to_index(to).is_none() {
            return false;
        }
        self.top_color(from) == Some(color) && self.is_open_for(to, color)
    }

    /// Pop the top checker at `from` and push it at `to`, hitting a lone
    /// opposing checker to the bar.
    ///
    /// Rejects (returns false, no mutation) on invalid point numbers, an
    /// empty source, or a direction wrong for the moving color: white must
    /// decrease point numbers, black must increase them. Blocked
    /// destinations are the caller's concern; validate first.
    pub fn make_move(&mut self, from: u8, to: u8) -> bool {
        let (Some(from_idx), Some(to_idx)) = (point_to_index(from), point_to_index(to)) else {
            return false;
        };
        let Some(color) = self.top_color(from) else {
            return false;
        };
        match color {
            Color::White if to >= from => return false,
            Color::Black if to <= from => return false,
            _ => {}
        }

        if let Some(stack) = self.points.get_mut(from_idx) {
            stack.pop();
        }
        self.land(to_idx, color);
        true
    }

    /// Enter a checker from the bar onto `to`, with the same hit and
    /// placement logic as [`Board::make_move`].
    ///
    /// Fails if the bar is empty for `color`, the point is invalid, or the
    /// destination is blocked.
    pub fn move_from_bar(&mut self, to: u8, color: Color) -> bool {
        let Some(to_idx) = point_to_index(to) else {
            return false;
        };
        if self.bar[color] == 0 || !self.is_open_for(to, color) {
            return false;
        }

        self.bar[color] -= 1;
        self.land(to_idx, color);
        true
    }

    /// Pop the top checker of `color` at `from` into its off tray.
    ///
    /// Only the occupancy is checked here; the caller must already have
    /// confirmed [`Board::can_bear_off`].
    pub fn bear_off(&mut self, from: u8, color: Color) -> bool {
        let Some(from_idx) = point_to_index(from) else {
            return false;
        };
        if self.top_color(from) != Some(color) {
            return false;
        }

        if let Some(stack) = self.points.get_mut(from_idx) {
            stack.pop();
        }
        self.off[color] += 1;
        true
    }

    /// Whether `color` may start bearing off: nothing on its bar and every
    /// on-board checker inside its home range (1-6 white, 19-24 black).
    #[must_use]
    pub fn can_bear_off(&self, color: Color) -> bool {
        if self.bar[color] > 0 {
            return false;
        }
        for (idx, stack) in self.points.iter().enumerate() {
            if stack.contains(&color) {
                match index_to_point(idx) {
                    Some(point) if color.home_contains(point) => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Whether `color` has borne off all 15 checkers.
    #[must_use]
    pub fn has_won(&self, color: Color) -> bool {
        self.off[color] == CHECKERS_PER_SIDE
    }

    /// Checkers on the bar for `color`.
    #[must_use]
    pub fn bar_count(&self, color: Color) -> u8 {
        self.bar[color]
    }

    /// Checkers borne off for `color`.
    #[must_use]
    pub fn off_count(&self, color: Color) -> u8 {
        self.off[color]
    }

    /// Total checkers of `color` across points, bar, and off. Always 15
    /// on a board reached through the public mutation operations.
    #[must_use]
    pub fn piece_count(&self, color: Color) -> u8 {
        let on_points: u8 = self
            .points
            .iter()
            .map(|stack| stack.iter().filter(|&&c| c == color).count() as u8)
            .sum();
        on_points + self.bar[color] + self.off[color]
    }

    /// Point numbers whose top checker belongs to `color`, ascending.
    #[must_use]
    pub fn occupied_points(&self, color: Color) -> SmallVec<[u8; 24]> {
        (1..=POINT_COUNT)
            .filter(|&p| self.top_color(p) == Some(color))
            .collect()
    }

    /// Read-only snapshot in the player-facing 1..=24 numbering.
    #[must_use]
    pub fn state(&self) -> BoardState {
        BoardState {
            points: (1..=POINT_COUNT)
                .map(|point| PointState {
                    point,
                    checkers: self.checkers_at(point).to_vec(),
                })
                .collect(),
            bar: self.bar.clone(),
            off: self.off.clone(),
        }
    }

    fn land(&mut self, to_idx: usize, color: Color) {
        if let Some(stack) = self.points.get_mut(to_idx) {
            if stack.len() == 1 && stack[0] != color {
                let hit = stack[0];
                stack.pop();
                self.bar[hit] += 1;
            }
            stack.push(color);
        }
    }
}

/// Serializable board snapshot for the transport layer.
///
/// Points carry their 1..=24 number, never the internal index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub points: Vec<PointState>,
    pub bar: ByColor<u8>,
    pub off: ByColor<u8>,
}

/// One point's snapshot: number and stack, bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointState {
    pub point: u8,
    pub checkers: Vec<Color>,
}
