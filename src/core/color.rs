//! Checker colors and per-color data storage.
//!
//! ## Color
//!
//! One of two fixed sides in a match. The color determines movement
//! direction (white walks point numbers down toward 1, black walks them up
//! toward 24), the home-board range, and the bar re-entry point.
//!
//! ## ByColor
//!
//! Per-color data storage with indexing by `Color`. The two-sided analogue
//! of a per-player map: every board structure (bar, off) keeps one value
//! per color.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// The opposing color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Signed movement direction in point numbers: white decreases toward
    /// point 1, black increases toward point 24.
    #[must_use]
    pub const fn direction(self) -> i16 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The point where checkers re-enter from the bar.
    ///
    /// This is also the color's starting point in the long-nardgammon
    /// opening: 24 for white, 1 for black.
    #[must_use]
    pub const fn entry_point(self) -> u8 {
        match self {
            Color::White => 24,
            Color::Black => 1,
        }
    }

    /// Whether `point` lies inside this color's home board
    /// (1-6 for white, 19-24 for black).
    #[must_use]
    pub const fn home_contains(self, point: u8) -> bool {
        match self {
            Color::White => point >= 1 && point <= 6,
            Color::Black => point >= 19 && point <= 24,
        }
    }

    /// Remaining distance from `point` to the edge the color bears off
    /// over: the pip count a single die must cover.
    #[must_use]
    pub const fn bear_off_distance(self, point: u8) -> u8 {
        match self {
            Color::White => point,
            Color::Black => 25 - point,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Per-color data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use nardgammon::core::{ByColor, Color};
///
/// let mut bar: ByColor<u8> = ByColor::default();
/// bar[Color::White] += 1;
/// assert_eq!(bar[Color::White], 1);
/// assert_eq!(bar[Color::Black], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByColor<T> {
    pub white: T,
    pub black: T,
}

impl<T> ByColor<T> {
    /// Create with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            white: factory(Color::White),
            black: factory(Color::Black),
        }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            white: value.clone(),
            black: value,
        }
    }

    /// Get a reference to a color's data.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Get a mutable reference to a color's data.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Iterate over (Color, &T) pairs, white first.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        [(Color::White, &self.white), (Color::Black, &self.black)].into_iter()
    }
}

impl<T> Index<Color> for ByColor<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ByColor<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}
