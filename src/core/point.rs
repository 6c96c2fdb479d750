//! Point-number / board-index arithmetic.
//!
//! Players address the board by *point numbers* 1..=24; storage addresses
//! it by *board indices* 0..=23. The mapping follows the physical layout of
//! the board's two rows and is asymmetric:
//!
//! - upper row, left to right: points 1..=12 at indices 0..=11
//! - lower row, left to right: points 24 down to 13 at indices 12..=23
//!
//! So `index(p) = p - 1` for the upper row and `index(p) = 36 - p` for the
//! lower row. The two halves compose to a bijection over the valid domain.

use super::color::Color;

/// Number of points on the board.
pub const POINT_COUNT: u8 = 24;

/// Convert a player-facing point number (1..=24) to a board index (0..=23).
///
/// Returns `None` outside the valid range.
///
/// ```
/// use nardgammon::core::point_to_index;
///
/// assert_eq!(point_to_index(1), Some(0));
/// assert_eq!(point_to_index(12), Some(11));
/// assert_eq!(point_to_index(24), Some(12));
/// assert_eq!(point_to_index(13), Some(23));
/// assert_eq!(point_to_index(0), None);
/// assert_eq!(point_to_index(25), None);
/// ```
#[must_use]
pub const fn point_to_index(point: u8) -> Option<usize> {
    match point {
        1..=12 => Some((point - 1) as usize),
        13..=24 => Some((36 - point) as usize),
        _ => None,
    }
}

/// Convert a board index (0..=23) back to a point number (1..=24).
///
/// Inverse of [`point_to_index`] over the valid domain.
#[must_use]
pub const fn index_to_point(index: usize) -> Option<u8> {
    match index {
        0..=11 => Some(index as u8 + 1),
        12..=23 => Some(36 - index as u8),
        _ => None,
    }
}

/// Directional destination of a move of `distance` pips from `from`.
///
/// White moves toward point 1, black toward point 24. Returns `None` when
/// the destination falls outside 1..=24 (a would-be bear-off or an invalid
/// source).
#[must_use]
pub fn destination(from: u8, color: Color, distance: u8) -> Option<u8> {
    let to = from as i16 + color.direction() * distance as i16;
    if (1..=POINT_COUNT as i16).contains(&to) {
        Some(to as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_row_mapping() {
        assert_eq!(point_to_index(1), Some(0));
        assert_eq!(point_to_index(2), Some(1));
        assert_eq!(point_to_index(12), Some(11));
    }

    #[test]
    fn test_lower_row_mapping() {
        assert_eq!(point_to_index(24), Some(12));
        assert_eq!(point_to_index(23), Some(13));
        assert_eq!(point_to_index(13), Some(23));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(point_to_index(0), None);
        assert_eq!(point_to_index(25), None);
        assert_eq!(index_to_point(24), None);
    }

    #[test]
    fn test_bijection() {
        for p in 1..=24u8 {
            let idx = point_to_index(p).unwrap();
            assert_eq!(index_to_point(idx), Some(p), "point {p}");
        }
        for i in 0..24usize {
            let p = index_to_point(i).unwrap();
            assert_eq!(point_to_index(p), Some(i), "index {i}");
        }
    }

    #[test]
    fn test_destination_direction() {
        assert_eq!(destination(24, Color::White, 6), Some(18));
        assert_eq!(destination(1, Color::Black, 6), Some(7));
    }

    #[test]
    fn test_destination_off_board() {
        assert_eq!(destination(3, Color::White, 5), None);
        assert_eq!(destination(22, Color::Black, 4), None);
        assert_eq!(destination(1, Color::White, 1), None);
        assert_eq!(destination(24, Color::Black, 1), None);
    }
}
