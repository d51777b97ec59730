use crate::types::{Color, Coord, Rank};

/// Single step on the board, measured in rows and columns
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Delta {
    pub row: isize,
    pub col: isize,
}

impl Delta {
    pub const fn new(row: isize, col: isize) -> Delta {
        Delta { row, col }
    }

    /// Returns the step in the opposite direction
    pub const fn rev(self) -> Delta {
        Delta {
            row: -self.row,
            col: -self.col,
        }
    }

    /// Returns `true` if `other` goes along the same line as `self`, in any direction
    pub fn is_parallel(self, other: Delta) -> bool {
        other == self || other == self.rev()
    }

    pub const fn is_orthogonal(self) -> bool {
        (self.row == 0) != (self.col == 0)
    }

    pub const fn is_diagonal(self) -> bool {
        self.row != 0 && self.row.abs() == self.col.abs()
    }

    /// Returns the square located `times` steps from `coord`, if it's on the board
    pub fn apply(self, coord: Coord, times: isize) -> Option<Coord> {
        coord.try_shift(self.row * times, self.col * times)
    }
}

pub const ORTHOGONAL: [Delta; 4] = [
    Delta::new(-1, 0),
    Delta::new(0, -1),
    Delta::new(1, 0),
    Delta::new(0, 1),
];

pub const DIAGONAL: [Delta; 4] = [
    Delta::new(-1, -1),
    Delta::new(-1, 1),
    Delta::new(1, -1),
    Delta::new(1, 1),
];

/// All eight rays, orthogonal first
pub const RAYS: [Delta; 8] = [
    ORTHOGONAL[0],
    ORTHOGONAL[1],
    ORTHOGONAL[2],
    ORTHOGONAL[3],
    DIAGONAL[0],
    DIAGONAL[1],
    DIAGONAL[2],
    DIAGONAL[3],
];

pub const KNIGHT: [Delta; 8] = [
    Delta::new(-2, -1),
    Delta::new(-2, 1),
    Delta::new(-1, -2),
    Delta::new(-1, 2),
    Delta::new(1, -2),
    Delta::new(1, 2),
    Delta::new(2, -1),
    Delta::new(2, 1),
];

pub const KING: [Delta; 8] = [
    Delta::new(-1, -1),
    Delta::new(-1, 0),
    Delta::new(-1, 1),
    Delta::new(0, -1),
    Delta::new(0, 1),
    Delta::new(1, -1),
    Delta::new(1, 0),
    Delta::new(1, 1),
];

/// Row step of a pawn of color `c` moving forward
pub const fn pawn_forward(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

pub const fn double_move_src_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

pub const fn enpassant_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    }
}

pub const fn promote_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::File;

    #[test]
    fn test_delta() {
        for d in ORTHOGONAL {
            assert!(d.is_orthogonal());
            assert!(!d.is_diagonal());
            assert!(d.is_parallel(d.rev()));
        }
        for d in DIAGONAL {
            assert!(d.is_diagonal());
            assert!(!d.is_orthogonal());
        }
        for d in KNIGHT {
            assert!(!d.is_diagonal());
            assert!(!d.is_orthogonal());
        }
        assert!(!Delta::new(1, 1).is_parallel(Delta::new(1, -1)));
    }

    #[test]
    fn test_apply() {
        let e2 = Coord::from_parts(File::E, Rank::R2);
        assert_eq!(
            Delta::new(pawn_forward(Color::White), 0).apply(e2, 2),
            Some(Coord::from_parts(File::E, Rank::R4))
        );
        assert_eq!(Delta::new(1, 0).apply(e2, 2), None);
    }
}
