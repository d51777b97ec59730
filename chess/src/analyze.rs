//! Attack and pin analysis around the king

use crate::board::Board;
use crate::geometry::{self, Delta};
use crate::types::{Cell, Color, Coord, Piece};

use arrayvec::ArrayVec;

/// Friendly piece which cannot leave the line between its king and an enemy slider
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PinInfo {
    /// Square of the pinned piece
    pub coord: Coord,
    /// Direction from the king towards the pinned piece
    pub axis: Delta,
}

/// Enemy piece which attacks the king
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    /// Square of the attacking piece
    pub attacker: Coord,
    /// Direction from the king towards the attacker
    ///
    /// For knight checks, this is the knight jump itself.
    pub axis: Delta,
    /// Kind of the attacking piece
    pub piece: Piece,
}

/// Pins found by the analysis
///
/// Each pin is meant to be consumed by the generator exactly once, with [`Pins::take()`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pins(ArrayVec<PinInfo, 8>);

impl Pins {
    /// Removes the pin on `coord` and returns its axis
    pub fn take(&mut self, coord: Coord) -> Option<Delta> {
        let pos = self.0.iter().position(|p| p.coord == coord)?;
        Some(self.0.swap_remove(pos).axis)
    }

    /// Returns the axis of the pin on `coord` without removing it
    pub fn get(&self, coord: Coord) -> Option<Delta> {
        self.0.iter().find(|p| p.coord == coord).map(|p| p.axis)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PinInfo> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of scanning the lines around a king
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    king: Coord,
    checks: ArrayVec<CheckInfo, 16>,
    pins: Pins,
}

impl Analysis {
    /// Square of the analyzed king
    #[inline]
    pub fn king(&self) -> Coord {
        self.king
    }

    /// All the checks, rays first, then knights
    #[inline]
    pub fn checks(&self) -> &[CheckInfo] {
        &self.checks
    }

    #[inline]
    pub fn pins(&self) -> &Pins {
        &self.pins
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        !self.checks.is_empty()
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }

    /// Consumes the analysis, leaving only the pins
    #[inline]
    pub fn into_pins(self) -> Pins {
        self.pins
    }
}

fn is_ray_attacker(piece: Piece, dir: Delta, dist: isize, side: Color) -> bool {
    match piece {
        Piece::Rook => dir.is_orthogonal(),
        Piece::Bishop => dir.is_diagonal(),
        Piece::Queen => true,
        // Enemy pawns attack the king from the squares ahead of it
        Piece::Pawn => dist == 1 && dir.is_diagonal() && dir.row == geometry::pawn_forward(side),
        Piece::King => dist == 1,
        Piece::Knight => false,
    }
}

/// Analyzes the king of the side to move
pub fn analyze(b: &Board) -> Analysis {
    analyze_side(b, b.side())
}

/// Analyzes the king of color `side`, located at the square from the king cache
pub(crate) fn analyze_side(b: &Board, side: Color) -> Analysis {
    let king = b.king_pos(side);
    let mut res = Analysis {
        king,
        checks: ArrayVec::new(),
        pins: Pins::default(),
    };

    for dir in geometry::RAYS {
        let mut blocker: Option<Coord> = None;
        for dist in 1..8 {
            let coord = match dir.apply(king, dist) {
                Some(c) => c,
                None => break,
            };
            let (color, piece) = match (b.get(coord).color(), b.get(coord).piece()) {
                (Some(color), Some(piece)) => (color, piece),
                _ => continue,
            };
            if color == side {
                if blocker.is_some() {
                    break;
                }
                blocker = Some(coord);
                continue;
            }
            if is_ray_attacker(piece, dir, dist, side) {
                match blocker {
                    Some(pinned) => res.pins.0.push(PinInfo {
                        coord: pinned,
                        axis: dir,
                    }),
                    None => res.checks.push(CheckInfo {
                        attacker: coord,
                        axis: dir,
                        piece,
                    }),
                }
            }
            break;
        }
    }

    let knight = Cell::from_parts(side.inv(), Piece::Knight);
    for jump in geometry::KNIGHT {
        if let Some(coord) = jump.apply(king, 1) {
            if b.get(coord) == knight {
                res.checks.push(CheckInfo {
                    attacker: coord,
                    axis: jump,
                    piece: Piece::Knight,
                });
            }
        }
    }

    res
}
