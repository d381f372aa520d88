mod board;

pub use board::Board;

use shakmaty::{File, Rank, Square};

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: i8 = 8;

/// Grid coordinate on the board.
///
/// Row 0 is rank 8 and row 7 is rank 1; column 0 is file a and column 7 is
/// file h. Coordinates are always in bounds once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    row: i8,
    col: i8,
}

impl Coord {
    /// Creates a coordinate if both components lie within the board.
    pub const fn new(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < BOARD_SIZE && col >= 0 && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> i8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> i8 {
        self.col
    }

    /// Returns the coordinate shifted by `(dr, dc)`, if still on the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Self::new(self.row + dr, self.col + dc)
    }

    /// Iterates over every coordinate in row-major order (a8, b8, ..., h1).
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord { row, col }))
    }
}

impl From<Square> for Coord {
    fn from(square: Square) -> Self {
        Self {
            row: BOARD_SIZE - 1 - square.rank() as i8,
            col: square.file() as i8,
        }
    }
}

impl From<Coord> for Square {
    fn from(coord: Coord) -> Self {
        Square::from_coords(
            File::new(coord.col as u32),
            Rank::new((BOARD_SIZE - 1 - coord.row) as u32),
        )
    }
}
