use shakmaty::{Color, Piece, Role};

use super::{BOARD_SIZE, Coord};

const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// 8×8 piece grid indexed by [`Coord`].
///
/// Holds at most one piece per cell. Knows nothing about turns or results;
/// it answers occupancy and reach questions only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard opening layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (col, role) in BACK_RANK.into_iter().enumerate() {
            board.cells[0][col] = Some(Piece {
                role,
                color: Color::Black,
            });
            board.cells[1][col] = Some(Piece {
                role: Role::Pawn,
                color: Color::Black,
            });
            board.cells[6][col] = Some(Piece {
                role: Role::Pawn,
                color: Color::White,
            });
            board.cells[7][col] = Some(Piece {
                role,
                color: Color::White,
            });
        }
        board
    }

    /// Board with no pieces.
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    #[inline]
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.cells[coord.row() as usize][coord.col() as usize]
    }

    /// Places `piece` on `coord`, returning whatever stood there before.
    pub fn set_piece_at(&mut self, coord: Coord, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.cells[coord.row() as usize][coord.col() as usize],
            piece,
        )
    }

    /// Iterates over every occupied cell of the given color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |coord| {
            self.piece_at(coord)
                .filter(|piece| piece.color == color)
                .map(|piece| (coord, piece))
        })
    }

    /// Number of kings of the given color on the board.
    pub fn king_count(&self, color: Color) -> usize {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.role == Role::King)
            .count()
    }

    #[inline]
    pub fn has_king(&self, color: Color) -> bool {
        self.king_count(color) > 0
    }

    /// Whether `piece`, standing on `from`, could reach `to` on the current board.
    ///
    /// Pure movement geometry plus obstruction. Turn order and the color of a
    /// piece standing on `to` are not considered, except that pawns need an
    /// empty square to advance and an occupied one to move diagonally.
    pub fn can_reach(&self, from: Coord, to: Coord, piece: Piece) -> bool {
        let dr = to.row() - from.row();
        let dc = to.col() - from.col();

        match piece.role {
            Role::Pawn => self.pawn_can_reach(from, to, piece.color),
            Role::Knight => matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2)),
            Role::Bishop => is_diagonal(dr, dc) && self.is_path_clear(from, to),
            Role::Rook => is_orthogonal(dr, dc) && self.is_path_clear(from, to),
            Role::Queen => {
                (is_orthogonal(dr, dc) || is_diagonal(dr, dc)) && self.is_path_clear(from, to)
            }
            Role::King => dr.abs() <= 1 && dc.abs() <= 1,
        }
    }

    fn pawn_can_reach(&self, from: Coord, to: Coord, color: Color) -> bool {
        let forward = pawn_direction(color);
        let dr = to.row() - from.row();
        let dc = to.col() - from.col();
        let target_empty = self.piece_at(to).is_none();

        match (dr, dc.abs()) {
            (d, 0) if d == forward => target_empty,
            (d, 0) if d == 2 * forward => {
                target_empty
                    && from.row() == pawn_home_row(color)
                    && from
                        .offset(forward, 0)
                        .is_some_and(|between| self.piece_at(between).is_none())
            }
            // Diagonal only as a capture
            (d, 1) if d == forward => !target_empty,
            _ => false,
        }
    }

    /// Whether every square strictly between two aligned coordinates is empty.
    ///
    /// Adjacent coordinates have nothing in between and are always clear.
    pub fn is_path_clear(&self, from: Coord, to: Coord) -> bool {
        let step_r = (to.row() - from.row()).signum();
        let step_c = (to.col() - from.col()).signum();

        let mut current = from;
        while let Some(next) = current.offset(step_r, step_c) {
            if next == to {
                return true;
            }
            if self.piece_at(next).is_some() {
                return false;
            }
            current = next;
        }
        // Walked off the board: `to` was not aligned with `from`.
        false
    }

    /// Whether any piece of `color` can reach `target`.
    pub fn is_visible_to(&self, target: Coord, color: Color) -> bool {
        self.pieces_of(color)
            .any(|(from, piece)| self.can_reach(from, target, piece))
    }
}

/// Row delta of a pawn advance: white moves toward rank 8 (row 0).
#[inline]
const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

#[inline]
const fn pawn_home_row(color: Color) -> i8 {
    match color {
        Color::White => BOARD_SIZE - 2,
        Color::Black => 1,
    }
}

#[inline]
const fn is_orthogonal(dr: i8, dc: i8) -> bool {
    (dr == 0) != (dc == 0)
}

#[inline]
const fn is_diagonal(dr: i8, dc: i8) -> bool {
    dr != 0 && dr.abs() == dc.abs()
}
