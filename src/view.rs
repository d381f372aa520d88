use std::fmt;
use std::str::FromStr;

use shakmaty::{Color, Piece, Role};
use thiserror::Error;

use crate::game_state::{BOARD_SIZE, Board, Coord};

/// Symbol for an empty, visible square.
pub const EMPTY_SYMBOL: char = ' ';

/// Symbol for a square hidden by the fog.
pub const FOG_SYMBOL: char = '*';

/// Who a board render is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perspective {
    White,
    Black,
    /// Spectators see the whole board.
    Audience,
}

impl Perspective {
    /// The player whose sight filters the render, or `None` for the audience.
    #[inline]
    pub const fn viewer(self) -> Option<Color> {
        match self {
            Perspective::White => Some(Color::White),
            Perspective::Black => Some(Color::Black),
            Perspective::Audience => None,
        }
    }
}

impl From<Color> for Perspective {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Perspective::White,
            Color::Black => Perspective::Black,
        }
    }
}

/// Error when parsing a perspective name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown perspective '{0}' (expected white, black or audience)")]
pub struct ParsePerspectiveError(String);

impl FromStr for Perspective {
    type Err = ParsePerspectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(Perspective::White),
            "black" => Ok(Perspective::Black),
            "audience" => Ok(Perspective::Audience),
            _ => Err(ParsePerspectiveError(s.to_string())),
        }
    }
}

/// What a single square looks like in a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Piece(Piece),
    Empty,
    Fog,
}

impl Cell {
    /// Single-character symbol: uppercase for white, lowercase for black.
    pub const fn symbol(self) -> char {
        match self {
            Cell::Piece(piece) => piece_symbol(piece),
            Cell::Empty => EMPTY_SYMBOL,
            Cell::Fog => FOG_SYMBOL,
        }
    }
}

const fn piece_symbol(piece: Piece) -> char {
    let lower = match piece.role {
        Role::Pawn => 'p',
        Role::Knight => 'n',
        Role::Bishop => 'b',
        Role::Rook => 'r',
        Role::Queen => 'q',
        Role::King => 'k',
    };
    match piece.color {
        Color::White => lower.to_ascii_uppercase(),
        Color::Black => lower,
    }
}

/// Perspective-filtered snapshot of the board.
///
/// Rows are stored in presentation order: rank 8 first for white and the
/// audience, rank 1 first for black. Columns always run from file a to h.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    perspective: Perspective,
    rows: [[Cell; 8]; 8],
}

impl BoardView {
    #[inline]
    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// All rows in presentation order.
    #[inline]
    pub fn rows(&self) -> &[[Cell; 8]; 8] {
        &self.rows
    }

    /// Cell at a presentation row and column.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is 8 or more.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    #[inline]
    pub fn symbol_at(&self, row: usize, col: usize) -> char {
        self.cell(row, col).symbol()
    }

    /// Rank digit shown beside a presentation row.
    pub fn rank_label(&self, row: usize) -> char {
        let rank = match self.perspective {
            Perspective::Black => row + 1,
            Perspective::White | Perspective::Audience => BOARD_SIZE as usize - row,
        };
        char::from(b'0' + rank as u8)
    }

    /// Number of fogged cells.
    pub fn fog_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Fog)
            .count()
    }
}

/// Prints the view as a bracketed list of rows, one row per line.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, " [")?;
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "'{}'", cell.symbol())?;
            }
            write!(f, "]")?;
            if i + 1 < self.rows.len() {
                write!(f, ",")?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

/// Board information needed to compute a view.
///
/// This trait defines what the view system needs from the game state.
pub trait VisionSource {
    /// Piece standing on `coord`, if any.
    fn piece_at(&self, coord: Coord) -> Option<Piece>;

    /// Whether some piece of `color` can currently reach `coord`.
    fn is_visible_to(&self, coord: Coord, color: Color) -> bool;
}

impl VisionSource for Board {
    #[inline]
    fn piece_at(&self, coord: Coord) -> Option<Piece> {
        Board::piece_at(self, coord)
    }

    #[inline]
    fn is_visible_to(&self, coord: Coord, color: Color) -> bool {
        Board::is_visible_to(self, coord, color)
    }
}

/// Compute the board as seen from `perspective`.
///
/// - Audience: every square as it is.
/// - A player: own pieces and any square one of their pieces can reach are
///   revealed; everything else, empty or not, is fog.
pub fn compute_view(source: &impl VisionSource, perspective: Perspective) -> BoardView {
    let mut rows = [[Cell::Fog; 8]; 8];

    for coord in Coord::all() {
        let cell = match (perspective.viewer(), source.piece_at(coord)) {
            (None, piece) => reveal(piece),
            (Some(viewer), Some(piece)) if piece.color == viewer => Cell::Piece(piece),
            (Some(viewer), piece) if source.is_visible_to(coord, viewer) => reveal(piece),
            (Some(_), _) => Cell::Fog,
        };
        rows[coord.row() as usize][coord.col() as usize] = cell;
    }

    if perspective == Perspective::Black {
        rows.reverse();
    }

    BoardView { perspective, rows }
}

#[inline]
fn reveal(piece: Option<Piece>) -> Cell {
    piece.map_or(Cell::Empty, Cell::Piece)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Square;
    use std::collections::HashSet;
    use test_case::test_case;

    struct MockVisionSource {
        pieces: Vec<(Coord, Piece)>,
        visible: HashSet<(Coord, Color)>,
    }

    impl MockVisionSource {
        fn new() -> Self {
            Self {
                pieces: Vec::new(),
                visible: HashSet::new(),
            }
        }

        fn with_piece(mut self, square: Square, role: Role, color: Color) -> Self {
            self.pieces.push((Coord::from(square), Piece { role, color }));
            self
        }

        fn with_visible(mut self, square: Square, color: Color) -> Self {
            self.visible.insert((Coord::from(square), color));
            self
        }
    }

    impl VisionSource for MockVisionSource {
        fn piece_at(&self, coord: Coord) -> Option<Piece> {
            self.pieces
                .iter()
                .find(|(c, _)| *c == coord)
                .map(|(_, piece)| *piece)
        }

        fn is_visible_to(&self, coord: Coord, color: Color) -> bool {
            self.visible.contains(&(coord, color))
        }
    }

    /// Cell at a square, in white's (unreversed) row order.
    fn cell_at(view: &BoardView, square: Square) -> Cell {
        let coord = Coord::from(square);
        let row = match view.perspective() {
            Perspective::Black => 7 - coord.row() as usize,
            _ => coord.row() as usize,
        };
        view.cell(row, coord.col() as usize)
    }

    #[test_case("white", Perspective::White)]
    #[test_case("Black", Perspective::Black)]
    #[test_case("AUDIENCE", Perspective::Audience)]
    fn test_parse_perspective(input: &str, expected: Perspective) {
        assert_eq!(input.parse::<Perspective>(), Ok(expected));
    }

    #[test]
    fn test_parse_perspective_rejects_unknown() {
        assert_eq!(
            "referee".parse::<Perspective>(),
            Err(ParsePerspectiveError("referee".to_string()))
        );
    }

    #[test]
    fn test_piece_symbols() {
        let white_knight = Piece {
            role: Role::Knight,
            color: Color::White,
        };
        let black_queen = Piece {
            role: Role::Queen,
            color: Color::Black,
        };
        assert_eq!(Cell::Piece(white_knight).symbol(), 'N');
        assert_eq!(Cell::Piece(black_queen).symbol(), 'q');
        assert_eq!(Cell::Empty.symbol(), ' ');
        assert_eq!(Cell::Fog.symbol(), '*');
    }

    #[test]
    fn test_audience_sees_everything() {
        let source = MockVisionSource::new()
            .with_piece(Square::E1, Role::King, Color::White)
            .with_piece(Square::E8, Role::King, Color::Black);

        let view = compute_view(&source, Perspective::Audience);

        assert_eq!(view.fog_count(), 0);
        assert_eq!(view.symbol_at(0, 4), 'k');
        assert_eq!(view.symbol_at(7, 4), 'K');
        assert_eq!(view.symbol_at(3, 3), ' ');
    }

    #[test]
    fn test_player_sees_own_pieces_without_visibility() {
        let source = MockVisionSource::new().with_piece(Square::E1, Role::King, Color::White);

        let view = compute_view(&source, Perspective::White);

        assert_eq!(
            cell_at(&view, Square::E1),
            Cell::Piece(Piece {
                role: Role::King,
                color: Color::White,
            })
        );
        assert_eq!(view.fog_count(), 63);
    }

    #[test]
    fn test_enemy_hidden_unless_visible() {
        let source = MockVisionSource::new()
            .with_piece(Square::E8, Role::King, Color::Black)
            .with_piece(Square::D8, Role::Queen, Color::Black)
            .with_visible(Square::D8, Color::White);

        let view = compute_view(&source, Perspective::White);

        assert_eq!(cell_at(&view, Square::E8), Cell::Fog);
        assert_eq!(
            cell_at(&view, Square::D8),
            Cell::Piece(Piece {
                role: Role::Queen,
                color: Color::Black,
            })
        );
    }

    #[test]
    fn test_empty_square_fogged_unless_visible() {
        let source = MockVisionSource::new().with_visible(Square::E4, Color::White);

        let view = compute_view(&source, Perspective::White);

        assert_eq!(cell_at(&view, Square::E4), Cell::Empty);
        assert_eq!(cell_at(&view, Square::E5), Cell::Fog);
    }

    #[test]
    fn test_visibility_is_per_player() {
        let source = MockVisionSource::new().with_visible(Square::E4, Color::Black);

        let white = compute_view(&source, Perspective::White);
        let black = compute_view(&source, Perspective::Black);

        assert_eq!(cell_at(&white, Square::E4), Cell::Fog);
        assert_eq!(cell_at(&black, Square::E4), Cell::Empty);
    }

    #[test]
    fn test_black_rows_reversed() {
        let source = MockVisionSource::new()
            .with_piece(Square::A1, Role::Rook, Color::Black)
            .with_piece(Square::H8, Role::Rook, Color::Black);

        let view = compute_view(&source, Perspective::Black);

        // Rank 1 comes first, files still run a to h
        assert_eq!(view.symbol_at(0, 0), 'r');
        assert_eq!(view.symbol_at(7, 7), 'r');
        assert_eq!(view.symbol_at(0, 7), '*');
        assert_eq!(view.rank_label(0), '1');
        assert_eq!(view.rank_label(7), '8');
    }

    #[test]
    fn test_rank_labels_for_white() {
        let view = compute_view(&MockVisionSource::new(), Perspective::White);
        assert_eq!(view.rank_label(0), '8');
        assert_eq!(view.rank_label(7), '1');
    }

    #[test]
    fn test_display_lists_rows() {
        let source = MockVisionSource::new()
            .with_piece(Square::A8, Role::Rook, Color::Black)
            .with_piece(Square::H1, Role::King, Color::White);

        let text = compute_view(&source, Perspective::Audience).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "[");
        assert_eq!(
            lines[1],
            " ['r', ' ', ' ', ' ', ' ', ' ', ' ', ' '],"
        );
        assert_eq!(
            lines[8],
            " [' ', ' ', ' ', ' ', ' ', ' ', ' ', 'K']"
        );
        assert_eq!(lines[9], "]");
    }
}
