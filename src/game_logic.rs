use std::fmt;

use log::{debug, info, trace};
use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::{Color, Piece, Square};
use thiserror::Error;

use crate::game_state::{Board, Coord};
use crate::view::{BoardView, Perspective, compute_view};

/// Outcome of the game so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Unfinished,
    WhiteWon,
    BlackWon,
}

impl GameResult {
    #[inline]
    pub const fn is_finished(self) -> bool {
        !matches!(self, GameResult::Unfinished)
    }

    /// The winning color, if any.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::Unfinished => None,
            GameResult::WhiteWon => Some(Color::White),
            GameResult::BlackWon => Some(Color::Black),
        }
    }

    fn won_by(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWon,
            Color::Black => GameResult::BlackWon,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameResult::Unfinished => "UNFINISHED",
            GameResult::WhiteWon => "WHITE_WON",
            GameResult::BlackWon => "BLACK_WON",
        })
    }
}

/// Move request the engine refuses to interpret at all.
///
/// Distinct from an illegal move, which is reported as `Ok(false)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveInputError {
    #[error("invalid square notation: '{0}'")]
    InvalidSquare(String),
    #[error("source and destination are the same square ({0})")]
    NullMove(Square),
}

/// Error when building an engine from a custom position.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] ParseFenError),
    #[error("more than one {0:?} king on the board")]
    DuplicateKing(Color),
    #[error("position has no kings")]
    NoKings,
}

/// Why a well-formed move was refused. Only logged, never surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    GameOver(GameResult),
    EmptySource,
    WrongTurn(Color),
    FriendlyTarget,
    Unreachable,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::GameOver(result) => write!(f, "game is over ({result})"),
            Rejection::EmptySource => f.write_str("no piece on source square"),
            Rejection::WrongTurn(color) => write!(f, "not {color:?}'s turn"),
            Rejection::FriendlyTarget => f.write_str("destination holds a friendly piece"),
            Rejection::Unreachable => f.write_str("piece cannot reach destination"),
        }
    }
}

/// Fog of War chess engine: one game from the first move to king capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    active_color: Color,
    result: GameResult,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Creates an engine at the standard opening position, white to move.
    #[inline]
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    /// Creates an engine from an arbitrary board.
    ///
    /// The result is derived from the kings present, so a board missing one
    /// king starts out already decided.
    pub fn from_board(board: Board, active_color: Color) -> Self {
        let mut engine = Self {
            board,
            active_color,
            result: GameResult::Unfinished,
        };
        engine.update_result();
        engine
    }

    /// Creates an engine from a FEN string.
    ///
    /// Only the piece placement and side to move are used. Castling, en
    /// passant and clocks are parsed but have no meaning in this variant.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let setup = fen.parse::<Fen>()?.into_setup();

        let mut board = Board::empty();
        for square in Square::ALL {
            board.set_piece_at(Coord::from(square), setup.board.piece_at(square));
        }

        for color in [Color::White, Color::Black] {
            if board.king_count(color) > 1 {
                return Err(SetupError::DuplicateKing(color));
            }
        }
        if !board.has_king(Color::White) && !board.has_king(Color::Black) {
            return Err(SetupError::NoKings);
        }

        Ok(Self::from_board(board, setup.turn))
    }

    #[inline]
    pub fn query_result(&self) -> GameResult {
        self.result
    }

    /// Color whose move it is.
    #[inline]
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(Coord::from(square))
    }

    /// Whether some piece of `color` can currently reach `square`.
    #[inline]
    pub fn is_visible(&self, square: Square, color: Color) -> bool {
        self.board.is_visible_to(Coord::from(square), color)
    }

    /// Render the board as seen from `perspective`.
    pub fn render(&self, perspective: Perspective) -> BoardView {
        compute_view(&self.board, perspective)
    }

    /// Attempt a move given in square notation, e.g. `("e2", "e4")`.
    ///
    /// Returns `Ok(true)` if the move was played and `Ok(false)` if it is
    /// illegal or the game is over. Malformed notation is an error.
    pub fn make_move(&mut self, from: &str, to: &str) -> Result<bool, MoveInputError> {
        let from = parse_square(from)?;
        let to = parse_square(to)?;
        self.play(from, to)
    }

    /// Attempt a move between two squares.
    ///
    /// Same contract as [`GameEngine::make_move`].
    pub fn play(&mut self, from: Square, to: Square) -> Result<bool, MoveInputError> {
        if from == to {
            return Err(MoveInputError::NullMove(from));
        }

        let piece = match self.check_move(from, to) {
            Ok(piece) => piece,
            Err(rejection) => {
                debug!("rejected {from}{to}: {rejection}");
                return Ok(false);
            }
        };

        self.board.set_piece_at(Coord::from(from), None);
        let captured = self.board.set_piece_at(Coord::from(to), Some(piece));
        trace!("{:?} {:?} {from}{to}, captured {captured:?}", piece.color, piece.role);

        self.update_result();
        self.active_color = self.active_color.other();
        Ok(true)
    }

    /// Validate a move against the rules, returning the piece to move.
    fn check_move(&self, from: Square, to: Square) -> Result<Piece, Rejection> {
        if self.result.is_finished() {
            return Err(Rejection::GameOver(self.result));
        }

        let from = Coord::from(from);
        let to = Coord::from(to);

        let piece = self.board.piece_at(from).ok_or(Rejection::EmptySource)?;
        if piece.color != self.active_color {
            return Err(Rejection::WrongTurn(piece.color));
        }
        if self
            .board
            .piece_at(to)
            .is_some_and(|target| target.color == piece.color)
        {
            return Err(Rejection::FriendlyTarget);
        }
        if !self.board.can_reach(from, to, piece) {
            return Err(Rejection::Unreachable);
        }
        Ok(piece)
    }

    /// A side without a king has lost.
    fn update_result(&mut self) {
        if self.result.is_finished() {
            return;
        }

        self.result = if !self.board.has_king(Color::White) {
            GameResult::won_by(Color::Black)
        } else if !self.board.has_king(Color::Black) {
            GameResult::won_by(Color::White)
        } else {
            GameResult::Unfinished
        };

        if let Some(winner) = self.result.winner() {
            info!("king captured, {winner:?} wins ({})", self.result);
        }
    }
}

fn parse_square(notation: &str) -> Result<Square, MoveInputError> {
    notation
        .parse()
        .map_err(|_| MoveInputError::InvalidSquare(notation.to_string()))
}
