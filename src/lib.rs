pub mod game_logic;
pub mod game_state;
pub mod terminal;
pub mod view;

pub use game_logic::{GameEngine, GameResult, MoveInputError, SetupError};
pub use view::{BoardView, Cell, Perspective};

/// Trait for presenting a rendered board to a player.
///
/// Abstracts over output targets (terminal, GUI, network peer) so a front
/// end can draw whatever [`GameEngine::render`] produces for its viewer.
pub trait ViewDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given board view.
    fn show(&mut self, view: &BoardView) -> Result<(), Self::Error>;
}
