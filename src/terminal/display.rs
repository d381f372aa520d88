use std::io::{self, Write};

use crate::ViewDisplay;
use crate::view::{BoardView, Cell};

/// Terminal-based board display for development and testing.
///
/// Renders a [`BoardView`] as an 8×8 grid with rank and file labels.
/// Fogged squares get a grey ANSI background.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl ViewDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, view: &BoardView) -> Result<(), Self::Error> {
        render_view(&mut io::stdout(), view)
    }
}

/// Render a view to any writer. Extracted for testability.
fn render_view(w: &mut impl Write, view: &BoardView) -> Result<(), DisplayError> {
    for (row, cells) in view.rows().iter().enumerate() {
        write!(w, " {} ", view.rank_label(row))?;
        for cell in cells {
            write!(w, "{}", format_cell(*cell))?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// Map a cell to a three-column terminal string.
fn format_cell(cell: Cell) -> String {
    match cell {
        Cell::Piece(_) => format!(" {} ", cell.symbol()),
        Cell::Empty => " · ".to_string(),
        Cell::Fog => "\x1b[100m   \x1b[0m".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::GameEngine;
    use crate::view::Perspective;

    fn render_to_string(view: &BoardView) -> String {
        let mut buf = Vec::new();
        render_view(&mut buf, view).expect("rendering to buffer should succeed");
        String::from_utf8(buf).expect("output should be valid UTF-8")
    }

    #[test]
    fn show_view_contains_all_ranks() {
        let output = render_to_string(&GameEngine::new().render(Perspective::Audience));

        for rank in '1'..='8' {
            assert!(
                output.contains(rank),
                "output should contain rank label '{rank}'"
            );
        }
    }

    #[test]
    fn show_view_contains_file_labels() {
        let output = render_to_string(&GameEngine::new().render(Perspective::White));

        assert!(
            output.contains("a  b  c  d  e  f  g  h"),
            "output should contain file labels"
        );
    }

    #[test]
    fn audience_view_has_no_fog() {
        let output = render_to_string(&GameEngine::new().render(Perspective::Audience));

        assert!(
            !output.contains("\x1b[100m"),
            "audience view should have no fog background"
        );
        assert!(output.starts_with(" 8  r  n  b  q  k  b  n  r "));
    }

    #[test]
    fn player_view_uses_grey_fog() {
        let output = render_to_string(&GameEngine::new().render(Perspective::White));

        assert!(
            output.contains("\x1b[100m"),
            "fogged squares should use grey ANSI background"
        );
    }

    #[test]
    fn black_view_starts_from_rank_one() {
        let output = render_to_string(&GameEngine::new().render(Perspective::Black));

        assert!(output.starts_with(" 1 "), "black sees rank 1 at the top");
    }
}
