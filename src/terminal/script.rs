use std::collections::VecDeque;

use shakmaty::Square;
use thiserror::Error;

use crate::game_logic::{GameEngine, MoveInputError};

/// Error when parsing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid move notation: '{0}'")]
pub struct ScriptError(String);

/// A queue of moves parsed from a compact text script.
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct MoveScript {
    pending: VecDeque<(Square, Square)>,
}

impl MoveScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a script and queue its moves.
    ///
    /// Format:
    /// - A move is 4 characters, source then destination (e.g., "e2e4")
    /// - Whitespace or periods separate moves
    ///
    /// Examples:
    /// - `"e2e4 e7e5"` - Two moves
    /// - `"d2d4. g7g5. c1g5."` - Three moves
    ///
    /// Nothing is queued if any move is malformed.
    pub fn push_script(&mut self, script: &str) -> Result<(), ScriptError> {
        let moves = parse_script(script)?;
        self.pending.extend(moves);
        Ok(())
    }

    /// Number of moves still queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the next queued move.
    #[inline]
    pub fn next_move(&mut self) -> Option<(Square, Square)> {
        self.pending.pop_front()
    }

    /// Execute all pending moves, calling the provided callback for each.
    pub fn drain<F>(&mut self, mut on_move: F)
    where
        F: FnMut(Square, Square),
    {
        while let Some((from, to)) = self.next_move() {
            on_move(from, to);
        }
    }

    /// Play every pending move against `engine`, collecting whether each was accepted.
    ///
    /// Stops at the first move the engine refuses to interpret.
    pub fn replay(&mut self, engine: &mut GameEngine) -> Result<Vec<bool>, MoveInputError> {
        let mut results = Vec::with_capacity(self.len());
        while let Some((from, to)) = self.next_move() {
            results.push(engine.play(from, to)?);
        }
        Ok(results)
    }
}

/// Parse a move script into (from, to) pairs.
fn parse_script(script: &str) -> Result<Vec<(Square, Square)>, ScriptError> {
    script
        .split(|c: char| c == '.' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_move)
        .collect()
}

fn parse_move(token: &str) -> Result<(Square, Square), ScriptError> {
    let invalid = || ScriptError(token.to_string());

    if token.len() != 4 || !token.is_ascii() {
        return Err(invalid());
    }
    let (from, to) = token.split_at(2);
    let from = from.parse().map_err(|_| invalid())?;
    let to = to.parse().map_err(|_| invalid())?;
    Ok((from, to))
}
