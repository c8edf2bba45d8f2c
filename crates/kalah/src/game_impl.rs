//! Implementation of the `Rules` trait for Kalah.

use mancala_core::{Board, Move, Result, Rules, Side};

use crate::sowing::{sow, Play};

/// Kalah rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Kalah;

impl Kalah {
    /// Starting position: `pockets` per side, `stones` in each, empty stores.
    ///
    /// # Errors
    /// Returns `MancalaError::InvalidBoard` if `pockets` is zero.
    pub fn initial_board(pockets: usize, stones: u32) -> Result<Board> {
        Board::new([vec![stones; pockets], vec![stones; pockets]], [0, 0])
    }

    /// Play a move, reporting captures, extra turns and the sweep.
    ///
    /// # Errors
    /// Returns `MancalaError::IllegalMove` if the pocket is empty or off the row.
    pub fn play(&self, board: &Board, side: Side, mv: Move) -> Result<Play> {
        sow(board, side, mv)
    }
}

impl Rules for Kalah {
    fn legal_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        board
            .row(side)
            .iter()
            .enumerate()
            .filter(|(_, &stones)| stones > 0)
            .map(|(i, _)| Move(i))
            .collect()
    }

    fn apply_move(&self, board: &Board, side: Side, mv: Move) -> Board {
        let play = sow(board, side, mv);
        debug_assert!(play.is_ok(), "apply_move called with an illegal move: {:?}", play);
        play.map(|play| play.board).unwrap_or_else(|_| board.clone())
    }
}
