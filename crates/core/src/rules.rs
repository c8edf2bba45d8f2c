use crate::{Board, Move, Side};

/// The board-rules collaborator consumed by every searcher.
///
/// Searchers treat this as a black box: they only enumerate moves and ask
/// for successor boards. Implementations must be pure and deterministic.
pub trait Rules {
    /// Returns the legal moves for `side`, in a stable generation order.
    ///
    /// An empty vector means the side cannot move, which the searchers
    /// treat as the end of the branch.
    fn legal_moves(&self, board: &Board, side: Side) -> Vec<Move>;

    /// Applies `mv` for `side`, returning a new board (immutable operation).
    ///
    /// Behaviour for a move not returned by [`Rules::legal_moves`] is
    /// unspecified.
    fn apply_move(&self, board: &Board, side: Side, mv: Move) -> Board;
}

impl<R: Rules + ?Sized> Rules for &R {
    fn legal_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        (**self).legal_moves(board, side)
    }

    fn apply_move(&self, board: &Board, side: Side, mv: Move) -> Board {
        (**self).apply_move(board, side, mv)
    }
}
