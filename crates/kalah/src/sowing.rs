//! Sowing, captures and the end-of-game sweep.

use mancala_core::{Board, MancalaError, Move, Result, Side};

/// A place a stone can be dropped while sowing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Slot {
    Pocket(Side, usize),
    Store(Side),
}

impl Slot {
    /// Next slot counter-clockwise.
    ///
    /// Dark's row runs toward index 0 and into Dark's store; Light's row runs
    /// toward the last index and into Light's store.
    fn next(self, width: usize) -> Slot {
        match self {
            Slot::Pocket(Side::Dark, 0) => Slot::Store(Side::Dark),
            Slot::Pocket(Side::Dark, i) => Slot::Pocket(Side::Dark, i - 1),
            Slot::Store(Side::Dark) => Slot::Pocket(Side::Light, 0),
            Slot::Pocket(Side::Light, i) if i + 1 == width => Slot::Store(Side::Light),
            Slot::Pocket(Side::Light, i) => Slot::Pocket(Side::Light, i + 1),
            Slot::Store(Side::Light) => Slot::Pocket(Side::Dark, width - 1),
        }
    }
}

/// Result of playing one move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Play {
    /// The successor board.
    pub board: Board,

    /// The last stone landed in the mover's store.
    pub extra_turn: bool,

    /// Stones taken from the opponent's facing pocket (0 if no capture).
    pub captured: u32,

    /// The move emptied a row and the remaining stones were swept.
    pub game_over: bool,
}

/// Sow the stones of `mv` for `side` and resolve captures and the sweep.
///
/// # Errors
/// Returns `MancalaError::IllegalMove` if the pocket is off the row or empty.
pub fn sow(board: &Board, side: Side, mv: Move) -> Result<Play> {
    let illegal = || MancalaError::IllegalMove {
        side: side as u8,
        pocket: mv.pocket(),
    };
    let mut stones = match board.pocket(side, mv.pocket()) {
        Some(0) | None => return Err(illegal()),
        Some(n) => n,
    };

    let width = board.width();
    let mut next = board.clone();
    next.row_mut(side)[mv.pocket()] = 0;

    let mut slot = Slot::Pocket(side, mv.pocket());
    while stones > 0 {
        slot = slot.next(width);
        match slot {
            Slot::Store(owner) if owner != side => continue,
            Slot::Store(owner) => next.bank(owner, 1),
            Slot::Pocket(owner, i) => next.row_mut(owner)[i] += 1,
        }
        stones -= 1;
    }

    let extra_turn = slot == Slot::Store(side);
    let mut captured = 0;
    if let Slot::Pocket(owner, i) = slot {
        let facing = next.row(side.opponent())[i];
        if owner == side && next.row(side)[i] == 1 && facing > 0 {
            captured = facing;
            next.row_mut(side)[i] = 0;
            next.row_mut(side.opponent())[i] = 0;
            next.bank(side, facing + 1);
        }
    }

    let game_over = sweep(&mut next);
    Ok(Play {
        board: next,
        extra_turn,
        captured,
        game_over,
    })
}

/// Bank every remaining stone once either row is empty.
///
/// Returns true if a sweep happened.
fn sweep(board: &mut Board) -> bool {
    if Side::BOTH.iter().all(|&side| board.row_total(side) > 0) {
        return false;
    }
    for side in Side::BOTH {
        let remaining = board.row_total(side);
        board.row_mut(side).iter_mut().for_each(|pocket| *pocket = 0);
        board.bank(side, remaining);
    }
    true
}
