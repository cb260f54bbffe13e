use alloc::vec::Vec;

use crate::*;

/// Whether `higher` directly follows `lower`. Only numeric ranks chain.
pub const fn is_next_rank(lower: Rank, higher: Rank) -> bool {
    match (lower.value(), higher.value()) {
        (Some(lower), Some(higher)) => lower + 1 == higher,
        _ => false,
    }
}

/// Decides whether `card` may be put on the cell at `target`. Indices outside the board are never legal.
pub fn can_place(board: &Board, target: CellIndex, card: Card) -> bool {
    let Some(tile) = board.tile(target) else {
        return false;
    };

    match (tile.role(), tile.content().head()) {
        (CellRole::Flower, None) => card.is_flower(),
        (CellRole::Run | CellRole::Exit, None) => true,
        (CellRole::Null, None) => false,
        (CellRole::Board, None) => can_extend_column(board, target, card),
        (CellRole::Run, Some(head)) => head.suit == card.suit && is_next_rank(head.rank, card.rank),
        (_, Some(_)) => false,
    }
}

/// An empty board cell in the first playable row takes anything, deeper cells need a plain card of another suit
/// directly above, one rank lower.
fn can_extend_column(board: &Board, target: CellIndex, card: Card) -> bool {
    let width = board.width();
    let above = match cell_above(target, width) {
        Some(above) if above >= CellIndex::from(width) => above,
        _ => return true,
    };

    board
        .tile(above)
        .and_then(|tile| tile.content().single())
        .is_some_and(|above| above.suit != card.suit && is_next_rank(above.rank, card.rank))
}

/// Every cell `card` could legally be put on.
pub fn legal_targets(board: &Board, card: Card) -> Vec<CellIndex> {
    (0..usize::from(board.total_cells()))
        .filter(|&index| can_place(board, index, card))
        .collect()
}
