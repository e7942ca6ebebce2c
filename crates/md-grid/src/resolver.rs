//! Candidate destinations for a dweller.

use md_core::{Coord, DIAGONAL_OFFSETS};

/// The four diagonal neighbours of `pos`, in priority order.
///
/// Offsets `(-1,-1)`, `(+1,+1)`, `(+1,-1)`, `(-1,+1)` are applied with
/// wraparound on both axes.  A dweller always takes the first free one.
pub fn candidate_moves(pos: Coord) -> [Coord; 4] {
    DIAGONAL_OFFSETS.map(|(dr, dc)| pos.offset(dr, dc))
}

/// `pos` plus its candidates: every cell one move attempt needs locked.
pub fn lock_footprint(pos: Coord) -> [Coord; 5] {
    let [a, b, c, d] = candidate_moves(pos);
    [pos, a, b, c, d]
}
