//! Random playout to a terminal state.
//!
//! A rollout finishes a partially absorbed board with uniformly random
//! color choices, producing the cheap cost estimate that seeds a freshly
//! discovered node's statistics. Only colors that can actually grow the
//! region are candidates, so every move absorbs at least one cell and the
//! playout terminates.

use crate::constants::NCOLORS;
use crate::grid::{Board, ColorCounts, RegionState};
use crate::rng::SearchRng;
use crate::zobrist::ZobristTable;

/// Play random useful moves until the board is unified.
///
/// `counts` must describe the colors bordering `region` on entry; both are
/// advanced in place. Every chosen color is appended to `solution`. Returns
/// the number of moves played.
pub fn rollout(
    board: &Board,
    zobrist: &ZobristTable,
    rng: &mut SearchRng,
    region: &mut RegionState,
    counts: &mut ColorCounts,
    solution: &mut Vec<u8>,
) -> u32 {
    let mut moves = 0;
    loop {
        let mut candidates = [0u8; NCOLORS];
        let mut ncandidates = 0;
        for color in counts.candidates() {
            candidates[ncandidates] = color;
            ncandidates += 1;
        }
        if ncandidates == 0 {
            return moves;
        }
        let color = candidates[rng.next_u32() as usize % ncandidates];
        solution.push(color);
        region.transition(board, color, zobrist, counts);
        moves += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_STEPS;

    #[test]
    fn test_rollout_on_unified_board_is_free() {
        let board = Board::uniform(0);
        let mut srng = SearchRng::new(1);
        let z = ZobristTable::new(&mut srng);
        let mut region = RegionState::new();
        let mut counts = ColorCounts::new();
        region.reset(&board, &z, &mut counts);

        let mut solution = Vec::new();
        let moves = rollout(&board, &z, &mut srng, &mut region, &mut counts, &mut solution);
        assert_eq!(moves, 0);
        assert!(solution.is_empty());
    }

    #[test]
    fn test_rollout_unifies_random_boards() {
        let mut boards_rng = fastrand::Rng::with_seed(21);
        let mut srng = SearchRng::new(2);
        let z = ZobristTable::new(&mut srng);
        let mut region = RegionState::new();
        let mut counts = ColorCounts::new();

        for _ in 0..10 {
            let board = Board::random(&mut boards_rng);
            region.reset(&board, &z, &mut counts);
            let mut solution = Vec::new();
            let moves = rollout(&board, &z, &mut srng, &mut region, &mut counts, &mut solution);

            assert!(region.is_unified());
            assert!(counts.is_exhausted());
            assert_eq!(moves as usize, solution.len());
            assert!(
                (moves as usize) <= MAX_STEPS,
                "rollout took {moves} moves, expected at most {MAX_STEPS}"
            );
        }
    }
}
