//! Integration tests for flood-rust.
//!
//! These exercise the solver's externally observable properties: the
//! frontier and hash invariants of the flood-fill transition, termination
//! bounds, transposition sharing across move orders, search convergence,
//! and the puzzle-record text format.

use std::io::Cursor;

use flood_rust::constants::{CELLS, LEN, MAX_STEPS, N_ITERS, NCOLORS, SEED_X, SEED_Y};
use flood_rust::grid::{cell_at, neighbors, Board, ColorCounts, RegionState};
use flood_rust::mcts::Node;
use flood_rust::pool::NodePool;
use flood_rust::puzzle::{format_solution, PuzzleReader};
use flood_rust::rng::SearchRng;
use flood_rust::solver::Solver;
use flood_rust::zobrist::ZobristTable;

// =============================================================================
// Helper functions
// =============================================================================

fn zobrist(seed: u64) -> ZobristTable {
    let mut rng = SearchRng::new(seed);
    ZobristTable::new(&mut rng)
}

/// XOR of the keys of the currently absorbed cells, computed from scratch.
fn recomputed_hash(state: &RegionState, z: &ZobristTable) -> u64 {
    (0..CELLS)
        .filter(|&c| state.absorbed[c])
        .fold(0u64, |h, c| h ^ z.key(c))
}

/// Check the frontier invariant: every frontier cell is absorbed and still
/// borders at least one unabsorbed cell.
fn assert_frontier_invariant(state: &RegionState) {
    for &cell in &state.frontier {
        assert!(state.absorbed[cell], "frontier cell {cell} not absorbed");
        assert!(
            neighbors(cell).any(|n| !state.absorbed[n]),
            "frontier cell {cell} is fully surrounded"
        );
    }
}

/// A board uniform in `fill` except for explicitly placed cells.
fn board_with(fill: u8, placed: &[(usize, usize, u8)]) -> Board {
    let mut cells = [fill; CELLS];
    for &(x, y, color) in placed {
        cells[cell_at(x, y)] = color;
    }
    Board::from_cells(cells)
}

// =============================================================================
// Flood-fill transition invariants
// =============================================================================

#[test]
fn test_frontier_invariant_after_random_transitions() {
    let mut boards_rng = fastrand::Rng::with_seed(101);
    let z = zobrist(1);
    let mut state = RegionState::new();
    let mut counts = ColorCounts::new();

    for _ in 0..10 {
        let board = Board::random(&mut boards_rng);
        state.reset(&board, &z, &mut counts);
        assert_frontier_invariant(&state);

        for _ in 0..50 {
            let color = boards_rng.u8(0..NCOLORS as u8);
            state.transition(&board, color, &z, &mut counts);
            assert_frontier_invariant(&state);
        }
    }
}

#[test]
fn test_hash_never_drifts() {
    let mut boards_rng = fastrand::Rng::with_seed(202);
    let z = zobrist(2);
    let mut state = RegionState::new();
    let mut counts = ColorCounts::new();

    for _ in 0..10 {
        let board = Board::random(&mut boards_rng);
        state.reset(&board, &z, &mut counts);
        assert_eq!(state.hash, recomputed_hash(&state, &z));

        for _ in 0..50 {
            let color = boards_rng.u8(0..NCOLORS as u8);
            state.transition(&board, color, &z, &mut counts);
            assert_eq!(state.hash, recomputed_hash(&state, &z));
        }
    }
}

#[test]
fn test_candidate_play_absorbs_whole_board_within_bound() {
    let mut boards_rng = fastrand::Rng::with_seed(303);
    let z = zobrist(3);
    let mut state = RegionState::new();
    let mut counts = ColorCounts::new();

    for _ in 0..10 {
        let board = Board::random(&mut boards_rng);
        state.reset(&board, &z, &mut counts);

        let mut moves = 0;
        while !counts.is_exhausted() {
            let candidates: Vec<u8> = counts.candidates().collect();
            let color = candidates[boards_rng.usize(0..candidates.len())];
            state.transition(&board, color, &z, &mut counts);
            moves += 1;
            assert!(
                moves <= MAX_STEPS,
                "random candidate play exceeded {MAX_STEPS} moves"
            );
        }
        assert!(state.is_unified());
    }
}

// =============================================================================
// Transposition sharing
// =============================================================================

#[test]
fn test_move_orders_reaching_same_region_share_a_node() {
    // Uniform board except two opposite corners: after the reset everything
    // but the corners is absorbed, and the two remaining cells can be taken
    // in either order.
    let board = board_with(0, &[(0, 0, 1), (LEN - 1, LEN - 1, 2)]);
    let z = zobrist(4);
    let mut counts = ColorCounts::new();

    let mut first = RegionState::new();
    first.reset(&board, &z, &mut counts);
    first.transition(&board, 1, &z, &mut counts);
    let after_one = first.hash;
    first.transition(&board, 2, &z, &mut counts);
    let via_12 = first.hash;

    let mut second = RegionState::new();
    second.reset(&board, &z, &mut counts);
    second.transition(&board, 2, &z, &mut counts);
    assert_ne!(second.hash, after_one, "different prefixes must differ");
    second.transition(&board, 1, &z, &mut counts);
    let via_21 = second.hash;

    assert_eq!(via_12, via_21, "same absorbed set must hash identically");
    assert!(first.is_unified());
    assert!(second.is_unified());

    let mut pool = NodePool::new();
    let (idx_a, created_a) = pool.lookup_or_insert(via_12).unwrap();
    let (idx_b, created_b) = pool.lookup_or_insert(via_21).unwrap();
    assert!(created_a);
    assert!(!created_b, "second order must reuse the existing node");
    assert_eq!(idx_a, idx_b);
    assert_eq!(pool.len(), 1);
}

// =============================================================================
// Welford statistics
// =============================================================================

#[test]
fn test_incremental_stats_match_direct_computation() {
    let mut rng = fastrand::Rng::with_seed(404);
    for _ in 0..20 {
        let costs: Vec<u32> = (0..rng.usize(1..40)).map(|_| rng.u32(0..60)).collect();
        let mut node = Node::EMPTY;
        for &c in &costs {
            node.record(2, c);
        }

        let n = costs.len() as f32;
        let mean = costs.iter().sum::<u32>() as f32 / n;
        let sse: f32 = costs.iter().map(|&c| (c as f32 - mean).powi(2)).sum();

        assert_eq!(node.visits[2] as usize, costs.len());
        assert!(
            (node.mean_cost[2] - mean).abs() < 1e-3,
            "mean {} vs {}",
            node.mean_cost[2],
            mean
        );
        assert!(
            (node.sse[2] - sse).abs() < sse.max(1.0) * 1e-3,
            "sse {} vs {}",
            node.sse[2],
            sse
        );
    }
}

// =============================================================================
// Solver scenarios
// =============================================================================

#[test]
fn test_uniform_board_solves_to_empty_answer() {
    let board = Board::uniform(3);
    let mut solver = Solver::new(5);
    let (moves, stats) = solver.solve_with_stats(&board).unwrap();
    assert!(moves.is_empty());
    assert_eq!(format_solution(&moves), "");
    assert!(stats.iterations < N_ITERS, "trivial board must stop early");
}

#[test]
fn test_seed_bordered_by_every_other_color() {
    // A two-cell seed region whose boundary shows all five other colors.
    let board = board_with(
        1,
        &[
            (SEED_X, SEED_Y, 0),
            (SEED_X + 1, SEED_Y, 0),
            (SEED_X - 1, SEED_Y, 1),
            (SEED_X, SEED_Y - 1, 2),
            (SEED_X, SEED_Y + 1, 3),
            (SEED_X + 1, SEED_Y - 1, 4),
            (SEED_X + 1, SEED_Y + 1, 5),
        ],
    );
    let z = zobrist(6);
    let mut state = RegionState::new();
    let mut counts = ColorCounts::new();
    state.reset(&board, &z, &mut counts);

    assert_eq!(state.absorbed_count(), 2);
    for color in 1..NCOLORS as u8 {
        assert!(
            counts.count(color) > 0,
            "color {color} should border the seed region"
        );
    }

    // Rollouts from this state always finish within the move bound.
    let mut srng = SearchRng::new(7);
    for _ in 0..20 {
        state.reset(&board, &z, &mut counts);
        let mut solution = Vec::new();
        let moves = flood_rust::rollout::rollout(
            &board,
            &z,
            &mut srng,
            &mut state,
            &mut counts,
            &mut solution,
        );
        assert!(state.is_unified());
        assert!((moves as usize) <= MAX_STEPS);
    }
}

#[test]
fn test_stagnation_stops_trivially_solved_puzzle_early() {
    // One off-color corner: the only useful move is color 2, every
    // simulation finds it, and the stagnation rule kicks in at once.
    let board = board_with(0, &[(0, 0, 2)]);
    let mut solver = Solver::new(8);
    let (moves, stats) = solver.solve_with_stats(&board).unwrap();

    assert_eq!(moves, vec![2]);
    assert!(
        stats.iterations < N_ITERS,
        "expected early exit, ran all {} iterations",
        stats.iterations
    );
    assert!(solver.verify(&board, &moves));
}

#[test]
fn test_solutions_replay_to_a_unified_board() {
    let mut boards_rng = fastrand::Rng::with_seed(505);
    let mut solver = Solver::new(9);

    for _ in 0..2 {
        let board = Board::random(&mut boards_rng);
        let (moves, _) = solver.solve_with_stats(&board).unwrap();
        assert!(!moves.is_empty());
        assert!(moves.len() <= MAX_STEPS);
        assert!(
            solver.verify(&board, &moves),
            "reported solution does not unify the board"
        );
    }
}

// =============================================================================
// Puzzle stream end to end
// =============================================================================

#[test]
fn test_puzzle_stream_in_order_with_malformed_tail() {
    // Two valid uniform records followed by a malformed one: both valid
    // records produce answers, the malformed record stops the stream.
    let record = |ch: char| -> String {
        let row: String = std::iter::repeat_n(ch, LEN).collect();
        (0..LEN).map(|_| format!("{row}\n")).collect()
    };
    let mut input = String::new();
    input.push_str(&record('2'));
    input.push_str(&record('5'));
    input.push_str("123\n");

    let mut reader = PuzzleReader::new(Cursor::new(input));
    let mut solver = Solver::new(10);
    let mut answers = Vec::new();

    loop {
        match reader.next_board() {
            Ok(Some(board)) => {
                let moves = solver.solve(&board).unwrap();
                answers.push(format_solution(&moves));
            }
            Ok(None) => panic!("stream should end on the malformed record"),
            Err(_) => break,
        }
    }

    assert_eq!(answers, vec![String::new(), String::new()]);
}
