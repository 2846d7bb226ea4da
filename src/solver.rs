//! Per-puzzle search driver.
//!
//! [`Solver`] owns everything the search needs across puzzles: the shared
//! read-only Zobrist table, the pseudo-random stream, the transposition
//! pool, and reusable working buffers. Solving a puzzle clears the pool,
//! then repeatedly simulates from the root state, keeping the shortest
//! solution seen and stopping early once the simulated solution sequence
//! stabilizes.

use crate::constants::{MAX_STEPS, N_ITERS, STAGNATION_LIMIT};
use crate::grid::{Board, ColorCounts, RegionState};
use crate::mcts::simulate;
use crate::pool::{NodePool, PoolError};
use crate::rng::SearchRng;
use crate::zobrist::ZobristTable;

/// Search statistics for one solved puzzle.
#[derive(Debug, Clone, Copy)]
pub struct SolveStats {
    /// Simulations actually run (below the budget on early exit).
    pub iterations: usize,
    /// Occupied transposition-table slots at the end of the search.
    pub nodes: usize,
}

/// Search engine state, reusable across puzzles.
///
/// The Zobrist table is generated once and shared by every puzzle; the
/// transposition pool is cleared per puzzle and the random stream runs on
/// continuously.
pub struct Solver {
    zobrist: ZobristTable,
    rng: SearchRng,
    pool: NodePool,
    region: RegionState,
    counts: ColorCounts,
    solution: Vec<u8>,
}

impl Solver {
    /// Build a solver whose random stream starts from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = SearchRng::new(seed);
        let zobrist = ZobristTable::new(&mut rng);
        Self {
            zobrist,
            rng,
            pool: NodePool::new(),
            region: RegionState::new(),
            counts: ColorCounts::new(),
            solution: Vec::with_capacity(MAX_STEPS),
        }
    }

    /// Find a near-minimal solution for `board`.
    pub fn solve(&mut self, board: &Board) -> Result<Vec<u8>, PoolError> {
        self.solve_with_stats(board).map(|(moves, _)| moves)
    }

    /// [`solve`](Solver::solve), also reporting search statistics.
    pub fn solve_with_stats(
        &mut self,
        board: &Board,
    ) -> Result<(Vec<u8>, SolveStats), PoolError> {
        self.pool.clear();
        self.region.reset(board, &self.zobrist, &mut self.counts);
        let (root, _) = self.pool.lookup_or_insert(self.region.hash)?;
        self.pool.get_mut(root).init_priors(&self.counts);

        let mut best: Vec<u8> = Vec::with_capacity(MAX_STEPS);
        let mut best_score = u32::MAX;
        let mut prev_hash = 0u64;
        let mut same_count = 0;
        let mut iterations = 0;

        for _ in 0..N_ITERS {
            iterations += 1;
            self.region.reset(board, &self.zobrist, &mut self.counts);
            self.solution.clear();
            let score = simulate(
                &mut self.pool,
                root,
                board,
                &self.zobrist,
                &mut self.rng,
                &mut self.region,
                &mut self.counts,
                &mut self.solution,
            )?;

            if score < best_score {
                best_score = score;
                best.clear();
                best.extend_from_slice(&self.solution);
            }

            // Fingerprint this iteration's solution; a run of identical
            // fingerprints means the search has settled on an answer.
            let hash = self
                .solution
                .iter()
                .enumerate()
                .fold(0u64, |h, (i, &color)| h ^ self.zobrist.step_key(i, color));
            if hash == prev_hash {
                same_count += 1;
                if same_count >= STAGNATION_LIMIT {
                    break;
                }
            } else {
                same_count = 0;
                prev_hash = hash;
            }
        }

        let stats = SolveStats {
            iterations,
            nodes: self.pool.len(),
        };
        Ok((best, stats))
    }

    /// Replay `moves` against a fresh region; true if they unify the board.
    pub fn verify(&mut self, board: &Board, moves: &[u8]) -> bool {
        self.region.reset(board, &self.zobrist, &mut self.counts);
        for &color in moves {
            self.region
                .transition(board, color, &self.zobrist, &mut self.counts);
        }
        self.region.is_unified()
    }
}
