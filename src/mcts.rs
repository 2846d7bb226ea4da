//! Tree search over region states with Thompson sampling.
//!
//! Each discovered region state gets a [`Node`] holding per-color cost
//! statistics: visit count, running mean of moves-to-finish, and the sum of
//! squared deviations for a variance estimate. Action selection draws one
//! Gaussian sample per candidate color from its estimated cost distribution
//! and plays the lowest sample, so exploration comes entirely from estimate
//! uncertainty; there is no separate exploration bonus term.
//!
//! [`simulate`] is the recursive descent: sample a color, apply the
//! transition, then either recurse into a known child or roll out a freshly
//! discovered one, and back the resulting cost up through a Welford update
//! on the way out.

use crate::constants::{NCOLORS, PRIOR_MEAN, PRIOR_SSE, PRIOR_VISITS};
use crate::grid::{Board, ColorCounts, RegionState};
use crate::pool::{NodePool, PoolError};
use crate::rng::SearchRng;
use crate::rollout::rollout;
use crate::zobrist::ZobristTable;

/// Per-state search statistics, one entry per palette color.
///
/// A color with zero visits is not a sampling candidate; a node whose colors
/// all have zero visits is terminal (the region it describes is complete).
#[derive(Clone, Copy)]
pub struct Node {
    /// Region hash this node belongs to; `0` marks an empty pool slot.
    pub hash: u64,
    pub visits: [u32; NCOLORS],
    pub mean_cost: [f32; NCOLORS],
    pub sse: [f32; NCOLORS],
}

impl Node {
    /// The empty-slot value used by the pool.
    pub const EMPTY: Node = Node {
        hash: 0,
        visits: [0; NCOLORS],
        mean_cost: [0.0; NCOLORS],
        sse: [0.0; NCOLORS],
    };

    /// Seed statistics for every color that can currently grow the region.
    ///
    /// The prior is deliberately pessimistic so that one bad real sample
    /// does not bury a color before it has been tried.
    pub fn init_priors(&mut self, counts: &ColorCounts) {
        for color in 0..NCOLORS {
            if counts.count(color as u8) > 0 {
                self.visits[color] = PRIOR_VISITS;
                self.mean_cost[color] = PRIOR_MEAN;
                self.sse[color] = PRIOR_SSE;
            }
        }
    }

    /// Fold one observed cost into a color's statistics (Welford update).
    pub fn record(&mut self, color: u8, score: u32) {
        let c = color as usize;
        self.visits[c] += 1;
        let n = self.visits[c] as f32;
        let score = score as f32;
        let old_mean = self.mean_cost[c];
        let new_mean = old_mean + (score - old_mean) / n;
        self.mean_cost[c] = new_mean;
        self.sse[c] += (score - old_mean) * (score - new_mean);
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Thompson-sample an action: lowest Gaussian draw wins.
///
/// The standard deviation is the standard error of the mean,
/// `sqrt(sse / visits^2)`, so a color's sampling noise shrinks as evidence
/// accumulates. Colors are scanned in ascending order and ties keep the
/// first sample, via strict `<`. Returns `None` when no color has been
/// visited, which only happens once the region is complete.
pub fn select_color(node: &Node, rng: &mut SearchRng) -> Option<u8> {
    let mut best_cost = f32::INFINITY;
    let mut best_color = None;
    for color in 0..NCOLORS {
        let n = node.visits[color];
        if n == 0 {
            continue;
        }
        let sigma = (node.sse[color] / (n as f32 * n as f32)).sqrt();
        let sampled = rng.normal(node.mean_cost[color], sigma);
        if sampled < best_cost {
            best_cost = sampled;
            best_color = Some(color as u8);
        }
    }
    best_color
}

/// One simulation step from the node at `node_idx`, recursing toward a leaf.
///
/// Samples a color, records it into `solution`, applies the transition, and
/// resolves the child state through the pool: a newly discovered child is
/// primed with priors and evaluated by a rollout, a known child is descended
/// into. The returned cost counts every move from this state to completion,
/// including the one just taken, and has already been folded into this
/// node's statistics.
pub fn simulate(
    pool: &mut NodePool,
    node_idx: usize,
    board: &Board,
    zobrist: &ZobristTable,
    rng: &mut SearchRng,
    region: &mut RegionState,
    counts: &mut ColorCounts,
    solution: &mut Vec<u8>,
) -> Result<u32, PoolError> {
    let Some(color) = select_color(pool.get(node_idx), rng) else {
        return Ok(0);
    };
    solution.push(color);
    region.transition(board, color, zobrist, counts);

    let (child_idx, created) = pool.lookup_or_insert(region.hash)?;
    let below = if created {
        pool.get_mut(child_idx).init_priors(counts);
        rollout(board, zobrist, rng, region, counts, solution)
    } else {
        simulate(pool, child_idx, board, zobrist, rng, region, counts, solution)?
    };

    let score = below + 1;
    pool.get_mut(node_idx).record(color, score);
    Ok(score)
}
