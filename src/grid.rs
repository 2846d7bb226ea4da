//! Board contents and the growing absorbed region.
//!
//! The board is a flat array of color indices, immutable for the lifetime of
//! a puzzle. All mutable search state lives in [`RegionState`]: the absorbed
//! membership flags, the frontier of absorbed cells that still border
//! unabsorbed ones, and the incrementally maintained Zobrist hash of the
//! absorbed set.
//!
//! [`RegionState::transition`] is the single state-changing operation: one
//! call absorbs every cell of the chosen color reachable from the frontier,
//! transitively, and leaves behind the per-color counts of cells still
//! bordering the region.

use std::fmt;

use crate::constants::{CELLS, LEN, NCOLORS, SEED_X, SEED_Y};
use crate::zobrist::ZobristTable;

/// A cell, as an index into the flat `LEN * LEN` array.
pub type Cell = usize;

/// Flat index of the cell at `(x, y)`.
#[inline]
pub const fn cell_at(x: usize, y: usize) -> Cell {
    y * LEN + x
}

/// In-bounds orthogonal neighbors of a cell, in left/right/up/down order.
#[inline]
pub fn neighbors(cell: Cell) -> impl Iterator<Item = Cell> {
    let x = cell % LEN;
    let y = cell / LEN;
    let mut out = [0; 4];
    let mut n = 0;
    if x > 0 {
        out[n] = cell - 1;
        n += 1;
    }
    if x + 1 < LEN {
        out[n] = cell + 1;
        n += 1;
    }
    if y > 0 {
        out[n] = cell - LEN;
        n += 1;
    }
    if y + 1 < LEN {
        out[n] = cell + LEN;
        n += 1;
    }
    out.into_iter().take(n)
}

/// Board contents: one color index per cell, never mutated during search.
#[derive(Clone)]
pub struct Board {
    colors: [u8; CELLS],
}

impl Board {
    /// Build a board from raw color indices.
    pub fn from_cells(colors: [u8; CELLS]) -> Self {
        Self { colors }
    }

    /// A board painted entirely in one color.
    pub fn uniform(color: u8) -> Self {
        Self { colors: [color; CELLS] }
    }

    /// A uniformly random board.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut colors = [0u8; CELLS];
        for c in colors.iter_mut() {
            *c = rng.u8(0..NCOLORS as u8);
        }
        Self { colors }
    }

    /// Color of a cell.
    #[inline]
    pub fn color(&self, cell: Cell) -> u8 {
        self.colors[cell]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..LEN {
            for x in 0..LEN {
                write!(f, "{}", (b'1' + self.color(cell_at(x, y))) as char)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-color counts of unabsorbed cells currently bordering the region.
///
/// A color with a zero count cannot grow the region and is pruned from the
/// action set. Counts are tallies over frontier scans, so a single cell may
/// be counted more than once; only zero versus nonzero is meaningful.
#[derive(Clone, Copy, Default)]
pub struct ColorCounts {
    counts: [u32; NCOLORS],
}

impl ColorCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for one color.
    #[inline]
    pub fn count(&self, color: u8) -> u32 {
        self.counts[color as usize]
    }

    /// Colors that can still grow the region, in ascending order.
    pub fn candidates(&self) -> impl Iterator<Item = u8> + '_ {
        (0..NCOLORS as u8).filter(move |&c| self.counts[c as usize] > 0)
    }

    /// True when no color can grow the region, i.e. the board is unified.
    pub fn is_exhausted(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    #[inline]
    fn clear(&mut self) {
        self.counts = [0; NCOLORS];
    }

    #[inline]
    fn bump(&mut self, color: u8) {
        self.counts[color as usize] += 1;
    }
}

/// The absorbed region: membership, frontier, and incremental hash.
///
/// Invariants, restored by every [`transition`](RegionState::transition):
/// - every frontier cell is absorbed and borders at least one unabsorbed cell
/// - `hash` is the XOR of the Zobrist keys of exactly the absorbed cells
pub struct RegionState {
    pub absorbed: [bool; CELLS],
    pub frontier: Vec<Cell>,
    pub hash: u64,
}

impl RegionState {
    pub fn new() -> Self {
        Self {
            absorbed: [false; CELLS],
            frontier: Vec::with_capacity(CELLS),
            hash: 0,
        }
    }

    /// Reset to the single seed cell, then absorb its connected same-color
    /// area. `counts` is left describing the colors bordering the result.
    pub fn reset(&mut self, board: &Board, zobrist: &ZobristTable, counts: &mut ColorCounts) {
        let seed = cell_at(SEED_X, SEED_Y);
        self.absorbed.fill(false);
        self.absorbed[seed] = true;
        self.frontier.clear();
        self.frontier.push(seed);
        self.hash = zobrist.key(seed);
        self.transition(board, board.color(seed), zobrist, counts);
    }

    /// Absorb every cell of `color` reachable from the frontier.
    ///
    /// Scans the frontier front to back; same-colored unabsorbed neighbors
    /// are absorbed and appended, so the scan picks them up before it
    /// terminates and growth propagates through the whole connected area in
    /// this one call. Differing neighbors are tallied into `counts` (cleared
    /// on entry) and keep the cell on the frontier; a cell with no unabsorbed
    /// neighbors left is swap-removed, frontier order being irrelevant.
    pub fn transition(
        &mut self,
        board: &Board,
        color: u8,
        zobrist: &ZobristTable,
        counts: &mut ColorCounts,
    ) {
        counts.clear();
        let mut i = 0;
        while i < self.frontier.len() {
            let cell = self.frontier[i];
            let mut still_frontier = false;
            for n in neighbors(cell) {
                if self.absorbed[n] {
                    continue;
                }
                let c = board.color(n);
                if c == color {
                    self.absorbed[n] = true;
                    self.hash ^= zobrist.key(n);
                    self.frontier.push(n);
                } else {
                    counts.bump(c);
                    still_frontier = true;
                }
            }
            if still_frontier {
                i += 1;
            } else {
                self.frontier.swap_remove(i);
            }
        }
    }

    /// Number of absorbed cells.
    pub fn absorbed_count(&self) -> usize {
        self.absorbed.iter().filter(|&&a| a).count()
    }

    /// True when the whole board has been absorbed.
    pub fn is_unified(&self) -> bool {
        self.absorbed_count() == CELLS
    }
}

impl Default for RegionState {
    fn default() -> Self {
        Self::new()
    }
}
