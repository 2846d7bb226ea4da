//! Zobrist keys for incremental region hashing.
//!
//! Each cell gets an independent random 64-bit key. A region's identity is
//! the XOR of the keys of its absorbed cells, so absorbing a cell updates the
//! hash in O(1) and any two move orders reaching the same absorbed set hash
//! identically.
//!
//! The table is read-only after construction and is shared across puzzles;
//! the zero hash is reserved as the transposition table's empty-slot marker.

use crate::constants::{CELLS, LEN};
use crate::grid::Cell;
use crate::rng::SearchRng;

/// Per-cell random key table.
pub struct ZobristTable {
    keys: [u64; CELLS],
}

impl ZobristTable {
    /// Generate a key table from the given stream.
    pub fn new(rng: &mut SearchRng) -> Self {
        let mut keys = [0u64; CELLS];
        for key in keys.iter_mut() {
            *key = rng.mix_u64();
        }
        Self { keys }
    }

    /// Key for a single cell.
    #[inline]
    pub fn key(&self, cell: Cell) -> u64 {
        self.keys[cell]
    }

    /// Key for one move of a solution sequence, identified by its position
    /// in the sequence and the color chosen.
    ///
    /// Reuses the cell table as key material: position wraps at `LEN` rows
    /// and the color selects the column. Used by the driver to fingerprint
    /// whole solutions for the stagnation check.
    #[inline]
    pub fn step_key(&self, move_index: usize, color: u8) -> u64 {
        self.keys[(move_index % LEN) * LEN + color as usize]
    }
}
