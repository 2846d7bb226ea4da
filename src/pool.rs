//! Fixed-capacity transposition table for search nodes.
//!
//! An open-addressed slot array keyed by region hash: a state's start slot is
//! `hash & POOL_MASK` and collisions probe linearly, wrapping around, until a
//! matching hash or an empty slot is found. A slot with hash `0` is empty;
//! there is no deletion and no tombstones. The table is cleared wholesale
//! between puzzles.
//!
//! Capacity is a hard limit: an insert into a full table returns
//! [`PoolError::Exhausted`] instead of probing forever. With `POOL_SIZE`
//! above the iteration budget (each simulation discovers at most one new
//! state) the error is unreachable in the shipped configuration, but the
//! guard keeps an oversized search from turning into an infinite probe loop.

use std::fmt;

use crate::constants::{POOL_MASK, POOL_SIZE};
use crate::mcts::Node;

/// Transposition table failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Every slot is occupied and the requested state is not present.
    Exhausted,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Exhausted => {
                write!(f, "transposition table full ({POOL_SIZE} slots)")
            }
        }
    }
}

impl std::error::Error for PoolError {}

/// Open-addressed node pool.
pub struct NodePool {
    slots: Vec<Node>,
    len: usize,
}

impl NodePool {
    pub fn new() -> Self {
        Self {
            slots: vec![Node::EMPTY; POOL_SIZE],
            len: 0,
        }
    }

    /// Find the node for `hash`, claiming a fresh slot if it is unseen.
    ///
    /// Returns the slot index and whether the slot was newly claimed; a new
    /// node carries the hash but empty statistics, which the caller is
    /// expected to initialize before the next lookup of the same state.
    pub fn lookup_or_insert(&mut self, hash: u64) -> Result<(usize, bool), PoolError> {
        for probe in 0..POOL_SIZE {
            let idx = (hash as usize).wrapping_add(probe) & POOL_MASK;
            let slot_hash = self.slots[idx].hash;
            if slot_hash == 0 {
                self.slots[idx].hash = hash;
                self.len += 1;
                return Ok((idx, true));
            }
            if slot_hash == hash {
                return Ok((idx, false));
            }
        }
        Err(PoolError::Exhausted)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> &Node {
        &self.slots[idx]
    }

    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.slots[idx]
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Empty every slot, ready for the next puzzle.
    pub fn clear(&mut self) {
        self.slots.fill(Node::EMPTY);
        self.len = 0;
    }
}

impl Default for NodePool {
    fn default() -> Self {
        Self::new()
    }
}
