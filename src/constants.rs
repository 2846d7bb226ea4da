//! Constants for board dimensions, search parameters, and node priors.
//!
//! This module contains all the configuration constants for the solver.
//! The board is a fixed square grid with a fixed palette; everything here
//! is compile-time configuration, there are no runtime knobs.
//!
//! # Board Size Configuration
//!
//! The board size is controlled by Cargo features:
//! - `board19x19` (default): 19x19 board
//! - `board12x12`: 12x12 board
//!
//! To compile for a specific board size:
//! ```sh
//! cargo build                           # 19x19 (default)
//! cargo build --no-default-features --features board12x12  # 12x12
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Board side length (NxN grid).
#[cfg(feature = "board19x19")]
pub const LEN: usize = 19;

#[cfg(feature = "board12x12")]
pub const LEN: usize = 12;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(all(feature = "board19x19", feature = "board12x12"))]
compile_error!("Cannot enable both 'board19x19' and 'board12x12' features at the same time");

#[cfg(not(any(feature = "board19x19", feature = "board12x12")))]
compile_error!("Must enable exactly one board size feature: 'board19x19' or 'board12x12'");

/// Number of distinct cell colors in the palette.
pub const NCOLORS: usize = 6;

/// Total number of cells on the board.
pub const CELLS: usize = LEN * LEN;

/// Column of the seed cell the region grows from.
pub const SEED_X: usize = LEN / 2;

/// Row of the seed cell.
pub const SEED_Y: usize = LEN / 2;

/// Upper bound on solution length, used to size move buffers.
pub const MAX_STEPS: usize = LEN * (NCOLORS - 1);

// =============================================================================
// Search Parameters
// =============================================================================

/// Number of simulations per puzzle.
pub const N_ITERS: usize = 15_000;

/// Consecutive iterations with an identical solution hash before the
/// search is considered converged and stops early.
pub const STAGNATION_LIMIT: usize = 10;

/// Transposition table capacity in slots. Must be a power of two, and must
/// exceed `N_ITERS` since each simulation discovers at most one new state.
pub const POOL_SIZE: usize = 32_768;

/// Probe mask for the power-of-two slot array.
pub const POOL_MASK: usize = POOL_SIZE - 1;

const _: () = assert!(POOL_SIZE.is_power_of_two());
const _: () = assert!(POOL_SIZE > N_ITERS);

// =============================================================================
// Prior Values (for node initialization)
// =============================================================================

/// Initial visit count for every color that can grow the region.
pub const PRIOR_VISITS: u32 = 1;

/// Pessimistic initial cost estimate, pushing the search to try each
/// untested color at least once.
pub const PRIOR_MEAN: f32 = 20.0;

/// Initial sum of squared deviations matching the pessimistic mean.
pub const PRIOR_SSE: f32 = 400.0;
