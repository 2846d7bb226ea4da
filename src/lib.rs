//! Flood-Rust: a flood-fill puzzle solver.
//!
//! This crate computes near-minimal flood-fill solutions for fixed-size
//! colored boards: starting from the center cell, each move recolors the
//! connected region to a chosen color, absorbing the neighboring cells of
//! that color, until the whole board is one region. The search is Monte
//! Carlo Tree Search with Thompson sampling over per-state, per-color cost
//! statistics, sharing work across move orders through a Zobrist-keyed
//! transposition table.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and search parameters
//! - [`grid`] - Board contents, absorbed region, flood-fill transition
//! - [`mcts`] - Search nodes, Thompson sampling, simulate/backup
//! - [`pool`] - Fixed-capacity transposition table
//! - [`puzzle`] - Puzzle record parsing and answer formatting
//! - [`rng`] - Deterministic pseudo-random stream
//! - [`rollout`] - Random playouts for fresh state estimates
//! - [`solver`] - Per-puzzle driver loop
//! - [`zobrist`] - Incremental region hashing
//!
//! ## Example
//!
//! ```
//! use flood_rust::grid::Board;
//! use flood_rust::solver::Solver;
//!
//! // A board that is already one color needs no moves at all.
//! let board = Board::uniform(0);
//! let mut solver = Solver::new(1);
//! let moves = solver.solve(&board).unwrap();
//! assert!(moves.is_empty());
//! ```

pub mod constants;
pub mod grid;
pub mod mcts;
pub mod pool;
pub mod puzzle;
pub mod rng;
pub mod rollout;
pub mod solver;
pub mod zobrist;
