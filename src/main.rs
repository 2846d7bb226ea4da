//! Flood-Rust: a flood-fill puzzle solver.
//!
//! ## Usage
//!
//! - `flood-rust` - Solve puzzles from the default `floodtest` file
//! - `flood-rust solve <path>` - Solve puzzles from a specific file
//! - `flood-rust demo` - Generate, solve, and display a random board

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use flood_rust::grid::Board;
use flood_rust::puzzle::{format_solution, ParseError, PuzzleReader};
use flood_rust::solver::Solver;

/// Flood-Rust: a flood-fill puzzle solver
#[derive(Parser)]
#[command(name = "flood-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every puzzle in a file, one answer line per record
    Solve {
        /// Path to the puzzle file
        #[arg(default_value = "floodtest")]
        path: PathBuf,
        /// Report per-puzzle search statistics on stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate a random board, solve it, and show the result
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Solve { path, verbose }) => run_solve(&path, verbose),
        Some(Commands::Demo) => run_demo(),
        None => run_solve(Path::new("floodtest"), false),
    }
}

/// Solve puzzles in file order, writing one flushed answer line each.
///
/// A malformed record stops processing without an answer line for it;
/// answers already written stand.
fn run_solve(path: &Path, verbose: bool) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("cannot open puzzle file {}", path.display()))?;
    let mut reader = PuzzleReader::new(BufReader::new(file));
    let mut solver = Solver::new(0);
    let mut stdout = io::stdout().lock();

    let mut index = 0usize;
    loop {
        match reader.next_board() {
            Ok(Some(board)) => {
                let (moves, stats) = solver.solve_with_stats(&board)?;
                writeln!(stdout, "{}", format_solution(&moves))?;
                stdout.flush()?;
                if verbose {
                    eprintln!(
                        "puzzle {index}: {} moves, {} iterations, {} nodes",
                        moves.len(),
                        stats.iterations,
                        stats.nodes
                    );
                }
                index += 1;
            }
            Ok(None) => break,
            Err(ParseError::Io(e)) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
            Err(e) => {
                if verbose {
                    eprintln!("stopping after {index} puzzles: {e}");
                }
                break;
            }
        }
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    let mut rng = fastrand::Rng::new();
    let board = Board::random(&mut rng);
    println!("{board}");

    let mut solver = Solver::new(rng.u64(..));
    let (moves, stats) = solver.solve_with_stats(&board)?;
    println!(
        "solved in {} moves ({} iterations, {} nodes): {}",
        moves.len(),
        stats.iterations,
        stats.nodes,
        format_solution(&moves)
    );
    println!(
        "replay check: {}",
        if solver.verify(&board, &moves) {
            "board unified"
        } else {
            "FAILED"
        }
    );
    Ok(())
}
