//! Puzzle file parsing and answer formatting.
//!
//! A puzzle file is a sequence of fixed-width records: each record is
//! exactly `LEN` lines of exactly `LEN` color characters (`'1'` up to the
//! palette size), every line newline-terminated. Parsing is strict; the
//! first malformed or truncated record stops input processing, and records
//! already parsed keep their answers.

use std::fmt;
use std::io::{self, BufRead};

use crate::constants::{CELLS, LEN, NCOLORS};
use crate::grid::Board;

/// Highest character code accepted for a cell.
const MAX_COLOR_CHAR: u8 = b'0' + NCOLORS as u8;

/// Why a puzzle record could not be read.
#[derive(Debug)]
pub enum ParseError {
    Io(io::Error),
    /// A line was not exactly `LEN` characters plus a newline.
    BadLineLength { line: usize, got: usize },
    /// A character outside the color alphabet.
    BadColorChar { line: usize, ch: char },
    /// End of input in the middle of a record.
    Truncated { lines: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "read error: {e}"),
            ParseError::BadLineLength { line, got } => {
                write!(f, "line {line}: expected {LEN} cells, got {got}")
            }
            ParseError::BadColorChar { line, ch } => {
                write!(
                    f,
                    "line {line}: character {ch:?} outside '1'..='{}'",
                    MAX_COLOR_CHAR as char
                )
            }
            ParseError::Truncated { lines } => {
                write!(f, "record truncated after {lines} of {LEN} lines")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// Reads consecutive puzzle records off a buffered input.
pub struct PuzzleReader<R> {
    input: R,
    line: String,
}

impl<R: BufRead> PuzzleReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }

    /// Parse the next record. `Ok(None)` is clean end of input (no bytes
    /// before the record started); anything else short of a full valid
    /// record is an error.
    pub fn next_board(&mut self) -> Result<Option<Board>, ParseError> {
        let mut cells = [0u8; CELLS];
        for row in 0..LEN {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                if row == 0 {
                    return Ok(None);
                }
                return Err(ParseError::Truncated { lines: row });
            }
            let Some(text) = self.line.strip_suffix('\n') else {
                return Err(ParseError::BadLineLength {
                    line: row,
                    got: self.line.len(),
                });
            };
            if text.len() != LEN {
                return Err(ParseError::BadLineLength {
                    line: row,
                    got: text.len(),
                });
            }
            for (col, &b) in text.as_bytes().iter().enumerate() {
                if !(b'1'..=MAX_COLOR_CHAR).contains(&b) {
                    return Err(ParseError::BadColorChar {
                        line: row,
                        ch: b as char,
                    });
                }
                cells[row * LEN + col] = b - b'1';
            }
        }
        Ok(Some(Board::from_cells(cells)))
    }
}

/// Render a solution as one answer line: color index + 1 per move, using
/// the input alphabet.
pub fn format_solution(moves: &[u8]) -> String {
    moves.iter().map(|&c| (b'1' + c) as char).collect()
}
