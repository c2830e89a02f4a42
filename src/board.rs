use std::fmt;
use std::str::FromStr;

use crate::error::{OutOfRange, ParseBoardError};
use crate::render::{Palette, TextPalette};
use crate::types::{BOARD_SIZE, Cell, Color, NUM_CELLS, Position};

/// Reversi board state as an 8x8 grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=black, (4,4)=black, (3,4)=white, (4,3)=white.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, OutOfRange> {
        let pos = checked(row, col)?;
        Ok(self.at(pos))
    }

    /// Writes a cell without any legality check.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), OutOfRange> {
        let pos = checked(row, col)?;
        self.put(pos, cell);
        Ok(())
    }

    /// Clears every cell, then applies the initial layout.
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        self.cells[3][3] = Cell::Black;
        self.cells[4][4] = Cell::Black;
        self.cells[3][4] = Cell::White;
        self.cells[4][3] = Cell::White;
    }

    pub(crate) fn at(&self, pos: Position) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub(crate) fn put(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }

    pub fn count(&self, color: Color) -> u8 {
        let stone = Cell::from(color);
        self.cells.iter().flatten().filter(|&&cell| cell == stone).count() as u8
    }

    /// Returns `(black_count, white_count)`.
    pub fn counts(&self) -> (u8, u8) {
        (self.count(Color::Black), self.count(Color::White))
    }

    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.counts();
        NUM_CELLS as u8 - black_count - white_count
    }

    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Row-major copy of the grid.
    pub fn to_array(&self) -> [Cell; NUM_CELLS] {
        let mut out = [Cell::Empty; NUM_CELLS];
        for pos in Position::all() {
            out[pos.index()] = self.at(pos);
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.cells.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                write!(f, "{}", TextPalette.paint(cell))?;
            }
        }
        Ok(())
    }
}

/// Parses eight lines of `B`, `W` and `.`; blank lines are skipped.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != BOARD_SIZE {
                return Err(ParseBoardError::RowLength { row, found });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell =
                    TextPalette::parse(ch).ok_or(ParseBoardError::UnknownCell { row, col, ch })?;
                board.cells[row][col] = cell;
            }
        }

        Ok(board)
    }
}

fn checked(row: usize, col: usize) -> Result<Position, OutOfRange> {
    Position::new(row, col).ok_or(OutOfRange::at(row, col))
}
