//! Cell-to-visual mapping supplied by the presentation layer.

use crate::types::Cell;

/// Maps a cell state to whatever the front end draws for it.
pub trait Palette {
    type Token;

    fn paint(&self, cell: Cell) -> Self::Token;
}

/// One character per cell: `B`, `W` and `.` for empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPalette;

impl TextPalette {
    pub const BLACK: char = 'B';
    pub const WHITE: char = 'W';
    pub const EMPTY: char = '.';

    /// Inverse of [`Palette::paint`].
    pub fn parse(ch: char) -> Option<Cell> {
        match ch {
            Self::BLACK => Some(Cell::Black),
            Self::WHITE => Some(Cell::White),
            Self::EMPTY => Some(Cell::Empty),
            _ => None,
        }
    }
}

impl Palette for TextPalette {
    type Token = char;

    fn paint(&self, cell: Cell) -> char {
        match cell {
            Cell::Black => Self::BLACK,
            Cell::White => Self::WHITE,
            Cell::Empty => Self::EMPTY,
        }
    }
}

/// Paints row-major cells (see `Board::to_array`) into tokens.
pub fn paint<P: Palette>(palette: &P, cells: &[Cell]) -> Vec<P::Token> {
    cells.iter().map(|&cell| palette.paint(cell)).collect()
}
