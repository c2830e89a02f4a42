/// A coordinate outside the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("position ({row}, {col}) is outside the 8x8 board")]
pub struct OutOfRange {
    pub row: isize,
    pub col: isize,
}

impl OutOfRange {
    pub(crate) fn at(row: usize, col: usize) -> Self {
        Self {
            row: isize::try_from(row).unwrap_or(isize::MAX),
            col: isize::try_from(col).unwrap_or(isize::MAX),
        }
    }
}

/// Reasons a move attempt is rejected. The engine is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),

    /// Cell is occupied or the move flips nothing.
    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: usize, col: usize },

    #[error("game is already over")]
    GameAlreadyOver,
}

/// Errors from parsing the text board form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has {found} cells, expected 8")]
    RowLength { row: usize, found: usize },

    #[error("unknown cell '{ch}' at ({row}, {col})")]
    UnknownCell { row: usize, col: usize, ch: char },
}
