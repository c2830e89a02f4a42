use std::fmt;

use serde::Serialize;

pub const BOARD_SIZE: usize = 8;
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Returns the stone color on this cell, `None` when empty.
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }
}

/// Stone color of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Slot of this color in two-element per-color arrays.
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("Black"),
            Color::White => f.write_str("White"),
        }
    }
}

/// A board coordinate. Always within `0..BOARD_SIZE` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Returns `None` when the coordinate falls off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Row-major index in `0..NUM_CELLS`.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Steps `distance` cells along `(dr, dc)`, `None` once off the board.
    pub fn offset(self, (dr, dc): (i32, i32), distance: i32) -> Option<Self> {
        let row = self.row as i32 + dr * distance;
        let col = self.col as i32 + dc * distance;
        if (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Every board coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_CELLS).map(|idx| Position {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        })
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Winner(Color),
    Draw,
}

impl Outcome {
    /// Higher stone count wins; equal counts draw.
    pub fn from_counts(black: u8, white: u8) -> Self {
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Winner(Color::Black),
            std::cmp::Ordering::Less => Outcome::Winner(Color::White),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Turn / end-game state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Phase {
    Turn(Color),
    Over(Outcome),
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Over(_))
    }

    pub fn to_move(self) -> Option<Color> {
        match self {
            Phase::Turn(color) => Some(color),
            Phase::Over(_) => None,
        }
    }
}

/// Status line shown to players.
impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Turn(color) => write!(f, "{color}'s turn"),
            Phase::Over(Outcome::Winner(color)) => write!(f, "GAME SET! won by {color}"),
            Phase::Over(Outcome::Draw) => f.write_str("DRAW"),
        }
    }
}

/// Immutable game state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    pub phase: Phase,
    pub black_count: u8,
    pub white_count: u8,
    pub black_can_move: bool,
    pub white_can_move: bool,
    pub status: String,
    pub score: String,
    /// Legal placements for the side to move. Empty once the game is over.
    pub legal_moves: Vec<Position>,
    pub last_move: Option<Position>,
    /// Contract:
    /// - After an accepted move: the stones it flipped.
    /// - After reset: an empty list.
    pub flipped: Vec<Position>,
    /// `true` when the last move left the opponent without a move and the
    /// mover kept the turn.
    pub passed: bool,
}

impl GameSnapshot {
    pub fn stone_count(&self, color: Color) -> u8 {
        match color {
            Color::Black => self.black_count,
            Color::White => self.white_count,
        }
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        match color {
            Color::Black => self.black_can_move,
            Color::White => self.white_can_move,
        }
    }

    /// Stone counter line, e.g. `BLACK:2 WHITE:2`.
    pub fn score_text(&self) -> String {
        format!("BLACK:{} WHITE:{}", self.black_count, self.white_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_matches_display_forms() {
        assert_eq!(Phase::Turn(Color::Black).to_string(), "Black's turn");
        assert_eq!(Phase::Turn(Color::White).to_string(), "White's turn");
        assert_eq!(
            Phase::Over(Outcome::Winner(Color::White)).to_string(),
            "GAME SET! won by White"
        );
        assert_eq!(Phase::Over(Outcome::Draw).to_string(), "DRAW");
    }

    #[test]
    fn outcome_prefers_draw_on_equal_counts() {
        assert_eq!(Outcome::from_counts(32, 32), Outcome::Draw);
        assert_eq!(Outcome::from_counts(33, 31), Outcome::Winner(Color::Black));
        assert_eq!(Outcome::from_counts(0, 5), Outcome::Winner(Color::White));
    }

    #[test]
    fn offset_stops_at_board_edge() {
        let corner = Position { row: 0, col: 7 };

        assert_eq!(corner.offset((0, 1), 1), None);
        assert_eq!(corner.offset((-1, 0), 1), None);
        assert_eq!(corner.offset((1, -1), 7), Some(Position { row: 7, col: 0 }));
    }

    #[test]
    fn positions_enumerate_row_major() {
        let all: Vec<_> = Position::all().collect();

        assert_eq!(all.len(), NUM_CELLS);
        assert_eq!(all[9], Position { row: 1, col: 1 });
        assert!(all.iter().enumerate().all(|(idx, pos)| pos.index() == idx));
    }

    #[test]
    fn phase_serializes_adjacently_tagged() {
        let turn = serde_json::to_value(Phase::Turn(Color::Black)).unwrap();
        let won = serde_json::to_value(Phase::Over(Outcome::Winner(Color::White))).unwrap();
        let draw = serde_json::to_value(Phase::Over(Outcome::Draw)).unwrap();

        assert_eq!(turn, serde_json::json!({"kind": "turn", "value": "black"}));
        assert_eq!(
            won,
            serde_json::json!({"kind": "over", "value": {"winner": "white"}})
        );
        assert_eq!(draw, serde_json::json!({"kind": "over", "value": "draw"}));
    }
}
