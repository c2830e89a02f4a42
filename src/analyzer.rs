//! Per-cell flip analysis for both colors.

use crate::board::Board;
use crate::types::{BOARD_SIZE, Cell, Color, Position};

const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Stones that would flip if each color placed on one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reversible {
    by_color: [Vec<Position>; 2],
}

impl Reversible {
    pub fn for_color(&self, color: Color) -> &[Position] {
        &self.by_color[color.index()]
    }

    pub fn is_legal_for(&self, color: Color) -> bool {
        !self.for_color(color).is_empty()
    }
}

/// Flip sets for all 64 cells of one board snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReversibleMap {
    cells: [[Reversible; BOARD_SIZE]; BOARD_SIZE],
}

impl ReversibleMap {
    pub fn get(&self, pos: Position) -> &Reversible {
        &self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.cells
            .iter()
            .flatten()
            .any(|cell| cell.is_legal_for(color))
    }

    /// Legal placements for `color` in row-major order.
    pub fn legal_moves(&self, color: Color) -> Vec<Position> {
        Position::all()
            .filter(|&pos| self.get(pos).is_legal_for(color))
            .collect()
    }
}

/// Computes the flip sets of every cell for both colors.
pub fn analyze(board: &Board) -> ReversibleMap {
    let mut map = ReversibleMap::default();
    for pos in Position::all() {
        if board.at(pos) != Cell::Empty {
            continue;
        }
        let entry = &mut map.cells[pos.row as usize][pos.col as usize];
        for color in Color::ALL {
            entry.by_color[color.index()] = collect_flips(board, pos, color);
        }
    }
    map
}

/// Stones `color` would flip by placing on `origin`. Empty for occupied cells.
pub fn collect_flips(board: &Board, origin: Position, color: Color) -> Vec<Position> {
    if board.at(origin) != Cell::Empty {
        return Vec::new();
    }

    let mut flips = Vec::new();
    for direction in DIRECTIONS {
        scan_line(board, origin, direction, color, &mut flips);
    }
    flips
}

/// Appends the opposite-color run along one direction if a `color` stone
/// closes it. Runs ending off-board or at an empty cell add nothing.
fn scan_line(
    board: &Board,
    origin: Position,
    direction: (i32, i32),
    color: Color,
    flips: &mut Vec<Position>,
) {
    let mine = Cell::from(color);
    let theirs = Cell::from(color.opposite());
    let run_start = flips.len();

    for distance in 1..BOARD_SIZE as i32 {
        let Some(pos) = origin.offset(direction, distance) else {
            break;
        };
        match board.at(pos) {
            cell if cell == theirs => flips.push(pos),
            cell if cell == mine => return,
            _ => break,
        }
    }

    flips.truncate(run_start);
}
