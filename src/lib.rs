use wasm_bindgen::prelude::*;

pub mod analyzer;
pub mod board;
pub mod error;
pub mod game;
pub mod render;
pub mod types;
pub mod wasm;

pub use analyzer::{Reversible, ReversibleMap, analyze};
pub use board::Board;
pub use error::{MoveError, OutOfRange, ParseBoardError};
pub use game::GameEngine;
pub use types::{BOARD_SIZE, Cell, Color, GameSnapshot, NUM_CELLS, Outcome, Phase, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
