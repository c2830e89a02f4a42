//! Browser-facing bindings. Each `ReversiGame` owns an independent engine.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::{MoveError, OutOfRange};
use crate::game::GameEngine;
use crate::render::{self, Palette};
use crate::types::{Cell, GameSnapshot};

/// Fill colors used by the web front end.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssPalette;

impl Palette for CssPalette {
    type Token = &'static str;

    fn paint(&self, cell: Cell) -> &'static str {
        match cell {
            Cell::Black => "black",
            Cell::White => "white",
            Cell::Empty => "green",
        }
    }
}

#[wasm_bindgen]
pub struct ReversiGame {
    engine: GameEngine,
}

#[wasm_bindgen]
impl ReversiGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: GameEngine::new(),
        }
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.reset())
    }

    /// Rejects with the error message when the move is not accepted.
    #[wasm_bindgen(js_name = attemptMove)]
    pub fn attempt_move(&mut self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        let snapshot = self
            .play(row, col)
            .map_err(|err| JsValue::from(JsError::new(&err.to_string())))?;
        to_js(&snapshot)
    }

    #[wasm_bindgen(js_name = currentSnapshot)]
    pub fn current_snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.snapshot())
    }

    /// Row-major CSS fill color per cell.
    #[wasm_bindgen(js_name = cellColors)]
    pub fn cell_colors(&self) -> Result<JsValue, JsValue> {
        to_js(&render::paint(&CssPalette, &self.engine.board().to_array()))
    }
}

impl ReversiGame {
    fn play(&mut self, row: i32, col: i32) -> Result<GameSnapshot, MoveError> {
        let (row, col) = board_coords(row, col)?;
        self.engine.attempt_move(row, col)
    }
}

impl Default for ReversiGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Negative JS numbers never reach the engine as board indices.
fn board_coords(row: i32, col: i32) -> Result<(usize, usize), OutOfRange> {
    match (usize::try_from(row), usize::try_from(col)) {
        (Ok(row), Ok(col)) => Ok((row, col)),
        _ => Err(OutOfRange {
            row: row as isize,
            col: col as isize,
        }),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}
