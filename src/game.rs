use tracing::{debug, info, instrument, warn};

use crate::analyzer::{self, ReversibleMap};
use crate::board::Board;
use crate::error::{MoveError, OutOfRange};
use crate::types::{Color, GameSnapshot, Outcome, Phase, Position};

/// One game of Reversi: board, turn state and the aggregates derived from
/// the last analysis. Not internally synchronized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    reversible: ReversibleMap,
    phase: Phase,
    can_move: [bool; 2],
    stones: [u8; 2],
    last_move: Option<Position>,
    flipped: Vec<Position>,
    passed: bool,
}

impl GameEngine {
    /// Starts a game from the initial layout with black to move.
    pub fn new() -> Self {
        let mut engine = Self::unresolved(Board::new(), Color::Black);
        engine.refresh();
        engine
    }

    /// Builds a game from an arbitrary board.
    ///
    /// `to_move` keeps the turn if it has a legal move; otherwise the turn goes
    /// to the opponent (recorded as a pass), and if neither side can move the
    /// game is over.
    pub fn from_position(board: Board, to_move: Color) -> Self {
        let mut engine = Self::unresolved(board, to_move);
        engine.refresh();

        let opponent = to_move.opposite();
        engine.phase = if engine.has_legal_move(to_move) {
            Phase::Turn(to_move)
        } else if engine.has_legal_move(opponent) {
            engine.passed = true;
            Phase::Turn(opponent)
        } else {
            engine.final_phase()
        };
        debug!(phase = %engine.phase, "position loaded");
        engine
    }

    fn unresolved(board: Board, to_move: Color) -> Self {
        Self {
            board,
            reversible: ReversibleMap::default(),
            phase: Phase::Turn(to_move),
            can_move: [false; 2],
            stones: [0; 2],
            last_move: None,
            flipped: Vec::new(),
            passed: false,
        }
    }

    /// Returns to the initial layout with black to move. Valid in any phase.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> GameSnapshot {
        self.board.reset();
        self.phase = Phase::Turn(Color::Black);
        self.last_move = None;
        self.flipped.clear();
        self.passed = false;
        self.refresh();
        info!("game reset");
        self.snapshot()
    }

    /// Places a stone for the side to move and flips the bracketed stones.
    ///
    /// Either the whole move (placement, flips, reanalysis, turn transition)
    /// is applied, or the engine is left untouched and an error is returned.
    #[instrument(skip(self))]
    pub fn attempt_move(&mut self, row: usize, col: usize) -> Result<GameSnapshot, MoveError> {
        let (mover, pos) = match self.check_move(row, col) {
            Ok(checked) => checked,
            Err(err) => {
                warn!(%err, "move rejected");
                return Err(err);
            }
        };

        let flips = self.reversible.get(pos).for_color(mover).to_vec();
        let stone = mover.into();
        self.board.put(pos, stone);
        for &flip in &flips {
            self.board.put(flip, stone);
        }
        debug!(color = %mover, flipped = flips.len(), "move applied");

        self.last_move = Some(pos);
        self.flipped = flips;
        self.refresh();
        self.advance(mover);

        Ok(self.snapshot())
    }

    fn check_move(&self, row: usize, col: usize) -> Result<(Color, Position), MoveError> {
        let mover = self.phase.to_move().ok_or(MoveError::GameAlreadyOver)?;
        let pos = Position::new(row, col).ok_or(OutOfRange::at(row, col))?;
        if !self.reversible.get(pos).is_legal_for(mover) {
            return Err(MoveError::IllegalMove { row, col });
        }
        Ok((mover, pos))
    }

    /// Reanalyzes the board and rederives the per-color aggregates.
    fn refresh(&mut self) {
        self.reversible = analyzer::analyze(&self.board);
        for color in Color::ALL {
            self.can_move[color.index()] = self.reversible.has_legal_move(color);
            self.stones[color.index()] = self.board.count(color);
        }
        debug!(
            black = self.stones[0],
            white = self.stones[1],
            black_can_move = self.can_move[0],
            white_can_move = self.can_move[1],
            empty = self.board.empty_count(),
            "board analyzed"
        );
    }

    fn advance(&mut self, mover: Color) {
        let opponent = mover.opposite();
        self.passed = false;

        self.phase = if self.has_legal_move(opponent) {
            Phase::Turn(opponent)
        } else if self.has_legal_move(mover) {
            // The opponent is skipped; the mover plays again.
            debug!(skipped = %opponent, "no legal move, turn passes back");
            self.passed = true;
            Phase::Turn(mover)
        } else {
            self.final_phase()
        };

        if let Phase::Over(outcome) = self.phase {
            info!(
                ?outcome,
                black = self.stones[0],
                white = self.stones[1],
                "game over"
            );
        }
    }

    fn final_phase(&self) -> Phase {
        Phase::Over(Outcome::from_counts(
            self.stone_count(Color::Black),
            self.stone_count(Color::White),
        ))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reversible(&self) -> &ReversibleMap {
        &self.reversible
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.can_move[color.index()]
    }

    pub fn stone_count(&self, color: Color) -> u8 {
        self.stones[color.index()]
    }

    /// Legal placements for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.phase
            .to_move()
            .map(|color| self.reversible.legal_moves(color))
            .unwrap_or_default()
    }

    /// Stones `color` would flip by placing on `(row, col)`.
    pub fn reversible_at(
        &self,
        row: usize,
        col: usize,
        color: Color,
    ) -> Result<&[Position], OutOfRange> {
        let pos = Position::new(row, col).ok_or(OutOfRange::at(row, col))?;
        Ok(self.reversible.get(pos).for_color(color))
    }

    pub fn status(&self) -> String {
        self.phase.to_string()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot {
            cells: *self.board.cells(),
            phase: self.phase,
            black_count: self.stone_count(Color::Black),
            white_count: self.stone_count(Color::White),
            black_can_move: self.has_legal_move(Color::Black),
            white_can_move: self.has_legal_move(Color::White),
            status: self.status(),
            score: String::new(),
            legal_moves: self.legal_moves(),
            last_move: self.last_move,
            flipped: self.flipped.clone(),
            passed: self.passed,
        };
        snapshot.score = snapshot.score_text();
        snapshot
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::types::{BOARD_SIZE, Cell};
    use proptest::prelude::*;
    use proptest::sample::Index;

    /// A flip at `target` must sit on a straight line from `origin`, with only
    /// opponent stones up to a closing `color` stone beyond it.
    fn is_bracketed(board: &Board, origin: Position, target: Position, color: Color) -> bool {
        let dr = target.row as i32 - origin.row as i32;
        let dc = target.col as i32 - origin.col as i32;
        if (dr, dc) == (0, 0) || !(dr == 0 || dc == 0 || dr.abs() == dc.abs()) {
            return false;
        }
        let direction = (dr.signum(), dc.signum());
        let target_distance = dr.abs().max(dc.abs());

        for distance in 1..BOARD_SIZE as i32 {
            let Some(pos) = origin.offset(direction, distance) else {
                return false;
            };
            match board.at(pos).color() {
                Some(c) if c == color.opposite() => continue,
                Some(_) => return distance > target_distance,
                None => return false,
            }
        }
        false
    }

    fn assert_consistent(game: &GameEngine) -> Result<(), TestCaseError> {
        let board = game.board();
        let cells = board.cells();
        let empty = cells.iter().flatten().filter(|&&c| c == Cell::Empty).count();
        let black = game.stone_count(Color::Black) as usize;
        let white = game.stone_count(Color::White) as usize;
        prop_assert_eq!(black + white + empty, 64);
        prop_assert_eq!(board.empty_count() as usize, empty);
        prop_assert_eq!(game.stone_count(Color::Black), board.count(Color::Black));

        let fresh = analyzer::analyze(board);
        prop_assert_eq!(&fresh, game.reversible());
        prop_assert_eq!(&fresh, &analyzer::analyze(board));

        for origin in Position::all() {
            for color in Color::ALL {
                let flips = fresh.get(origin).for_color(color);
                if board.at(origin) != Cell::Empty {
                    prop_assert!(flips.is_empty());
                }
                for &target in flips {
                    prop_assert!(
                        is_bracketed(board, origin, target, color),
                        "{:?} does not bracket {:?} for {}",
                        origin,
                        target,
                        color
                    );
                }
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn random_playouts_preserve_invariants(choices in prop::collection::vec(any::<Index>(), 0..64)) {
            let mut game = GameEngine::new();
            assert_consistent(&game)?;

            for choice in choices {
                let Phase::Turn(mover) = game.phase() else {
                    break;
                };
                let moves = game.legal_moves();
                prop_assert!(!moves.is_empty());
                let mv = *choice.get(&moves);

                let flipped = game.reversible().get(mv).for_color(mover).len() as u8;
                let mover_before = game.stone_count(mover);
                let opponent_before = game.stone_count(mover.opposite());

                let state = game.attempt_move(mv.row as usize, mv.col as usize).unwrap();

                prop_assert_eq!(state.stone_count(mover), mover_before + flipped + 1);
                prop_assert_eq!(state.stone_count(mover.opposite()), opponent_before - flipped);

                let opponent = mover.opposite();
                let expected = if game.has_legal_move(opponent) {
                    Phase::Turn(opponent)
                } else if game.has_legal_move(mover) {
                    Phase::Turn(mover)
                } else {
                    Phase::Over(Outcome::from_counts(state.black_count, state.white_count))
                };
                prop_assert_eq!(state.phase, expected);
                prop_assert_eq!(state.has_legal_move(mover), game.has_legal_move(mover));
                prop_assert_eq!(state.has_legal_move(opponent), game.has_legal_move(opponent));
                prop_assert_eq!(state.score_text(), state.score.clone());
                prop_assert_eq!(state.passed, expected == Phase::Turn(mover));
                assert_consistent(&game)?;
            }
        }

        #[test]
        fn rejected_moves_leave_engine_untouched(
            choices in prop::collection::vec(any::<Index>(), 0..40),
            row in 0usize..10,
            col in 0usize..10,
        ) {
            let mut game = GameEngine::new();
            for choice in choices {
                let moves = game.legal_moves();
                if moves.is_empty() {
                    break;
                }
                let mv = *choice.get(&moves);
                game.attempt_move(mv.row as usize, mv.col as usize).unwrap();
            }

            let legal = Position::new(row, col).is_some_and(|p| game.legal_moves().contains(&p));
            prop_assume!(!legal);

            let before = game.clone();
            prop_assert!(game.attempt_move(row, col).is_err());
            prop_assert_eq!(game, before);
        }
    }
}
