//! Turn order, superko enforcement, and game termination.
//!
//! A [`Game`] owns the [`Grid`] and its [`RepetitionHistory`]. Moves are
//! applied speculatively and rolled back if the resulting board repeats a
//! position the mover has already produced. Two passes in a row (more
//! precisely, a pass that recreates the mover's own earlier position) end the
//! game and score it.

use std::fmt;

use tracing::{debug, info, warn};

use crate::board::{CellBuf, Color, Grid, Point};
use crate::capture::Placement;
use crate::error::GameError;
use crate::history::RepetitionHistory;

/// Black moves first.
pub const FIRST_PLAYER: Color = Color::Black;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Undecided,
    Black,
    White,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Winner::Black,
            Color::White => Winner::White,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Undecided => write!(f, "undecided"),
            Winner::Black => write!(f, "Black wins"),
            Winner::White => write!(f, "White wins"),
            Winner::Draw => write!(f, "draw"),
        }
    }
}

/// A single game from the empty board to a result.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    history: RepetitionHistory,
    /// `points` as they were before the move being tried.
    backup: CellBuf,
    to_move: Color,
    komi: u32,
    winner: Winner,
    moves: u32,
    final_score: Option<(u32, u32)>,
}

impl Game {
    /// Start a game on an empty `width` x `height` board.
    ///
    /// The empty board is recorded as White's, so Black's first move or pass
    /// is never a repetition but White passing straight back ends the game.
    pub fn new(width: u8, height: u8, komi: u32) -> Result<Self, GameError> {
        let grid = Grid::new(width, height)?;
        let mut history = RepetitionHistory::new(grid.cell_count())?;
        history.insert(grid.points(), FIRST_PLAYER.opp())?;
        let backup = CellBuf::new(grid.cell_count())?;

        debug!(width, height, komi, "new game");
        Ok(Game {
            grid,
            history,
            backup,
            to_move: FIRST_PLAYER,
            komi,
            winner: Winner::Undecided,
            moves: 0,
            final_score: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn komi(&self) -> u32 {
        self.komi
    }

    pub fn winner(&self) -> Winner {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner != Winner::Undecided
    }

    /// Moves and passes accepted so far.
    pub fn move_count(&self) -> u32 {
        self.moves
    }

    /// `(black, white)` with komi, once the game ended by passing.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        self.final_score
    }

    /// Score the current board, komi included.
    ///
    /// White's total saturates at `u32::MAX`, which still beats any board
    /// score.
    pub fn scores(&mut self) -> (u32, u32) {
        let (black, white) = self.grid.get_scores();
        (black, white.saturating_add(self.komi))
    }

    /// Play a stone for the player to move.
    ///
    /// On any error the board is exactly as it was before the call, including
    /// stones that were captured while the move was being tried.
    ///
    /// # Panics
    /// If the game is over or `point` is off the board.
    pub fn play(&mut self, point: Point) -> Result<Placement, GameError> {
        assert!(!self.is_over(), "play on a finished game");
        self.backup.fill_from(self.grid.points());

        let placement = self.grid.place_stone(point, self.to_move)?;
        if let Err(err) = self.history.insert(self.grid.points(), self.to_move) {
            self.grid.restore_points(&self.backup);
            debug!(?point, color = %self.to_move, %err, "move rolled back");
            return Err(err);
        }

        self.to_move = self.to_move.opp();
        self.moves += 1;
        Ok(placement)
    }

    /// Pass. Ends and scores the game if the player to move already produced
    /// this board.
    ///
    /// Only allocation failures are returned; the game is unchanged then.
    ///
    /// # Panics
    /// If the game is over.
    pub fn pass(&mut self) -> Result<(), GameError> {
        assert!(!self.is_over(), "pass on a finished game");
        match self.history.insert(self.grid.points(), self.to_move) {
            Ok(()) => {
                self.to_move = self.to_move.opp();
                self.moves += 1;
                Ok(())
            }
            Err(GameError::BoardRepetition) => {
                self.finish();
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// `color` resigns and the opponent wins.
    ///
    /// Only meaningful while [`Game::is_over`] is false. On a finished game
    /// this logs a warning and keeps the recorded result; the winner is never
    /// reset.
    pub fn forfeit(&mut self, color: Color) {
        if self.is_over() {
            warn!(%color, result = %self.winner, "forfeit after the game ended");
            return;
        }
        self.winner = color.opp().into();
        info!(%color, "forfeit");
    }

    fn finish(&mut self) {
        let (black, white) = self.scores();
        self.winner = match black.cmp(&white) {
            std::cmp::Ordering::Greater => Winner::Black,
            std::cmp::Ordering::Less => Winner::White,
            std::cmp::Ordering::Equal => Winner::Draw,
        };
        self.final_score = Some((black, white));
        info!(black, white, result = %self.winner, "game over");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_state() {
        let game = Game::new(9, 9, 7).unwrap();
        assert_eq!(game.to_move(), Color::Black);
        assert_eq!(game.komi(), 7);
        assert_eq!(game.winner(), Winner::Undecided);
        assert_eq!(game.move_count(), 0);
        assert!(game.grid().is_empty());
    }

    #[test]
    fn test_play_alternates_players() {
        let mut game = Game::new(5, 5, 0).unwrap();
        game.play((2, 2)).unwrap();
        assert_eq!(game.to_move(), Color::White);
        game.play((3, 3)).unwrap();
        assert_eq!(game.to_move(), Color::Black);
        assert_eq!(game.grid().stone_at((2, 2)), Some(Color::Black));
        assert_eq!(game.grid().stone_at((3, 3)), Some(Color::White));
    }

    #[test]
    fn test_occupied_point_keeps_turn() {
        let mut game = Game::new(5, 5, 0).unwrap();
        game.play((2, 2)).unwrap();
        assert_eq!(game.play((2, 2)), Err(GameError::AlreadyOccupied));
        assert_eq!(game.to_move(), Color::White);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_single_pass_does_not_end_game() {
        let mut game = Game::new(5, 5, 0).unwrap();
        game.pass().unwrap();
        assert_eq!(game.winner(), Winner::Undecided);
        assert_eq!(game.to_move(), Color::White);
    }

    #[test]
    fn test_double_pass_on_one_by_one_is_a_draw() {
        let mut game = Game::new(1, 1, 0).unwrap();
        game.pass().unwrap();
        game.pass().unwrap();
        assert_eq!(game.winner(), Winner::Draw);
        assert_eq!(game.final_score(), Some((0, 0)));
    }

    #[test]
    fn test_komi_decides_close_game() {
        // black owns the whole board after one stone: 9 points against komi
        let mut game = Game::new(3, 3, 10).unwrap();
        game.play((1, 1)).unwrap();
        game.pass().unwrap();
        game.pass().unwrap();
        assert_eq!(game.final_score(), Some((9, 10)));
        assert_eq!(game.winner(), Winner::White);
    }

    #[test]
    fn test_huge_komi_saturates() {
        let mut game = Game::new(3, 3, u32::MAX).unwrap();
        game.pass().unwrap();
        game.play((1, 1)).unwrap();
        game.pass().unwrap();
        game.pass().unwrap();
        assert_eq!(game.final_score(), Some((0, u32::MAX)));
        assert_eq!(game.winner(), Winner::White);
    }

    #[test]
    fn test_forfeit_mid_game() {
        let mut game = Game::new(9, 9, 7).unwrap();
        game.play((0, 0)).unwrap();
        game.forfeit(Color::White);
        assert_eq!(game.winner(), Winner::Black);
        assert!(game.is_over());
        assert_eq!(game.final_score(), None);
    }

    #[test]
    fn test_forfeit_after_game_over_is_ignored() {
        let mut game = Game::new(1, 1, 0).unwrap();
        game.pass().unwrap();
        game.pass().unwrap();
        game.forfeit(Color::Black);
        assert_eq!(game.winner(), Winner::Draw);
    }

    #[test]
    #[should_panic(expected = "finished game")]
    fn test_play_after_game_over_panics() {
        let mut game = Game::new(2, 2, 0).unwrap();
        game.forfeit(Color::Black);
        let _ = game.play((0, 0));
    }
}
