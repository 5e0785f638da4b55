//! Stone placement, liberty checks, and group removal.
//!
//! All scans use the grid's preallocated worklist rather than recursion, since
//! a single group can span the whole 255x255 board.

use tracing::debug;

use crate::board::{Cell, Color, Grid, Point};
use crate::error::GameError;

/// What a successful placement did to the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    /// Opponent stones removed.
    pub captured: usize,
    /// Own stones removed because the new group had no liberties.
    pub self_captured: usize,
}

impl Grid {
    /// Place a stone and resolve captures.
    ///
    /// Opponent groups next to the new stone are checked first (west, east,
    /// north, south). If none was taken, the new stone's own group is checked
    /// and removed when it has no liberties.
    ///
    /// # Panics
    /// If `point` is off the board.
    pub fn place_stone(&mut self, point: Point, color: Color) -> Result<Placement, GameError> {
        assert!(self.on_board(point), "point {point:?} is off the board");
        let at = self.idx(point);
        if self.points.get(at) != Cell::Empty {
            return Err(GameError::AlreadyOccupied);
        }

        self.scored = false;
        self.points.set(at, color.into());

        let opponent = Cell::from(color.opp());
        let mut placement = Placement::default();
        for n in self.neighbors(at).into_iter().flatten() {
            // a group already taken through an earlier neighbour reads as empty here
            if self.points.get(n) == opponent && !self.has_liberty(n) {
                placement.captured += self.remove_group(n);
            }
        }

        if placement.captured > 0 {
            debug!(?point, %color, captured = placement.captured, "captured stones");
        } else if !self.has_liberty(at) {
            placement.self_captured = self.remove_group(at);
            debug!(?point, %color, removed = placement.self_captured, "self-capture");
        }
        Ok(placement)
    }

    /// Whether the group containing `start` touches an empty cell.
    ///
    /// Runs on `scratch`, synced from `points` first, and stops at the first
    /// liberty found.
    pub(crate) fn has_liberty(&mut self, start: usize) -> bool {
        self.scratch.fill_from(&self.points);
        let color = self.scratch.get(start);
        debug_assert!(color.stone().is_some(), "liberty check on an empty cell");

        self.stack.clear();
        self.scratch.set(start, Cell::Marker);
        self.stack.push(start as u16);

        while let Some(i) = self.stack.pop() {
            for n in self.neighbors(i as usize).into_iter().flatten() {
                match self.scratch.get(n) {
                    Cell::Empty => {
                        self.stack.clear();
                        return true;
                    }
                    c if c == color => {
                        self.scratch.set(n, Cell::Marker);
                        self.stack.push(n as u16);
                    }
                    _ => {}
                }
            }
        }
        false
    }

    /// Clear the group containing `start` from `points`. Returns its size.
    pub(crate) fn remove_group(&mut self, start: usize) -> usize {
        let color = self.points.get(start);
        debug_assert!(color.stone().is_some(), "removing an empty cell");

        self.stack.clear();
        self.points.set(start, Cell::Empty);
        self.stack.push(start as u16);
        let mut removed = 0;

        while let Some(i) = self.stack.pop() {
            removed += 1;
            for n in self.neighbors(i as usize).into_iter().flatten() {
                if self.points.get(n) == color {
                    self.points.set(n, Cell::Empty);
                    self.stack.push(n as u16);
                }
            }
        }
        removed
    }
}
