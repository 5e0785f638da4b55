//! Territory assignment and area scoring.

use crate::board::{Cell, Color, ColorSet, Grid, Point};

impl Grid {
    /// Score the position: stones on the board plus surrounded empty regions.
    ///
    /// Leaves the territory map in `scratch`, readable through
    /// [`Grid::territory_at`] until `points` changes. Calling it again without
    /// a move in between gives the same result.
    pub fn get_scores(&mut self) -> (u32, u32) {
        self.map_territory();
        (
            self.scratch.count(Cell::Black) as u32,
            self.scratch.count(Cell::White) as u32,
        )
    }

    /// Owner of an empty point after [`Grid::get_scores`].
    ///
    /// `None` for stones, neutral points, off-board points, and whenever the
    /// board has changed since the last scoring.
    pub fn territory_at(&self, point: Point) -> Option<Color> {
        if !self.scored || !self.on_board(point) {
            return None;
        }
        let i = self.idx(point);
        match self.points.get(i) {
            Cell::Empty => self.scratch.get(i).stone(),
            _ => None,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.scored
    }

    /// Fill `scratch` with stones plus owned regions. Neutral regions end up
    /// empty.
    fn map_territory(&mut self) {
        self.scratch.fill_from(&self.points);

        for seed in 0..self.cell_count() {
            if self.scratch.get(seed) != Cell::Empty {
                continue;
            }
            if let Some(owner) = self.mark_region(seed).single() {
                self.claim_region(seed, owner.into());
            }
        }

        // whatever is still marked was neutral
        for i in 0..self.cell_count() {
            if self.scratch.get(i) == Cell::Marker {
                self.scratch.set(i, Cell::Empty);
            }
        }
        self.scored = true;
    }

    /// Mark the empty region around `seed` and collect the colours on its
    /// border.
    fn mark_region(&mut self, seed: usize) -> ColorSet {
        let mut border = ColorSet::EMPTY;
        self.stack.clear();
        self.scratch.set(seed, Cell::Marker);
        self.stack.push(seed as u16);

        while let Some(i) = self.stack.pop() {
            for n in self.neighbors(i as usize).into_iter().flatten() {
                match self.scratch.get(n) {
                    Cell::Empty => {
                        self.scratch.set(n, Cell::Marker);
                        self.stack.push(n as u16);
                    }
                    Cell::Black => border = border.with(Color::Black),
                    Cell::White => border = border.with(Color::White),
                    Cell::Marker => {}
                }
            }
        }
        border
    }

    /// Convert the marked region around `seed` to `owner`.
    fn claim_region(&mut self, seed: usize, owner: Cell) {
        self.stack.clear();
        self.scratch.set(seed, owner);
        self.stack.push(seed as u16);

        while let Some(i) = self.stack.pop() {
            for n in self.neighbors(i as usize).into_iter().flatten() {
                if self.scratch.get(n) == Cell::Marker {
                    self.scratch.set(n, owner);
                    self.stack.push(n as u16);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(grid: &mut Grid, stones: &[(Point, Color)]) {
        for &(point, color) in stones {
            grid.place_stone(point, color).unwrap();
        }
    }

    #[test]
    fn test_empty_board_is_neutral() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert_eq!(grid.get_scores(), (0, 0));
        assert_eq!(grid.territory_at((2, 2)), None);
    }

    #[test]
    fn test_lone_stone_owns_the_board() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.place_stone((1, 1), Color::White).unwrap();
        assert_eq!(grid.get_scores(), (0, 9));
        assert_eq!(grid.territory_at((0, 0)), Some(Color::White));
        assert_eq!(grid.territory_at((1, 1)), None);
    }

    #[test]
    fn test_wall_splits_territory() {
        // . X O .
        // . X O .
        let mut grid = Grid::new(4, 2).unwrap();
        play_all(
            &mut grid,
            &[
                ((1, 0), Color::Black),
                ((2, 0), Color::White),
                ((1, 1), Color::Black),
                ((2, 1), Color::White),
            ],
        );
        assert_eq!(grid.get_scores(), (4, 4));
        assert_eq!(grid.territory_at((0, 1)), Some(Color::Black));
        assert_eq!(grid.territory_at((3, 1)), Some(Color::White));
    }

    #[test]
    fn test_region_touching_both_colours_is_neutral() {
        // . X . O .
        let mut grid = Grid::new(5, 1).unwrap();
        play_all(&mut grid, &[((1, 0), Color::Black), ((3, 0), Color::White)]);
        assert_eq!(grid.get_scores(), (2, 2));
        assert_eq!(grid.territory_at((0, 0)), Some(Color::Black));
        assert_eq!(grid.territory_at((2, 0)), None);
        assert_eq!(grid.territory_at((4, 0)), Some(Color::White));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let mut grid = Grid::new(5, 5).unwrap();
        play_all(
            &mut grid,
            &[
                ((1, 0), Color::Black),
                ((1, 1), Color::Black),
                ((0, 1), Color::Black),
                ((3, 3), Color::White),
                ((2, 3), Color::White),
            ],
        );
        let first = grid.get_scores();
        let second = grid.get_scores();
        assert_eq!(first, second);
        assert_eq!(first, (4, 2));
    }

    #[test]
    fn test_territory_map_is_dropped_after_a_move() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.place_stone((0, 0), Color::Black).unwrap();
        grid.get_scores();
        assert!(grid.is_scored());
        assert_eq!(grid.territory_at((2, 0)), Some(Color::Black));

        grid.place_stone((2, 0), Color::White).unwrap();
        assert!(!grid.is_scored());
        assert_eq!(grid.territory_at((1, 0)), None);
    }
}
