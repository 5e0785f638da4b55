//! Packed board storage.
//!
//! A [`Grid`] keeps two buffers of 2-bit cells: `points`, the position as
//! played, and `scratch`, working memory for liberty and territory scans. Cells
//! are stored row-major, 32 to a `u64`.

use std::fmt;

use crate::constants::{BITS_PER_CELL, BLACK_BIT, CELL_MASK, CELLS_PER_WORD, WHITE_BIT};
use crate::error::GameError;

/// A point on the board as `(column, row)`. Row 0 is the top edge.
pub type Point = (u8, u8);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opp(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub(crate) fn bit(self) -> u8 {
        match self {
            Color::Black => BLACK_BIT,
            Color::White => WHITE_BIT,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Raw cell value. `Marker` only ever appears in `scratch`, mid-scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Cell {
    Empty = 0,
    Black = 1,
    White = 2,
    Marker = 3,
}

impl Cell {
    fn from_bits(bits: u64) -> Self {
        match bits & CELL_MASK {
            0 => Cell::Empty,
            1 => Cell::Black,
            2 => Cell::White,
            _ => Cell::Marker,
        }
    }

    pub(crate) fn stone(self) -> Option<Color> {
        match self {
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
            Cell::Empty | Cell::Marker => None,
        }
    }

    /// Trie edge for this value. Never called on `Marker`.
    pub(crate) fn slot(self) -> usize {
        debug_assert!(self != Cell::Marker, "marker leaked into points");
        self as usize
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

/// Set of colours as a union of indicator bits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ColorSet(u8);

impl ColorSet {
    pub(crate) const EMPTY: ColorSet = ColorSet(0);

    pub(crate) fn from_bits(bits: u8) -> Self {
        ColorSet(bits & (BLACK_BIT | WHITE_BIT))
    }

    pub(crate) fn bits(self) -> u8 {
        self.0
    }

    pub(crate) fn with(self, color: Color) -> Self {
        ColorSet(self.0 | color.bit())
    }

    pub(crate) fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    /// The only member, if there is exactly one.
    pub(crate) fn single(self) -> Option<Color> {
        match self.0 {
            BLACK_BIT => Some(Color::Black),
            WHITE_BIT => Some(Color::White),
            _ => None,
        }
    }
}

/// Dense 2-bit-per-cell buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBuf {
    words: Vec<u64>,
    len: usize,
}

impl CellBuf {
    /// An all-empty buffer of `len` cells.
    pub(crate) fn new(len: usize) -> Result<Self, GameError> {
        let n_words = len.div_ceil(CELLS_PER_WORD);
        let mut words = Vec::new();
        words.try_reserve_exact(n_words)?;
        words.resize(n_words, 0);
        Ok(CellBuf { words, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn get(&self, i: usize) -> Cell {
        let shift = (i % CELLS_PER_WORD) * BITS_PER_CELL;
        Cell::from_bits(self.words[i / CELLS_PER_WORD] >> shift)
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, cell: Cell) {
        let shift = (i % CELLS_PER_WORD) * BITS_PER_CELL;
        let word = &mut self.words[i / CELLS_PER_WORD];
        *word = (*word & !(CELL_MASK << shift)) | ((cell as u64) << shift);
    }

    /// Overwrite with the contents of a buffer of the same length.
    pub(crate) fn fill_from(&mut self, other: &CellBuf) {
        debug_assert_eq!(self.len, other.len);
        self.words.copy_from_slice(&other.words);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    pub(crate) fn count(&self, cell: Cell) -> usize {
        self.iter().filter(|&c| c == cell).count()
    }
}

/// The board: settled `points` plus a `scratch` copy for analysis.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) width: u8,
    pub(crate) height: u8,
    pub(crate) points: CellBuf,
    pub(crate) scratch: CellBuf,
    /// Flood-fill worklist. Cells are marked on push, so it never exceeds
    /// the cell count and is allocated once.
    pub(crate) stack: Vec<u16>,
    /// `scratch` holds a territory map that matches `points`.
    pub(crate) scored: bool,
}

impl Grid {
    /// An empty board. Both sides must be at least 1.
    pub fn new(width: u8, height: u8) -> Result<Self, GameError> {
        assert!(width > 0 && height > 0, "board must be at least 1x1");
        let cells = width as usize * height as usize;
        let mut stack = Vec::new();
        stack.try_reserve_exact(cells)?;
        Ok(Grid {
            width,
            height,
            points: CellBuf::new(cells)?,
            scratch: CellBuf::new(cells)?,
            stack,
            scored: false,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.points.len()
    }

    pub fn on_board(&self, (col, row): Point) -> bool {
        col < self.width && row < self.height
    }

    pub fn stone_at(&self, point: Point) -> Option<Color> {
        if !self.on_board(point) {
            return None;
        }
        self.points.get(self.idx(point)).stone()
    }

    /// All cells in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = Option<Color>> + '_ {
        self.points.iter().map(Cell::stone)
    }

    pub fn is_empty(&self) -> bool {
        self.points.iter().all(|c| c == Cell::Empty)
    }

    /// The settled position, in the form [`RepetitionHistory`] records.
    ///
    /// [`RepetitionHistory`]: crate::history::RepetitionHistory
    pub fn points(&self) -> &CellBuf {
        &self.points
    }

    pub(crate) fn restore_points(&mut self, backup: &CellBuf) {
        self.points.fill_from(backup);
        self.scored = false;
    }

    #[inline]
    pub(crate) fn idx(&self, (col, row): Point) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Orthogonal neighbours of a cell index: west, east, north, south.
    #[inline]
    pub(crate) fn neighbors(&self, i: usize) -> [Option<usize>; 4] {
        let w = self.width as usize;
        let (col, row) = (i % w, i / w);
        [
            (col > 0).then(|| i - 1),
            (col + 1 < w).then(|| i + 1),
            (row > 0).then(|| i - w),
            (row + 1 < self.height as usize).then(|| i + w),
        ]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let ch = match self.stone_at((col, row)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
