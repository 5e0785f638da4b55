//! Positional superko history.
//!
//! Every board reached during a game is stored as a path through an
//! append-only trie: one level per cell, one edge per cell value. The last
//! level stores a colour bitmask instead of a child index, recording which
//! players produced that exact board with their own move or pass.
//!
//! Memory grows by at most one node per cell per move. Lookups are exact, so
//! there are no hash collisions to worry about.

use tracing::debug;

use crate::board::{CellBuf, Color, ColorSet};
use crate::constants::ALPHABET;
use crate::error::GameError;

type NodeId = u32;

/// Slot value for "no child". The root is never anyone's child.
const NIL: NodeId = 0;

const ROOT: usize = 0;

/// Child indices per cell value; bitmasks on the last level.
type Node = [NodeId; ALPHABET];

#[derive(Clone, Debug)]
pub struct RepetitionHistory {
    nodes: Vec<Node>,
    cells: usize,
}

impl RepetitionHistory {
    /// An empty history for boards of `cells` cells.
    pub fn new(cells: usize) -> Result<Self, GameError> {
        assert!(cells > 0, "history needs at least one cell");
        let mut nodes = Vec::new();
        nodes.try_reserve(1)?;
        nodes.push([NIL; ALPHABET]);
        Ok(RepetitionHistory { nodes, cells })
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Record that `player` produced `position`.
    ///
    /// Fails with [`GameError::BoardRepetition`] if `player` already produced
    /// it, in which case nothing changes. Allocation failures also leave the
    /// trie untouched: every node a new path needs is reserved before the
    /// first one is linked in.
    pub fn insert(&mut self, position: &CellBuf, player: Color) -> Result<(), GameError> {
        debug_assert_eq!(position.len(), self.cells, "position has the wrong size");
        let last = self.cells - 1;
        let mut node = ROOT;

        for (depth, cell) in position.iter().enumerate() {
            let slot = cell.slot();
            if depth == last {
                let seen = ColorSet::from_bits(self.nodes[node][slot] as u8);
                if seen.contains(player) {
                    debug!(%player, "position repeats");
                    return Err(GameError::BoardRepetition);
                }
                self.nodes[node][slot] = seen.with(player).bits() as NodeId;
                return Ok(());
            }

            match self.nodes[node][slot] {
                NIL => return self.extend(node, depth, position, player),
                child => node = child as usize,
            }
        }
        unreachable!("loop returns on the last cell")
    }

    /// Append a fresh path for cells `depth..` hanging off `from`.
    ///
    /// None of the new nodes can already carry a terminal bit, so no lookups
    /// are needed past this point.
    fn extend(
        &mut self,
        from: usize,
        depth: usize,
        position: &CellBuf,
        player: Color,
    ) -> Result<(), GameError> {
        let fresh = self.cells - 1 - depth;
        if self.nodes.len() + fresh > NodeId::MAX as usize {
            return Err(GameError::HistoryExhausted);
        }
        self.nodes.try_reserve(fresh)?;

        let mut cells = position.iter().skip(depth);
        let mut parent = from;
        let mut slot = match cells.next() {
            Some(cell) => cell.slot(),
            None => unreachable!("depth is below the last cell"),
        };
        for cell in cells {
            let id = self.nodes.len();
            self.nodes.push([NIL; ALPHABET]);
            self.nodes[parent][slot] = id as NodeId;
            parent = id;
            slot = cell.slot();
        }
        self.nodes[parent][slot] = ColorSet::EMPTY.with(player).bits() as NodeId;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn position(cells: &[Cell]) -> CellBuf {
        let mut buf = CellBuf::new(cells.len()).unwrap();
        for (i, &c) in cells.iter().enumerate() {
            buf.set(i, c);
        }
        buf
    }

    #[test]
    fn test_same_player_cannot_repeat() {
        let mut history = RepetitionHistory::new(3).unwrap();
        let board = position(&[Cell::Black, Cell::Empty, Cell::White]);
        history.insert(&board, Color::Black).unwrap();
        assert_eq!(
            history.insert(&board, Color::Black),
            Err(GameError::BoardRepetition)
        );
    }

    #[test]
    fn test_other_player_may_reach_same_board() {
        let mut history = RepetitionHistory::new(3).unwrap();
        let board = position(&[Cell::Empty, Cell::Black, Cell::Empty]);
        history.insert(&board, Color::Black).unwrap();
        history.insert(&board, Color::White).unwrap();
        assert_eq!(
            history.insert(&board, Color::White),
            Err(GameError::BoardRepetition)
        );
    }

    #[test]
    fn test_new_path_appends_one_node_per_remaining_cell() {
        let mut history = RepetitionHistory::new(4).unwrap();
        let empty = position(&[Cell::Empty; 4]);
        history.insert(&empty, Color::White).unwrap();
        // root plus depths 1..=3
        assert_eq!(history.node_count(), 4);

        // diverges at depth 2: two new nodes
        let other = position(&[Cell::Empty, Cell::Empty, Cell::Black, Cell::Empty]);
        history.insert(&other, Color::Black).unwrap();
        assert_eq!(history.node_count(), 5);

        // diverges on the last cell: shares every node
        let last = position(&[Cell::Empty, Cell::Empty, Cell::Empty, Cell::White]);
        history.insert(&last, Color::Black).unwrap();
        assert_eq!(history.node_count(), 5);
    }

    #[test]
    fn test_rejection_does_not_grow_the_trie() {
        let mut history = RepetitionHistory::new(5).unwrap();
        let board = position(&[Cell::White, Cell::Empty, Cell::Black, Cell::Black, Cell::Empty]);
        history.insert(&board, Color::White).unwrap();
        let before = history.node_count();
        assert!(history.insert(&board, Color::White).is_err());
        assert_eq!(history.node_count(), before);
    }

    #[test]
    fn test_single_cell_board_uses_root_as_last_level() {
        let mut history = RepetitionHistory::new(1).unwrap();
        let empty = position(&[Cell::Empty]);
        history.insert(&empty, Color::White).unwrap();
        history.insert(&empty, Color::Black).unwrap();
        assert_eq!(history.node_count(), 1);
        assert_eq!(
            history.insert(&empty, Color::Black),
            Err(GameError::BoardRepetition)
        );
    }
}
