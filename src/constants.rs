//! Board limits, defaults, and storage parameters.
//!
//! Board dimensions are chosen at runtime (see the `go-referee` binary flags);
//! everything here is fixed at compile time.

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest allowed width or height.
pub const MAX_SIDE: u8 = u8::MAX;

/// Largest possible cell count. Every cell index fits in a `u16`.
pub const MAX_CELLS: usize = MAX_SIDE as usize * MAX_SIDE as usize;

/// Default board side used by the binary.
pub const DEFAULT_SIZE: u8 = 19;

/// Default komi (whole points added to White's score).
pub const DEFAULT_KOMI: u32 = 7;

// =============================================================================
// Cell Storage
// =============================================================================

/// Bits used per cell in the packed buffers.
pub const BITS_PER_CELL: usize = 2;

/// Cells stored in one `u64` word.
pub const CELLS_PER_WORD: usize = u64::BITS as usize / BITS_PER_CELL;

/// Mask for a single cell inside a word.
pub const CELL_MASK: u64 = (1 << BITS_PER_CELL) - 1;

// =============================================================================
// Position History
// =============================================================================

/// Distinct values a settled cell can take (empty, black, white).
/// One trie edge per value.
pub const ALPHABET: usize = 3;

/// Colour bit recorded in a terminal trie slot for Black.
pub const BLACK_BIT: u8 = 0b01;

/// Colour bit recorded in a terminal trie slot for White.
pub const WHITE_BIT: u8 = 0b10;
