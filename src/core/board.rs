//! Board module - the placed-cell grid
//!
//! A 10x20 grid stored as a flat array, row-major, for cache locality and
//! zero allocation. Coordinates are (x, y) with x in 0..10 left to right and
//! y in 0..20 top to bottom. A falling piece may extend above the top edge,
//! so placement legality is asked through `is_open`, which treats negative y
//! as open space while the side and bottom walls stay solid.

use arrayvec::ArrayVec;

use crate::types::{Cell, COLUMNS, ROWS};

/// Total number of cells on the board
const GRID_SIZE: usize = (COLUMNS as usize) * (ROWS as usize);

/// The playfield grid - 10 columns x 20 rows of `Option<PieceColor>`
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * COLUMNS + x)
    cells: [Cell; GRID_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= COLUMNS as i8 || y < 0 || y >= ROWS as i8 {
            return None;
        }
        Some((y as usize) * (COLUMNS as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        COLUMNS
    }

    pub fn height(&self) -> u8 {
        ROWS
    }

    /// Cell at (x, y); None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Write a cell at (x, y). Returns false (and writes nothing) out of
    /// bounds, which silently clips piece cells locking above the top edge.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Cell-level placement legality: false beyond the side or bottom
    /// walls, true above the top edge, otherwise true iff the cell is empty
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= COLUMNS as i8 || y >= ROWS as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS as usize {
            return false;
        }
        let start = y * COLUMNS as usize;
        let end = start + COLUMNS as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row and compact the rest downward. Returns the
    /// cleared row indices in ascending order (at most four; a single lock
    /// cannot fill more).
    ///
    /// Two-pointer pass from the bottom: full rows are recorded and skipped,
    /// other rows are copied down to the write cursor, and whatever remains
    /// above the cursor becomes empty. Row indices are visited once, so
    /// stacked full rows cannot alias a slot already compacted into.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let width = COLUMNS as usize;
        let mut write_y = ROWS as usize;

        for read_y in (0..ROWS as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared.reverse();
        cleared
    }

    /// Empty the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// The raw cell array, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceColor;

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..COLUMNS as i8 {
            board.set(x, y, Some(PieceColor::Cyan));
        }
    }

    #[test]
    fn test_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
        assert_eq!(Board::index(0, -1), None);
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut board = Board::new();
        assert!(board.set(3, 5, Some(PieceColor::Red)));
        assert_eq!(board.get(3, 5), Some(Some(PieceColor::Red)));
        assert_eq!(board.get(3, 6), Some(None));
    }

    #[test]
    fn test_set_out_of_bounds_is_rejected() {
        let mut board = Board::new();
        assert!(!board.set(-1, 0, Some(PieceColor::Blue)));
        assert!(!board.set(0, -1, Some(PieceColor::Blue)));
        assert!(!board.set(10, 0, Some(PieceColor::Blue)));
        assert!(!board.set(0, 20, Some(PieceColor::Blue)));
        assert!(board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_is_open_walls_and_sky() {
        let board = Board::new();
        // Side and bottom walls are solid
        assert!(!board.is_open(-1, 5));
        assert!(!board.is_open(10, 5));
        assert!(!board.is_open(4, 20));
        // Above the top edge is open space
        assert!(board.is_open(4, -1));
        assert!(board.is_open(0, -3));
        // But never beyond the side walls, even above the top
        assert!(!board.is_open(-1, -1));
        // Interior empty cells are open
        assert!(board.is_open(0, 0));
        assert!(board.is_open(9, 19));
    }

    #[test]
    fn test_is_open_occupied_cell() {
        let mut board = Board::new();
        board.set(4, 10, Some(PieceColor::Green));
        assert!(!board.is_open(4, 10));
        assert!(board.is_open(4, 9));
    }

    #[test]
    fn test_is_row_full() {
        let mut board = Board::new();
        assert!(!board.is_row_full(19));
        fill_row(&mut board, 19);
        assert!(board.is_row_full(19));
        board.set(0, 19, None);
        assert!(!board.is_row_full(19));
        // Out-of-range rows are never full
        assert!(!board.is_row_full(20));
    }

    #[test]
    fn test_clear_single_row_shifts_above_down() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        board.set(2, 18, Some(PieceColor::Orange));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19]);

        // The marker moved down one row; row 0 is empty
        assert_eq!(board.get(2, 19), Some(Some(PieceColor::Orange)));
        assert_eq!(board.get(2, 18), Some(None));
        assert!((0..COLUMNS as i8).all(|x| board.get(x, 0) == Some(None)));
    }

    #[test]
    fn test_clear_stacked_adjacent_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 18);
        fill_row(&mut board, 19);
        board.set(5, 17, Some(PieceColor::Magenta));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[18, 19]);

        // Marker falls two rows, everything above is empty
        assert_eq!(board.get(5, 19), Some(Some(PieceColor::Magenta)));
        let occupied = board.cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(occupied, 1);
    }

    #[test]
    fn test_clear_rows_with_gap_between() {
        let mut board = Board::new();
        fill_row(&mut board, 17);
        fill_row(&mut board, 19);
        board.set(1, 18, Some(PieceColor::Yellow));
        board.set(3, 16, Some(PieceColor::Blue));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[17, 19]);

        // Partial rows keep their order while falling past the cleared ones
        assert_eq!(board.get(1, 19), Some(Some(PieceColor::Yellow)));
        assert_eq!(board.get(3, 18), Some(Some(PieceColor::Blue)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_clear_four_rows_at_once() {
        let mut board = Board::new();
        for y in 16..20 {
            fill_row(&mut board, y);
        }

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[16, 17, 18, 19]);
        assert!(board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_rows_below_a_clear_are_untouched() {
        let mut board = Board::new();
        fill_row(&mut board, 18);
        board.set(7, 19, Some(PieceColor::Red));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[18]);
        assert_eq!(board.get(7, 19), Some(Some(PieceColor::Red)));
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut board = Board::new();
        fill_row(&mut board, 10);
        board.clear();
        assert!(board.cells().iter().all(|c| c.is_none()));
    }
}
