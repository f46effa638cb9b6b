//! Render targets for the text area.
//!
//! The text area paints through the [`Surface`] trait, one grapheme cluster
//! per call. [`CellBuffer`] is the in-memory implementation: a 2D grid of
//! [`Cell`]s, used by tests and by hosts that composite frames themselves.
//!
//! # Examples
//!
//! ```
//! use opentui_textarea::{CellBuffer, Style, Surface};
//!
//! let mut buf = CellBuffer::new(8, 2);
//! buf.set_content(0, 0, 'h', &[], Style::NONE);
//! buf.set_content(1, 0, 'i', &[], Style::NONE);
//! assert_eq!(buf.row_text(0), "hi");
//! ```

mod scissor;

pub use scissor::ClipRect;

use crate::cell::Cell;
use crate::style::Style;
use crate::unicode::{WidthMethod, display_width_char_with_method};

/// Something the text area can paint cells onto.
pub trait Surface {
    /// Size in cells as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Paint one cluster at `(x, y)`.
    ///
    /// `primary` is the first char of the cluster and `combining` the rest.
    /// A wide primary covers the next cell as well; implementations decide
    /// how to represent that. Out-of-bounds writes are ignored.
    fn set_content(&mut self, x: u32, y: u32, primary: char, combining: &[char], style: Style);
}

/// In-memory cell grid.
///
/// # Coordinate System
///
/// Coordinates are (x, y) where (0, 0) is the top-left corner. X increases
/// to the right, Y increases downward.
#[derive(Clone, Debug)]
pub struct CellBuffer {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    width_method: WidthMethod,
}

impl CellBuffer {
    /// Create a cleared buffer with the given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
            width_method: WidthMethod::default(),
        }
    }

    /// Use a specific width method to decide which glyphs are wide.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    /// Get buffer width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get buffer height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    fn cell_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Get cell at position.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        self.cell_index(x, y).map(|idx| &self.cells[idx])
    }

    /// Set cell at position; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        if let Some(idx) = self.cell_index(x, y) {
            self.cells[idx] = cell;
        }
    }

    /// Reset every cell to an empty, unstyled cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the buffer, clearing its contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let size = (width as usize).saturating_mul(height as usize);
        self.cells = vec![Cell::default(); size];
    }

    /// Text of one row, continuation cells skipped, trailing spaces trimmed.
    #[must_use]
    pub fn row_text(&self, y: u32) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                out.push_str(&cell.symbol());
            }
        }
        out.truncate(out.trim_end_matches(' ').len());
        out
    }

    /// All rows joined with newlines, for snapshot tests.
    #[must_use]
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get raw cell slice.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over cells with positions.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i as u32) % width;
            let y = (i as u32) / width;
            (x, y, cell)
        })
    }
}

impl Surface for CellBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_content(&mut self, x: u32, y: u32, primary: char, combining: &[char], style: Style) {
        let Some(idx) = self.cell_index(x, y) else {
            return;
        };
        // Painting over the right half of a wide glyph orphans its left half.
        if self.cells[idx].is_continuation() && x > 0 {
            self.cells[idx - 1] = Cell::clear(self.cells[idx - 1].style);
        }
        if let Some(next) = self.cell_index(x + 1, y) {
            if self.cells[next].is_continuation() {
                self.cells[next] = Cell::clear(self.cells[next].style);
            }
        }
        self.cells[idx] = Cell::cluster(primary, combining, style);
        if display_width_char_with_method(primary, self.width_method) == 2 {
            match self.cell_index(x + 1, y) {
                Some(next) => self.cells[next] = Cell::continuation(style),
                // No room for the right half.
                None => self.cells[idx] = Cell::clear(style),
            }
        }
    }
}

impl Default for CellBuffer {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
