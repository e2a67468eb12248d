//! Framebuffer of styled character cells.

use congfx_types::{Colour, Coordinate, Pixel};

/// A single display cell: a glyph plus its colour pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub foreground: Colour,
    pub background: Colour,
}

impl Cell {
    pub const fn new(glyph: char, foreground: Colour, background: Colour) -> Self {
        Self {
            glyph,
            foreground,
            background,
        }
    }

    /// The cell a pixel renders as: the shade's glyph in the pixel's colours.
    pub const fn from_pixel(pixel: Pixel) -> Self {
        Self {
            glyph: pixel.shade.glyph(),
            foreground: pixel.foreground,
            background: pixel.background,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            foreground: Colour::White,
            background: Colour::Black,
        }
    }
}

/// 2D grid of [`Cell`]s, row-major, owned by the frame loop.
///
/// All access is bounds-checked against the buffer dimensions; out-of-range
/// writes are silently dropped, which is the clipping gate every rasterizer
/// primitive relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    dimensions: Coordinate<i32>,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(dimensions: Coordinate<i32>) -> Self {
        let len = (dimensions.x.max(0) as usize) * (dimensions.y.max(0) as usize);
        Self {
            dimensions,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn dimensions(&self) -> Coordinate<i32> {
        self.dimensions
    }

    pub fn width(&self) -> i32 {
        self.dimensions.x
    }

    pub fn height(&self) -> i32 {
        self.dimensions.y
    }

    /// Resize the buffer, preserving the allocation when possible.
    pub fn resize(&mut self, dimensions: Coordinate<i32>) {
        if self.dimensions == dimensions {
            return;
        }
        self.dimensions = dimensions;
        let len = (dimensions.x.max(0) as usize) * (dimensions.y.max(0) as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn index(&self, coordinate: Coordinate<i32>) -> Option<usize> {
        if coordinate.in_bounds(self.dimensions) {
            Some(coordinate.to_index(self.dimensions.x))
        } else {
            None
        }
    }

    pub fn get(&self, coordinate: Coordinate<i32>) -> Option<Cell> {
        self.index(coordinate).map(|i| self.cells[i])
    }

    pub fn set(&mut self, coordinate: Coordinate<i32>, cell: Cell) {
        if let Some(i) = self.index(coordinate) {
            self.cells[i] = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use congfx_types::Shade;

    #[test]
    fn set_then_get() {
        let mut fb = FrameBuffer::new(Coordinate::new(4, 3));
        let cell = Cell::new('X', Colour::Red, Colour::Black);
        fb.set(Coordinate::new(2, 1), cell);
        assert_eq!(fb.get(Coordinate::new(2, 1)), Some(cell));
        assert_eq!(fb.get(Coordinate::new(0, 0)), Some(Cell::default()));
    }

    #[test]
    fn out_of_bounds_access_is_a_no_op() {
        let mut fb = FrameBuffer::new(Coordinate::new(4, 3));
        let before = fb.clone();
        fb.set(Coordinate::new(4, 0), Cell::new('X', Colour::Red, Colour::Black));
        fb.set(Coordinate::new(0, 3), Cell::new('X', Colour::Red, Colour::Black));
        fb.set(Coordinate::new(-1, -1), Cell::new('X', Colour::Red, Colour::Black));
        assert_eq!(fb, before);
        assert_eq!(fb.get(Coordinate::new(4, 2)), None);
    }

    #[test]
    fn cell_from_pixel_uses_shade_glyph() {
        let cell = Cell::from_pixel(Pixel::new(Colour::Green, Shade::Half));
        assert_eq!(cell.glyph, '▒');
        assert_eq!(cell.foreground, Colour::Green);
    }

    #[test]
    fn resize_preserves_length_invariant() {
        let mut fb = FrameBuffer::new(Coordinate::new(2, 2));
        fb.resize(Coordinate::new(5, 4));
        assert_eq!(fb.cells().len(), 20);
        assert_eq!(fb.dimensions(), Coordinate::new(5, 4));
    }
}
