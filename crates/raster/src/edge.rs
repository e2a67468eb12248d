//! Integer edge walker for the scanline triangle fill.

use congfx_types::Coordinate;

/// Walks one triangle edge a row at a time using Bresenham-style error
/// accumulation, no floating point.
///
/// Edges are always walked downward (callers sort vertices by y first).
/// X-major edges may cover several x cells while crossing a single row;
/// [`EdgeWalker::advance`] reports the full inclusive extent so the caller
/// can span from the leftmost to the rightmost boundary it touched.
pub(crate) struct EdgeWalker {
    x: i32,
    end_x: i32,
    sign: i32,
    major: i32,
    minor: i32,
    error: i32,
    x_major: bool,
}

impl EdgeWalker {
    pub(crate) fn new(start: Coordinate<i32>, end: Coordinate<i32>) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = end.y - start.y;
        let x_major = dx > dy;
        let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };
        Self {
            x: start.x,
            end_x: end.x,
            sign: if end.x < start.x { -1 } else { 1 },
            major,
            minor,
            error: major / 2,
            x_major,
        }
    }

    /// Current x position of the edge on the row about to be filled.
    pub(crate) fn x(&self) -> i32 {
        self.x
    }

    /// Step the edge down one row. Returns the inclusive x-extent the edge
    /// covered while leaving the current row.
    pub(crate) fn advance(&mut self) -> (i32, i32) {
        let from = self.x;
        if self.x_major {
            // Consume x steps until the error term carries a row change.
            // The final x step accompanies the row change itself.
            loop {
                self.error -= self.minor;
                if self.error < 0 {
                    self.error += self.major;
                    if self.x != self.end_x {
                        self.x += self.sign;
                    }
                    break;
                }
                if self.x == self.end_x {
                    break;
                }
                self.x += self.sign;
            }
        } else {
            // Y-major: at most one x step per row.
            self.error -= self.minor;
            if self.error < 0 {
                self.error += self.major;
                if self.x != self.end_x {
                    self.x += self.sign;
                }
            }
        }
        (from.min(self.x), from.max(self.x))
    }
}
