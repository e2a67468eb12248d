//! Scan-conversion rasterizer over a caller-owned framebuffer.
//!
//! Every operation ultimately routes through [`Rasterizer::draw_pixel`] /
//! [`Rasterizer::draw_character`], the single bounds-check gate. Off-screen
//! geometry is therefore silently clipped; drawing never fails.
//!
//! The algorithms are pure integer arithmetic: Bresenham lines, dual
//! edge-walking scanline triangle fill, and the midpoint circle algorithm
//! mirrored over eight octants.

mod edge;

use congfx_core::{Cell, FrameBuffer};
use congfx_types::{Colour, Coordinate, Pixel};

use edge::EdgeWalker;

/// Drawing API over a borrowed [`FrameBuffer`].
///
/// The rasterizer never allocates the buffer; it only writes cells through
/// the bounds-checked gate. Construct one per frame (or per draw batch) from
/// the frame loop's buffer.
pub struct Rasterizer<'a> {
    buffer: &'a mut FrameBuffer,
}

impl<'a> Rasterizer<'a> {
    pub fn new(buffer: &'a mut FrameBuffer) -> Self {
        Self { buffer }
    }

    pub fn screen_dimensions(&self) -> Coordinate<i32> {
        self.buffer.dimensions()
    }

    /// Set glyph and colour attribute at `coordinate`; a no-op off-screen.
    ///
    /// This is the sole bounds check in the rasterizer: every other
    /// primitive draws through here.
    pub fn draw_character(&mut self, coordinate: Coordinate<i32>, glyph: char, colour: Colour) {
        self.buffer
            .set(coordinate, Cell::new(glyph, colour, Colour::Black));
    }

    /// Write one pixel (the shade's glyph in the pixel's colours).
    pub fn draw_pixel(&mut self, coordinate: Coordinate<i32>, pixel: Pixel) {
        self.buffer.set(coordinate, Cell::from_pixel(pixel));
    }

    /// Fill every cell of the screen with `pixel`.
    ///
    /// Equivalent to [`Rasterizer::draw_pixel`] over the full extent; since
    /// the whole target is in bounds by construction, the per-cell gate is
    /// skipped in favour of a bulk fill.
    pub fn clear_screen(&mut self, pixel: Pixel) {
        self.buffer.fill(Cell::from_pixel(pixel));
    }

    /// Draw text one cell per character along +x. No wrapping.
    pub fn draw_string(&mut self, origin: Coordinate<i32>, text: &str, colour: Colour) {
        for (offset, glyph) in text.chars().enumerate() {
            self.draw_character(origin + Coordinate::new(offset as i32, 0), glyph, colour);
        }
    }

    /// Bresenham line from `start` to `end`, endpoint inclusive.
    ///
    /// The walk steps the major axis one unit per iteration and accumulates
    /// error on the minor axis. Equal deltas take the y-major branch.
    pub fn draw_line(&mut self, start: Coordinate<i32>, end: Coordinate<i32>, pixel: Pixel) {
        let mut current = start;
        let delta = end - start;
        let step = Coordinate::new(delta.x.signum(), delta.y.signum());
        let delta = Coordinate::new(delta.x.abs(), delta.y.abs());

        if delta.x > delta.y {
            let mut error = delta.x / 2;
            loop {
                self.draw_pixel(current, pixel);
                if current.x == end.x {
                    break;
                }
                error -= delta.y;
                if error < 0 {
                    current.y += step.y;
                    error += delta.x;
                }
                current.x += step.x;
            }
        } else {
            let mut error = delta.y / 2;
            loop {
                self.draw_pixel(current, pixel);
                if current.y == end.y {
                    break;
                }
                error -= delta.x;
                if error < 0 {
                    current.x += step.x;
                    error += delta.y;
                }
                current.y += step.y;
            }
        }
    }

    /// Outline a triangle: three lines connecting the vertices pairwise.
    pub fn draw_triangle(&mut self, vertices: [Coordinate<i32>; 3], pixel: Pixel) {
        self.draw_line(vertices[0], vertices[1], pixel);
        self.draw_line(vertices[1], vertices[2], pixel);
        self.draw_line(vertices[2], vertices[0], pixel);
    }

    /// Scanline-fill a triangle using two integer edge walkers.
    ///
    /// The vertices are sorted by ascending y and the triangle is split at
    /// the middle vertex into a flat-bottom upper half and a flat-top lower
    /// half. The long edge (top vertex to bottom vertex) is walked across
    /// both halves; each scanline spans from the minimum to the maximum x
    /// either edge touched while crossing that row.
    pub fn draw_filled_triangle(&mut self, vertices: [Coordinate<i32>; 3], pixel: Pixel) {
        let mut sorted = vertices;
        sorted.sort_by_key(|v| v.y);
        let [top, middle, bottom] = sorted;

        let mut long = EdgeWalker::new(top, bottom);

        let mut short = EdgeWalker::new(top, middle);
        for y in top.y..middle.y {
            let (a_lo, a_hi) = long.advance();
            let (b_lo, b_hi) = short.advance();
            self.scanline(a_lo.min(b_lo), a_hi.max(b_hi), y, pixel);
        }

        let mut short = EdgeWalker::new(middle, bottom);
        for y in middle.y..bottom.y {
            let (a_lo, a_hi) = long.advance();
            let (b_lo, b_hi) = short.advance();
            self.scanline(a_lo.min(b_lo), a_hi.max(b_hi), y, pixel);
        }

        // Closing row through the bottom vertex. The walkers may still be
        // short of their endpoints on x-major edges.
        let lo = long.x().min(short.x()).min(bottom.x);
        let hi = long.x().max(short.x()).max(bottom.x);
        self.scanline(lo, hi, bottom.y, pixel);
    }

    /// Midpoint circle outline: one octant walked, mirrored eight ways.
    pub fn draw_circle(&mut self, centre: Coordinate<i32>, radius: i32, pixel: Pixel) {
        let mut current = Coordinate::new(0, radius);
        let mut p = 1 - radius;
        while current.x <= current.y {
            self.draw_pixel(centre + current, pixel);
            self.draw_pixel(centre - current, pixel);
            self.draw_pixel(centre + Coordinate::new(current.y, current.x), pixel);
            self.draw_pixel(centre - Coordinate::new(current.y, current.x), pixel);
            self.draw_pixel(centre + Coordinate::new(-current.x, current.y), pixel);
            self.draw_pixel(centre - Coordinate::new(-current.x, current.y), pixel);
            self.draw_pixel(centre + Coordinate::new(current.x, -current.y), pixel);
            self.draw_pixel(centre - Coordinate::new(current.x, -current.y), pixel);
            if p < 0 {
                p += 2 * current.x + 3;
            } else {
                p += 2 * (current.x - current.y) + 5;
                current.y -= 1;
            }
            current.x += 1;
        }
    }

    /// Solid disc: the same octant walk, but each step draws four horizontal
    /// chords connecting the mirrored x-extents instead of mirrored pixels.
    pub fn draw_filled_circle(&mut self, centre: Coordinate<i32>, radius: i32, pixel: Pixel) {
        let mut current = Coordinate::new(0, radius);
        let mut p = 1 - radius;
        while current.x <= current.y {
            self.scanline(centre.x - current.y, centre.x + current.y, centre.y + current.x, pixel);
            self.scanline(centre.x - current.x, centre.x + current.x, centre.y + current.y, pixel);
            self.scanline(centre.x - current.x, centre.x + current.x, centre.y - current.y, pixel);
            self.scanline(centre.x - current.y, centre.x + current.y, centre.y - current.x, pixel);
            if p < 0 {
                p += 2 * current.x + 3;
            } else {
                p += 2 * (current.x - current.y) + 5;
                current.y -= 1;
            }
            current.x += 1;
        }
    }

    /// Axis-aligned rectangle outline, corners inclusive.
    pub fn draw_rectangle(
        &mut self,
        top_left: Coordinate<i32>,
        bottom_right: Coordinate<i32>,
        pixel: Pixel,
    ) {
        for x in top_left.x..=bottom_right.x {
            for y in top_left.y..=bottom_right.y {
                if x == top_left.x || x == bottom_right.x || y == top_left.y || y == bottom_right.y
                {
                    self.draw_pixel(Coordinate::new(x, y), pixel);
                }
            }
        }
    }

    /// Axis-aligned filled rectangle, both corners inclusive.
    pub fn draw_filled_rectangle(
        &mut self,
        top_left: Coordinate<i32>,
        bottom_right: Coordinate<i32>,
        pixel: Pixel,
    ) {
        for x in top_left.x..=bottom_right.x {
            for y in top_left.y..=bottom_right.y {
                self.draw_pixel(Coordinate::new(x, y), pixel);
            }
        }
    }

    /// Blit a sprite at integer `scale` using nearest-lower-neighbor
    /// sampling (`destination / scale`, no interpolation).
    ///
    /// Source pixels with an `Empty` shade are transparent and leave the
    /// destination untouched. A scale below 1 draws nothing.
    pub fn draw_sprite(
        &mut self,
        coordinate: Coordinate<i32>,
        sprite: &congfx_core::Sprite,
        scale: i32,
    ) {
        if scale < 1 {
            return;
        }
        let dimensions = sprite.dimensions() * scale;
        for x in 0..dimensions.x {
            for y in 0..dimensions.y {
                let current = Coordinate::new(x, y);
                let pixel = sprite.pixel(current / scale);
                if pixel.shade != congfx_types::Shade::Empty {
                    self.draw_pixel(coordinate + current, pixel);
                }
            }
        }
    }

    fn scanline(&mut self, start_x: i32, end_x: i32, y: i32, pixel: Pixel) {
        for x in start_x..=end_x {
            self.draw_pixel(Coordinate::new(x, y), pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use congfx_types::Shade;

    fn buffer(width: i32, height: i32) -> FrameBuffer {
        FrameBuffer::new(Coordinate::new(width, height))
    }

    fn drawn(fb: &FrameBuffer) -> Vec<Coordinate<i32>> {
        let mut cells = Vec::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                let coordinate = Coordinate::new(x, y);
                if fb.get(coordinate) != Some(Cell::default()) {
                    cells.push(coordinate);
                }
            }
        }
        cells
    }

    #[test]
    fn horizontal_line_is_endpoint_inclusive() {
        let mut fb = buffer(10, 5);
        Rasterizer::new(&mut fb).draw_line(
            Coordinate::new(0, 0),
            Coordinate::new(4, 0),
            Pixel::default(),
        );
        let expected: Vec<_> = (0..=4).map(|x| Coordinate::new(x, 0)).collect();
        assert_eq!(drawn(&fb), expected);
    }

    #[test]
    fn single_point_line() {
        let mut fb = buffer(5, 5);
        Rasterizer::new(&mut fb).draw_line(
            Coordinate::new(2, 2),
            Coordinate::new(2, 2),
            Pixel::default(),
        );
        assert_eq!(drawn(&fb), vec![Coordinate::new(2, 2)]);
    }

    #[test]
    fn diagonal_line_hits_both_endpoints() {
        let mut fb = buffer(10, 10);
        Rasterizer::new(&mut fb).draw_line(
            Coordinate::new(1, 1),
            Coordinate::new(6, 6),
            Pixel::default(),
        );
        let cells = drawn(&fb);
        assert!(cells.contains(&Coordinate::new(1, 1)));
        assert!(cells.contains(&Coordinate::new(6, 6)));
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn steep_reverse_line_hits_both_endpoints() {
        let mut fb = buffer(12, 12);
        Rasterizer::new(&mut fb).draw_line(
            Coordinate::new(8, 9),
            Coordinate::new(6, 1),
            Pixel::default(),
        );
        let cells = drawn(&fb);
        assert!(cells.contains(&Coordinate::new(8, 9)));
        assert!(cells.contains(&Coordinate::new(6, 1)));
        // One pixel per row of the walk.
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn off_screen_geometry_is_clipped_silently() {
        let mut fb = buffer(4, 4);
        let mut raster = Rasterizer::new(&mut fb);
        raster.draw_line(Coordinate::new(-10, -10), Coordinate::new(20, 20), Pixel::default());
        raster.draw_circle(Coordinate::new(-5, -5), 3, Pixel::default());
        // The diagonal crosses the visible region; nothing panicked and
        // only in-bounds cells were touched.
        for cell in drawn(&fb) {
            assert!(cell.in_bounds(Coordinate::new(4, 4)));
        }
    }

    #[test]
    fn clear_screen_fills_every_cell() {
        let mut fb = buffer(6, 4);
        Rasterizer::new(&mut fb).clear_screen(Pixel::new(Colour::Blue, Shade::Full));
        assert!(fb
            .cells()
            .iter()
            .all(|c| *c == Cell::from_pixel(Pixel::new(Colour::Blue, Shade::Full))));
    }

    #[test]
    fn draw_string_advances_along_x() {
        let mut fb = buffer(10, 3);
        Rasterizer::new(&mut fb).draw_string(Coordinate::new(2, 1), "hi", Colour::Yellow);
        assert_eq!(fb.get(Coordinate::new(2, 1)).unwrap().glyph, 'h');
        assert_eq!(fb.get(Coordinate::new(3, 1)).unwrap().glyph, 'i');
        assert_eq!(fb.get(Coordinate::new(3, 1)).unwrap().foreground, Colour::Yellow);
    }

    #[test]
    fn rectangle_outline_leaves_centre_untouched() {
        let mut fb = buffer(6, 6);
        Rasterizer::new(&mut fb).draw_rectangle(
            Coordinate::new(1, 1),
            Coordinate::new(3, 3),
            Pixel::default(),
        );
        let cells = drawn(&fb);
        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&Coordinate::new(2, 2)));
    }

    #[test]
    fn filled_rectangle_covers_inclusive_extent() {
        let mut fb = buffer(6, 6);
        Rasterizer::new(&mut fb).draw_filled_rectangle(
            Coordinate::new(1, 1),
            Coordinate::new(3, 3),
            Pixel::default(),
        );
        assert_eq!(drawn(&fb).len(), 9);
    }

    #[test]
    fn filled_triangle_covers_outline() {
        let vertices = [
            Coordinate::new(2, 1),
            Coordinate::new(12, 4),
            Coordinate::new(5, 11),
        ];
        let mut outline_fb = buffer(16, 14);
        Rasterizer::new(&mut outline_fb).draw_triangle(vertices, Pixel::default());
        let mut filled_fb = buffer(16, 14);
        Rasterizer::new(&mut filled_fb).draw_filled_triangle(vertices, Pixel::default());

        let filled = drawn(&filled_fb);
        for cell in drawn(&outline_fb) {
            assert!(filled.contains(&cell), "outline pixel {cell:?} not filled");
        }
        assert!(filled.contains(&Coordinate::new(6, 5)), "interior missing");
    }

    #[test]
    fn degenerate_triangles_draw_something_sane() {
        // All three vertices on one row collapses to a horizontal run.
        let mut fb = buffer(10, 4);
        Rasterizer::new(&mut fb).draw_filled_triangle(
            [
                Coordinate::new(1, 2),
                Coordinate::new(7, 2),
                Coordinate::new(4, 2),
            ],
            Pixel::default(),
        );
        let expected: Vec<_> = (1..=7).map(|x| Coordinate::new(x, 2)).collect();
        assert_eq!(drawn(&fb), expected);
    }

    #[test]
    fn filled_circle_is_solid() {
        let mut fb = buffer(20, 20);
        Rasterizer::new(&mut fb).draw_filled_circle(Coordinate::new(9, 9), 6, Pixel::default());
        let cells = drawn(&fb);
        // Every cell within the radius must be covered.
        for y in 0..20 {
            for x in 0..20 {
                let dx = x - 9;
                let dy = y - 9;
                if dx * dx + dy * dy <= 6 * 6 {
                    assert!(
                        cells.contains(&Coordinate::new(x, y)),
                        "gap at ({x}, {y})"
                    );
                }
            }
        }
    }

    #[test]
    fn circle_outline_touches_axis_extremes() {
        let mut fb = buffer(20, 20);
        Rasterizer::new(&mut fb).draw_circle(Coordinate::new(9, 9), 5, Pixel::default());
        let cells = drawn(&fb);
        for extreme in [
            Coordinate::new(14, 9),
            Coordinate::new(4, 9),
            Coordinate::new(9, 14),
            Coordinate::new(9, 4),
        ] {
            assert!(cells.contains(&extreme));
        }
    }

    #[test]
    fn sprite_blit_scales_and_respects_transparency() {
        use congfx_core::Sprite;

        let mut sprite = Sprite::with_dimensions(Coordinate::new(2, 1));
        sprite.set_pixel(Coordinate::new(0, 0), Pixel::new(Colour::Red, Shade::Full));
        sprite.set_pixel(Coordinate::new(1, 0), Pixel::new(Colour::Red, Shade::Empty));

        let mut fb = buffer(10, 10);
        Rasterizer::new(&mut fb).draw_sprite(Coordinate::new(3, 3), &sprite, 2);

        // Opaque source pixel becomes a 2x2 block...
        for cell in [
            Coordinate::new(3, 3),
            Coordinate::new(4, 3),
            Coordinate::new(3, 4),
            Coordinate::new(4, 4),
        ] {
            assert_eq!(fb.get(cell).unwrap().glyph, '█');
        }
        // ...while the Empty-shade pixel leaves the destination alone.
        for cell in [
            Coordinate::new(5, 3),
            Coordinate::new(6, 3),
            Coordinate::new(5, 4),
            Coordinate::new(6, 4),
        ] {
            assert_eq!(fb.get(cell), Some(Cell::default()));
        }
    }

    #[test]
    fn zero_scale_sprite_draws_nothing() {
        use congfx_core::Sprite;

        let sprite = Sprite::with_dimensions(Coordinate::new(2, 2));
        let mut fb = buffer(8, 8);
        Rasterizer::new(&mut fb).draw_sprite(Coordinate::new(0, 0), &sprite, 0);
        assert!(drawn(&fb).is_empty());
    }
}
