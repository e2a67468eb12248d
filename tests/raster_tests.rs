//! Integration tests for the rasterizer through the facade crate.
//!
//! These focus on whole-shape properties: connectivity of filled shapes,
//! the bounds gate, and the documented endpoint policies.

use std::collections::{HashSet, VecDeque};

use congfx::{Cell, Colour, Coordinate, FrameBuffer, Pixel, Rasterizer, Shade};

fn drawn_cells(fb: &FrameBuffer) -> HashSet<Coordinate<i32>> {
    let mut cells = HashSet::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let coordinate = Coordinate::new(x, y);
            if fb.get(coordinate) != Some(Cell::default()) {
                cells.insert(coordinate);
            }
        }
    }
    cells
}

/// Count of cells reachable from `start` through 4-neighbour steps within
/// the drawn set.
fn flood_fill(cells: &HashSet<Coordinate<i32>>, start: Coordinate<i32>) -> usize {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    if cells.contains(&start) {
        seen.insert(start);
        queue.push_back(start);
    }
    while let Some(current) = queue.pop_front() {
        for delta in [
            Coordinate::new(1, 0),
            Coordinate::new(-1, 0),
            Coordinate::new(0, 1),
            Coordinate::new(0, -1),
        ] {
            let next = current + delta;
            if cells.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

#[test]
fn draw_pixel_writes_glyph_and_attribute_at_row_major_index() {
    let mut fb = FrameBuffer::new(Coordinate::new(8, 6));
    Rasterizer::new(&mut fb).draw_pixel(
        Coordinate::new(3, 2),
        Pixel::with_background(Colour::Green, Colour::DarkBlue, Shade::Half),
    );
    let cell = fb.cells()[2 * 8 + 3];
    assert_eq!(cell.glyph, '▒');
    assert_eq!(cell.foreground, Colour::Green);
    assert_eq!(cell.background, Colour::DarkBlue);
}

#[test]
fn draw_pixel_outside_screen_never_mutates() {
    let mut fb = FrameBuffer::new(Coordinate::new(8, 6));
    let before = fb.clone();
    let mut raster = Rasterizer::new(&mut fb);
    for coordinate in [
        Coordinate::new(8, 0),
        Coordinate::new(0, 6),
        Coordinate::new(-1, 3),
        Coordinate::new(3, -1),
        Coordinate::new(i32::MAX, i32::MAX),
    ] {
        raster.draw_pixel(coordinate, Pixel::default());
    }
    assert_eq!(fb, before);
}

#[test]
fn horizontal_line_regression() {
    let mut fb = FrameBuffer::new(Coordinate::new(10, 5));
    Rasterizer::new(&mut fb).draw_line(
        Coordinate::new(0, 0),
        Coordinate::new(4, 0),
        Pixel::default(),
    );
    let cells = drawn_cells(&fb);
    // Endpoint-inclusive policy: 5 pixels, all on y = 0.
    assert_eq!(cells.len(), 5);
    for x in 0..=4 {
        assert!(cells.contains(&Coordinate::new(x, 0)));
    }
}

#[test]
fn rectangle_outline_vs_fill() {
    let mut outline = FrameBuffer::new(Coordinate::new(8, 8));
    Rasterizer::new(&mut outline).draw_rectangle(
        Coordinate::new(1, 1),
        Coordinate::new(3, 3),
        Pixel::default(),
    );
    let mut filled = FrameBuffer::new(Coordinate::new(8, 8));
    Rasterizer::new(&mut filled).draw_filled_rectangle(
        Coordinate::new(1, 1),
        Coordinate::new(3, 3),
        Pixel::default(),
    );

    let outline = drawn_cells(&outline);
    let filled = drawn_cells(&filled);
    assert_eq!(filled.len(), 9);
    assert_eq!(outline.len(), 8);
    assert!(!outline.contains(&Coordinate::new(2, 2)));
    assert!(filled.contains(&Coordinate::new(2, 2)));
    assert!(outline.is_subset(&filled));
}

#[test]
fn filled_circle_is_connected_with_no_gaps() {
    let centre = Coordinate::new(15, 15);
    for radius in [1, 2, 5, 9] {
        let mut fb = FrameBuffer::new(Coordinate::new(32, 32));
        Rasterizer::new(&mut fb).draw_filled_circle(centre, radius, Pixel::default());
        let cells = drawn_cells(&fb);
        assert!(!cells.is_empty());
        assert_eq!(
            flood_fill(&cells, centre),
            cells.len(),
            "disconnected disc at radius {radius}"
        );
    }
}

#[test]
fn filled_triangle_is_connected_with_no_gaps() {
    let triangles = [
        [Coordinate::new(2, 2), Coordinate::new(25, 6), Coordinate::new(9, 20)],
        [Coordinate::new(16, 2), Coordinate::new(2, 28), Coordinate::new(29, 28)],
        [Coordinate::new(3, 10), Coordinate::new(28, 10), Coordinate::new(15, 3)],
        // Right triangle with a vertical edge.
        [Coordinate::new(5, 5), Coordinate::new(5, 20), Coordinate::new(20, 20)],
    ];
    for (index, vertices) in triangles.into_iter().enumerate() {
        let mut fb = FrameBuffer::new(Coordinate::new(32, 32));
        Rasterizer::new(&mut fb).draw_filled_triangle(vertices, Pixel::default());
        let cells = drawn_cells(&fb);
        assert!(!cells.is_empty());
        let start = *cells.iter().next().unwrap();
        assert_eq!(
            flood_fill(&cells, start),
            cells.len(),
            "disconnected triangle #{index}"
        );
        for vertex in vertices {
            assert!(cells.contains(&vertex), "triangle #{index} missing {vertex:?}");
        }
    }
}

#[test]
fn filled_triangle_contains_its_outline() {
    let vertices = [
        Coordinate::new(4, 3),
        Coordinate::new(27, 8),
        Coordinate::new(11, 24),
    ];
    let mut outline_fb = FrameBuffer::new(Coordinate::new(32, 32));
    Rasterizer::new(&mut outline_fb).draw_triangle(vertices, Pixel::default());
    let mut filled_fb = FrameBuffer::new(Coordinate::new(32, 32));
    Rasterizer::new(&mut filled_fb).draw_filled_triangle(vertices, Pixel::default());

    let outline = drawn_cells(&outline_fb);
    let filled = drawn_cells(&filled_fb);
    assert!(outline.is_subset(&filled));
}

#[test]
fn scaled_sprite_blit_and_transparency() {
    use congfx::Sprite;

    let mut sprite = Sprite::with_dimensions(Coordinate::new(1, 1));
    sprite.set_pixel(Coordinate::new(0, 0), Pixel::new(Colour::Red, Shade::Full));

    let mut fb = FrameBuffer::new(Coordinate::new(10, 10));
    Rasterizer::new(&mut fb).draw_sprite(Coordinate::new(4, 4), &sprite, 2);
    let cells = drawn_cells(&fb);
    assert_eq!(cells.len(), 4);
    for coordinate in [
        Coordinate::new(4, 4),
        Coordinate::new(5, 4),
        Coordinate::new(4, 5),
        Coordinate::new(5, 5),
    ] {
        assert!(cells.contains(&coordinate));
    }

    // An Empty-shade sprite leaves the destination untouched entirely.
    let transparent = Sprite::with_dimensions(Coordinate::new(1, 1));
    let mut untouched = FrameBuffer::new(Coordinate::new(10, 10));
    let mut sprite_with_hole = transparent;
    sprite_with_hole.set_pixel(Coordinate::new(0, 0), Pixel::new(Colour::Red, Shade::Empty));
    Rasterizer::new(&mut untouched).draw_sprite(Coordinate::new(4, 4), &sprite_with_hole, 2);
    assert!(drawn_cells(&untouched).is_empty());
}
