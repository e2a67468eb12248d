//! Demo runner (default binary).
//!
//! Exercises the rasterizer: a luminance-ramp backdrop, bouncing filled
//! circle, spinning triangle, sprite blits under the mouse cursor and an
//! FPS readout. Escape or Ctrl+C quits.

use anyhow::Result;

use congfx::{
    ButtonState, Colour, Context, Coordinate, Engine, EngineConfig, Game, Key, MouseButton,
    Pixel, Shade, Sprite,
};

struct Demo {
    ball: Coordinate<f64>,
    velocity: Coordinate<f64>,
    angle: f64,
    brush: Sprite,
    stamps: Vec<Coordinate<i32>>,
}

impl Demo {
    fn new() -> Self {
        Self {
            ball: Coordinate::new(20.0, 12.0),
            velocity: Coordinate::new(14.0, 9.0),
            angle: 0.0,
            brush: build_brush(),
            stamps: Vec::new(),
        }
    }
}

/// A 3x3 diamond with transparent corners.
fn build_brush() -> Sprite {
    let mut sprite = Sprite::with_dimensions(Coordinate::new(3, 3));
    for coord in [
        Coordinate::new(1, 0),
        Coordinate::new(0, 1),
        Coordinate::new(1, 1),
        Coordinate::new(2, 1),
        Coordinate::new(1, 2),
    ] {
        sprite.set_pixel(coord, Pixel::new(Colour::Yellow, Shade::Full));
    }
    for coord in [
        Coordinate::new(0, 0),
        Coordinate::new(2, 0),
        Coordinate::new(0, 2),
        Coordinate::new(2, 2),
    ] {
        sprite.set_pixel(coord, Pixel::new(Colour::White, Shade::Empty));
    }
    sprite
}

impl Game for Demo {
    fn update(&mut self, context: &mut Context<'_>, frame_time: f64) -> Result<()> {
        if context.input().key(Key::Escape) == ButtonState::Pressed {
            context.stop();
            return Ok(());
        }
        if context.input().mouse_button(MouseButton::Left) == ButtonState::Pressed {
            self.stamps.push(context.input().mouse_position());
        }

        let dims = context.screen_dimensions();
        let bounds = dims.as_f64();

        // Integrate and bounce off the screen edges.
        self.ball += self.velocity * frame_time;
        if self.ball.x < 3.0 || self.ball.x > bounds.x - 4.0 {
            self.velocity.x = -self.velocity.x;
            self.ball.x = self.ball.x.clamp(3.0, bounds.x - 4.0);
        }
        if self.ball.y < 3.0 || self.ball.y > bounds.y - 4.0 {
            self.velocity.y = -self.velocity.y;
            self.ball.y = self.ball.y.clamp(3.0, bounds.y - 4.0);
        }
        self.angle += frame_time * 1.8;

        let frame_rate = context.frame_rate();
        let mouse = context.input().mouse_position();
        let raster = context.raster();

        raster.clear_screen(Pixel::new(Colour::Black, Shade::Full));

        // Luminance ramp backdrop along the bottom rows.
        for x in 0..dims.x {
            let luminance = x as f64 / dims.x as f64;
            let pixel = Pixel::from_luminance(luminance);
            raster.draw_pixel(Coordinate::new(x, dims.y - 1), pixel);
            raster.draw_pixel(Coordinate::new(x, dims.y - 2), pixel);
        }

        // Screen border.
        raster.draw_rectangle(
            Coordinate::new(0, 0),
            Coordinate::new(dims.x - 1, dims.y - 3),
            Pixel::new(Colour::DarkGrey, Shade::Half),
        );

        // Spinning filled triangle around the screen centre.
        let centre = (dims / 2).as_f64();
        let vertices = [0.0, 2.1, 4.2].map(|offset: f64| {
            let a = self.angle + offset;
            (centre + Coordinate::new(a.cos() * 10.0, a.sin() * 6.0)).truncate()
        });
        raster.draw_filled_triangle(vertices, Pixel::new(Colour::DarkCyan, Shade::Full));
        raster.draw_triangle(vertices, Pixel::new(Colour::Cyan, Shade::Full));

        // Bouncing ball.
        let ball = self.ball.truncate();
        raster.draw_filled_circle(ball, 3, Pixel::new(Colour::Red, Shade::Full));
        raster.draw_circle(ball, 3, Pixel::new(Colour::Yellow, Shade::ThreeQuarters));

        // Sprite stamps left by mouse clicks, plus one under the cursor.
        for stamp in &self.stamps {
            raster.draw_sprite(*stamp, &self.brush, 1);
        }
        raster.draw_sprite(mouse, &self.brush, 2);

        raster.draw_string(
            Coordinate::new(2, 1),
            &format!("congfx demo  {frame_rate:>5.0} fps  esc to quit"),
            Colour::White,
        );

        Ok(())
    }

    fn close(&mut self) {
        log::info!("demo closed");
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let engine = Engine::new(EngineConfig {
        screen_dimensions: Coordinate::new(80, 40),
        title: "congfx demo".to_string(),
    });
    engine.run(&mut Demo::new())
}
