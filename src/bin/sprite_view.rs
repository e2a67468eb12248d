//! Sprite viewer: load a persisted sprite asset and display it.
//!
//! Usage: `sprite-view <path> [scale]`. Arrow keys move the sprite,
//! Escape quits.

use anyhow::{bail, Context as _, Result};

use congfx::{
    ButtonState, Colour, Context, Coordinate, Engine, EngineConfig, Game, Key, Pixel, Shade,
    Sprite,
};

struct Viewer {
    sprite: Sprite,
    scale: i32,
    position: Coordinate<i32>,
}

impl Game for Viewer {
    fn initialise(&mut self, context: &mut Context<'_>) -> Result<()> {
        // Centre the sprite on first show.
        let extent = self.sprite.dimensions() * self.scale;
        self.position = (context.screen_dimensions() - extent) / 2;
        Ok(())
    }

    fn update(&mut self, context: &mut Context<'_>, _frame_time: f64) -> Result<()> {
        let input = context.input();
        if input.key(Key::Escape) == ButtonState::Pressed {
            context.stop();
            return Ok(());
        }

        let mut step = Coordinate::new(0, 0);
        for (key, delta) in [
            (Key::Left, Coordinate::new(-1, 0)),
            (Key::Right, Coordinate::new(1, 0)),
            (Key::Up, Coordinate::new(0, -1)),
            (Key::Down, Coordinate::new(0, 1)),
        ] {
            if input.key(key) != ButtonState::Released {
                step += delta;
            }
        }
        self.position += step;

        let label = format!(
            "{}x{} sprite at scale {}",
            self.sprite.width(),
            self.sprite.height(),
            self.scale
        );
        let position = self.position;
        let raster = context.raster();
        raster.clear_screen(Pixel::new(Colour::Black, Shade::Full));
        raster.draw_sprite(position, &self.sprite, self.scale);
        raster.draw_string(Coordinate::new(2, 1), &label, Colour::LightGrey);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: sprite-view <path> [scale]");
    };
    let scale: i32 = match args.next() {
        Some(raw) => raw.parse().context("scale must be a positive integer")?,
        None => 1,
    };
    if scale < 1 {
        bail!("scale must be at least 1");
    }

    let sprite = Sprite::from_file(&path).with_context(|| format!("loading sprite {path}"))?;

    let engine = Engine::new(EngineConfig {
        title: format!("sprite-view - {path}"),
        ..EngineConfig::default()
    });
    engine.run(&mut Viewer {
        sprite,
        scale,
        position: Coordinate::new(0, 0),
    })
}
