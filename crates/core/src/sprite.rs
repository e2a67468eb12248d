//! Sprite assets: pixel grids with text-format persistence.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use thiserror::Error;

use congfx_types::{Colour, Coordinate, ParseError, Pixel, Shade};

/// Failure while loading or saving a sprite asset.
#[derive(Error, Debug)]
pub enum SpriteError {
    #[error("sprite file: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Format(#[from] ParseError),
    #[error("invalid sprite dimension token {0:?}")]
    Dimensions(String),
    #[error("truncated sprite data: expected {expected} tokens, found {found}")]
    Truncated { expected: usize, found: usize },
}

/// A 2D grid of [`Pixel`]s, row-major.
///
/// Lookup is total: any out-of-bounds coordinate yields the transparent
/// sentinel `(White, Empty)` instead of failing. The blit operation treats
/// that same sentinel shade as "do not draw".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sprite {
    dimensions: Coordinate<i32>,
    texture: Vec<Pixel>,
}

impl Sprite {
    /// An empty 0x0 sprite.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sprite of the given dimensions filled with the default pixel.
    pub fn with_dimensions(dimensions: Coordinate<i32>) -> Self {
        let len = (dimensions.x.max(0) as usize) * (dimensions.y.max(0) as usize);
        Self {
            dimensions,
            texture: vec![Pixel::default(); len],
        }
    }

    /// Load a sprite from a persisted asset file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpriteError> {
        let mut sprite = Self::new();
        sprite.load(path)?;
        Ok(sprite)
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

    /// Pixel at `coordinate`, or the transparent sentinel out of bounds.
    pub fn pixel(&self, coordinate: Coordinate<i32>) -> Pixel {
        if coordinate.in_bounds(self.dimensions) {
            self.texture[coordinate.to_index(self.dimensions.x)]
        } else {
            Pixel::new(Colour::White, Shade::Empty)
        }
    }

    /// Write a pixel; out-of-bounds coordinates are dropped.
    pub fn set_pixel(&mut self, coordinate: Coordinate<i32>, pixel: Pixel) {
        if coordinate.in_bounds(self.dimensions) {
            self.texture[coordinate.to_index(self.dimensions.x)] = pixel;
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SpriteError> {
        let mut file = File::create(path.as_ref())?;
        self.to_writer(&mut file)?;
        log::debug!(
            "saved {}x{} sprite to {}",
            self.dimensions.x,
            self.dimensions.y,
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SpriteError> {
        let mut file = File::open(path.as_ref())?;
        *self = Self::from_reader(&mut file)?;
        log::debug!(
            "loaded {}x{} sprite from {}",
            self.dimensions.x,
            self.dimensions.y,
            path.as_ref().display()
        );
        Ok(())
    }

    /// Serialize as `<width> <height>` followed by `width * height`
    /// `<colour> <shade>` pairs in row-major order.
    ///
    /// The background field is not persisted; the format stores one colour
    /// token per pixel, so round-tripping is exact for sprites whose
    /// background is the default.
    pub fn to_writer(&self, writer: &mut impl Write) -> Result<(), SpriteError> {
        write!(writer, "{} {}", self.dimensions.x, self.dimensions.y)?;
        for pixel in &self.texture {
            write!(writer, " {} {}", pixel.foreground.name(), pixel.shade.name())?;
        }
        Ok(())
    }

    /// Inverse of [`Sprite::to_writer`]. A short or malformed stream is a
    /// typed error, never a partially-defaulted texture.
    pub fn from_reader(reader: &mut impl Read) -> Result<Self, SpriteError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut iter = tokens.iter().copied();
        let width = parse_dimension(iter.next())?;
        let height = parse_dimension(iter.next())?;

        // Both dimensions validated non-negative by parse_dimension.
        let pixels = width as usize * height as usize;
        let expected = 2 + pixels * 2;
        if tokens.len() < expected {
            return Err(SpriteError::Truncated {
                expected,
                found: tokens.len(),
            });
        }

        let mut texture = Vec::with_capacity(pixels);
        for _ in 0..pixels {
            let colour = Colour::from_name(iter.next().unwrap_or_default())?;
            let shade = Shade::from_name(iter.next().unwrap_or_default())?;
            texture.push(Pixel::new(colour, shade));
        }

        Ok(Self {
            dimensions: Coordinate::new(width, height),
            texture,
        })
    }
}

fn parse_dimension(token: Option<&str>) -> Result<i32, SpriteError> {
    let token = token.ok_or_else(|| SpriteError::Dimensions("<missing>".to_string()))?;
    let value: i32 = token
        .parse()
        .map_err(|_| SpriteError::Dimensions(token.to_string()))?;
    // A negative dimension would break texture.len() == width * height.
    if value < 0 {
        return Err(SpriteError::Dimensions(token.to_string()));
    }
    Ok(value)
}
