//! Engine core: the frame buffer and sprite assets.
//!
//! This crate owns the two mutable data structures of the engine. The
//! [`FrameBuffer`] is the off-screen grid of glyph/colour cells that the
//! rasterizer writes into and the terminal backend flushes. [`Sprite`] is a
//! grid of [`congfx_types::Pixel`] values with bounds-safe lookup and a
//! whitespace-delimited text persistence format.

pub mod fb;
pub mod sprite;

pub use congfx_types as types;

pub use fb::{Cell, FrameBuffer};
pub use sprite::{Sprite, SpriteError};
