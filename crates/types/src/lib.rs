//! Core types module - shared data structures for the graphics engine.
//!
//! This crate defines the fundamental value types used throughout the
//! engine: 2D coordinates, display colours and shades, and the `Pixel`
//! cell value. All types are pure data with no terminal dependencies,
//! making them usable in any context (rasterizer, renderer, tests).
//!
//! # Examples
//!
//! ```
//! use congfx_types::{Colour, Coordinate, Pixel, Shade};
//!
//! let dims = Coordinate::new(80, 40);
//! assert!(Coordinate::new(79, 39).in_bounds(dims));
//! assert!(!Coordinate::new(80, 0).in_bounds(dims));
//!
//! let pixel = Pixel::new(Colour::Cyan, Shade::Half);
//! assert_eq!(pixel.shade.glyph(), '▒');
//!
//! // Name tables round-trip through snake_case tokens.
//! assert_eq!(Colour::from_name("dark_blue").unwrap(), Colour::DarkBlue);
//! assert_eq!(Shade::ThreeQuarters.name(), "three_quarters");
//! ```

pub mod coordinate;
pub mod pixel;

pub use coordinate::Coordinate;
pub use pixel::{Colour, ParseError, Pixel, Shade};
