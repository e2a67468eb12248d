//! congfx (workspace facade crate).
//!
//! This package keeps a single `congfx::{types,core,raster,term,input,engine}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use congfx_core as core;
pub use congfx_engine as engine;
pub use congfx_input as input;
pub use congfx_raster as raster;
pub use congfx_term as term;
pub use congfx_types as types;

pub use congfx_core::{Cell, FrameBuffer, Sprite, SpriteError};
pub use congfx_engine::{Context, Engine, EngineConfig, Game, ShutdownHandle, Timer};
pub use congfx_input::{ButtonState, InputError, InputState, Key, MouseButton};
pub use congfx_raster::Rasterizer;
pub use congfx_term::TerminalSurface;
pub use congfx_types::{Colour, Coordinate, ParseError, Pixel, Shade};
