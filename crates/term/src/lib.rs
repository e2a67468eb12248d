//! Terminal surface adapter.
//!
//! Flushes a [`congfx_core::FrameBuffer`] to a real terminal through
//! crossterm. The adapter owns the terminal lifecycle (raw mode, alternate
//! screen, cursor visibility) and presents frames with either a full redraw
//! or a changed-run diff against the previous frame.

pub mod renderer;

pub use congfx_core as core;
pub use congfx_types as types;

pub use renderer::{encode_diff_into, encode_full_into, TerminalSurface};
