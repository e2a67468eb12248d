//! Input module (engine-facing).
//!
//! Maps crossterm key, mouse and focus events into per-frame tri-state
//! button queries: Released, Pressed (this frame) or Held. Terminals
//! without key-release events are handled with a release timeout, the same
//! technique terminal games use for DAS-style input.
//!
//! All state is forced to `Released` while the terminal lacks focus.

pub mod state;

pub use congfx_types as types;

pub use state::{ButtonState, InputError, InputState, Key, MouseButton};
