//! Tri-state button tracking fed from crossterm events.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use thiserror::Error;

use congfx_types::Coordinate;

/// Caller asked about a key outside the supported set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid key {0:?} requested; character keys are A-Z and 0-9")]
    UnsupportedKey(char),
}

/// Per-frame button state.
///
/// `Pressed` holds for exactly the frame the press was first observed;
/// subsequent frames report `Held` until release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
    Held,
}

/// Named non-character keys the engine exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Insert,
    Delete,
    Backspace,
    Tab,
    Enter,
    Space,
    Left,
    Up,
    Right,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ButtonId {
    Named(Key),
    Char(char),
    Mouse(MouseButton),
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    state: ButtonState,
    last_event_ms: u64,
}

// Terminals often lack key-release events; without a timeout a single tap
// would report Held forever.
const KEY_RELEASE_TIMEOUT_MS: u64 = 150;

// Cap on events drained per frame so a flood cannot stall the loop.
const MAX_EVENTS_PER_FRAME: usize = 64;

/// Snapshot of keyboard and mouse state, updated once per frame.
#[derive(Debug, Clone)]
pub struct InputState {
    buttons: HashMap<ButtonId, Slot>,
    mouse_position: Coordinate<i32>,
    focused: bool,
    close_requested: bool,
    resized: Option<Coordinate<i32>>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            buttons: HashMap::new(),
            mouse_position: Coordinate::new(0, 0),
            focused: true,
            close_requested: false,
            resized: None,
        }
    }

    /// Drain pending terminal events and advance per-frame state.
    ///
    /// Call exactly once per frame with the loop's running clock.
    pub fn pump(&mut self, now_ms: u64) -> io::Result<()> {
        self.advance(now_ms);

        let mut events: ArrayVec<Event, MAX_EVENTS_PER_FRAME> = ArrayVec::new();
        while !events.is_full() && event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }
        for ev in &events {
            self.apply_event(ev, now_ms);
        }
        Ok(())
    }

    /// Frame transition: Pressed becomes Held, stale key holds time out.
    ///
    /// Mouse buttons are exempt from the timeout; terminals deliver a real
    /// Up event for those.
    pub fn advance(&mut self, now_ms: u64) {
        for (id, slot) in self.buttons.iter_mut() {
            match slot.state {
                ButtonState::Pressed => slot.state = ButtonState::Held,
                ButtonState::Held
                    if !matches!(id, ButtonId::Mouse(_))
                        && now_ms.saturating_sub(slot.last_event_ms)
                            > KEY_RELEASE_TIMEOUT_MS =>
                {
                    slot.state = ButtonState::Released;
                }
                _ => {}
            }
        }
    }

    /// Fold a single terminal event into the state. Public for tests and
    /// for embedders that own their own event loop.
    pub fn apply_event(&mut self, event: &Event, now_ms: u64) {
        match event {
            Event::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    log::debug!("close requested via ctrl-c");
                    self.close_requested = true;
                    return;
                }
                let Some(id) = button_for_key_code(key.code) else {
                    return;
                };
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => self.press(id, now_ms),
                    KeyEventKind::Release => self.release(id),
                }
            }
            Event::Mouse(mouse) => {
                match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        self.mouse_position =
                            Coordinate::new(mouse.column as i32, mouse.row as i32);
                    }
                    MouseEventKind::Down(button) => {
                        if let Some(button) = mouse_button_for(button) {
                            self.press(ButtonId::Mouse(button), now_ms);
                        }
                    }
                    MouseEventKind::Up(button) => {
                        if let Some(button) = mouse_button_for(button) {
                            self.release(ButtonId::Mouse(button));
                        }
                    }
                    _ => {}
                }
                if let MouseEventKind::Down(_) | MouseEventKind::Up(_) = mouse.kind {
                    self.mouse_position = Coordinate::new(mouse.column as i32, mouse.row as i32);
                }
            }
            Event::FocusGained => {
                self.focused = true;
            }
            Event::FocusLost => {
                // Everything reads Released while unfocused; drop holds so
                // nothing "sticks" across the focus gap.
                self.focused = false;
                self.buttons.clear();
            }
            Event::Resize(w, h) => {
                self.resized = Some(Coordinate::new(*w as i32, *h as i32));
            }
            _ => {}
        }
    }

    /// Tri-state query for a named key.
    pub fn key(&self, key: Key) -> ButtonState {
        self.query(ButtonId::Named(key))
    }

    /// Tri-state query for a character key. Only `A`-`Z` and `0`-`9` are
    /// supported; lowercase letters are normalized to uppercase rather
    /// than rejected, so `key_char('a')` and `key_char('A')` read the
    /// same slot. Anything else is `InputError::UnsupportedKey`.
    pub fn key_char(&self, key: char) -> Result<ButtonState, InputError> {
        let key = key.to_ascii_uppercase();
        if key.is_ascii_uppercase() || key.is_ascii_digit() {
            Ok(self.query(ButtonId::Char(key)))
        } else {
            Err(InputError::UnsupportedKey(key))
        }
    }

    pub fn mouse_button(&self, button: MouseButton) -> ButtonState {
        self.query(ButtonId::Mouse(button))
    }

    /// Last observed pointer location, in cell coordinates.
    pub fn mouse_position(&self) -> Coordinate<i32> {
        self.mouse_position
    }

    pub fn mouse_x(&self) -> i32 {
        self.mouse_position.x
    }

    pub fn mouse_y(&self) -> i32 {
        self.mouse_position.y
    }

    /// Whether the terminal currently has input focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// An OS-level close request (Ctrl+C) was observed.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// New terminal dimensions if a resize arrived since the last call.
    pub fn take_resize(&mut self) -> Option<Coordinate<i32>> {
        self.resized.take()
    }

    fn query(&self, id: ButtonId) -> ButtonState {
        if !self.focused {
            return ButtonState::Released;
        }
        self.buttons.get(&id).map(|s| s.state).unwrap_or_default()
    }

    fn press(&mut self, id: ButtonId, now_ms: u64) {
        let slot = self.buttons.entry(id).or_insert(Slot {
            state: ButtonState::Released,
            last_event_ms: now_ms,
        });
        slot.last_event_ms = now_ms;
        if slot.state == ButtonState::Released {
            slot.state = ButtonState::Pressed;
        }
    }

    fn release(&mut self, id: ButtonId) {
        if let Some(slot) = self.buttons.get_mut(&id) {
            slot.state = ButtonState::Released;
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

fn button_for_key_code(code: KeyCode) -> Option<ButtonId> {
    Some(match code {
        KeyCode::Char(' ') => ButtonId::Named(Key::Space),
        KeyCode::Char(c) => {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_uppercase() || c.is_ascii_digit() {
                ButtonId::Char(c)
            } else {
                return None;
            }
        }
        KeyCode::Esc => ButtonId::Named(Key::Escape),
        KeyCode::F(1) => ButtonId::Named(Key::F1),
        KeyCode::F(2) => ButtonId::Named(Key::F2),
        KeyCode::F(3) => ButtonId::Named(Key::F3),
        KeyCode::F(4) => ButtonId::Named(Key::F4),
        KeyCode::F(5) => ButtonId::Named(Key::F5),
        KeyCode::F(6) => ButtonId::Named(Key::F6),
        KeyCode::F(7) => ButtonId::Named(Key::F7),
        KeyCode::F(8) => ButtonId::Named(Key::F8),
        KeyCode::F(9) => ButtonId::Named(Key::F9),
        KeyCode::F(10) => ButtonId::Named(Key::F10),
        KeyCode::F(11) => ButtonId::Named(Key::F11),
        KeyCode::F(12) => ButtonId::Named(Key::F12),
        KeyCode::Insert => ButtonId::Named(Key::Insert),
        KeyCode::Delete => ButtonId::Named(Key::Delete),
        KeyCode::Backspace => ButtonId::Named(Key::Backspace),
        KeyCode::Tab => ButtonId::Named(Key::Tab),
        KeyCode::Enter => ButtonId::Named(Key::Enter),
        KeyCode::Left => ButtonId::Named(Key::Left),
        KeyCode::Up => ButtonId::Named(Key::Up),
        KeyCode::Right => ButtonId::Named(Key::Right),
        KeyCode::Down => ButtonId::Named(Key::Down),
        KeyCode::Home => ButtonId::Named(Key::Home),
        KeyCode::End => ButtonId::Named(Key::End),
        KeyCode::PageUp => ButtonId::Named(Key::PageUp),
        KeyCode::PageDown => ButtonId::Named(Key::PageDown),
        _ => return None,
    })
}

fn mouse_button_for(button: event::MouseButton) -> Option<MouseButton> {
    match button {
        event::MouseButton::Left => Some(MouseButton::Left),
        event::MouseButton::Right => Some(MouseButton::Right),
        event::MouseButton::Middle => Some(MouseButton::Middle),
    }
}
