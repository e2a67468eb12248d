//! TerminalSurface: flushes a framebuffer to a real terminal.
//!
//! Presentation is a single blocking flush per frame; the frame loop must
//! not mutate the buffer again until `present` returns.

use std::io::{self, Write};

use anyhow::{Context as _, Result};

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use congfx_core::{Cell, FrameBuffer};
use congfx_types::{Colour, Coordinate};

pub struct TerminalSurface {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self, title: &str) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf
            .queue(crossterm::event::EnableMouseCapture)?;
        self.buf.queue(crossterm::event::EnableFocusChange)?;
        self.buf.queue(terminal::SetTitle(title))?;
        self.flush_buf().context("failed to initialise terminal surface")?;
        log::info!("terminal surface ready: {title}");
        Ok(())
    }

    /// Restore the terminal to its original state.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(crossterm::event::DisableFocusChange)?;
        self.buf.queue(crossterm::event::DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Update the window title (the engine appends an FPS readout).
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::SetTitle(title))?;
        self.flush_buf()?;
        Ok(())
    }

    /// Force the next present to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Present a frame, swapping it into internal state.
    ///
    /// Callers should keep one `FrameBuffer` and pass it in every frame.
    /// The surface diffs against the previous frame and swaps buffers so
    /// the caller can reuse the old allocation without cloning. The call
    /// blocks until the frame has been flushed to the terminal.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        // No previous frame (first present, or after invalidate) forces a
        // full redraw.
        let needs_full = match &self.last {
            None => true,
            Some(prev) => prev.dimensions() != fb.dimensions(),
        };

        // Take previous out to avoid borrow conflicts (no cloning).
        let mut prev = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.dimensions()));

        self.buf.clear();
        if needs_full {
            encode_full_into(fb, &mut self.buf)?;
            prev.resize(fb.dimensions());
        } else {
            encode_diff_into(&prev, fb, &mut self.buf)?;
        }
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current_pair: Option<(Colour, Colour)> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for x in 0..fb.width() {
            let cell = fb.get(Coordinate::new(x, y)).unwrap_or_default();
            queue_cell(out, cell, &mut current_pair)?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs only) into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current_pair: Option<(Colour, Colour)> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x as u16, y as u16))?;
        for dx in 0..len {
            let cell = next.get(Coordinate::new(x + dx, y)).unwrap_or_default();
            queue_cell(out, cell, &mut current_pair)?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn queue_cell(
    out: &mut Vec<u8>,
    cell: Cell,
    current_pair: &mut Option<(Colour, Colour)>,
) -> Result<()> {
    let pair = (cell.foreground, cell.background);
    if *current_pair != Some(pair) {
        out.queue(SetForegroundColor(colour_to_term(cell.foreground)))?;
        out.queue(SetBackgroundColor(colour_to_term(cell.background)))?;
        *current_pair = Some(pair);
    }
    out.queue(Print(cell.glyph))?;
    Ok(())
}

/// Map the 16-colour console palette onto crossterm's named colours.
pub fn colour_to_term(colour: Colour) -> Color {
    match colour {
        Colour::Black => Color::Black,
        Colour::DarkBlue => Color::DarkBlue,
        Colour::DarkGreen => Color::DarkGreen,
        Colour::DarkCyan => Color::DarkCyan,
        Colour::DarkRed => Color::DarkRed,
        Colour::Purple => Color::DarkMagenta,
        Colour::Brown => Color::DarkYellow,
        Colour::LightGrey => Color::Grey,
        Colour::DarkGrey => Color::DarkGrey,
        Colour::Blue => Color::Blue,
        Colour::Green => Color::Green,
        Colour::Cyan => Color::Cyan,
        Colour::Red => Color::Red,
        Colour::Magenta => Color::Magenta,
        Colour::Yellow => Color::Yellow,
        Colour::White => Color::White,
    }
}

fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(i32, i32, i32) -> Result<()>,
) -> Result<()> {
    if prev.dimensions() != next.dimensions() {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let dims = next.dimensions();
    for y in 0..dims.y {
        let mut x = 0;
        while x < dims.x {
            if prev.get(Coordinate::new(x, y)) == next.get(Coordinate::new(x, y)) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < dims.x && prev.get(Coordinate::new(x, y)) != next.get(Coordinate::new(x, y))
            {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
