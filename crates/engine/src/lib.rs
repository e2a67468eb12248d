//! Frame loop and engine lifecycle.
//!
//! The engine owns the framebuffer, the terminal surface, the input state
//! and the timing source, and drives the per-frame cycle:
//! timing -> input -> update -> blocking present. Games implement the
//! [`Game`] trait and draw through the [`Context`] handed to `update`.
//!
//! Shutdown is a blocking handshake, not a kill: an external party (or the
//! game itself) flips a stop flag that the loop observes once per
//! iteration; [`ShutdownHandle::wait`] then blocks until the loop has run
//! `close()` and acknowledged, so teardown never races a frame in flight.

pub mod timer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use congfx_core::FrameBuffer;
use congfx_input::InputState;
use congfx_raster::Rasterizer;
use congfx_term::TerminalSurface;
use congfx_types::Coordinate;

pub use timer::{frame_rate, Timer};

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub screen_dimensions: Coordinate<i32>,
    pub title: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen_dimensions: Coordinate::new(80, 40),
            title: "Console Graphics Engine".to_string(),
        }
    }
}

/// Game callbacks invoked by the frame loop.
///
/// `initialise` and `close` have do-nothing defaults; `update` runs once
/// per frame with the elapsed frame time in seconds.
pub trait Game {
    fn initialise(&mut self, _context: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, context: &mut Context<'_>, frame_time: f64) -> Result<()>;

    fn close(&mut self) {}
}

/// Per-frame view into the engine handed to [`Game`] callbacks.
pub struct Context<'a> {
    raster: Rasterizer<'a>,
    input: &'a InputState,
    stop: &'a AtomicBool,
    frame_rate: f64,
}

impl<'a> Context<'a> {
    /// Drawing API over this frame's buffer.
    pub fn raster(&mut self) -> &mut Rasterizer<'a> {
        &mut self.raster
    }

    /// Keyboard and mouse state sampled at the top of the frame.
    pub fn input(&self) -> &InputState {
        self.input
    }

    pub fn screen_dimensions(&self) -> Coordinate<i32> {
        self.raster.screen_dimensions()
    }

    pub fn screen_width(&self) -> i32 {
        self.screen_dimensions().x
    }

    pub fn screen_height(&self) -> i32 {
        self.screen_dimensions().y
    }

    /// Frames per second measured over the previous frame.
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Ask the loop to finish after this frame.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }
}

/// Requests and awaits engine shutdown from outside the frame loop.
///
/// `request` flips the stop flag; `wait` blocks until the loop has
/// acknowledged (game closed, terminal restored). This is the only
/// supported way to tear the engine down from another thread.
pub struct ShutdownHandle {
    stop: Arc<AtomicBool>,
    done: Receiver<()>,
}

impl ShutdownHandle {
    pub fn request(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Block until the frame loop has fully shut down.
    pub fn wait(self) {
        // A closed channel means the loop is already gone.
        let _ = self.done.recv();
    }

    /// Like [`ShutdownHandle::wait`] with an upper bound; returns false on
    /// timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.done.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

/// The engine context: owns the buffer, surface, input and clock.
pub struct Engine {
    config: EngineConfig,
    surface: TerminalSurface,
    buffer: FrameBuffer,
    input: InputState,
    stop: Arc<AtomicBool>,
    done_tx: Sender<()>,
    done_rx: Option<Receiver<()>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let (done_tx, done_rx) = mpsc::channel();
        Self {
            buffer: FrameBuffer::new(config.screen_dimensions),
            surface: TerminalSurface::new(),
            input: InputState::new(),
            stop: Arc::new(AtomicBool::new(false)),
            done_tx,
            done_rx: Some(done_rx),
            config,
        }
    }

    pub fn screen_dimensions(&self) -> Coordinate<i32> {
        self.config.screen_dimensions
    }

    /// Handle for requesting and awaiting shutdown from another thread.
    /// The completion side is single-consumer, so this yields a handle only
    /// once.
    pub fn shutdown_handle(&mut self) -> Option<ShutdownHandle> {
        self.done_rx.take().map(|done| ShutdownHandle {
            stop: Arc::clone(&self.stop),
            done,
        })
    }

    /// Run the frame loop to completion.
    ///
    /// Takes over the terminal for the duration; always restores it, then
    /// acknowledges shutdown to any waiting [`ShutdownHandle`].
    pub fn run(mut self, game: &mut dyn Game) -> Result<()> {
        self.surface.enter(&self.config.title)?;
        let result = self.run_loop(game);
        // Always restore the terminal, even on error.
        let exit_result = self.surface.exit();
        game.close();
        let _ = self.done_tx.send(());
        log::info!("engine shut down");
        result.and(exit_result)
    }

    fn run_loop(&mut self, game: &mut dyn Game) -> Result<()> {
        let mut timer = Timer::new();
        let mut clock_ms: u64 = 0;
        let mut rate = 0.0;

        timer.start();

        {
            let mut context = Context {
                raster: Rasterizer::new(&mut self.buffer),
                input: &self.input,
                stop: &self.stop,
                frame_rate: rate,
            };
            game.initialise(&mut context)?;
        }

        while !self.stop.load(Ordering::Acquire) {
            timer.stop();
            let frame_time = timer.elapsed();
            rate = frame_rate(frame_time);
            timer.restart();

            clock_ms += (frame_time * 1000.0) as u64;
            self.input.pump(clock_ms)?;
            if self.input.close_requested() {
                self.stop.store(true, Ordering::Release);
            }
            if self.input.take_resize().is_some() {
                // The logical screen keeps its configured size; a resized
                // terminal just needs a full repaint.
                self.surface.invalidate();
            }

            {
                let mut context = Context {
                    raster: Rasterizer::new(&mut self.buffer),
                    input: &self.input,
                    stop: &self.stop,
                    frame_rate: rate,
                };
                game.update(&mut context, frame_time)?;
            }

            self.surface
                .set_title(&format!("{} - FPS: {:.0}", self.config.title, rate))?;
            // Blocking present: the next frame's mutations must not begin
            // until the flush has returned.
            self.surface.present(&mut self.buffer)?;
        }

        Ok(())
    }
}
