//! Screen: owns the terminal while the keypad is shown.
//!
//! Enters raw mode (plus alternate screen and mouse capture when
//! configured), starts the input and render threads, and undoes all of it
//! on drop so a panic or early return still leaves a usable shell.

use super::messages::{InputEvent, RenderCommand};
use super::{InputActor, RendererActor};
use crate::buffer::Buffer;
use crate::config::ScreenConfig;
use crate::error::Result;
use crate::layout::Rect;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// The terminal, its input thread and its render thread.
pub struct Screen {
    config: ScreenConfig,
    input_rx: Receiver<InputEvent>,
    render_tx: Sender<RenderCommand>,
    input_actor: Option<InputActor>,
    renderer_actor: Option<RendererActor>,
    width: u16,
    height: u16,
    frame_start: Instant,
    frame_duration: Duration,
    frame_count: u64,
}

impl Screen {
    /// Take over the terminal.
    pub fn open(config: ScreenConfig) -> Result<Self> {
        let (width, height) = terminal::size()?;

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let (render_tx, render_rx) = bounded::<RenderCommand>(16);

        terminal::enable_raw_mode()?;
        // From here on Drop restores the terminal, whatever fails next.
        let mut screen = Self {
            frame_duration: Duration::from_secs(1) / config.target_fps.max(1),
            config,
            input_rx,
            render_tx,
            input_actor: None,
            renderer_actor: None,
            width,
            height,
            frame_start: Instant::now(),
            frame_count: 0,
        };

        enter_modes(&mut io::stdout(), &screen.config)?;

        screen.input_actor = Some(InputActor::spawn(input_tx, screen.config.input_poll_timeout)?);
        screen.renderer_actor = Some(RendererActor::spawn(render_rx, width, height)?);

        tracing::info!(width, height, fps = screen.config.target_fps, "screen opened");
        Ok(screen)
    }

    /// Terminal size as a rectangle.
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Wait up to `timeout` for an input event.
    ///
    /// A closed input channel is reported as [`InputEvent::Shutdown`].
    pub fn wait_input(&self, timeout: Duration) -> Option<InputEvent> {
        match self.input_rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(InputEvent::Shutdown),
        }
    }

    /// Next queued input event, without waiting.
    pub fn poll_input(&self) -> Option<InputEvent> {
        self.input_rx.try_recv().ok()
    }

    /// Track a terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let _ = self.render_tx.send(RenderCommand::Resize { width, height });
    }

    /// Repaint the whole terminal with `frame`.
    pub fn redraw(&self, frame: &Buffer) {
        let _ = self.render_tx.send(RenderCommand::FullRedraw(Box::new(frame.clone())));
    }

    /// Show `frame`, diffing only `dirty` (everything when empty).
    pub fn present(&self, frame: &Buffer, dirty: Vec<Rect>) {
        let _ = self.render_tx.send(RenderCommand::Update {
            frame: Box::new(frame.clone()),
            dirty,
        });
    }

    /// Mark the start of a frame.
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Close a frame, sleeping to hold the configured frame rate.
    pub fn end_frame(&mut self) {
        self.frame_count += 1;
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_duration {
            std::thread::sleep(self.frame_duration - elapsed);
        }
    }

    /// Frames completed so far.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time budget of one frame.
    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        if let Some(actor) = self.renderer_actor.take() {
            let _ = self.render_tx.send(RenderCommand::Shutdown);
            actor.shutdown();
            actor.join();
        }

        leave_modes(&mut io::stdout(), &self.config);
        let _ = terminal::disable_raw_mode();
        tracing::info!(frames = self.frame_count, "screen closed");
    }
}

/// Switch to the alternate screen and mouse capture as configured, and
/// hide the cursor.
fn enter_modes(out: &mut impl Write, config: &ScreenConfig) -> io::Result<()> {
    if config.alternate_screen {
        execute!(out, EnterAlternateScreen)?;
    }
    if config.enable_mouse {
        execute!(out, EnableMouseCapture)?;
    }
    execute!(out, cursor::Hide)
}

/// Undo [`enter_modes`]. Every step is attempted even if one fails.
fn leave_modes(out: &mut impl Write, config: &ScreenConfig) {
    let _ = execute!(out, cursor::Show);
    if config.enable_mouse {
        let _ = execute!(out, DisableMouseCapture);
    }
    if config.alternate_screen {
        let _ = execute!(out, LeaveAlternateScreen);
    }
}
