//! Renderer Actor: dedicated thread for writing frames to the terminal.
//!
//! Owns the double buffer. Each frame received is diffed against what is
//! on screen and the resulting bytes are flushed with a single write.

use super::messages::RenderCommand;
use crate::buffer::diff::{render_diff, render_full, DiffState};
use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::layout::Rect;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Render statistics, logged when the thread stops.
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Frames written.
    pub frames: u64,
    /// Cells changed across all diffed frames.
    pub cells_changed: u64,
    /// Bytes written to the terminal.
    pub bytes_written: u64,
    /// Smoothed render time in microseconds.
    pub avg_render_us: u64,
}

/// Double-buffered frame writer.
///
/// Generic over the output so frames can be rendered into memory.
pub struct Renderer<W: Write> {
    current: Buffer,
    diff_state: DiffState,
    output: Vec<u8>,
    out: W,
    stats: RenderStats,
    needs_full_redraw: bool,
}

impl<W: Write> Renderer<W> {
    /// A renderer whose first frame is painted in full.
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            current: Buffer::new(width, height),
            diff_state: DiffState::new(),
            output: Vec::with_capacity(16 * 1024),
            out,
            stats: RenderStats::default(),
            needs_full_redraw: true,
        }
    }

    /// Statistics so far.
    pub const fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// The writer frames go to.
    pub const fn writer(&self) -> &W {
        &self.out
    }

    /// Make the next frame a full repaint.
    pub const fn mark_full_dirty(&mut self) {
        self.needs_full_redraw = true;
    }

    /// Resize the visible buffer; the next frame is painted in full.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.current.resize(width, height);
        self.mark_full_dirty();
    }

    /// Write `next` to the terminal.
    pub fn render(&mut self, next: &Buffer, dirty: &[Rect]) -> io::Result<()> {
        let start = Instant::now();
        self.output.clear();

        if next.width() != self.current.width() || next.height() != self.current.height() {
            self.resize(next.width(), next.height());
        }

        if self.needs_full_redraw {
            render_full(next, &mut self.output);
            self.needs_full_redraw = false;
            self.diff_state.reset();
        } else {
            let result = render_diff(&self.current, next, dirty, &mut self.output, &mut self.diff_state);
            self.stats.cells_changed += result.cells_changed as u64;
        }

        if !self.output.is_empty() {
            self.out.write_all(&self.output)?;
            self.out.flush()?;
        }
        self.current.copy_from(next);

        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.frames += 1;
        self.stats.bytes_written += self.output.len() as u64;
        self.stats.avg_render_us = if self.stats.avg_render_us == 0 {
            elapsed
        } else {
            (self.stats.avg_render_us * 15 + elapsed) / 16
        };
        Ok(())
    }
}

/// Renderer actor that handles terminal output.
pub struct RendererActor {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl RendererActor {
    /// Spawn the render thread writing to stdout.
    pub fn spawn(receiver: Receiver<RenderCommand>, width: u16, height: u16) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name(String::from("calci-render"))
            .spawn(move || {
                let mut renderer = Renderer::new(io::stdout(), width, height);
                if let Err(e) = run_loop(&mut renderer, &receiver, &flag) {
                    tracing::error!(error = %e, "render thread failed");
                }
                tracing::debug!(stats = ?renderer.stats(), "render thread stopped");
            })
            .map_err(|source| Error::ThreadSpawn {
                name: "render",
                source,
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the render thread to stop.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the render thread to finish.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Apply render commands until shutdown.
pub fn run_loop<W: Write>(
    renderer: &mut Renderer<W>,
    receiver: &Receiver<RenderCommand>,
    shutdown: &AtomicBool,
) -> io::Result<()> {
    while !shutdown.load(Ordering::Relaxed) {
        let command = match receiver.recv_timeout(Duration::from_millis(16)) {
            Ok(command) => command,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        match command {
            RenderCommand::FullRedraw(frame) => {
                renderer.mark_full_dirty();
                renderer.render(&frame, &[])?;
            }
            RenderCommand::Update { frame, dirty } => renderer.render(&frame, &dirty)?,
            RenderCommand::Resize { width, height } => renderer.resize(width, height),
            RenderCommand::Shutdown => break,
        }
    }
    Ok(())
}
