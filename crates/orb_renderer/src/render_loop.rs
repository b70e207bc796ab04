//! Background render loop.
//!
//! Re-renders the scene continuously on a dedicated thread until asked to
//! stop. Displays read completed frames through a [`FrameReader`] at their own
//! cadence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::{FrameReader, Renderer};

/// Errors from the render loop.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("render thread panicked")]
    WorkerPanicked,
}

/// Render loop configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopConfig {
    /// Upper bound on frames per second. `None` renders as fast as possible.
    pub max_fps: Option<f64>,
}

impl LoopConfig {
    /// Shortest time a frame may take, if pacing is enabled.
    pub fn min_frame_time(&self) -> Option<Duration> {
        let fps = self.max_fps?;
        // Rates so low that one frame outlasts `Duration` fail the conversion
        match Duration::try_from_secs_f64(1.0 / fps) {
            Ok(frame_time) if fps.is_finite() && fps > 0.0 => Some(frame_time),
            _ => {
                log::warn!("Ignoring invalid frame rate limit {}", fps);
                None
            }
        }
    }
}

/// A renderer running on its own thread.
pub struct RenderLoop {
    handle: Option<JoinHandle<Renderer>>,
    shutdown: Arc<AtomicBool>,
    reader: FrameReader,
}

impl RenderLoop {
    /// Move `renderer` onto a new thread and start rendering.
    pub fn spawn(renderer: Renderer, config: LoopConfig) -> Result<Self, RenderError> {
        let reader = renderer.reader();
        let shutdown = Arc::new(AtomicBool::new(false));
        let min_frame_time = config.min_frame_time();

        let flag = Arc::clone(&shutdown);
        let handle = thread::Builder::new()
            .name("orb-render".into())
            .spawn(move || run(renderer, &flag, min_frame_time))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            reader,
        })
    }

    /// A read handle on the published frames.
    pub fn reader(&self) -> FrameReader {
        self.reader.clone()
    }

    /// Whether the render thread is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop after the frame in progress and hand back the renderer.
    pub fn stop(mut self) -> Result<Renderer, RenderError> {
        match self.handle.take() {
            Some(handle) => join(handle, &self.shutdown),
            None => Err(RenderError::WorkerPanicked),
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = join(handle, &self.shutdown) {
                log::error!("Render loop shut down uncleanly: {}", err);
            }
        }
    }
}

fn join(handle: JoinHandle<Renderer>, shutdown: &AtomicBool) -> Result<Renderer, RenderError> {
    shutdown.store(true, Ordering::Release);
    // Wake the thread if it is waiting out a paced frame
    handle.thread().unpark();
    handle.join().map_err(|_| RenderError::WorkerPanicked)
}

fn run(
    mut renderer: Renderer,
    shutdown: &AtomicBool,
    min_frame_time: Option<Duration>,
) -> Renderer {
    log::info!(
        "Render loop started ({})",
        match min_frame_time {
            Some(frame_time) => format!("min frame time {:?}", frame_time),
            None => "unpaced".to_string(),
        }
    );
    let started = Instant::now();
    let first_frame = renderer.frame_count();

    while !shutdown.load(Ordering::Acquire) {
        let frame_start = Instant::now();
        renderer.update_framebuffer();

        if let Some(frame_time) = min_frame_time {
            let deadline = frame_start + frame_time;
            // park_timeout can return early, so re-check until the deadline
            loop {
                if shutdown.load(Ordering::Acquire) {
                    break;
                }
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                thread::park_timeout(deadline - now);
            }
        }
    }

    let frames = renderer.frame_count() - first_frame;
    let elapsed = started.elapsed();
    log::info!(
        "Render loop stopped after {} frames in {:.2?} ({:.1} fps)",
        frames,
        elapsed,
        frames as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    renderer
}
