use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::application::ports::{DisplaySurface, MediaEngine};
use crate::domain::StreamStatus;

pub const DEFAULT_FRAME_TIMEOUT: Duration = Duration::from_millis(100);

/// Shortest frame timeout the loop runs with; smaller values are raised to it
pub const MIN_FRAME_TIMEOUT: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Upper bound for a single render call, also the pacing of idle iterations
    pub frame_timeout: Duration,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.frame_timeout.is_zero() {
            return Err("Frame timeout must be positive");
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_timeout: DEFAULT_FRAME_TIMEOUT,
        }
    }
}

#[derive(Default)]
struct RenderStats {
    frames: AtomicU64,
    timeouts: AtomicU64,
    first_frame: OnceLock<Duration>,
}

/// Owner of a running render thread; stops and joins it on drop
pub struct RenderLoopHandle {
    cancel: CancellationToken,
    thread: Option<JoinHandle<()>>,
    stats: Arc<RenderStats>,
}

impl RenderLoopHandle {
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Ask the loop to exit after its current iteration and wait for it
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Render thread panicked");
            }
        }
    }

    /// Time from connection to the first rendered frame
    pub fn first_frame_latency(&self) -> Option<Duration> {
        self.stats.first_frame.get().copied()
    }

    pub fn rendered_frames(&self) -> u64 {
        self.stats.frames.load(Ordering::Relaxed)
    }

    pub fn frame_timeouts(&self) -> u64 {
        self.stats.timeouts.load(Ordering::Relaxed)
    }
}

impl Drop for RenderLoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start drawing engine frames into `surface` on a dedicated thread.
///
/// `connected_at` is the reference point for the first-frame latency.
pub fn spawn_render_loop(
    engine: Arc<dyn MediaEngine>,
    surface: Box<dyn DisplaySurface>,
    connected_at: Instant,
    config: RenderConfig,
) -> std::io::Result<RenderLoopHandle> {
    let config = RenderConfig {
        frame_timeout: config.frame_timeout.max(MIN_FRAME_TIMEOUT),
    };
    let cancel = CancellationToken::new();
    let stats = Arc::new(RenderStats::default());

    let thread = {
        let cancel = cancel.clone();
        let stats = stats.clone();
        thread::Builder::new()
            .name("render".to_string())
            .spawn(move || run(engine, surface, connected_at, config, cancel, stats))?
    };

    Ok(RenderLoopHandle {
        cancel,
        thread: Some(thread),
        stats,
    })
}

fn run(
    engine: Arc<dyn MediaEngine>,
    mut surface: Box<dyn DisplaySurface>,
    connected_at: Instant,
    config: RenderConfig,
    cancel: CancellationToken,
    stats: Arc<RenderStats>,
) {
    surface.make_current();
    debug!("Render loop started");

    while !cancel.is_cancelled() {
        let (width, height) = surface.viewport_size();
        if let Err(e) = engine.set_viewport_size(width, height) {
            warn!("Failed to set viewport size to {}x{}: {}", width, height, e);
        }
        surface.begin_frame(width, height);

        let requested_at = Instant::now();
        let result = engine.render_frame(config.frame_timeout);
        surface.present();

        match result {
            Ok(()) => {
                stats.frames.fetch_add(1, Ordering::Relaxed);
                if stats.first_frame.get().is_none() {
                    let latency = connected_at.elapsed();
                    if stats.first_frame.set(latency).is_ok() {
                        info!("First frame rendered {} ms after connecting", latency.as_millis());
                    }
                }
                continue;
            }
            Err(StreamStatus::RenderFrameTimeout) => {
                stats.timeouts.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => warn!("Failed to render frame: {}", e),
        }

        // No frame: keep the loop at one iteration per timeout
        let waited = requested_at.elapsed();
        if waited < config.frame_timeout {
            thread::sleep(config.frame_timeout - waited);
        }
    }

    debug!("Render loop stopped");
}
