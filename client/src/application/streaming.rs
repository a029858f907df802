use parking_lot::Mutex;
use shared::ControlMessage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::application::audio_queue::AudioBufferQueue;
use crate::application::ports::{
    AudioOutput, DisplaySurface, LogSink, MediaEngine, MediaEngineFactory, MediaEvents, StreamConfig,
};
use crate::application::render_loop::{spawn_render_loop, RenderConfig, RenderLoopHandle};
use crate::domain::StreamStatus;

/// Drives one media stream: reacts to engine events, owns the render loop
/// and feeds decoded audio into the playback queue.
///
/// Disconnection and fatal errors cancel [`StreamController::shutdown_token`];
/// the owner is expected to call [`StreamController::shutdown`] afterwards.
pub struct StreamController {
    engine: Mutex<Option<Arc<dyn MediaEngine>>>,
    surface: Mutex<Option<Box<dyn DisplaySurface>>>,
    audio_output: Mutex<Option<Box<dyn AudioOutput>>>,
    audio: Arc<AudioBufferQueue>,
    render_loop: Mutex<Option<RenderLoopHandle>>,
    render_config: RenderConfig,
    connected_at: Mutex<Instant>,
    shutdown: CancellationToken,
    released: AtomicBool,
}

impl StreamController {
    pub fn new(
        surface: Box<dyn DisplaySurface>,
        audio_output: Option<Box<dyn AudioOutput>>,
        audio: Arc<AudioBufferQueue>,
        render_config: RenderConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            engine: Mutex::new(None),
            surface: Mutex::new(Some(surface)),
            audio_output: Mutex::new(audio_output),
            audio,
            render_loop: Mutex::new(None),
            render_config,
            connected_at: Mutex::new(Instant::now()),
            shutdown: CancellationToken::new(),
            released: AtomicBool::new(false),
        })
    }

    /// Create the engine for `config` with this controller receiving its events
    pub fn attach(
        self: &Arc<Self>,
        factory: &dyn MediaEngineFactory,
        config: &StreamConfig,
        log: Arc<dyn LogSink>,
    ) -> Result<(), StreamStatus> {
        let mut slot = self.engine.lock();
        if slot.is_some() || self.released.load(Ordering::SeqCst) {
            return Err(StreamStatus::AlreadyInitialized);
        }

        let events: Arc<dyn MediaEvents> = self.clone();
        let engine = factory.create(config, events, log)?;
        *slot = Some(engine);
        debug!("Media engine created for {}", config.signaling_url);
        Ok(())
    }

    /// Start connecting; completion is reported through `on_connected`
    pub fn connect(&self) -> Result<(), StreamStatus> {
        let engine = self.engine()?;
        *self.connected_at.lock() = Instant::now();
        engine.connect()
    }

    /// Forward an input event; dropped silently while the stream is not ready
    pub fn send_message(&self, message: &ControlMessage) -> Result<(), StreamStatus> {
        match self.engine()?.send_message(message) {
            Err(StreamStatus::NotReady) => {
                debug!("Stream not ready, dropping control message {}", message.kind());
                Ok(())
            }
            other => other,
        }
    }

    /// Cancelled once the stream has ended or failed fatally
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn is_rendering(&self) -> bool {
        self.render_loop
            .lock()
            .as_ref()
            .is_some_and(RenderLoopHandle::is_running)
    }

    pub fn first_frame_latency(&self) -> Option<Duration> {
        self.render_loop
            .lock()
            .as_ref()
            .and_then(RenderLoopHandle::first_frame_latency)
    }

    /// Stop rendering, release the engine and close the audio device.
    ///
    /// Must not be called from inside an engine callback.
    pub fn shutdown(&self) -> Result<(), StreamStatus> {
        if self.released.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.shutdown.cancel();

        let render_loop = self.render_loop.lock().take();
        if let Some(mut render_loop) = render_loop {
            render_loop.stop();
        }

        let engine = self.engine.lock().take();
        let result = match engine {
            Some(engine) => engine.release(),
            None => Ok(()),
        };

        if let Some(mut output) = self.audio_output.lock().take() {
            output.pause();
        }
        self.audio.clear();

        info!("Stream shut down");
        result
    }

    fn engine(&self) -> Result<Arc<dyn MediaEngine>, StreamStatus> {
        self.engine.lock().clone().ok_or(StreamStatus::NotReady)
    }
}

impl MediaEvents for StreamController {
    fn on_connected(&self) {
        let connected_at = *self.connected_at.lock();
        info!("Stream connected after {} ms", connected_at.elapsed().as_millis());

        let Ok(engine) = self.engine() else {
            warn!("Connected event without an engine");
            return;
        };

        {
            let mut render_loop = self.render_loop.lock();
            if render_loop.is_some() || self.released.load(Ordering::SeqCst) {
                return;
            }
            let Some(surface) = self.surface.lock().take() else {
                return;
            };
            match spawn_render_loop(engine, surface, connected_at, self.render_config) {
                Ok(handle) => *render_loop = Some(handle),
                Err(e) => {
                    error!("Failed to start render thread: {}", e);
                    self.shutdown.cancel();
                    return;
                }
            }
        }

        if let Some(output) = self.audio_output.lock().as_mut() {
            output.resume();
        }
    }

    fn on_disconnected(&self) {
        info!("Stream disconnected");
        self.shutdown.cancel();
    }

    fn on_audio_data_ready(&self, data: &[u8]) {
        self.audio.append(data);
    }

    fn on_error(&self, status: StreamStatus) {
        error!("Stream error: {} ({})", status, status.code());
        if status.is_fatal() {
            self.shutdown.cancel();
        }
    }

    fn on_message_received(&self, kind: &str, data: &[u8]) {
        info!("Received message of type {} ({} bytes)", kind, data.len());
    }
}
