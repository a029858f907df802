use shared::{ControlMessage, StunServer};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{AudioSpec, AudioStreamType, SessionState, StreamStatus};
use crate::error::GatewayError;

/// Port for the media engine doing the actual transport, decode and rendering.
///
/// All calls may come from arbitrary threads.
pub trait MediaEngine: Send + Sync {
    fn connect(&self) -> Result<(), StreamStatus>;

    fn disconnect(&self) -> Result<(), StreamStatus>;

    fn send_message(&self, message: &ControlMessage) -> Result<(), StreamStatus>;

    fn set_viewport_size(&self, width: u32, height: u32) -> Result<(), StreamStatus>;

    /// Render the next frame into the current surface, waiting at most `timeout`.
    /// Returns [`StreamStatus::RenderFrameTimeout`] when no frame arrived in time.
    fn render_frame(&self, timeout: Duration) -> Result<(), StreamStatus>;

    fn release(&self) -> Result<(), StreamStatus>;
}

/// Callbacks the engine delivers to this client
pub trait MediaEvents: Send + Sync {
    fn on_connected(&self);

    fn on_disconnected(&self);

    /// Decoded PCM in the negotiated output format
    fn on_audio_data_ready(&self, data: &[u8]);

    fn on_error(&self, status: StreamStatus);

    /// Out-of-band message sent by the streamed application
    fn on_message_received(&self, kind: &str, data: &[u8]);
}

/// Creates engines; the log sink replaces any process-wide log callback
pub trait MediaEngineFactory: Send + Sync {
    fn create(
        &self,
        config: &StreamConfig,
        events: Arc<dyn MediaEvents>,
        log: Arc<dyn LogSink>,
    ) -> Result<Arc<dyn MediaEngine>, StreamStatus>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Destination for engine log lines
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Window/GL surface the render loop draws into.
///
/// Acquired by the caller and moved onto the render thread; released on drop.
pub trait DisplaySurface: Send {
    /// Bind the surface to the calling thread
    fn make_current(&mut self) {}

    fn viewport_size(&self) -> (u32, u32);

    /// Reset viewport and clear before the engine draws
    fn begin_frame(&mut self, width: u32, height: u32);

    fn present(&mut self);
}

/// Opened audio output device pulling from the audio queue; closed on drop
pub trait AudioOutput: Send {
    fn resume(&mut self);

    fn pause(&mut self);
}

// Supporting types

/// Everything the engine needs to connect to an allocated session
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    pub signaling_url: String,
    pub use_insecure_tls: bool,
    pub stun_servers: Vec<StunServer>,
    pub audio_specs: HashMap<AudioStreamType, AudioSpec>,
    pub foreground_activity: Option<String>,
}

impl StreamConfig {
    pub fn from_session(state: &SessionState) -> Result<Self, GatewayError> {
        let session = state.active().ok_or(GatewayError::NotActive)?;
        Ok(Self {
            signaling_url: session.signaling_url.clone(),
            use_insecure_tls: session.settings.gateway.use_insecure_tls,
            stun_servers: session.stun_servers.clone(),
            audio_specs: HashMap::new(),
            foreground_activity: None,
        })
    }

    pub fn with_audio_spec(mut self, stream_type: AudioStreamType, spec: AudioSpec) -> Self {
        self.audio_specs.insert(stream_type, spec);
        self
    }

    pub fn with_foreground_activity(mut self, activity: impl Into<String>) -> Self {
        self.foreground_activity = Some(activity.into());
        self
    }

    pub fn audio_spec(&self, stream_type: AudioStreamType) -> Option<&AudioSpec> {
        self.audio_specs.get(&stream_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::tests::sample_settings;
    use crate::domain::ActiveSession;
    use shared::SessionResponse;

    #[test]
    fn test_stream_config_requires_active_session() {
        assert!(matches!(
            StreamConfig::from_session(&SessionState::Idle),
            Err(GatewayError::NotActive)
        ));
    }

    #[test]
    fn test_stream_config_from_session() {
        let mut settings = sample_settings();
        settings.gateway.use_insecure_tls = true;
        let response = SessionResponse {
            id: "abc".to_string(),
            url: "wss://gateway.example.com/signaling".to_string(),
            stun_servers: vec![StunServer {
                urls: vec!["stun:1.2.3.4".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let state = SessionState::Active(ActiveSession::from_response(settings, response).unwrap());

        let config = StreamConfig::from_session(&state)
            .unwrap()
            .with_audio_spec(AudioStreamType::Output, AudioSpec::default())
            .with_foreground_activity("com.example.game/.MainActivity");

        assert_eq!(config.signaling_url, "wss://gateway.example.com/signaling");
        assert!(config.use_insecure_tls);
        assert_eq!(config.stun_servers.len(), 1);
        assert_eq!(config.audio_spec(AudioStreamType::Output), Some(&AudioSpec::default()));
        assert!(config.audio_spec(AudioStreamType::Input).is_none());
        assert_eq!(config.foreground_activity.as_deref(), Some("com.example.game/.MainActivity"));
    }
}
