// Application layer - session negotiation and stream orchestration
// Depends on the domain layer and its own ports only

pub mod audio_queue;
pub mod ports;
pub mod render_loop;
pub mod session_manager;
pub mod streaming;

pub use audio_queue::{AudioBufferQueue, PopOutcome};
pub use render_loop::{spawn_render_loop, RenderConfig, RenderLoopHandle};
pub use session_manager::SessionManager;
pub use streaming::StreamController;
