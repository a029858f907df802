// Domain layer - session state, settings and media value objects
// No dependencies on other layers

pub mod audio;
pub mod session;
pub mod settings;
pub mod status;

pub use audio::{AudioFormat, AudioSpec, AudioStreamType};
pub use session::{ActiveSession, SessionId, SessionState};
pub use settings::{GatewaySettings, Settings};
pub use status::StreamStatus;
