//! Client core for streaming remote applications: negotiates sessions with
//! the gateway and paces audio and video between a media engine and the
//! local display and audio device.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::GatewayError;
