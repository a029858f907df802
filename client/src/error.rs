use shared::ProtocolError;
use thiserror::Error;

/// Failures of gateway negotiation, returned to the immediate caller
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),

    #[error("a session is already active")]
    AlreadyActive,

    #[error("no active session")]
    NotActive,

    #[error("invalid request header `{0}`")]
    InvalidHeader(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("gateway response body is not UTF-8: {0}")]
    InvalidBody(#[source] std::string::FromUtf8Error),

    #[error("gateway returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("protocol failure: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("gateway response is missing `{0}`")]
    MissingField(&'static str),
}
