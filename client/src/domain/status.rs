use thiserror::Error;

/// Failure statuses reported by the media engine. Success is the `Ok` arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum StreamStatus {
    #[error("operation failed")]
    Failed,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("already initialized")]
    AlreadyInitialized,
    #[error("not enough memory")]
    NotEnoughMemory,
    #[error("timed out waiting for a frame")]
    RenderFrameTimeout,
    #[error("signaling failed")]
    SignalingFailed,
    #[error("aborted")]
    Aborted,
    #[error("stream not ready")]
    NotReady,
    #[error("not implemented")]
    NotImplemented,
    #[error("signaling timed out")]
    SignalingTimeout,
}

impl StreamStatus {
    pub fn code(self) -> i32 {
        match self {
            StreamStatus::Failed => -1000,
            StreamStatus::InvalidArgument => -1001,
            StreamStatus::AlreadyInitialized => -1002,
            StreamStatus::NotEnoughMemory => -1003,
            StreamStatus::RenderFrameTimeout => -1004,
            StreamStatus::SignalingFailed => -1005,
            StreamStatus::Aborted => -1006,
            StreamStatus::NotReady => -1007,
            StreamStatus::NotImplemented => -1008,
            StreamStatus::SignalingTimeout => -1009,
        }
    }

    /// Map an engine status code; `Ok(())` for 0, `Failed` for unknown codes
    pub fn from_code(code: i32) -> Result<(), StreamStatus> {
        match code {
            0 => Ok(()),
            -1001 => Err(StreamStatus::InvalidArgument),
            -1002 => Err(StreamStatus::AlreadyInitialized),
            -1003 => Err(StreamStatus::NotEnoughMemory),
            -1004 => Err(StreamStatus::RenderFrameTimeout),
            -1005 => Err(StreamStatus::SignalingFailed),
            -1006 => Err(StreamStatus::Aborted),
            -1007 => Err(StreamStatus::NotReady),
            -1008 => Err(StreamStatus::NotImplemented),
            -1009 => Err(StreamStatus::SignalingTimeout),
            _ => Err(StreamStatus::Failed),
        }
    }

    /// Signaling failures leave the stream unusable
    pub fn is_fatal(self) -> bool {
        matches!(self, StreamStatus::SignalingFailed | StreamStatus::SignalingTimeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        let all = [
            StreamStatus::Failed,
            StreamStatus::InvalidArgument,
            StreamStatus::AlreadyInitialized,
            StreamStatus::NotEnoughMemory,
            StreamStatus::RenderFrameTimeout,
            StreamStatus::SignalingFailed,
            StreamStatus::Aborted,
            StreamStatus::NotReady,
            StreamStatus::NotImplemented,
            StreamStatus::SignalingTimeout,
        ];
        for status in all {
            assert_eq!(StreamStatus::from_code(status.code()), Err(status));
        }
        assert_eq!(StreamStatus::from_code(0), Ok(()));
        assert_eq!(StreamStatus::from_code(42), Err(StreamStatus::Failed));
    }

    #[test]
    fn test_fatal_statuses() {
        assert!(StreamStatus::SignalingTimeout.is_fatal());
        assert!(StreamStatus::SignalingFailed.is_fatal());
        assert!(!StreamStatus::RenderFrameTimeout.is_fatal());
        assert!(!StreamStatus::NotReady.is_fatal());
    }
}
