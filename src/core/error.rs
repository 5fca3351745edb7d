//! Error types for the logging facility

pub type Result<T> = std::result::Result<T, FanlogError>;

#[derive(Debug, thiserror::Error)]
pub enum FanlogError {
    /// IO error from an appender
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Registration attempted after the facility was shut down
    #[error("logging facility already stopped")]
    FacilityStopped,

    /// Writer error (generic)
    #[error("writer error: {0}")]
    Writer(String),
}

impl FanlogError {
    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        FanlogError::Writer(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FanlogError::FacilityStopped;
        assert_eq!(err.to_string(), "logging facility already stopped");

        let err = FanlogError::writer("socket closed");
        assert_eq!(err.to_string(), "writer error: socket closed");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: FanlogError = io_err.into();
        assert!(matches!(err, FanlogError::Io(_)));
    }
}
