use follicle_core::error::CoreError;
use follicle_core::models::prediction::{FailureKind, PredictionFailure, PredictionResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Cannot connect to backend server. Please ensure it's running. ({0})")]
    ConnectionUnavailable(String),

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("{message}")]
    RemoteRejected { status: u16, message: String },

    #[error("{message}")]
    RemoteMalformed { status: u16, message: String },

    /// Report rejected locally or unreadable; the service is not contacted.
    #[error(transparent)]
    Report(#[from] CoreError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PredictError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PredictError::ConnectionUnavailable(_) => FailureKind::ConnectionUnavailable,
            PredictError::Timeout => FailureKind::Timeout,
            PredictError::RemoteRejected { .. } => FailureKind::RemoteRejected,
            PredictError::RemoteMalformed { .. } => FailureKind::RemoteMalformed,
            PredictError::Report(e) if e.is_validation() => FailureKind::ValidationFailed,
            PredictError::Report(_) | PredictError::Unexpected(_) => FailureKind::Unexpected,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            PredictError::RemoteRejected { status, .. }
            | PredictError::RemoteMalformed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn into_result(self) -> PredictionResult {
        PredictionResult::Failure(PredictionFailure {
            kind: self.kind(),
            status_code: self.status_code(),
            error: self.to_string(),
        })
    }
}

impl From<ureq::Error> for PredictError {
    fn from(e: ureq::Error) -> Self {
        use std::io::ErrorKind;

        match &e {
            ureq::Error::Timeout(_) => PredictError::Timeout,
            ureq::Error::Io(io) if io.kind() == ErrorKind::TimedOut => PredictError::Timeout,
            ureq::Error::ConnectionFailed | ureq::Error::HostNotFound => {
                PredictError::ConnectionUnavailable(e.to_string())
            }
            ureq::Error::Io(io)
                if matches!(
                    io.kind(),
                    ErrorKind::ConnectionRefused
                        | ErrorKind::ConnectionReset
                        | ErrorKind::ConnectionAborted
                        | ErrorKind::NotConnected
                        | ErrorKind::AddrNotAvailable
                ) =>
            {
                PredictError::ConnectionUnavailable(e.to_string())
            }
            _ => PredictError::Unexpected(e.to_string()),
        }
    }
}
