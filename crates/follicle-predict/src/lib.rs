//! follicle-predict
//!
//! Synchronous client for the remote hair-fall prediction service:
//! liveness probe, multipart prediction request, and defensive parsing of
//! the response envelope.

pub mod client;
pub mod envelope;
pub mod error;
pub mod multipart;

use follicle_core::models::prediction::PredictionResult;
use follicle_core::models::report::UploadedReportReference;

pub use client::{ClientConfig, PredictionClient};

/// Outcome of a liveness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    /// Not reachable; `reason` is kept for diagnostics only.
    Disconnected { reason: String },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

/// The prediction backend as seen by a session.
///
/// Implementations never fail: every problem is reported inside the
/// returned [`PredictionResult`].
pub trait PredictionService {
    fn check_connection(&self) -> ConnectionStatus;

    /// Send the flattened questionnaire fields and, optionally, the report.
    fn predict(
        &self,
        fields: &[(String, String)],
        report: Option<&mut UploadedReportReference>,
    ) -> PredictionResult;
}
