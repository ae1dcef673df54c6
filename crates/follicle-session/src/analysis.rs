use tracing::{info, warn};

use follicle_core::models::prediction::PredictionResult;
use follicle_predict::PredictionService;

use crate::error::SessionError;
use crate::store::SessionStore;

/// Run one analysis for the session and record its outcome.
///
/// Refuses without contacting the service when the session is not ready.
/// A failed call is still recorded, so the session moves to `Analyzed`
/// either way and the user can retry without re-entering answers.
pub fn run_analysis<'s>(
    session: &'s mut SessionStore,
    service: &dyn PredictionService,
) -> Result<&'s PredictionResult, SessionError> {
    if !session.is_ready_for_analysis() {
        warn!(session_id = %session.id(), "analysis requested before session was ready");
        return Err(SessionError::NotReady);
    }

    let session_id = session.id();
    let (fields, report) = session.request_parts();
    info!(
        %session_id,
        field_count = fields.len(),
        has_report = report.is_some(),
        "running analysis"
    );

    let result = service.predict(&fields, report);
    match &result {
        PredictionResult::Success(p) => {
            info!(%session_id, stage = p.stage.value(), "analysis complete")
        }
        PredictionResult::Failure(f) => {
            warn!(%session_id, kind = ?f.kind, error = %f.error, "analysis failed")
        }
    }

    Ok(session.record_result(result))
}
