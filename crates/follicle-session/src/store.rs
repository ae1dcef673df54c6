use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use follicle_core::models::prediction::PredictionResult;
use follicle_core::models::questionnaire::{LifestyleFactor, QuestionnaireResponse};
use follicle_core::models::report::UploadedReportReference;
use follicle_instruments::instruments::{lifestyle, pss10};
use follicle_instruments::scoring::StressScore;

use crate::error::SessionError;
use crate::readiness::{self, DataSummary};

/// Where a session stands in the questionnaire → analysis flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Nothing answered, no report.
    Empty,
    /// Something captured, but the readiness predicate does not hold yet
    /// (e.g. only lifestyle factors).
    PartiallyAnswered,
    Ready,
    /// A result, successful or not, is recorded.
    Analyzed,
}

/// All state for one user session. Owned by the interaction handler and
/// passed explicitly; never shared across sessions or persisted.
#[derive(Debug)]
pub struct SessionStore {
    id: Uuid,
    created_at: jiff::Timestamp,
    responses: QuestionnaireResponse,
    report: Option<UploadedReportReference>,
    last_result: Option<PredictionResult>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, "session started");
        Self {
            id,
            created_at: jiff::Timestamp::now(),
            responses: QuestionnaireResponse::new(),
            report: None,
            last_result: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at
    }

    pub fn responses(&self) -> &QuestionnaireResponse {
        &self.responses
    }

    pub fn report(&self) -> Option<&UploadedReportReference> {
        self.report.as_ref()
    }

    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.last_result.as_ref()
    }

    /// Capture a raw option selection for a 1-indexed stress item.
    /// Reverse coding is applied here; the stored value is returned.
    pub fn answer_stress_item(&mut self, position: usize, selected_index: u8) -> Result<u8, SessionError> {
        let stored = pss10::capture(&mut self.responses, position, selected_index)?;
        debug!(session_id = %self.id, position, selected_index, stored, "stress item captured");
        Ok(stored)
    }

    pub fn answer_yes_no(&mut self, factor: LifestyleFactor, yes: bool) -> Result<(), SessionError> {
        lifestyle::capture_binary(&mut self.responses, factor, yes)?;
        debug!(session_id = %self.id, factor = factor.field_name(), yes, "lifestyle factor captured");
        Ok(())
    }

    pub fn answer_age(&mut self, age: u32) -> Result<(), SessionError> {
        lifestyle::capture_age(&mut self.responses, age)?;
        Ok(())
    }

    /// Attach a report, replacing any previous one.
    pub fn attach_report(&mut self, report: UploadedReportReference) {
        info!(
            session_id = %self.id,
            name = report.name(),
            size = report.size(),
            replaced = self.report.is_some(),
            "medical report attached"
        );
        self.report = Some(report);
    }

    pub fn remove_report(&mut self) -> Option<UploadedReportReference> {
        self.report.take()
    }

    /// Discard questionnaire answers only; report and result stay.
    pub fn clear_responses(&mut self) {
        self.responses.clear();
    }

    /// Record the outcome of an analysis, replacing the previous one.
    pub fn record_result(&mut self, result: PredictionResult) -> &PredictionResult {
        self.last_result.insert(result)
    }

    /// Return to `Empty`: responses, report and result are discarded together.
    pub fn reset(&mut self) {
        info!(session_id = %self.id, "session reset");
        self.responses = QuestionnaireResponse::new();
        self.report = None;
        self.last_result = None;
    }

    pub fn stress_score(&self) -> StressScore {
        pss10::score(&self.responses)
    }

    pub fn completion_fraction(&self) -> f64 {
        readiness::completion_fraction(&self.responses)
    }

    pub fn is_ready_for_analysis(&self) -> bool {
        readiness::is_ready_for_analysis(&self.responses, self.report.as_ref())
    }

    pub fn summary(&self) -> DataSummary {
        readiness::summarize(&self.responses, self.report.as_ref())
    }

    pub fn phase(&self) -> SessionPhase {
        if self.last_result.is_some() {
            SessionPhase::Analyzed
        } else if self.is_ready_for_analysis() {
            SessionPhase::Ready
        } else if !self.responses.is_empty() || self.report.is_some() {
            SessionPhase::PartiallyAnswered
        } else {
            SessionPhase::Empty
        }
    }

    /// Split borrow used when sending: fields are built from the responses
    /// while the report is lent mutably for its cursor.
    pub(crate) fn request_parts(&mut self) -> (Vec<(String, String)>, Option<&mut UploadedReportReference>) {
        (self.responses.to_form_fields(), self.report.as_mut())
    }
}
