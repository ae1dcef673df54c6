use std::fmt;

use serde::{Deserialize, Serialize};

/// Hair-fall stage reported by the prediction service, always within 0–5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stage(u8);

impl Stage {
    pub const MAX: u8 = 5;

    /// Clamp a raw value from the service into 0–5.
    pub fn clamped(raw: i64) -> Self {
        Stage(raw.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Model confidence, always within [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Clamp a raw value from the service into [0, 1]. NaN becomes 0.
    pub fn clamped(raw: f64) -> Self {
        if raw.is_nan() {
            return Confidence(0.0);
        }
        Confidence(raw.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Yes,
    #[default]
    No,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Yes => f.write_str("Yes"),
            Condition::No => f.write_str("No"),
        }
    }
}

/// Per-submodel outputs: model 1 stages, model 2 classifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedResults {
    pub model1_stage: Stage,
    pub model1_confidence: Confidence,
    pub model2_condition: Condition,
    pub model2_confidence: Confidence,
}

/// A successful prediction, with every numeric field already clamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub stage: Stage,
    pub condition: Condition,
    pub confidence: Confidence,
    pub interpretation: String,
    pub detailed_results: DetailedResults,
    pub messages: Vec<String>,
    pub medical_report_processed: bool,
    pub questionnaire_processed: bool,
}

/// Why an analysis attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ConnectionUnavailable,
    Timeout,
    /// Non-success status with a readable error body, or an envelope with
    /// `success: false`.
    RemoteRejected,
    /// Response body could not be parsed.
    RemoteMalformed,
    /// Local upload check failed; the service was never contacted.
    ValidationFailed,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionFailure {
    pub kind: FailureKind,
    pub error: String,
    pub status_code: Option<u16>,
}

/// Outcome of one analysis invocation. Failures are results too: they are
/// stored in the session so they can be shown and cleared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ResultEnvelope")]
pub enum PredictionResult {
    Success(Prediction),
    Failure(PredictionFailure),
}

impl PredictionResult {
    pub fn failure(kind: FailureKind, error: impl Into<String>) -> Self {
        PredictionResult::Failure(PredictionFailure {
            kind,
            error: error.into(),
            status_code: None,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PredictionResult::Success(_))
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            PredictionResult::Success(p) => Some(p),
            PredictionResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&PredictionFailure> {
        match self {
            PredictionResult::Success(_) => None,
            PredictionResult::Failure(f) => Some(f),
        }
    }
}

/// Wire-shaped view of a result, used for export.
#[derive(Debug, Serialize)]
struct ResultEnvelope {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    predictions: Option<PredictionBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    medical_report_processed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    questionnaire_processed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
}

#[derive(Debug, Serialize)]
struct PredictionBody {
    stage: Stage,
    condition: Condition,
    confidence: Confidence,
    interpretation: String,
    detailed_results: DetailedResults,
}

impl From<PredictionResult> for ResultEnvelope {
    fn from(result: PredictionResult) -> Self {
        match result {
            PredictionResult::Success(p) => ResultEnvelope {
                success: true,
                predictions: Some(PredictionBody {
                    stage: p.stage,
                    condition: p.condition,
                    confidence: p.confidence,
                    interpretation: p.interpretation,
                    detailed_results: p.detailed_results,
                }),
                messages: Some(p.messages),
                medical_report_processed: Some(p.medical_report_processed),
                questionnaire_processed: Some(p.questionnaire_processed),
                error: None,
                error_kind: None,
                status_code: None,
            },
            PredictionResult::Failure(f) => ResultEnvelope {
                success: false,
                predictions: None,
                messages: None,
                medical_report_processed: None,
                questionnaire_processed: None,
                error: Some(f.error),
                error_kind: Some(f.kind),
                status_code: f.status_code,
            },
        }
    }
}
