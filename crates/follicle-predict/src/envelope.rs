//! Defensive parsing of the prediction service's JSON envelope.
//!
//! The service's response shape is not trusted: every consumed field has a
//! named default, numbers are accepted in any JSON numeric (or numeric
//! string) form, and all ranges are re-clamped locally.

use serde_json::{Map, Value};

use follicle_core::models::prediction::{
    Condition, Confidence, DetailedResults, Prediction, Stage,
};

use crate::error::PredictError;

const DEFAULT_STAGE: i64 = 0;
const DEFAULT_CONFIDENCE: f64 = 0.0;
const DEFAULT_SERVER_ERROR: &str = "Server error";

/// Parse the body of a 200 response.
///
/// Malformed JSON is `RemoteMalformed`; a well-formed envelope with
/// `success: false` is `RemoteRejected` carrying the envelope's `error`.
pub fn parse_success_body(status: u16, body: &str) -> Result<Prediction, PredictError> {
    let value: Value = serde_json::from_str(body).map_err(|e| PredictError::RemoteMalformed {
        status,
        message: format!("Malformed response from server: {e}"),
    })?;

    let Some(envelope) = value.as_object() else {
        return Err(PredictError::RemoteMalformed {
            status,
            message: "Malformed response from server: envelope is not an object".to_string(),
        });
    };

    let success = envelope.get("success").and_then(as_bool).unwrap_or(false);
    if !success {
        return Err(PredictError::RemoteRejected {
            status,
            message: error_field(envelope).unwrap_or_else(|| "Prediction failed".to_string()),
        });
    }

    Ok(extract_prediction(envelope))
}

/// Classify the body of a non-200 response.
pub fn parse_error_body(status: u16, body: &str) -> PredictError {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(envelope)) => PredictError::RemoteRejected {
            status,
            message: error_field(&envelope).unwrap_or_else(|| DEFAULT_SERVER_ERROR.to_string()),
        },
        _ => PredictError::RemoteMalformed {
            status,
            message: format!("HTTP {status}: {body}"),
        },
    }
}

fn extract_prediction(envelope: &Map<String, Value>) -> Prediction {
    let empty = Map::new();
    let predictions = envelope
        .get("predictions")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let detailed = predictions
        .get("detailed_results")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    Prediction {
        stage: stage_field(predictions, "stage"),
        condition: condition_field(predictions, "condition"),
        confidence: confidence_field(predictions, "confidence"),
        interpretation: predictions
            .get("interpretation")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        detailed_results: DetailedResults {
            model1_stage: stage_field(detailed, "model1_stage"),
            model1_confidence: confidence_field(detailed, "model1_confidence"),
            model2_condition: condition_field(detailed, "model2_condition"),
            model2_confidence: confidence_field(detailed, "model2_confidence"),
        },
        messages: messages(envelope),
        medical_report_processed: envelope
            .get("medical_report_processed")
            .and_then(as_bool)
            .unwrap_or(false),
        questionnaire_processed: envelope
            .get("questionnaire_processed")
            .and_then(as_bool)
            .unwrap_or(false),
    }
}

fn stage_field(obj: &Map<String, Value>, key: &str) -> Stage {
    Stage::clamped(obj.get(key).and_then(as_i64).unwrap_or(DEFAULT_STAGE))
}

fn confidence_field(obj: &Map<String, Value>, key: &str) -> Confidence {
    Confidence::clamped(obj.get(key).and_then(as_f64).unwrap_or(DEFAULT_CONFIDENCE))
}

fn condition_field(obj: &Map<String, Value>, key: &str) -> Condition {
    match obj.get(key).and_then(as_bool) {
        Some(true) => Condition::Yes,
        _ => Condition::No,
    }
}

fn error_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("error")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn messages(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("messages") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|m| match m {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts booleans, "Yes"/"No"/"true"/"false" in any case, and 0/1.
fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Some(true),
            "no" | "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
