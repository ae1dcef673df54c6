use follicle_core::models::prediction::Condition;
use follicle_predict::envelope::{parse_error_body, parse_success_body};
use follicle_predict::error::PredictError;

#[test]
fn full_envelope_is_extracted() {
    let body = r#"{
        "success": true,
        "predictions": {
            "stage": 3,
            "condition": "Yes",
            "confidence": 0.82,
            "interpretation": "Moderate hair fall confirmed",
            "detailed_results": {
                "model1_stage": 3,
                "model1_confidence": 0.79,
                "model2_condition": "Yes",
                "model2_confidence": 0.85
            }
        },
        "messages": ["Medical report processed", "Questionnaire processed"],
        "medical_report_processed": true,
        "questionnaire_processed": true
    }"#;

    let prediction = parse_success_body(200, body).unwrap();
    assert_eq!(prediction.stage.value(), 3);
    assert_eq!(prediction.condition, Condition::Yes);
    assert_eq!(prediction.confidence.value(), 0.82);
    assert_eq!(prediction.interpretation, "Moderate hair fall confirmed");
    assert_eq!(prediction.detailed_results.model1_stage.value(), 3);
    assert_eq!(prediction.detailed_results.model2_condition, Condition::Yes);
    assert_eq!(prediction.detailed_results.model2_confidence.value(), 0.85);
    assert_eq!(prediction.messages.len(), 2);
    assert!(prediction.medical_report_processed);
    assert!(prediction.questionnaire_processed);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let prediction = parse_success_body(200, r#"{"success": true}"#).unwrap();
    assert_eq!(prediction.stage.value(), 0);
    assert_eq!(prediction.condition, Condition::No);
    assert_eq!(prediction.confidence.value(), 0.0);
    assert!(prediction.interpretation.is_empty());
    assert!(prediction.messages.is_empty());
}

#[test]
fn out_of_range_values_are_clamped() {
    let body = r#"{"success": true, "predictions": {"stage": -1, "confidence": 1.5,
        "detailed_results": {"model1_stage": 7, "model2_confidence": -3}}}"#;
    let prediction = parse_success_body(200, body).unwrap();
    assert_eq!(prediction.stage.value(), 0);
    assert_eq!(prediction.confidence.value(), 1.0);
    assert_eq!(prediction.detailed_results.model1_stage.value(), 5);
    assert_eq!(prediction.detailed_results.model2_confidence.value(), 0.0);
}

#[test]
fn loosely_typed_values_are_accepted() {
    let body = r#"{"success": "true", "predictions": {"stage": "2", "confidence": "0.5",
        "condition": true}}"#;
    let prediction = parse_success_body(200, body).unwrap();
    assert_eq!(prediction.stage.value(), 2);
    assert_eq!(prediction.confidence.value(), 0.5);
    assert_eq!(prediction.condition, Condition::Yes);
}

#[test]
fn success_false_is_rejected_with_envelope_error() {
    let err = parse_success_body(200, r#"{"success": false, "error": "No input data"}"#)
        .unwrap_err();
    match err {
        PredictError::RemoteRejected { status, message } => {
            assert_eq!(status, 200);
            assert_eq!(message, "No input data");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_success_body_is_malformed() {
    let err = parse_success_body(200, "<html>oops</html>").unwrap_err();
    assert!(matches!(err, PredictError::RemoteMalformed { status: 200, .. }));

    let err = parse_success_body(200, "[1, 2]").unwrap_err();
    assert!(matches!(err, PredictError::RemoteMalformed { .. }));
}

#[test]
fn error_body_with_json_is_rejected() {
    let err = parse_error_body(400, r#"{"error": "Invalid file format"}"#);
    assert!(matches!(err, PredictError::RemoteRejected { status: 400, .. }));
    assert_eq!(err.to_string(), "Invalid file format");
    assert_eq!(err.status_code(), Some(400));
}

#[test]
fn error_body_without_error_field_uses_default() {
    let err = parse_error_body(500, r#"{"detail": "boom"}"#);
    assert_eq!(err.to_string(), "Server error");
}

#[test]
fn unparsable_error_body_falls_back_to_status_and_text() {
    let err = parse_error_body(502, "Bad Gateway");
    assert!(matches!(err, PredictError::RemoteMalformed { status: 502, .. }));
    assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
}
