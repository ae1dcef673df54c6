use follicle_core::error::CoreError;
use follicle_core::models::prediction::FailureKind;
use follicle_predict::error::PredictError;

#[test]
fn rejected_upload_is_a_validation_failure() {
    let result = PredictError::from(CoreError::FileTooLarge { size_mb: 17.0 }).into_result();
    let failure = result.error().expect("failure");
    assert_eq!(failure.kind, FailureKind::ValidationFailed);
    assert_eq!(failure.status_code, None);
    assert_eq!(
        failure.error,
        "File size (17.0 MB) exceeds maximum allowed size (16 MB)"
    );
}

#[test]
fn unreadable_report_is_unexpected() {
    let io = std::io::Error::other("disk gone");
    let err = PredictError::from(CoreError::from(io));
    assert_eq!(err.kind(), FailureKind::Unexpected);
}

#[test]
fn status_is_kept_for_remote_failures_only() {
    let err = PredictError::RemoteMalformed {
        status: 502,
        message: "HTTP 502: bad gateway".to_string(),
    };
    assert_eq!(err.status_code(), Some(502));
    assert_eq!(PredictError::Timeout.status_code(), None);
}
