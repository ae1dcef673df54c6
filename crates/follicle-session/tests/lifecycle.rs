use std::cell::RefCell;

use follicle_core::models::prediction::{
    Confidence, FailureKind, Prediction, PredictionResult, Stage,
};
use follicle_core::models::questionnaire::LifestyleFactor;
use follicle_core::models::report::UploadedReportReference;
use follicle_instruments::scoring::RiskBand;
use follicle_predict::{ConnectionStatus, PredictionService};
use follicle_session::analysis::run_analysis;
use follicle_session::error::SessionError;
use follicle_session::store::{SessionPhase, SessionStore};

/// Records what it was sent and answers with a fixed result.
struct StubService {
    reply: PredictionResult,
    calls: RefCell<Vec<(Vec<(String, String)>, Option<Vec<u8>>)>>,
}

impl StubService {
    fn answering(reply: PredictionResult) -> Self {
        Self {
            reply,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl PredictionService for StubService {
    fn check_connection(&self) -> ConnectionStatus {
        ConnectionStatus::Connected
    }

    fn predict(
        &self,
        fields: &[(String, String)],
        report: Option<&mut UploadedReportReference>,
    ) -> PredictionResult {
        let payload = report.map(|r| r.read_payload().unwrap());
        self.calls.borrow_mut().push((fields.to_vec(), payload));
        self.reply.clone()
    }
}

fn success(stage: i64) -> PredictionResult {
    PredictionResult::Success(Prediction {
        stage: Stage::clamped(stage),
        confidence: Confidence::clamped(0.9),
        ..Default::default()
    })
}

fn answer_lifestyle(session: &mut SessionStore) {
    for factor in LifestyleFactor::ALL {
        if factor.is_binary() {
            session.answer_yes_no(factor, true).unwrap();
        }
    }
    session.answer_age(35).unwrap();
}

#[test]
fn new_session_is_empty() {
    let session = SessionStore::new();
    assert_eq!(session.phase(), SessionPhase::Empty);
    assert_eq!(session.completion_fraction(), 0.0);
    assert!(!session.is_ready_for_analysis());
}

#[test]
fn completion_fraction_counts_stress_items_only() {
    let mut session = SessionStore::new();
    answer_lifestyle(&mut session);
    assert_eq!(session.completion_fraction(), 0.0);

    for position in 1..=3 {
        session.answer_stress_item(position, 2).unwrap();
    }
    assert!((session.completion_fraction() - 0.3).abs() < 1e-12);

    for position in 4..=10 {
        session.answer_stress_item(position, 2).unwrap();
    }
    assert_eq!(session.completion_fraction(), 1.0);
    assert!(session.responses().is_complete());
}

#[test]
fn lifestyle_only_is_partial_but_not_ready() {
    let mut session = SessionStore::new();
    answer_lifestyle(&mut session);
    assert!(!session.is_ready_for_analysis());
    assert_eq!(session.phase(), SessionPhase::PartiallyAnswered);

    session.answer_stress_item(6, 1).unwrap();
    assert!(session.is_ready_for_analysis());
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[test]
fn report_alone_makes_session_ready() {
    let mut session = SessionStore::new();
    session.attach_report(UploadedReportReference::from_manual_text("Hb 11.2 g/dL").unwrap());
    assert!(session.is_ready_for_analysis());
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[test]
fn new_report_replaces_previous_one() {
    let mut session = SessionStore::new();
    session.attach_report(UploadedReportReference::from_upload("a.pdf", vec![1]).unwrap());
    session.attach_report(UploadedReportReference::from_upload("b.png", vec![2]).unwrap());
    assert_eq!(session.report().unwrap().name(), "b.png");

    let removed = session.remove_report().unwrap();
    assert_eq!(removed.name(), "b.png");
    assert!(session.report().is_none());
}

#[test]
fn analysis_refuses_when_not_ready() {
    let mut session = SessionStore::new();
    answer_lifestyle(&mut session);
    let service = StubService::answering(success(1));

    let err = run_analysis(&mut session, &service).unwrap_err();
    assert!(matches!(err, SessionError::NotReady));
    assert_eq!(service.call_count(), 0);
    assert!(session.last_result().is_none());
}

#[test]
fn analysis_sends_fields_and_report_then_records_result() {
    let mut session = SessionStore::new();
    session.answer_stress_item(1, 4).unwrap();
    session.answer_stress_item(4, 4).unwrap();
    session.answer_age(28).unwrap();
    session.attach_report(
        UploadedReportReference::from_upload("labs.txt", b"vitamin d 14".to_vec()).unwrap(),
    );
    let service = StubService::answering(success(2));

    let result = run_analysis(&mut session, &service).unwrap();
    assert_eq!(result.prediction().unwrap().stage.value(), 2);
    assert_eq!(session.phase(), SessionPhase::Analyzed);

    let calls = service.calls.borrow();
    let (fields, payload) = &calls[0];
    assert!(fields.contains(&("pss_1".to_string(), "4".to_string())));
    assert!(fields.contains(&("pss_4".to_string(), "0".to_string())));
    assert!(fields.contains(&("age".to_string(), "28".to_string())));
    assert_eq!(payload.as_deref(), Some(&b"vitamin d 14"[..]));
}

#[test]
fn repeated_analysis_resends_the_whole_report() {
    let mut session = SessionStore::new();
    session.attach_report(
        UploadedReportReference::from_upload("labs.txt", b"ferritin 20".to_vec()).unwrap(),
    );
    let service = StubService::answering(success(1));

    run_analysis(&mut session, &service).unwrap();
    run_analysis(&mut session, &service).unwrap();

    let calls = service.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, calls[1].1);
}

#[test]
fn failed_analysis_is_recorded_and_answers_survive() {
    let mut session = SessionStore::new();
    session.answer_stress_item(2, 3).unwrap();
    let service = StubService::answering(PredictionResult::failure(
        FailureKind::Timeout,
        "Request timed out. Please try again.",
    ));

    let result = run_analysis(&mut session, &service).unwrap();
    assert!(!result.is_success());
    assert_eq!(session.phase(), SessionPhase::Analyzed);
    assert_eq!(session.responses().stress_item(2), Some(3));

    let retry = StubService::answering(success(0));
    let result = run_analysis(&mut session, &retry).unwrap();
    assert!(result.is_success());
}

#[test]
fn reset_clears_everything_at_once() {
    let mut session = SessionStore::new();
    session.answer_stress_item(1, 2).unwrap();
    answer_lifestyle(&mut session);
    session.attach_report(UploadedReportReference::from_manual_text("TSH 5.1").unwrap());
    run_analysis(&mut session, &StubService::answering(success(3))).unwrap();
    assert_eq!(session.phase(), SessionPhase::Analyzed);

    session.reset();
    assert_eq!(session.completion_fraction(), 0.0);
    assert!(session.report().is_none());
    assert!(session.last_result().is_none());
    assert!(session.responses().is_empty());
    assert_eq!(session.phase(), SessionPhase::Empty);
}

#[test]
fn clear_responses_keeps_report() {
    let mut session = SessionStore::new();
    session.answer_stress_item(1, 2).unwrap();
    session.attach_report(UploadedReportReference::from_manual_text("B12 180").unwrap());
    session.clear_responses();
    assert_eq!(session.responses().answered_stress_items(), 0);
    assert!(session.report().is_some());
}

#[test]
fn stress_score_reflects_captured_answers() {
    let mut session = SessionStore::new();
    for position in 1..=10 {
        session.answer_stress_item(position, 2).unwrap();
    }
    let score = session.stress_score();
    assert_eq!(score.total, 20);
    assert_eq!(score.risk_band, RiskBand::Moderate);
}

#[test]
fn summary_describes_session_contents() {
    let mut session = SessionStore::new();
    session.answer_stress_item(3, 1).unwrap();
    session.attach_report(UploadedReportReference::from_upload("scan.jpg", vec![0; 10]).unwrap());

    let summary = session.summary();
    assert!(summary.has_questionnaire);
    assert!(summary.has_medical_report);
    assert_eq!(summary.questions_answered, 1);
    assert_eq!(summary.medical_file_name.as_deref(), Some("scan.jpg"));
    assert!(summary.ready_for_prediction);
}

#[test]
fn invalid_selection_is_reported() {
    let mut session = SessionStore::new();
    assert!(matches!(
        session.answer_stress_item(1, 9),
        Err(SessionError::Instrument(_))
    ));
}
