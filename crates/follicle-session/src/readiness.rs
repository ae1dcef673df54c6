use serde::Serialize;

use follicle_core::models::questionnaire::{QuestionnaireResponse, STRESS_ITEM_COUNT};
use follicle_core::models::report::UploadedReportReference;

/// Fraction of stress items answered, in [0, 1]. Lifestyle factors and the
/// report do not count.
pub fn completion_fraction(responses: &QuestionnaireResponse) -> f64 {
    responses.answered_stress_items() as f64 / STRESS_ITEM_COUNT as f64
}

/// Analysis may run on partial data: any answered stress item, or a report.
pub fn is_ready_for_analysis(
    responses: &QuestionnaireResponse,
    report: Option<&UploadedReportReference>,
) -> bool {
    responses.answered_stress_items() > 0 || report.is_some()
}

/// Snapshot of what the session holds, for status displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub has_questionnaire: bool,
    pub has_medical_report: bool,
    pub questions_answered: usize,
    pub completion_fraction: f64,
    pub medical_file_name: Option<String>,
    pub ready_for_prediction: bool,
}

pub fn summarize(
    responses: &QuestionnaireResponse,
    report: Option<&UploadedReportReference>,
) -> DataSummary {
    DataSummary {
        has_questionnaire: !responses.is_empty(),
        has_medical_report: report.is_some(),
        questions_answered: responses.answered_stress_items(),
        completion_fraction: completion_fraction(responses),
        medical_file_name: report.map(|r| r.name().to_string()),
        ready_for_prediction: is_ready_for_analysis(responses, report),
    }
}
