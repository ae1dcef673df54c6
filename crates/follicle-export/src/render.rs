use serde::Serialize;
use tera::{Context, Tera};

use follicle_core::models::prediction::PredictionResult;
use follicle_instruments::scoring::StressScore;

use crate::error::ExportError;
use crate::interpret;

const SUMMARY_TEMPLATE_NAME: &str = "summary.txt";

/// Plain-text summary. Names without an `.html` suffix are not escaped.
pub const SUMMARY_TEMPLATE: &str = "\
Hair fall analysis summary
==========================
{% if stress %}Stress score: {{ stress.total }}/40 ({{ stress.band }}, {{ stress.answered }}/10 answered)
{% endif %}{% if success %}Stage: {{ stage }} - {{ stage_description }} ({{ severity }} severity)
Condition: {{ condition }}
Confidence: {{ confidence }} ({{ confidence_level }})
{% if interpretation %}Interpretation: {{ interpretation }}
{% endif %}
Model 1 (staging): stage {{ model1_stage }}, confidence {{ model1_confidence }}
Model 2 (classification): {{ model2_condition }}, confidence {{ model2_confidence }}

Recommendations:
{% for rec in recommendations %}- {{ rec }}
{% endfor %}{% if messages %}
Processing messages:
{% for message in messages %}- {{ message }}
{% endfor %}{% endif %}{% else %}Analysis failed: {{ error }}
{% endif %}";

#[derive(Debug, Serialize)]
struct StressContext {
    total: u8,
    band: &'static str,
    answered: usize,
}

#[derive(Debug, Default, Serialize)]
struct SummaryContext {
    stress: Option<StressContext>,
    success: bool,
    stage: u8,
    stage_description: &'static str,
    severity: Option<interpret::Severity>,
    condition: String,
    confidence: String,
    confidence_level: Option<interpret::ConfidenceLevel>,
    interpretation: String,
    model1_stage: u8,
    model1_confidence: String,
    model2_condition: String,
    model2_confidence: String,
    recommendations: Vec<&'static str>,
    messages: Vec<String>,
    error: String,
}

/// Render a text summary of a result, with the stress score when known.
pub fn render_summary(
    result: &PredictionResult,
    stress: Option<&StressScore>,
) -> Result<String, ExportError> {
    render_with(SUMMARY_TEMPLATE_NAME, SUMMARY_TEMPLATE, result, stress)
}

/// Render a result with a caller-supplied template.
pub fn render_with(
    template_name: &str,
    template_content: &str,
    result: &PredictionResult,
    stress: Option<&StressScore>,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(build_context(result, stress))
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    Ok(tera.render(template_name, &context)?)
}

fn build_context(result: &PredictionResult, stress: Option<&StressScore>) -> SummaryContext {
    let stress = stress.map(|s| StressContext {
        total: s.total,
        band: s.risk_band.label(),
        answered: s.answered,
    });

    match result {
        PredictionResult::Success(p) => SummaryContext {
            stress,
            success: true,
            stage: p.stage.value(),
            stage_description: interpret::stage_description(p.stage),
            severity: Some(interpret::severity(p.stage)),
            condition: p.condition.to_string(),
            confidence: p.confidence.to_string(),
            confidence_level: Some(interpret::confidence_level(p.confidence)),
            interpretation: p.interpretation.clone(),
            model1_stage: p.detailed_results.model1_stage.value(),
            model1_confidence: p.detailed_results.model1_confidence.to_string(),
            model2_condition: p.detailed_results.model2_condition.to_string(),
            model2_confidence: p.detailed_results.model2_confidence.to_string(),
            recommendations: interpret::recommendations(p.stage, p.confidence),
            messages: p.messages.clone(),
            error: String::new(),
        },
        PredictionResult::Failure(f) => SummaryContext {
            stress,
            error: f.error.clone(),
            ..Default::default()
        },
    }
}
