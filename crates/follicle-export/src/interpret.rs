use serde::Serialize;

use follicle_core::models::prediction::{Confidence, Stage};

/// Short description of each stage, indexed by stage value.
const STAGE_DESCRIPTIONS: [&str; 6] = [
    "No significant hair fall detected",
    "Very mild hair fall indicators",
    "Mild hair fall detected",
    "Moderate hair fall confirmed",
    "Significant hair fall detected",
    "Severe hair fall confirmed",
];

pub fn stage_description(stage: Stage) -> &'static str {
    STAGE_DESCRIPTIONS[usize::from(stage.value()).min(STAGE_DESCRIPTIONS.len() - 1)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    Significant,
}

pub fn severity(stage: Stage) -> Severity {
    match stage.value() {
        0 | 1 => Severity::Minimal,
        2 => Severity::Mild,
        3 => Severity::Moderate,
        _ => Severity::Significant,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

pub fn confidence_level(confidence: Confidence) -> ConfidenceLevel {
    let c = confidence.value();
    if c >= 0.8 {
        ConfidenceLevel::High
    } else if c >= 0.6 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// Care recommendations for a stage; low confidence adds a retake hint.
pub fn recommendations(stage: Stage, confidence: Confidence) -> Vec<&'static str> {
    let mut recs = match stage.value() {
        0 => vec![
            "Continue current hair care routine",
            "Maintain balanced nutrition",
            "Stay hydrated",
            "Manage stress levels",
        ],
        1 | 2 => vec![
            "Monitor hair health regularly",
            "Use gentle hair care products",
            "Consider vitamin supplements",
            "Practice stress management",
        ],
        3 | 4 => vec![
            "Consult a dermatologist",
            "Consider additional medical tests",
            "Evaluate nutritional deficiencies",
            "Avoid harsh hair treatments",
        ],
        _ => vec![
            "Seek immediate medical consultation",
            "Consider specialist referral",
            "Explore treatment options",
            "Regular medical monitoring",
        ],
    };

    if confidence_level(confidence) == ConfidenceLevel::Low {
        recs.push("Consider retaking assessment with more detailed information");
    }
    recs
}
