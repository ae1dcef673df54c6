use serde::{Deserialize, Serialize};

/// Frequency options shared by every stress item, in index order.
pub const RESPONSE_OPTIONS: [&str; 5] = [
    "Never",
    "Almost Never",
    "Sometimes",
    "Fairly Often",
    "Very Often",
];

/// Index of a response option by label, ignoring case and surrounding space.
pub fn option_index(label: &str) -> Option<u8> {
    let label = label.trim();
    RESPONSE_OPTIONS
        .iter()
        .position(|o| o.eq_ignore_ascii_case(label))
        .map(|i| i as u8)
}

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// One of [`RESPONSE_OPTIONS`].
    Frequency,
    /// No = 0, Yes = 1.
    YesNo,
    /// Whole number within an inclusive range.
    Number { min: u32, max: u32 },
}

/// A single question within an instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    /// Stored as `4 - selection` so higher always means more stress.
    pub reverse_coded: bool,
}

/// Coarse classification of the total stress score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    /// Highest total still classed as low stress.
    pub const LOW_MAX: u8 = 13;
    /// Highest total still classed as moderate stress.
    pub const MODERATE_MAX: u8 = 26;

    pub fn from_total(total: u8) -> Self {
        if total <= Self::LOW_MAX {
            RiskBand::Low
        } else if total <= Self::MODERATE_MAX {
            RiskBand::Moderate
        } else {
            RiskBand::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "Low Stress",
            RiskBand::Moderate => "Moderate Stress",
            RiskBand::High => "High Stress",
        }
    }
}

/// Derived stress score. Recomputed from the responses on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressScore {
    pub total: u8,
    pub risk_band: RiskBand,
    /// Items that contributed; unanswered items count as 0.
    pub answered: usize,
}
