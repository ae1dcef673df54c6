use follicle_core::models::questionnaire::{QuestionnaireResponse, STRESS_ITEM_COUNT, STRESS_ITEM_MAX};

use crate::error::InstrumentError;
use crate::scoring::{Question, QuestionKind, RiskBand, StressScore};
use crate::Instrument;

/// PSS-10: Perceived Stress Scale, ten-item version.
/// Each item rated 0–4 on frequency over the last month. Total 0–40.
/// Items 4, 5, 7 and 8 are worded positively and reverse-coded.
pub struct Pss10;

/// 1-indexed positions of the positively worded items.
pub const REVERSE_CODED_ITEMS: [usize; 4] = [4, 5, 7, 8];

/// Highest possible total.
pub const MAX_TOTAL: u8 = (STRESS_ITEM_COUNT as u8) * STRESS_ITEM_MAX;

const ITEMS: [&str; STRESS_ITEM_COUNT] = [
    "In the last month, how often have you been upset because of something that happened unexpectedly?",
    "In the last month, how often have you felt that you were unable to control the important things in your life?",
    "In the last month, how often have you felt nervous and stressed?",
    "In the last month, how often have you felt confident about your ability to handle your personal problems?",
    "In the last month, how often have you felt that things were going your way?",
    "In the last month, how often have you found that you could not cope with all the things that you had to do?",
    "In the last month, how often have you been able to control irritations in your life?",
    "In the last month, how often have you felt that you were on top of things?",
    "In the last month, how often have you been angered because of things that happened that were outside of your control?",
    "In the last month, how often have you felt difficulties were piling up so high that you could not overcome them?",
];

impl Instrument for Pss10 {
    fn id(&self) -> &str {
        "pss10"
    }

    fn name(&self) -> &str {
        "Perceived Stress Scale (PSS-10)"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            ITEMS
                .iter()
                .enumerate()
                .map(|(i, text)| Question {
                    id: format!("pss_{}", i + 1),
                    text: text.to_string(),
                    kind: QuestionKind::Frequency,
                    reverse_coded: is_reverse_coded(i + 1),
                })
                .collect()
        });
        &QUESTIONS
    }

    fn recorded_value(&self, response: &QuestionnaireResponse, index: usize) -> Option<u32> {
        response.stress_item(index + 1).map(u32::from)
    }
}

pub fn is_reverse_coded(position: usize) -> bool {
    REVERSE_CODED_ITEMS.contains(&position)
}

/// Value to store for a raw option selection at a 1-indexed position.
pub fn stored_value(position: usize, selected_index: u8) -> Result<u8, InstrumentError> {
    if selected_index > STRESS_ITEM_MAX {
        return Err(InstrumentError::InvalidSelection {
            position,
            selected: selected_index,
        });
    }
    if is_reverse_coded(position) {
        Ok(STRESS_ITEM_MAX - selected_index)
    } else {
        Ok(selected_index)
    }
}

/// Record a raw option selection, applying reverse coding at capture time.
/// Returns the stored value.
pub fn capture(
    response: &mut QuestionnaireResponse,
    position: usize,
    selected_index: u8,
) -> Result<u8, InstrumentError> {
    let value = stored_value(position, selected_index)?;
    response.record_stress_item(position, value)?;
    Ok(value)
}

/// Sum the stored item values into a total and risk band.
///
/// Unanswered items count as 0. The total is clamped to 0–40 even though
/// validated input cannot exceed it.
pub fn score(response: &QuestionnaireResponse) -> StressScore {
    let sum: u32 = response
        .stress_items()
        .iter()
        .map(|v| u32::from(v.unwrap_or(0)))
        .sum();
    let total = sum.min(u32::from(MAX_TOTAL)) as u8;

    StressScore {
        total,
        risk_band: RiskBand::from_total(total),
        answered: response.answered_stress_items(),
    }
}
