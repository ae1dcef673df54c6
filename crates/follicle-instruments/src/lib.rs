//! follicle-instruments
//!
//! Questionnaire definitions and scoring. Pure data and pure functions
//! with no network dependency. Defines the questions and capture rules for
//! the stress scale and the lifestyle questionnaire, and scores the former.

pub mod error;
pub mod instruments;
pub mod scoring;

use follicle_core::models::questionnaire::QuestionnaireResponse;
use scoring::{Question, QuestionKind, RESPONSE_OPTIONS};

/// Trait implemented by each questionnaire section.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "pss10", "lifestyle").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Perceived Stress Scale").
    fn name(&self) -> &str;

    /// The questions, in presentation order.
    fn questions(&self) -> &[Question];

    /// The value recorded for the question at `index`, if answered.
    fn recorded_value(&self, response: &QuestionnaireResponse, index: usize) -> Option<u32>;

    /// Format the recorded answers as a readable text block.
    fn to_structured_input(&self, response: &QuestionnaireResponse) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for (index, question) in self.questions().iter().enumerate() {
            let answer = match self.recorded_value(response, index) {
                Some(value) => describe_value(question, value),
                None => "not answered".to_string(),
            };
            output.push_str(&format!("- {}: {}\n", question.text, answer));
        }
        output
    }
}

fn describe_value(question: &Question, value: u32) -> String {
    match question.kind {
        QuestionKind::Frequency => {
            // Stored values of reverse-coded items map back to the chosen option.
            let selected = if question.reverse_coded {
                4u32.saturating_sub(value)
            } else {
                value
            };
            let label = RESPONSE_OPTIONS
                .get(selected as usize)
                .copied()
                .unwrap_or("?");
            format!("{label} (scored {value})")
        }
        QuestionKind::YesNo => if value == 1 { "Yes" } else { "No" }.to_string(),
        QuestionKind::Number { .. } => value.to_string(),
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::pss10::Pss10),
        Box::new(instruments::lifestyle::Lifestyle),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
