use follicle_core::models::questionnaire::{LifestyleFactor, QuestionnaireResponse};

use crate::error::InstrumentError;
use crate::scoring::{Question, QuestionKind};
use crate::Instrument;

/// Clinical history and lifestyle factors: six yes/no questions and age.
pub struct Lifestyle;

impl Instrument for Lifestyle {
    fn id(&self) -> &str {
        "lifestyle"
    }

    fn name(&self) -> &str {
        "Clinical History & Lifestyle"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            LifestyleFactor::ALL
                .iter()
                .map(|&factor| {
                    let kind = if factor.is_binary() {
                        QuestionKind::YesNo
                    } else {
                        let (min, max) = factor.range();
                        QuestionKind::Number { min, max }
                    };
                    Question {
                        id: factor.field_name().to_string(),
                        text: question_text(factor).to_string(),
                        kind,
                        reverse_coded: false,
                    }
                })
                .collect()
        });
        &QUESTIONS
    }

    fn recorded_value(&self, response: &QuestionnaireResponse, index: usize) -> Option<u32> {
        LifestyleFactor::ALL
            .get(index)
            .and_then(|&factor| response.factor(factor))
    }
}

pub fn question_text(factor: LifestyleFactor) -> &'static str {
    match factor {
        LifestyleFactor::Genetics => "Do your parents or siblings have hair fall problems?",
        LifestyleFactor::Smoking => "Do you have a smoking habit?",
        LifestyleFactor::HairCare => "Is it difficult to maintain your hair in good condition?",
        LifestyleFactor::Environment => {
            "Is your environment polluted or do you experience extreme weather conditions or radiological problems?"
        }
        LifestyleFactor::HormonalChanges => {
            "Are you experiencing hormonal changes (pregnancy, menopause, thyroid issues)?"
        }
        LifestyleFactor::WeightLoss => "Have you experienced significant weight loss recently?",
        LifestyleFactor::Age => "What is your age?",
    }
}

/// Record a yes/no answer as 1/0.
pub fn capture_binary(
    response: &mut QuestionnaireResponse,
    factor: LifestyleFactor,
    yes: bool,
) -> Result<(), InstrumentError> {
    if !factor.is_binary() {
        return Err(InstrumentError::NotBinary(factor.field_name()));
    }
    response.set_factor(factor, u32::from(yes))?;
    Ok(())
}

/// Record age in whole years (1–100).
pub fn capture_age(response: &mut QuestionnaireResponse, age: u32) -> Result<(), InstrumentError> {
    response.set_factor(LifestyleFactor::Age, age)?;
    Ok(())
}
