//! JSON answer sheets for non-interactive sessions.
//!
//! Stress selections are raw option indices (0 = "Never" ... 4 = "Very
//! Often"); reverse coding happens when they are captured into a session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use follicle_core::models::questionnaire::{LifestyleFactor, STRESS_ITEM_COUNT};
use follicle_session::store::SessionStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerSheet {
    #[serde(default)]
    pub pss: Vec<Option<u8>>,
    #[serde(default)]
    pub lifestyle: LifestyleAnswers,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LifestyleAnswers {
    pub genetics: Option<bool>,
    pub smoking: Option<bool>,
    pub hair_care: Option<bool>,
    pub environment: Option<bool>,
    pub hormonal_changes: Option<bool>,
    pub weight_loss: Option<bool>,
    pub age: Option<u32>,
}

impl LifestyleAnswers {
    fn binary(&self, factor: LifestyleFactor) -> Option<bool> {
        match factor {
            LifestyleFactor::Genetics => self.genetics,
            LifestyleFactor::Smoking => self.smoking,
            LifestyleFactor::HairCare => self.hair_care,
            LifestyleFactor::Environment => self.environment,
            LifestyleFactor::HormonalChanges => self.hormonal_changes,
            LifestyleFactor::WeightLoss => self.weight_loss,
            LifestyleFactor::Age => None,
        }
    }
}

impl AnswerSheet {
    /// A blank sheet with every stress item present and unanswered.
    pub fn template() -> Self {
        Self {
            pss: vec![None; STRESS_ITEM_COUNT],
            lifestyle: LifestyleAnswers::default(),
        }
    }

    pub fn from_path(path: &Path) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read answers at {}: {e}", path.display()))?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> eyre::Result<Self> {
        let sheet: AnswerSheet = serde_json::from_str(json)?;
        if sheet.pss.len() > STRESS_ITEM_COUNT {
            return Err(eyre::eyre!(
                "answer sheet has {} stress answers, expected at most {STRESS_ITEM_COUNT}",
                sheet.pss.len()
            ));
        }
        Ok(sheet)
    }

    /// Capture every answered item into `session`. Returns how many
    /// answers were applied.
    pub fn apply(&self, session: &mut SessionStore) -> eyre::Result<usize> {
        let mut applied = 0;

        for (index, selection) in self.pss.iter().enumerate() {
            if let Some(selected) = selection {
                session
                    .answer_stress_item(index + 1, *selected)
                    .map_err(|e| eyre::eyre!("stress question {}: {e}", index + 1))?;
                applied += 1;
            }
        }

        for factor in LifestyleFactor::ALL {
            if let Some(yes) = self.lifestyle.binary(factor) {
                session.answer_yes_no(factor, yes)?;
                applied += 1;
            }
        }

        if let Some(age) = self.lifestyle.age {
            session.answer_age(age)?;
            applied += 1;
        }

        tracing::debug!(applied, "answer sheet applied");
        Ok(applied)
    }
}
