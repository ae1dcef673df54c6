use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of items on the stress scale.
pub const STRESS_ITEM_COUNT: usize = 10;

/// Highest stored value for a single stress item.
pub const STRESS_ITEM_MAX: u8 = 4;

/// A lifestyle or demographic factor collected alongside the stress scale.
///
/// Declaration order is the order the factors are flattened into request
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleFactor {
    Genetics,
    Smoking,
    HairCare,
    Environment,
    HormonalChanges,
    WeightLoss,
    Age,
}

impl LifestyleFactor {
    pub const ALL: [LifestyleFactor; 7] = [
        LifestyleFactor::Genetics,
        LifestyleFactor::Smoking,
        LifestyleFactor::HairCare,
        LifestyleFactor::Environment,
        LifestyleFactor::HormonalChanges,
        LifestyleFactor::WeightLoss,
        LifestyleFactor::Age,
    ];

    /// Form field name sent to the prediction service.
    pub fn field_name(self) -> &'static str {
        match self {
            LifestyleFactor::Genetics => "genetics",
            LifestyleFactor::Smoking => "smoking",
            LifestyleFactor::HairCare => "hair_care",
            LifestyleFactor::Environment => "environment",
            LifestyleFactor::HormonalChanges => "hormonal_changes",
            LifestyleFactor::WeightLoss => "weight_loss",
            LifestyleFactor::Age => "age",
        }
    }

    pub fn is_binary(self) -> bool {
        !matches!(self, LifestyleFactor::Age)
    }

    /// Inclusive valid range for this factor's value.
    pub fn range(self) -> (u32, u32) {
        if self.is_binary() { (0, 1) } else { (1, 100) }
    }

    pub fn validate(self, value: u32) -> Result<(), CoreError> {
        let (min, max) = self.range();
        if value < min || value > max {
            return Err(CoreError::InvalidFactorValue {
                factor: self.field_name(),
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}

/// Answers collected so far in one session.
///
/// Stress items hold the *stored* value: reverse coding has already been
/// applied by the capture layer, so higher always means more stress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    stress_items: [Option<u8>; STRESS_ITEM_COUNT],
    lifestyle_factors: BTreeMap<LifestyleFactor, u32>,
}

impl QuestionnaireResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the stored value for a 1-indexed stress item, replacing any
    /// previous answer.
    pub fn record_stress_item(&mut self, position: usize, value: u8) -> Result<(), CoreError> {
        if !(1..=STRESS_ITEM_COUNT).contains(&position) {
            return Err(CoreError::InvalidItemPosition(position));
        }
        if value > STRESS_ITEM_MAX {
            return Err(CoreError::InvalidItemValue { position, value });
        }
        self.stress_items[position - 1] = Some(value);
        Ok(())
    }

    /// Stored value of a 1-indexed stress item, if answered.
    pub fn stress_item(&self, position: usize) -> Option<u8> {
        position
            .checked_sub(1)
            .and_then(|i| self.stress_items.get(i))
            .copied()
            .flatten()
    }

    pub fn stress_items(&self) -> &[Option<u8>; STRESS_ITEM_COUNT] {
        &self.stress_items
    }

    pub fn answered_stress_items(&self) -> usize {
        self.stress_items.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_stress_items() == STRESS_ITEM_COUNT
    }

    pub fn set_factor(&mut self, factor: LifestyleFactor, value: u32) -> Result<(), CoreError> {
        factor.validate(value)?;
        self.lifestyle_factors.insert(factor, value);
        Ok(())
    }

    pub fn factor(&self, factor: LifestyleFactor) -> Option<u32> {
        self.lifestyle_factors.get(&factor).copied()
    }

    pub fn lifestyle_factors(&self) -> &BTreeMap<LifestyleFactor, u32> {
        &self.lifestyle_factors
    }

    /// True when nothing at all has been answered.
    pub fn is_empty(&self) -> bool {
        self.answered_stress_items() == 0 && self.lifestyle_factors.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Flatten into request form fields: `pss_1`..`pss_10` for answered
    /// items, then every set lifestyle factor by name.
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        let stress = self
            .stress_items
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (format!("pss_{}", i + 1), v.to_string())));

        let lifestyle = self
            .lifestyle_factors
            .iter()
            .map(|(factor, v)| (factor.field_name().to_string(), v.to_string()));

        stress.chain(lifestyle).collect()
    }
}
