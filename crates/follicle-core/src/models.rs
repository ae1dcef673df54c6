pub mod prediction;
pub mod questionnaire;
pub mod report;
