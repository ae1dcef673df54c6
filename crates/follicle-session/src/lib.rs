//! follicle-session
//!
//! The per-session context object: owns the questionnaire responses, the
//! attached report and the latest prediction result, derives readiness,
//! and runs an analysis against a [`PredictionService`].
//!
//! [`PredictionService`]: follicle_predict::PredictionService

pub mod analysis;
pub mod error;
pub mod readiness;
pub mod store;
