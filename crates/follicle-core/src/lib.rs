//! follicle-core
//!
//! Pure domain types for a Follicle session: questionnaire responses,
//! the uploaded medical report, and prediction results.
//! No network dependency; this is the shared vocabulary of the workspace.

pub mod error;
pub mod models;
