//! follicle-export
//!
//! Interpretation of prediction results (stage descriptions, severity,
//! confidence level, recommendations), JSON export, and text summaries
//! rendered from a template.

pub mod error;
pub mod interpret;
pub mod json;
pub mod render;
