use std::path::Path;

use follicle_core::models::prediction::PredictionResult;

use crate::error::ExportError;

/// Pretty JSON dump of a result in its envelope shape. No transformation.
pub fn to_json(result: &PredictionResult) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Download name for an export taken at `at`.
pub fn export_file_name(at: jiff::Timestamp) -> String {
    format!("clinical_hair_analysis_{}.json", at.as_second())
}

/// Write the JSON dump to `path`.
pub fn write_json(path: &Path, result: &PredictionResult) -> Result<(), ExportError> {
    let json = to_json(result)?;
    std::fs::write(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "prediction result exported");
    Ok(())
}
