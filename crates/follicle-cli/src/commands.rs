use std::path::{Path, PathBuf};
use std::process::ExitCode;

use follicle_core::error::CoreError;
use follicle_core::models::prediction::PredictionResult;
use follicle_core::models::report::{extension_of, validate_upload, UploadedReportReference};
use follicle_export::json::{export_file_name, write_json};
use follicle_export::render::render_summary;
use follicle_instruments::all_instruments;
use follicle_instruments::scoring::{QuestionKind, RESPONSE_OPTIONS};
use follicle_predict::error::PredictError;
use follicle_predict::{ClientConfig, ConnectionStatus, PredictionClient};
use follicle_session::analysis::run_analysis;
use follicle_session::store::SessionStore;

use crate::answers::AnswerSheet;
use crate::config::{self, FollicleConfig};

pub fn health(client_config: ClientConfig) -> eyre::Result<ExitCode> {
    let client = PredictionClient::new(client_config);
    match client.check_connection() {
        ConnectionStatus::Connected => {
            println!("Backend at {} is reachable", client.base_url());
            Ok(ExitCode::SUCCESS)
        }
        ConnectionStatus::Disconnected { reason } => {
            println!("Backend at {} is not reachable: {reason}", client.base_url());
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn questions(template: bool) -> eyre::Result<ExitCode> {
    if template {
        println!("{}", serde_json::to_string_pretty(&AnswerSheet::template())?);
        return Ok(ExitCode::SUCCESS);
    }

    for instrument in all_instruments() {
        println!("{}\n", instrument.name());
        let mut printed_options = false;
        for (index, question) in instrument.questions().iter().enumerate() {
            if question.kind == QuestionKind::Frequency && !printed_options {
                let options: Vec<String> = RESPONSE_OPTIONS
                    .iter()
                    .enumerate()
                    .map(|(i, label)| format!("{i} = {label}"))
                    .collect();
                println!("  Options: {}\n", options.join(", "));
                printed_options = true;
            }
            let hint = match question.kind {
                QuestionKind::Frequency => String::new(),
                QuestionKind::YesNo => " (yes/no)".to_string(),
                QuestionKind::Number { min, max } => format!(" ({min}-{max})"),
            };
            println!("  {:>2}. {}{hint}", index + 1, question.text);
        }
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

pub fn score(answers: &Path) -> eyre::Result<ExitCode> {
    let mut session = SessionStore::new();
    AnswerSheet::from_path(answers)?.apply(&mut session)?;

    let score = session.stress_score();
    println!("Stress score: {}/40", score.total);
    println!("Band: {}", score.risk_band.label());
    println!(
        "Completion: {}/10 ({:.0}%)",
        score.answered,
        session.completion_fraction() * 100.0
    );
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, Default)]
pub struct AnalyzeOptions {
    pub answers: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub text: Option<PathBuf>,
    pub export: Option<PathBuf>,
    pub summary: bool,
}

pub fn analyze(options: AnalyzeOptions, client_config: ClientConfig) -> eyre::Result<ExitCode> {
    let mut session = SessionStore::new();
    let rejection = prepare_session(&mut session, &options)?;

    let summary = session.summary();
    tracing::info!(
        session_id = %session.id(),
        questions_answered = summary.questions_answered,
        has_report = summary.has_medical_report,
        "session prepared"
    );

    let created_at = session.created_at();
    let stress = (summary.questions_answered > 0).then(|| session.stress_score());
    let result = match rejection {
        Some(failure) => session.record_result(failure),
        None => run_analysis(&mut session, &PredictionClient::new(client_config))?,
    };

    if options.summary {
        print!("{}", render_summary(result, stress.as_ref())?);
    } else {
        println!("{}", follicle_export::json::to_json(result)?);
    }

    if let Some(target) = &options.export {
        let path = export_target(target, created_at);
        write_json(&path, result)?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// A directory target gets a file named after the session's start time.
pub fn export_target(target: &Path, session_created_at: jiff::Timestamp) -> PathBuf {
    if target.is_dir() {
        target.join(export_file_name(session_created_at))
    } else {
        target.to_path_buf()
    }
}

/// Apply the answer sheet and attach the report for an analysis.
///
/// A report that fails the local upload checks comes back as a
/// `ValidationFailed` result, to be recorded without calling the service.
/// Unreadable inputs are errors.
pub fn prepare_session(
    session: &mut SessionStore,
    options: &AnalyzeOptions,
) -> eyre::Result<Option<PredictionResult>> {
    if let Some(path) = &options.answers {
        AnswerSheet::from_path(path)?.apply(session)?;
    }

    let report = match (&options.report, &options.text) {
        (Some(path), _) => Some(load_report(path)?),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
            Some(UploadedReportReference::from_manual_text(&text))
        }
        (None, None) => None,
    };

    match report {
        Some(Ok(report)) => session.attach_report(report),
        Some(Err(e)) if e.is_validation() => {
            tracing::warn!(session_id = %session.id(), error = %e, "report rejected before sending");
            return Ok(Some(PredictError::from(e).into_result()));
        }
        Some(Err(e)) => return Err(e.into()),
        None => {}
    }
    Ok(None)
}

/// Check name and size from metadata before reading the file into memory.
/// The inner error is a failed upload check.
fn load_report(path: &Path) -> eyre::Result<Result<UploadedReportReference, CoreError>> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| eyre::eyre!("invalid report path: {}", path.display()))?;
    let size = std::fs::metadata(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?
        .len();
    if let Err(e) = validate_upload(name, size) {
        return Ok(Err(e));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    tracing::debug!(name, size, extension = %extension_of(name), "report loaded");
    Ok(UploadedReportReference::from_upload(name, bytes))
}

pub fn config_show(backend_override: Option<&str>) -> eyre::Result<ExitCode> {
    let path = config::config_path()?;
    let config = config::load_or_default()?;
    let effective = config.client_config(backend_override);

    if path.exists() {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: {} (not created, using defaults)", path.display());
    }
    println!("Backend URL: {}", config.backend_base_url);
    if let Some(url) = backend_override {
        println!("Overridden by: {url}");
    }
    println!("Effective URL: {}", effective.base_url);
    println!("Predict timeout: {}s", config.predict_timeout_secs);
    println!("Health timeout: {}s", config.health_timeout_secs);
    println!("Created: {}", config.created_at);
    Ok(ExitCode::SUCCESS)
}

pub fn config_set_url(url: &str) -> eyre::Result<ExitCode> {
    let mut config = config::load_or_default()?;
    config.backend_base_url = url.trim_end_matches('/').to_string();
    let path = config::save_config(&config)?;
    println!("Saved backend URL {} to {}", config.backend_base_url, path.display());
    Ok(ExitCode::SUCCESS)
}

pub fn config_init(force: bool) -> eyre::Result<ExitCode> {
    let path = config::config_path()?;
    if path.exists() && !force {
        return Err(eyre::eyre!(
            "config already exists at {}; pass --force to overwrite",
            path.display()
        ));
    }
    let path = config::save_config(&FollicleConfig::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(ExitCode::SUCCESS)
}
