use std::time::Duration;

use tracing::{info, warn};
use ureq::Agent;

use follicle_core::models::prediction::{Prediction, PredictionResult};
use follicle_core::models::report::UploadedReportReference;

use crate::envelope;
use crate::error::PredictError;
use crate::multipart::MultipartForm;
use crate::{ConnectionStatus, PredictionService};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_PREDICT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

pub const HEALTH_PATH: &str = "/health";
pub const PREDICT_PATH: &str = "/predict";

/// Multipart field name for the attached report.
pub const REPORT_FIELD: &str = "medical_report";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub predict_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            predict_timeout: DEFAULT_PREDICT_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }
}

/// Blocking HTTP client for the prediction service.
///
/// Holds one agent per timeout budget. No call is ever retried.
pub struct PredictionClient {
    base_url: String,
    predict_agent: Agent,
    health_agent: Agent,
}

impl PredictionClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            predict_agent: build_agent(config.predict_timeout),
            health_agent: build_agent(config.health_timeout),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `/health`; connected iff it answers 200 within the liveness timeout.
    pub fn check_connection(&self) -> ConnectionStatus {
        let url = self.url(HEALTH_PATH);
        match self.health_agent.get(&url).call() {
            Ok(response) if response.status().as_u16() == 200 => {
                info!(url = %url, "backend reachable");
                ConnectionStatus::Connected
            }
            Ok(response) => {
                let status = response.status().as_u16();
                warn!(url = %url, status, "backend health check returned non-200");
                ConnectionStatus::Disconnected {
                    reason: format!("health check returned HTTP {status}"),
                }
            }
            Err(e) => {
                let reason = PredictError::from(e).to_string();
                warn!(url = %url, %reason, "backend health check failed");
                ConnectionStatus::Disconnected { reason }
            }
        }
    }

    /// POST `/predict`. Every failure is folded into the returned result.
    pub fn predict(
        &self,
        fields: &[(String, String)],
        report: Option<&mut UploadedReportReference>,
    ) -> PredictionResult {
        match self.try_predict(fields, report) {
            Ok(prediction) => {
                info!(
                    stage = prediction.stage.value(),
                    confidence = prediction.confidence.value(),
                    "prediction succeeded"
                );
                PredictionResult::Success(prediction)
            }
            Err(e) => {
                warn!(kind = ?e.kind(), error = %e, "prediction failed");
                e.into_result()
            }
        }
    }

    fn try_predict(
        &self,
        fields: &[(String, String)],
        report: Option<&mut UploadedReportReference>,
    ) -> Result<Prediction, PredictError> {
        let url = self.url(PREDICT_PATH);
        let (content_type, body) = encode_request(fields, report)?;

        info!(
            url = %url,
            field_count = fields.len(),
            body_len = body.len(),
            "sending prediction request"
        );

        let mut response = self
            .predict_agent
            .post(&url)
            .header("Content-Type", &content_type)
            .send(&body[..])?;

        let status = response.status().as_u16();
        // Error pages from proxies are not always UTF-8; keep the status either way.
        let bytes = response.body_mut().read_to_vec()?;
        let text = String::from_utf8_lossy(&bytes);

        info!(status, "prediction response received");

        if status == 200 {
            envelope::parse_success_body(status, &text)
        } else {
            Err(envelope::parse_error_body(status, &text))
        }
    }
}

impl PredictionService for PredictionClient {
    fn check_connection(&self) -> ConnectionStatus {
        PredictionClient::check_connection(self)
    }

    fn predict(
        &self,
        fields: &[(String, String)],
        report: Option<&mut UploadedReportReference>,
    ) -> PredictionResult {
        PredictionClient::predict(self, fields, report)
    }
}

/// Build the multipart body. The report cursor is rewound before reading
/// so a previously consumed reference is still sent whole.
pub fn encode_request(
    fields: &[(String, String)],
    report: Option<&mut UploadedReportReference>,
) -> Result<(String, Vec<u8>), PredictError> {
    let mut form = MultipartForm::new();
    for (name, value) in fields {
        form.text(name, value);
    }
    if let Some(report) = report {
        let payload = report.read_payload()?;
        form.file(REPORT_FIELD, report.name(), report.content_type(), &payload);
    }
    let content_type = form.content_type();
    Ok((content_type, form.finish()))
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}
