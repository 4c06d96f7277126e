use crate::domain::model::{AnalysisRecord, AnalysisResult, UploadFile, UploadPair};
use crate::domain::ports::AnalysisBackend;
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tokio::sync::Mutex;
use url::Url;

/// HTTP adapter for the analysis service. Holds a single in-flight slot so
/// "at most one concurrent submission" is enforced here rather than left to a
/// disabled button.
#[derive(Debug)]
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: Url,
    in_flight: Mutex<()>,
}

impl HttpAnalysisClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            in_flight: Mutex::new(()),
        }
    }

    pub fn from_endpoint(endpoint: &str) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| DashboardError::InvalidConfigValueError {
                field: "analysis_endpoint".to_string(),
                value: endpoint.to_string(),
                reason: format!("Invalid URL format: {}", e),
            })?;
        Ok(Self::new(endpoint))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn part_for(file: &UploadFile) -> Result<Part> {
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(file.content_type.as_deref().unwrap_or("text/csv"))?;
    Ok(part)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Typed decode of the response envelope: `rfm_analysis` must be present and
/// an array of records, anything else is `MalformedResult`. The service
/// reports its own failures as `{"error": "..."}`; that message is folded
/// into the diagnostic. `summary` is optional extra context.
pub(crate) fn decode_envelope(mut payload: serde_json::Value) -> Result<AnalysisResult> {
    if let Some(message) = payload.get("error").and_then(|v| v.as_str()) {
        return Err(DashboardError::MalformedResult {
            reason: format!("service reported an error: {}", message),
        });
    }

    let records: Vec<AnalysisRecord> = match payload.get_mut("rfm_analysis") {
        Some(field) if field.is_array() => {
            serde_json::from_value(field.take()).map_err(|e| DashboardError::MalformedResult {
                reason: format!("rfm_analysis records did not decode: {}", e),
            })?
        }
        Some(field) => {
            return Err(DashboardError::MalformedResult {
                reason: format!("rfm_analysis is not a sequence (got {})", json_kind(field)),
            })
        }
        None => {
            return Err(DashboardError::MalformedResult {
                reason: "response has no rfm_analysis field".to_string(),
            })
        }
    };

    let summary = payload
        .get_mut("summary")
        .map(serde_json::Value::take)
        .and_then(|v| serde_json::from_value(v).ok());

    Ok(AnalysisResult { records, summary })
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisClient {
    async fn submit(&self, pair: &UploadPair) -> Result<AnalysisResult> {
        let _slot = self
            .in_flight
            .try_lock()
            .map_err(|_| DashboardError::SubmissionInFlight)?;

        let form = Form::new()
            .part("transactions_file", part_for(&pair.transactions)?)
            .part("customers_file", part_for(&pair.customers)?);

        tracing::debug!(
            "POST {} ({} + {})",
            self.endpoint,
            pair.transactions.name,
            pair.customers.name
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        tracing::debug!("Analysis response status: {}", response.status());

        // The service answers 200 even for its own failures and signals them
        // in the body, so decode first and let non-JSON bodies fail there.
        let payload: serde_json::Value = response.json().await?;
        decode_envelope(payload)
    }
}
