use std::time::Duration;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use crate::config::config::ClientConfig;
use crate::error::VisionError;
use crate::modules::vision_client::{VisionClient, VisionRequest};

const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const AMZ_TARGET_PREFIX: &str = "RekognitionService";

/// RekognitionClient talks the Rekognition JSON 1.1 protocol over HTTPS.
///
/// Request signing is left to the endpoint: point it at a signing proxy or a
/// local emulator, and put any static auth headers in `ClientConfig::headers`.
#[derive(Debug, Clone)]
pub struct RekognitionClient {
    http_client: Client,
    pub endpoint: String,
    pub region: String,
    pub timeout: u64,
}

impl RekognitionClient {
    pub fn new(config: ClientConfig) -> Result<Self, VisionError> {
        if config.endpoint.trim().is_empty() {
            return Err(VisionError::Config("rekognition_client - endpoint is empty".to_string()))
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| VisionError::Config(format!("invalid header name {name}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| VisionError::Config(format!("invalid value for header {name}: {e}")))?;
            headers.insert(header_name, header_value);
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .default_headers(headers)
            .build()
            .map_err(|e| VisionError::Config(e.to_string()))?;

        Ok(RekognitionClient {
            http_client,
            endpoint: config.endpoint,
            region: config.region,
            timeout: config.timeout,
        })
    }

    fn target(operation: &str) -> String {
        format!("{AMZ_TARGET_PREFIX}.{operation}")
    }
}

/// parse_error_body pulls the error code and message out of a JSON 1.1 error document.
///
/// Codes may arrive qualified (`com.amazonaws.rekognition#InvalidImageFormatException`);
/// only the part after `#` is kept.
fn parse_error_body(status: u16, body: &str) -> VisionError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|v| v.get("__type"))
        .and_then(Value::as_str)
        .map(|t| t.rsplit('#').next().unwrap_or(t).to_string())
        .unwrap_or_else(|| "UnknownError".to_string());
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("Message")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());

    VisionError::Api { status, code, message }
}

impl VisionClient for RekognitionClient {
    async fn call(&self, request: &VisionRequest) -> Result<Value, VisionError> {
        let operation = request.operation();
        debug!(
            "rekognition_client - {} to {} ({} image bytes, region {})",
            operation, self.endpoint, request.payload_size(), self.region
        );

        let response = self.http_client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .header("X-Amz-Target", Self::target(operation))
            .json(&request.to_body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = parse_error_body(status.as_u16(), &body);
            error!("rekognition_client - {} failed: {}", operation, err);
            return Err(err)
        }

        let body: Value = response.json().await?;
        debug!("rekognition_client - {} succeeded", operation);
        Ok(body)
    }
}
