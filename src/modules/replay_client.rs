use std::fs;
use std::path::PathBuf;
use log::debug;
use serde_json::Value;
use crate::error::VisionError;
use crate::modules::vision_client::{VisionClient, VisionRequest};

/// ReplayClient answers every request with a previously archived response.
///
/// Used to re-render a response offline without calling the service again.
#[derive(Debug, Clone)]
pub struct ReplayClient {
    pub path: PathBuf,
}

impl ReplayClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ReplayClient { path: path.into() }
    }
}

impl VisionClient for ReplayClient {
    async fn call(&self, request: &VisionRequest) -> Result<Value, VisionError> {
        debug!("replay_client - answering {} from {}", request.operation(), self.path.display());
        let content = fs::read_to_string(&self.path)?;
        let body: Value = serde_json::from_str(&content)?;
        Ok(body)
    }
}
