use std::future::Future;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use crate::error::VisionError;

/// One call to the vision API, with the images and the fixed parameters it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum VisionRequest {
    CompareFaces {
        source: Vec<u8>,
        target: Vec<u8>,
        similarity_threshold: f64,
    },
    RecognizeCelebrities {
        image: Vec<u8>,
    },
    DetectFaces {
        image: Vec<u8>,
        attributes: Vec<String>,
    },
    DetectLabels {
        image: Vec<u8>,
        max_labels: u32,
    },
    DetectModerationLabels {
        image: Vec<u8>,
    },
}

fn image_field(bytes: &[u8]) -> Value {
    json!({ "Bytes": STANDARD.encode(bytes) })
}

impl VisionRequest {
    /// operation returns the service operation name, e.g. `DetectFaces`.
    pub fn operation(&self) -> &'static str {
        match self {
            VisionRequest::CompareFaces { .. } => "CompareFaces",
            VisionRequest::RecognizeCelebrities { .. } => "RecognizeCelebrities",
            VisionRequest::DetectFaces { .. } => "DetectFaces",
            VisionRequest::DetectLabels { .. } => "DetectLabels",
            VisionRequest::DetectModerationLabels { .. } => "DetectModerationLabels",
        }
    }

    /// to_body builds the JSON request document, image bytes base64-encoded.
    pub fn to_body(&self) -> Value {
        match self {
            VisionRequest::CompareFaces { source, target, similarity_threshold } => json!({
                "SourceImage": image_field(source),
                "TargetImage": image_field(target),
                "SimilarityThreshold": similarity_threshold,
            }),
            VisionRequest::RecognizeCelebrities { image } => json!({
                "Image": image_field(image),
            }),
            VisionRequest::DetectFaces { image, attributes } => json!({
                "Image": image_field(image),
                "Attributes": attributes,
            }),
            VisionRequest::DetectLabels { image, max_labels } => json!({
                "Image": image_field(image),
                "MaxLabels": max_labels,
            }),
            VisionRequest::DetectModerationLabels { image } => json!({
                "Image": image_field(image),
            }),
        }
    }

    /// payload_size is the total number of image bytes carried by the request.
    pub fn payload_size(&self) -> usize {
        match self {
            VisionRequest::CompareFaces { source, target, .. } => source.len() + target.len(),
            VisionRequest::RecognizeCelebrities { image }
            | VisionRequest::DetectFaces { image, .. }
            | VisionRequest::DetectLabels { image, .. }
            | VisionRequest::DetectModerationLabels { image } => image.len(),
        }
    }
}

/// VisionClient is the boundary to the managed vision service.
///
/// Implementations return the raw response document; typed parsing happens in
/// the pipeline so the raw document can be archived verbatim first.
pub trait VisionClient {
    fn call(&self, request: &VisionRequest) -> impl Future<Output = Result<Value, VisionError>> + Send;
}
