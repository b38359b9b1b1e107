use anyhow::Error;
use crate::features::{Annotations, Feature, FeatureInput, ScoredName, Summary};
use crate::modules::response::DetectModerationLabelsResponse;
use crate::modules::vision_client::VisionRequest;

/// Reports moderation labels as text; nothing is drawn on the image.
#[derive(Debug, Clone, Default)]
pub struct ModerationDetection;

impl ModerationDetection {
    pub fn new() -> Self {
        ModerationDetection
    }
}

impl Feature for ModerationDetection {
    type Response = DetectModerationLabelsResponse;

    fn name(&self) -> &'static str {
        "detect-moderation-labels"
    }

    fn request(&self, input: &FeatureInput) -> Result<VisionRequest, Error> {
        Ok(VisionRequest::DetectModerationLabels { image: input.image.clone() })
    }

    fn annotate(&self, response: &DetectModerationLabelsResponse, _width: i32, _height: i32) -> Annotations {
        let labels = response
            .moderation_labels
            .iter()
            .filter_map(|label| {
                let name = label.name.as_ref()?;
                Some(ScoredName::new(name.clone(), label.confidence))
            })
            .collect();

        Annotations { requests: vec![], summary: Summary::Moderation(labels) }
    }
}
