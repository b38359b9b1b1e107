use anyhow::Error;
use crate::config::config::LabelDetectionConfig;
use crate::features::{Annotations, Feature, FeatureInput, Summary};
use crate::helper::annotator::AnnotationRequest;
use crate::modules::response::DetectLabelsResponse;
use crate::modules::vision_client::VisionRequest;
use crate::utils::coordinate::map_box;
use crate::utils::utils::format_score;

/// Boxes every instance of the allow-listed labels and counts them.
#[derive(Debug, Clone)]
pub struct LabelDetection {
    config: LabelDetectionConfig,
}

impl LabelDetection {
    pub fn new(config: LabelDetectionConfig) -> Self {
        LabelDetection { config }
    }

    fn is_allowed(&self, name: &str) -> bool {
        self.config.allowed_labels.iter().any(|allowed| allowed == name)
    }
}

impl Feature for LabelDetection {
    type Response = DetectLabelsResponse;

    fn name(&self) -> &'static str {
        "detect-labels"
    }

    fn request(&self, input: &FeatureInput) -> Result<VisionRequest, Error> {
        Ok(VisionRequest::DetectLabels {
            image: input.image.clone(),
            max_labels: self.config.max_labels,
        })
    }

    fn annotate(&self, response: &DetectLabelsResponse, width: i32, height: i32) -> Annotations {
        let mut requests = Vec::new();

        for label in &response.labels {
            let name = match &label.name {
                Some(name) if self.is_allowed(name) => name,
                _ => continue,
            };
            let caption = match label.confidence {
                Some(confidence) => format!("{} {}", name, format_score(confidence)),
                None => name.clone(),
            };

            for bbox in label.instances.iter().filter_map(|i| i.bounding_box.as_ref()) {
                requests.push(AnnotationRequest::captioned_rectangle(
                    map_box(bbox, width, height),
                    caption.clone(),
                    self.config.box_style,
                    self.config.caption_style,
                ));
            }
        }

        let drawn = requests.len();
        Annotations { requests, summary: Summary::ObjectCount(drawn) }
    }
}
