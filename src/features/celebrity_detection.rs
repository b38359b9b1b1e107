use anyhow::Error;
use crate::config::config::CelebrityConfig;
use crate::features::{Annotations, Feature, FeatureInput, ScoredName, Summary};
use crate::helper::annotator::AnnotationRequest;
use crate::modules::response::RecognizeCelebritiesResponse;
use crate::modules::vision_client::VisionRequest;
use crate::utils::coordinate::map_box;

#[derive(Debug, Clone)]
pub struct CelebrityDetection {
    config: CelebrityConfig,
}

impl CelebrityDetection {
    pub fn new(config: CelebrityConfig) -> Self {
        CelebrityDetection { config }
    }
}

impl Feature for CelebrityDetection {
    type Response = RecognizeCelebritiesResponse;

    fn name(&self) -> &'static str {
        "detect-celebrities"
    }

    fn request(&self, input: &FeatureInput) -> Result<VisionRequest, Error> {
        Ok(VisionRequest::RecognizeCelebrities { image: input.image.clone() })
    }

    fn annotate(&self, response: &RecognizeCelebritiesResponse, width: i32, height: i32) -> Annotations {
        let mut requests = Vec::with_capacity(response.celebrity_faces.len());
        let mut celebrities = Vec::with_capacity(response.celebrity_faces.len());

        for celebrity in &response.celebrity_faces {
            // an entry without a name has nothing to caption or report
            let name = match &celebrity.name {
                Some(name) => name,
                None => continue,
            };

            let bbox = celebrity.face.as_ref().and_then(|face| face.bounding_box.as_ref());
            if let Some(bbox) = bbox {
                requests.push(AnnotationRequest::captioned_rectangle(
                    map_box(bbox, width, height),
                    name.clone(),
                    self.config.box_style,
                    self.config.caption_style,
                ));
            }

            // every captioned box has a matching summary line
            celebrities.push(ScoredName::new(name.clone(), celebrity.match_confidence));
        }

        Annotations { requests, summary: Summary::Celebrities(celebrities) }
    }
}
