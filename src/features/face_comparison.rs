use anyhow::Error;
use crate::config::config::FaceComparisonConfig;
use crate::features::{landmark_markers, Annotations, Feature, FeatureInput, Summary};
use crate::helper::annotator::AnnotationRequest;
use crate::modules::response::CompareFacesResponse;
use crate::modules::vision_client::VisionRequest;
use crate::utils::coordinate::map_box;

/// Draws every matched face of the target image with its landmarks.
///
/// Matches below the similarity threshold are filtered by the service through
/// the request parameter, not here.
#[derive(Debug, Clone)]
pub struct FaceComparison {
    config: FaceComparisonConfig,
}

impl FaceComparison {
    pub fn new(config: FaceComparisonConfig) -> Self {
        FaceComparison { config }
    }
}

impl Feature for FaceComparison {
    type Response = CompareFacesResponse;

    fn name(&self) -> &'static str {
        "compare-faces"
    }

    fn request(&self, input: &FeatureInput) -> Result<VisionRequest, Error> {
        let source = match &input.reference {
            Some(source) => source.clone(),
            None => {
                return Err(Error::msg("face_comparison - a source image is required"))
            }
        };
        Ok(VisionRequest::CompareFaces {
            source,
            target: input.image.clone(),
            similarity_threshold: self.config.similarity_threshold,
        })
    }

    fn annotate(&self, response: &CompareFacesResponse, width: i32, height: i32) -> Annotations {
        let mut requests = Vec::new();
        for face in response.face_matches.iter().filter_map(|m| m.face.as_ref()) {
            if let Some(bbox) = &face.bounding_box {
                requests.push(AnnotationRequest::rectangle(map_box(bbox, width, height), self.config.box_style));
            }
            requests.extend(landmark_markers(&face.landmarks, width, height, self.config.landmark_style));
        }

        Annotations { requests, summary: Summary::None }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::config::config::FaceComparisonConfig;
    use crate::features::{Feature, FeatureInput, Summary};
    use crate::features::face_comparison::FaceComparison;
    use crate::helper::annotator::AnnotationRequest;
    use crate::modules::response::{parse_response, CompareFacesResponse};
    use crate::modules::vision_client::VisionRequest;
    use crate::utils::coordinate::{PixelPoint, PixelRect};

    #[test]
    fn test_request_needs_source_image() {
        let feature = FaceComparison::new(FaceComparisonConfig::new());
        assert!(feature.request(&FeatureInput::new(vec![1])).is_err());

        let request = feature.request(&FeatureInput::with_reference(vec![2], vec![1])).unwrap();
        assert_eq!(request, VisionRequest::CompareFaces {
            source: vec![1],
            target: vec![2],
            similarity_threshold: 80.0,
        });
    }

    #[test]
    fn test_annotate_matches_and_landmarks() {
        let config = FaceComparisonConfig::new();
        let feature = FaceComparison::new(config.clone());
        let response: CompareFacesResponse = parse_response(&json!({
            "SourceImageFace": {"BoundingBox": {"Width": 0.5, "Height": 0.5, "Left": 0.0, "Top": 0.0}},
            "FaceMatches": [
                {
                    "Similarity": 99.1,
                    "Face": {
                        "BoundingBox": {"Width": 0.25, "Height": 0.5, "Left": 0.5, "Top": 0.25},
                        "Landmarks": [
                            {"Type": "eyeLeft", "X": 0.55, "Y": 0.4},
                            {"Type": "chinBottom", "X": 0.6, "Y": 0.7},
                            {"Type": "nose", "X": 0.6, "Y": 0.5}
                        ]
                    }
                },
                {"Similarity": 85.0},
                {"Similarity": 81.0, "Face": {"BoundingBox": {"Width": 0.1, "Height": 0.1, "Left": 0.1, "Top": 0.1}}}
            ],
            "UnmatchedFaces": [{"BoundingBox": {"Width": 0.1, "Height": 0.1, "Left": 0.8, "Top": 0.8}}]
        })).unwrap();

        let annotations = feature.annotate(&response, 200, 100);
        assert_eq!(annotations.summary, Summary::None);
        assert_eq!(annotations.requests, vec![
            AnnotationRequest::rectangle(PixelRect { x: 100, y: 25, w: 50, h: 50 }, config.box_style),
            AnnotationRequest::point(PixelPoint { x: 110, y: 40 }, config.landmark_style),
            AnnotationRequest::point(PixelPoint { x: 120, y: 50 }, config.landmark_style),
            AnnotationRequest::rectangle(PixelRect { x: 20, y: 10, w: 20, h: 10 }, config.box_style),
        ]);
    }

    #[test]
    fn test_annotate_no_matches() {
        let feature = FaceComparison::new(FaceComparisonConfig::new());
        let annotations = feature.annotate(&CompareFacesResponse::default(), 640, 480);
        assert!(annotations.requests.is_empty());
    }
}
