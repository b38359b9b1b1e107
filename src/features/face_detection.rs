use anyhow::Error;
use crate::config::config::FaceDetectionConfig;
use crate::features::{landmark_markers, Annotations, Feature, FeatureInput, Summary};
use crate::helper::annotator::AnnotationRequest;
use crate::modules::response::{Attribute, DetectFacesResponse, FaceDetail};
use crate::modules::vision_client::VisionRequest;
use crate::utils::coordinate::map_box;

/// Annotates the first detected face only; further faces in the response are ignored.
#[derive(Debug, Clone)]
pub struct FaceDetection {
    config: FaceDetectionConfig,
}

impl FaceDetection {
    pub fn new(config: FaceDetectionConfig) -> Self {
        FaceDetection { config }
    }
}

fn push_flag(attributes: &mut Vec<(String, String)>, name: &str, flag: &Option<Attribute<bool>>) {
    if let Some(value) = flag.as_ref().and_then(|a| a.value) {
        attributes.push((name.to_string(), value.to_string()));
    }
}

/// face_attributes lists the reported attributes of one face in display order.
/// Attributes missing from the response are left out.
fn face_attributes(face: &FaceDetail) -> Vec<(String, String)> {
    let mut attributes = Vec::with_capacity(7);

    if let Some(age) = &face.age_range {
        if let (Some(low), Some(high)) = (age.low, age.high) {
            attributes.push(("Age Range".to_string(), format!("{low} to {high} years")));
        }
    }
    if let Some(gender) = face.gender.as_ref().and_then(|g| g.value.clone()) {
        attributes.push(("Gender".to_string(), gender));
    }
    push_flag(&mut attributes, "Beard", &face.beard);
    push_flag(&mut attributes, "Mustache", &face.mustache);
    push_flag(&mut attributes, "Smile", &face.smile);
    push_flag(&mut attributes, "Eyeglasses", &face.eyeglasses);
    if let Some(emotion) = face.emotions.first().and_then(|e| e.kind.clone()) {
        attributes.push(("Emotion".to_string(), emotion));
    }
    attributes
}

impl Feature for FaceDetection {
    type Response = DetectFacesResponse;

    fn name(&self) -> &'static str {
        "detect-faces"
    }

    fn request(&self, input: &FeatureInput) -> Result<VisionRequest, Error> {
        Ok(VisionRequest::DetectFaces {
            image: input.image.clone(),
            attributes: self.config.attributes.clone(),
        })
    }

    fn annotate(&self, response: &DetectFacesResponse, width: i32, height: i32) -> Annotations {
        let face = match response.face_details.first() {
            Some(face) => face,
            None => return Annotations { requests: vec![], summary: Summary::NoFaces },
        };

        let mut requests = Vec::new();
        if let Some(bbox) = &face.bounding_box {
            requests.push(AnnotationRequest::rectangle(map_box(bbox, width, height), self.config.box_style));
        }
        requests.extend(landmark_markers(&face.landmarks, width, height, self.config.landmark_style));

        Annotations { requests, summary: Summary::FaceAttributes(face_attributes(face)) }
    }
}
