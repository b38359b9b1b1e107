//! Per-feature rules that turn one typed response into drawing requests and a summary.

pub mod celebrity_detection;
pub mod face_comparison;
pub mod face_detection;
pub mod label_detection;
pub mod moderation_detection;

use std::fmt;
use anyhow::Error;
use serde::de::DeserializeOwned;
use crate::config::config::PointStyle;
use crate::helper::annotator::AnnotationRequest;
use crate::modules::response::Landmark;
use crate::modules::vision_client::VisionRequest;
use crate::utils::coordinate::map_point;
use crate::utils::utils::format_score;

pub use celebrity_detection::CelebrityDetection;
pub use face_comparison::FaceComparison;
pub use face_detection::FaceDetection;
pub use label_detection::LabelDetection;
pub use moderation_detection::ModerationDetection;

/// Uploaded bytes for one invocation.
///
/// `image` is always the picture that gets decoded and drawn on. `reference`
/// is only used by face comparison, where it holds the source face.
#[derive(Debug, Clone, Default)]
pub struct FeatureInput {
    pub image: Vec<u8>,
    pub reference: Option<Vec<u8>>,
}

impl FeatureInput {
    pub fn new(image: Vec<u8>) -> Self {
        FeatureInput { image, reference: None }
    }

    pub fn with_reference(image: Vec<u8>, reference: Vec<u8>) -> Self {
        FeatureInput { image, reference: Some(reference) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredName {
    pub name: String,
    /// left out of the rendered line when the service did not report one
    pub confidence: Option<f64>,
}

impl ScoredName {
    pub fn new(name: impl Into<String>, confidence: Option<f64>) -> Self {
        ScoredName { name: name.into(), confidence }
    }

    fn render(&self, separator: &str, unit: &str) -> String {
        match self.confidence {
            Some(confidence) => format!("{}{separator}{}{unit}", self.name, format_score(confidence)),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// the annotated image is the whole result
    None,
    Celebrities(Vec<ScoredName>),
    /// the response held no face at all
    NoFaces,
    /// ordered (attribute, value) pairs of the first detected face, possibly empty
    FaceAttributes(Vec<(String, String)>),
    ObjectCount(usize),
    Moderation(Vec<ScoredName>),
}

impl Summary {
    /// is_none_found reports the explicit "nothing detected" states.
    pub fn is_none_found(&self) -> bool {
        match self {
            Summary::None => false,
            Summary::Celebrities(celebrities) => celebrities.is_empty(),
            Summary::NoFaces => true,
            Summary::FaceAttributes(_) => false,
            Summary::ObjectCount(count) => *count == 0,
            Summary::Moderation(labels) => labels.is_empty(),
        }
    }

    /// lines renders the summary the way it is shown next to the image.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Summary::None => vec![],
            Summary::Celebrities(celebrities) if celebrities.is_empty() => {
                vec!["No celebrities detected".to_string()]
            }
            Summary::Celebrities(celebrities) => celebrities.iter().map(|c| c.render(" - ", "%")).collect(),
            Summary::NoFaces => vec!["No faces detected".to_string()],
            Summary::FaceAttributes(attributes) => attributes
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect(),
            Summary::ObjectCount(count) => vec![format!("Objects detected: {count}")],
            Summary::Moderation(labels) if labels.is_empty() => vec!["Safe Image".to_string()],
            Summary::Moderation(labels) => labels.iter().map(|l| l.render(" : ", "")).collect(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotations {
    pub requests: Vec<AnnotationRequest>,
    pub summary: Summary,
}

/// Feature is the strategy plugged into the annotation pipeline.
pub trait Feature {
    type Response: DeserializeOwned;

    fn name(&self) -> &'static str;

    /// request builds the API call for the uploaded bytes.
    fn request(&self, input: &FeatureInput) -> Result<VisionRequest, Error>;

    /// annotate selects what to draw and what to report from a parsed response.
    fn annotate(&self, response: &Self::Response, width: i32, height: i32) -> Annotations;
}

/// landmark_markers maps the recognized landmarks of a face to point markers.
pub(crate) fn landmark_markers(landmarks: &[Landmark], width: i32, height: i32, style: PointStyle) -> Vec<AnnotationRequest> {
    landmarks
        .iter()
        .filter_map(Landmark::recognized)
        .map(|(_, point)| AnnotationRequest::point(map_point(&point, width, height), style))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::config::config::{Bgr, PointStyle};
    use crate::features::{landmark_markers, ScoredName, Summary};
    use crate::helper::annotator::AnnotationRequest;
    use crate::modules::response::Landmark;
    use crate::utils::coordinate::PixelPoint;

    fn landmark(kind: &str, x: f64, y: f64) -> Landmark {
        Landmark { kind: Some(kind.to_string()), x: Some(x), y: Some(y) }
    }

    #[test]
    fn test_landmark_markers_skip_unrecognized() {
        let style = PointStyle { color: Bgr::GREEN, radius: 5 };
        let landmarks = vec![
            landmark("eyeLeft", 0.25, 0.5),
            landmark("leftEyeBrowLeft", 0.2, 0.4),
            Landmark { kind: None, x: Some(0.1), y: Some(0.1) },
            landmark("mouthDown", 0.5, 0.75),
        ];
        let markers = landmark_markers(&landmarks, 200, 100, style);
        assert_eq!(markers, vec![
            AnnotationRequest::point(PixelPoint { x: 50, y: 50 }, style),
            AnnotationRequest::point(PixelPoint { x: 100, y: 75 }, style),
        ]);
    }

    #[test]
    fn test_summary_lines() {
        assert!(Summary::None.lines().is_empty());
        assert_eq!(Summary::ObjectCount(3).lines(), vec!["Objects detected: 3"]);
        assert_eq!(
            Summary::Celebrities(vec![ScoredName::new("Jeff Bezos", Some(99.5))]).to_string(),
            "Jeff Bezos - 99.50%"
        );
        assert_eq!(
            Summary::Celebrities(vec![ScoredName::new("Jeff Bezos", None), ScoredName::new("A", Some(90.0))]).lines(),
            vec!["Jeff Bezos", "A - 90.00%"]
        );
        assert_eq!(
            Summary::FaceAttributes(vec![("Gender".to_string(), "Male".to_string())]).lines(),
            vec!["Gender: Male"]
        );
        assert_eq!(Summary::NoFaces.lines(), vec!["No faces detected"]);
        assert!(Summary::FaceAttributes(vec![]).lines().is_empty());
    }

    #[test]
    fn test_summary_none_found_states() {
        assert!(Summary::Moderation(vec![]).is_none_found());
        assert!(Summary::Celebrities(vec![]).is_none_found());
        assert!(Summary::ObjectCount(0).is_none_found());
        assert!(!Summary::None.is_none_found());
        assert!(!Summary::ObjectCount(1).is_none_found());
        assert!(Summary::NoFaces.is_none_found());
        // a face without reported attributes is still a detected face
        assert!(!Summary::FaceAttributes(vec![]).is_none_found());
    }
}
