//! Typed views of the Rekognition responses the features consume.
//!
//! Field names follow the service's JSON contract. Everything is optional or
//! defaulted so a partially filled response still parses; mapping code skips
//! whatever is missing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::VisionError;
use crate::utils::coordinate::{NormalizedBox, NormalizedPoint};

/// parse_response validates a raw response against the typed shape of one operation.
pub fn parse_response<T: DeserializeOwned>(raw: &Value) -> Result<T, VisionError> {
    Ok(T::deserialize(raw)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkType {
    EyeLeft,
    EyeRight,
    Nose,
    MouthUp,
    MouthDown,
}

impl LandmarkType {
    /// from_api_name recognizes the subset of landmark types that get drawn.
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "eyeLeft" => Some(LandmarkType::EyeLeft),
            "eyeRight" => Some(LandmarkType::EyeRight),
            "nose" => Some(LandmarkType::Nose),
            "mouthUp" => Some(LandmarkType::MouthUp),
            "mouthDown" => Some(LandmarkType::MouthDown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Landmark {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Landmark {
    /// recognized returns the landmark position when its type is one of the drawn ones
    /// and both coordinates are present.
    pub fn recognized(&self) -> Option<(LandmarkType, NormalizedPoint)> {
        let kind = LandmarkType::from_api_name(self.kind.as_deref()?)?;
        Some((kind, NormalizedPoint { x: self.x?, y: self.y? }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ComparedFace {
    pub bounding_box: Option<NormalizedBox>,
    pub confidence: Option<f64>,
    pub landmarks: Vec<Landmark>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CompareFacesMatch {
    pub similarity: Option<f64>,
    pub face: Option<ComparedFace>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CompareFacesResponse {
    pub source_image_face: Option<ComparedFace>,
    pub face_matches: Vec<CompareFacesMatch>,
    pub unmatched_faces: Vec<ComparedFace>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Celebrity {
    pub name: Option<String>,
    pub id: Option<String>,
    pub match_confidence: Option<f64>,
    pub urls: Vec<String>,
    pub face: Option<ComparedFace>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RecognizeCelebritiesResponse {
    pub celebrity_faces: Vec<Celebrity>,
    pub unrecognized_faces: Vec<ComparedFace>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AgeRange {
    pub low: Option<u32>,
    pub high: Option<u32>,
}

/// Attribute reported as a value with a confidence, e.g. `{"Value": true, "Confidence": 97.1}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Attribute<T> {
    pub value: Option<T>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Emotion {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FaceDetail {
    pub bounding_box: Option<NormalizedBox>,
    pub age_range: Option<AgeRange>,
    pub gender: Option<Attribute<String>>,
    pub beard: Option<Attribute<bool>>,
    pub mustache: Option<Attribute<bool>>,
    pub smile: Option<Attribute<bool>>,
    pub eyeglasses: Option<Attribute<bool>>,
    pub emotions: Vec<Emotion>,
    pub landmarks: Vec<Landmark>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetectFacesResponse {
    pub face_details: Vec<FaceDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LabelInstance {
    pub bounding_box: Option<NormalizedBox>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Label {
    pub name: Option<String>,
    pub confidence: Option<f64>,
    pub instances: Vec<LabelInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetectLabelsResponse {
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModerationLabel {
    pub name: Option<String>,
    pub confidence: Option<f64>,
    pub parent_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetectModerationLabelsResponse {
    pub moderation_labels: Vec<ModerationLabel>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::error::VisionError;
    use crate::modules::response::{
        parse_response, CompareFacesResponse, DetectFacesResponse, DetectLabelsResponse,
        DetectModerationLabelsResponse, Landmark, LandmarkType,
    };
    use crate::utils::coordinate::NormalizedPoint;

    #[test]
    fn test_parse_detect_faces_response() {
        let raw = json!({
            "FaceDetails": [{
                "BoundingBox": {"Width": 0.2, "Height": 0.3, "Left": 0.4, "Top": 0.1},
                "AgeRange": {"Low": 25, "High": 35},
                "Smile": {"Value": true, "Confidence": 92.5},
                "Gender": {"Value": "Female", "Confidence": 99.1},
                "Emotions": [{"Type": "HAPPY", "Confidence": 95.0}],
                "Landmarks": [{"Type": "eyeLeft", "X": 0.45, "Y": 0.2}],
                "Pose": {"Roll": 1.0, "Yaw": 2.0, "Pitch": 3.0}
            }],
            "ResponseMetadata": {"HTTPStatusCode": 200}
        });
        let response: DetectFacesResponse = parse_response(&raw).unwrap();
        let face = &response.face_details[0];
        assert_eq!(face.age_range.as_ref().unwrap().low, Some(25));
        assert_eq!(face.smile.as_ref().unwrap().value, Some(true));
        assert_eq!(face.gender.as_ref().unwrap().value.as_deref(), Some("Female"));
        assert!(face.beard.is_none());
        assert_eq!(face.landmarks.len(), 1);
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let response: CompareFacesResponse = parse_response(&json!({
            "FaceMatches": [{"Similarity": 99.0}, {"Face": {"Landmarks": [{"X": 0.1}]}}]
        })).unwrap();
        assert_eq!(response.face_matches.len(), 2);
        assert!(response.face_matches[0].face.is_none());
        assert!(response.face_matches[1].face.as_ref().unwrap().bounding_box.is_none());

        let empty: DetectLabelsResponse = parse_response(&json!({})).unwrap();
        assert!(empty.labels.is_empty());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let result: Result<DetectModerationLabelsResponse, VisionError> =
            parse_response(&json!({"ModerationLabels": "none"}));
        assert!(matches!(result, Err(VisionError::Parse(_))));
    }

    #[test]
    fn test_landmark_recognized() {
        let nose = Landmark { kind: Some("nose".to_string()), x: Some(0.5), y: Some(0.25) };
        assert_eq!(nose.recognized(), Some((LandmarkType::Nose, NormalizedPoint { x: 0.5, y: 0.25 })));

        let chin = Landmark { kind: Some("chinBottom".to_string()), x: Some(0.5), y: Some(0.9) };
        assert_eq!(chin.recognized(), None);

        let untyped = Landmark { kind: None, x: Some(0.5), y: Some(0.9) };
        assert_eq!(untyped.recognized(), None);

        let no_y = Landmark { kind: Some("eyeRight".to_string()), x: Some(0.5), y: None };
        assert_eq!(no_y.recognized(), None);
    }
}
