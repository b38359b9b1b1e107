use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use anyhow::Error;
use serde::{Deserialize, Serialize};

pub const ENDPOINT_ENV: &str = "VISION_ENDPOINT";

/// BGR color, the channel order of the decoded images.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bgr(pub u8, pub u8, pub u8);

impl Bgr {
    pub const RED: Bgr = Bgr(0, 0, 255);
    pub const GREEN: Bgr = Bgr(0, 255, 0);
    pub const WHITE: Bgr = Bgr(255, 255, 255);
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    pub region: String,
    /// seconds
    pub timeout: u64,
    pub headers: BTreeMap<String, String>,
}

impl ClientConfig {
    pub(crate) fn new() -> Self {
        ClientConfig {
            endpoint: "https://rekognition.us-east-2.amazonaws.com".to_string(),
            region: "us-east-2".to_string(),
            timeout: 30,
            headers: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RectStyle {
    pub color: Bgr,
    pub thickness: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointStyle {
    pub color: Bgr,
    pub radius: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptionStyle {
    pub color: Bgr,
    pub font_scale: f64,
    pub thickness: i32,
    /// pixels between the caption baseline and the rectangle's top edge
    pub offset: i32,
}

impl CaptionStyle {
    pub(crate) fn new() -> Self {
        CaptionStyle {
            color: Bgr::RED,
            font_scale: 1.0,
            thickness: 2,
            offset: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaceComparisonConfig {
    pub similarity_threshold: f64,
    pub box_style: RectStyle,
    pub landmark_style: PointStyle,
}

impl FaceComparisonConfig {
    pub(crate) fn new() -> Self {
        FaceComparisonConfig {
            similarity_threshold: 80.0,
            box_style: RectStyle { color: Bgr::RED, thickness: 5 },
            landmark_style: PointStyle { color: Bgr::GREEN, radius: 5 },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CelebrityConfig {
    pub box_style: RectStyle,
    pub caption_style: CaptionStyle,
}

impl CelebrityConfig {
    pub(crate) fn new() -> Self {
        CelebrityConfig {
            box_style: RectStyle { color: Bgr::RED, thickness: 3 },
            caption_style: CaptionStyle::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaceDetectionConfig {
    pub attributes: Vec<String>,
    pub box_style: RectStyle,
    pub landmark_style: PointStyle,
}

impl FaceDetectionConfig {
    pub(crate) fn new() -> Self {
        FaceDetectionConfig {
            attributes: vec!["ALL".to_string()],
            box_style: RectStyle { color: Bgr::RED, thickness: 5 },
            landmark_style: PointStyle { color: Bgr::WHITE, radius: 10 },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelDetectionConfig {
    pub max_labels: u32,
    pub allowed_labels: Vec<String>,
    pub box_style: RectStyle,
    pub caption_style: CaptionStyle,
}

impl LabelDetectionConfig {
    pub(crate) fn new() -> Self {
        LabelDetectionConfig {
            max_labels: 10,
            allowed_labels: vec!["Car".to_string(), "Road Sign".to_string()],
            box_style: RectStyle { color: Bgr::RED, thickness: 5 },
            caption_style: CaptionStyle::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: i32,
    pub archive_path: String,
}

impl DisplayConfig {
    pub(crate) fn new() -> Self {
        DisplayConfig {
            width: 640,
            archive_path: "response.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub display: DisplayConfig,
    pub compare_faces: FaceComparisonConfig,
    pub celebrities: CelebrityConfig,
    pub detect_faces: FaceDetectionConfig,
    pub detect_labels: LabelDetectionConfig,
}

impl AppConfig {
    /// load reads a JSON config file if one is given, falling back to defaults
    /// for anything it leaves out. `VISION_ENDPOINT` overrides the client endpoint.
    ///
    /// # Arguments
    /// * `path` - Option<&Path>
    ///
    /// # Returns
    /// * `Result<AppConfig, Error>`
    pub fn load(path: Option<&Path>) -> Result<AppConfig, Error> {
        let mut config = match path {
            None => AppConfig::default(),
            Some(path) => {
                let content = match fs::read_to_string(path) {
                    Ok(content) => content,
                    Err(e) => {
                        return Err(Error::msg(format!("config - cannot read {}: {e}", path.display())))
                    }
                };
                serde_json::from_str::<AppConfig>(&content)?
            }
        };

        if let Ok(endpoint) = env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.client.endpoint = endpoint;
            }
        }
        Ok(config)
    }
}

macro_rules! default_from_new {
    ($($config:ty),*) => {
        $(impl Default for $config {
            fn default() -> Self {
                <$config>::new()
            }
        })*
    };
}

default_from_new!(
    ClientConfig,
    CaptionStyle,
    FaceComparisonConfig,
    CelebrityConfig,
    FaceDetectionConfig,
    LabelDetectionConfig,
    DisplayConfig
);
