use serde::{Deserialize, Serialize};

/// Rectangle expressed as fractions of the image width and height.
///
/// Values come straight from the API response. `left + width <= 1` is not
/// guaranteed and nothing here enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    #[serde(rename = "Left", default)]
    pub left: f64,
    #[serde(rename = "Top", default)]
    pub top: f64,
    #[serde(rename = "Width", default)]
    pub width: f64,
    #[serde(rename = "Height", default)]
    pub height: f64,
}

/// Landmark position as fractions of the image width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    /// bottom_right returns the corner opposite to (x, y), saturating at the i32 range.
    pub fn bottom_right(&self) -> PixelPoint {
        PixelPoint {
            x: self.x.saturating_add(self.w),
            y: self.y.saturating_add(self.h),
        }
    }

    pub fn top_left(&self) -> PixelPoint {
        PixelPoint { x: self.x, y: self.y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

/// scale_truncated multiplies a normalized value by a pixel extent and drops the fraction.
///
/// `as` truncates toward zero and saturates, so NaN maps to 0 and huge values
/// to the i32 bounds instead of wrapping.
fn scale_truncated(value: f64, extent: i32) -> i32 {
    (value * extent as f64) as i32
}

/// map_box converts a normalized bounding box into pixel space.
///
/// # Arguments
/// * `bbox` - &NormalizedBox
/// * `width` - image width in pixels
/// * `height` - image height in pixels
///
/// # Returns
/// * `PixelRect`
pub fn map_box(bbox: &NormalizedBox, width: i32, height: i32) -> PixelRect {
    PixelRect {
        x: scale_truncated(bbox.left, width),
        y: scale_truncated(bbox.top, height),
        w: scale_truncated(bbox.width, width),
        h: scale_truncated(bbox.height, height),
    }
}

/// map_point converts a normalized landmark position into pixel space.
pub fn map_point(point: &NormalizedPoint, width: i32, height: i32) -> PixelPoint {
    PixelPoint {
        x: scale_truncated(point.x, width),
        y: scale_truncated(point.y, height),
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::coordinate::{map_box, map_point, NormalizedBox, NormalizedPoint, PixelPoint, PixelRect};

    #[test]
    fn test_map_box_truncates() {
        let bbox = NormalizedBox { left: 0.2599, top: 0.5, width: 0.3333, height: 0.999 };
        let rect = map_box(&bbox, 100, 10);
        assert_eq!(rect, PixelRect { x: 25, y: 5, w: 33, h: 9 });
    }

    #[test]
    fn test_map_box_stays_inside_for_unit_inputs() {
        let steps = [0.0f64, 0.1, 0.25, 0.5, 0.73, 0.999, 1.0];
        for &(width, height) in &[(1, 1), (640, 480), (1921, 1079), (3, 7000)] {
            for &left in &steps {
                for &top in &steps {
                    let bbox = NormalizedBox { left, top, width: 1.0 - left, height: 1.0 - top };
                    let rect = map_box(&bbox, width, height);
                    assert!(rect.x >= 0 && rect.x <= width, "{:?} {}x{}", bbox, width, height);
                    assert!(rect.y >= 0 && rect.y <= height, "{:?} {}x{}", bbox, width, height);
                }
            }
        }
    }

    #[test]
    fn test_map_box_is_deterministic() {
        let bbox = NormalizedBox { left: 0.123, top: 0.456, width: 0.2, height: 0.3 };
        let first = map_box(&bbox, 1280, 720);
        for _ in 0..10 {
            assert_eq!(map_box(&bbox, 1280, 720), first);
        }
    }

    #[test]
    fn test_map_box_propagates_out_of_range_values() {
        let bbox = NormalizedBox { left: -0.1, top: 1.5, width: 2.0, height: 0.1 };
        let rect = map_box(&bbox, 100, 100);
        assert_eq!(rect, PixelRect { x: -10, y: 150, w: 200, h: 10 });
    }

    #[test]
    fn test_map_box_saturates_instead_of_wrapping() {
        let bbox = NormalizedBox { left: f64::MAX, top: f64::NAN, width: 1.0, height: 1.0 };
        let rect = map_box(&bbox, 100, 100);
        assert_eq!(rect.x, i32::MAX);
        assert_eq!(rect.y, 0);
        assert_eq!(rect.bottom_right(), PixelPoint { x: i32::MAX, y: 100 });
    }

    #[test]
    fn test_map_point() {
        let point = NormalizedPoint { x: 0.51, y: 0.249 };
        assert_eq!(map_point(&point, 200, 100), PixelPoint { x: 102, y: 24 });
    }

    #[test]
    fn test_deserialize_bounding_box() {
        let bbox: NormalizedBox = serde_json::from_str(
            r#"{"Width":0.25,"Height":0.5,"Left":0.1,"Top":0.2}"#
        ).unwrap();
        assert_eq!(bbox, NormalizedBox { left: 0.1, top: 0.2, width: 0.25, height: 0.5 });
    }
}
