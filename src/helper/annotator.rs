use log::warn;
use opencv::core::{Mat, Point, Scalar};
use opencv::imgproc::{circle, put_text, rectangle_points, FILLED, FONT_HERSHEY_COMPLEX, LINE_8};
use crate::config::config::{Bgr, CaptionStyle, PointStyle, RectStyle};
use crate::utils::coordinate::{PixelPoint, PixelRect};

#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub style: CaptionStyle,
}

/// One shape to draw, built from a single response entry and consumed right away.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationRequest {
    Rectangle {
        rect: PixelRect,
        caption: Option<Caption>,
        style: RectStyle,
    },
    Point {
        point: PixelPoint,
        style: PointStyle,
    },
}

impl AnnotationRequest {
    pub fn rectangle(rect: PixelRect, style: RectStyle) -> Self {
        AnnotationRequest::Rectangle { rect, caption: None, style }
    }

    pub fn captioned_rectangle(rect: PixelRect, text: impl Into<String>, style: RectStyle, caption_style: CaptionStyle) -> Self {
        AnnotationRequest::Rectangle {
            rect,
            caption: Some(Caption { text: text.into(), style: caption_style }),
            style,
        }
    }

    pub fn point(point: PixelPoint, style: PointStyle) -> Self {
        AnnotationRequest::Point { point, style }
    }

    #[cfg(test)]
    pub(crate) fn is_rectangle(&self) -> bool {
        matches!(self, AnnotationRequest::Rectangle { .. })
    }

    #[cfg(test)]
    pub(crate) fn caption_text(&self) -> Option<&str> {
        match self {
            AnnotationRequest::Rectangle { caption: Some(caption), .. } => Some(caption.text.as_str()),
            _ => None,
        }
    }
}

fn to_scalar(color: Bgr) -> Scalar {
    Scalar::new(color.0 as f64, color.1 as f64, color.2 as f64, 0.0)
}

fn to_cv_point(point: PixelPoint) -> Point {
    Point::new(point.x, point.y)
}

fn try_draw(image: &mut Mat, request: &AnnotationRequest) -> opencv::Result<()> {
    match request {
        AnnotationRequest::Rectangle { rect, caption, style } => {
            rectangle_points(
                image,
                to_cv_point(rect.top_left()),
                to_cv_point(rect.bottom_right()),
                to_scalar(style.color),
                style.thickness,
                LINE_8,
                0,
            )?;
            if let Some(caption) = caption {
                let origin = Point::new(rect.x, rect.y.saturating_sub(caption.style.offset));
                put_text(
                    image,
                    &caption.text,
                    origin,
                    FONT_HERSHEY_COMPLEX,
                    caption.style.font_scale,
                    to_scalar(caption.style.color),
                    caption.style.thickness,
                    LINE_8,
                    false,
                )?;
            }
        }
        AnnotationRequest::Point { point, style } => {
            circle(
                image,
                to_cv_point(*point),
                style.radius,
                to_scalar(style.color),
                FILLED,
                LINE_8,
                0,
            )?;
        }
    }
    Ok(())
}

/// draw renders one request onto the image in place.
///
/// Never fails: geometry outside the buffer is clipped by OpenCV, and an
/// OpenCV error only skips this request.
pub fn draw(image: &mut Mat, request: &AnnotationRequest) {
    if let Err(e) = try_draw(image, request) {
        warn!("annotator - skipped {:?}: {}", request, e);
    }
}

/// draw_all renders requests in list order, later ones over earlier ones.
pub fn draw_all(image: &mut Mat, requests: &[AnnotationRequest]) {
    for request in requests {
        draw(image, request);
    }
}
