use anyhow::Error;
use opencv::core::{Mat, MatTraitConst, Size, Vector};
use opencv::imgcodecs::{imdecode, imencode, IMREAD_COLOR};
use opencv::imgproc::{resize, INTER_AREA};

/// decode_image turns uploaded bytes into a 3-channel BGR matrix.
///
/// The channel order is left as OpenCV produces it; the display layer is told
/// about BGR explicitly instead of converting here.
///
/// # Arguments
/// * `im_bytes` - raw jpg/png bytes
///
/// # Returns
/// * `Result<Mat, Error>`
pub fn decode_image(im_bytes: &[u8]) -> Result<Mat, Error> {
    if im_bytes.is_empty() {
        return Err(Error::msg("image - input buffer is empty"))
    }

    let buffer = Vector::<u8>::from_slice(im_bytes);
    let img = match imdecode(&buffer, IMREAD_COLOR) {
        Ok(img) => img,
        Err(e) => {
            return Err(Error::from(e))
        }
    };

    // imdecode signals unsupported or corrupt data with an empty matrix
    if img.empty() {
        return Err(Error::msg("image - unable to decode input buffer"))
    }
    Ok(img)
}

/// encode_image serializes a matrix with the codec picked by `ext` (".png", ".jpg").
pub fn encode_image(img: &Mat, ext: &str) -> Result<Vec<u8>, Error> {
    let mut buffer = Vector::<u8>::new();
    let encoded = imencode(ext, img, &mut buffer, &Vector::new())?;
    if !encoded {
        return Err(Error::msg(format!("image - unable to encode image as {ext}")))
    }
    Ok(buffer.to_vec())
}

/// image_size returns `(width, height)` in pixels.
pub fn image_size(img: &Mat) -> Result<(i32, i32), Error> {
    let size = img.size()?;
    Ok((size.width, size.height))
}

/// resize_to_width scales the image to a fixed display width, keeping its aspect ratio.
///
/// # Arguments
/// * `img` - OpenCV matrix
/// * `width` - target width in pixels
///
/// # Returns
/// * `Result<Mat, Error>`
pub fn resize_to_width(img: &Mat, width: i32) -> Result<Mat, Error> {
    if width <= 0 {
        return Err(Error::msg(format!("image - display width must be positive, got {width}")))
    }
    let (img_w, img_h) = image_size(img)?;
    if img_w == 0 || img_h == 0 {
        return Err(Error::msg("image - cannot resize an empty image"))
    }
    if img_w == width {
        return Ok(img.try_clone()?)
    }

    let height = ((img_h as f64 * width as f64 / img_w as f64).round() as i32).max(1);
    let mut img_resized = Mat::default();
    resize(
        img,
        &mut img_resized,
        Size::new(width, height),
        0.0,
        0.0,
        INTER_AREA,
    )?;
    Ok(img_resized)
}
