use std::path::Path;

/// Upload types accepted by every feature.
pub const FILE_TYPES: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn is_supported_upload(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => FILE_TYPES.iter().any(|t| t.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// format_score renders a 0-100 provider score with two decimals.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use crate::utils::utils::{format_score, is_supported_upload};

    #[test]
    fn test_is_supported_upload() {
        assert!(is_supported_upload(Path::new("face.jpg")));
        assert!(is_supported_upload(Path::new("dir/face.JPEG")));
        assert!(is_supported_upload(Path::new("street.png")));
        assert!(!is_supported_upload(Path::new("anim.gif")));
        assert!(!is_supported_upload(Path::new("no_extension")));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(91.234), "91.23");
        assert_eq!(format_score(99.999), "100.00");
        assert_eq!(format_score(5.0), "5.00");
    }
}
