use std::fs;
use std::path::PathBuf;
use anyhow::Error;
use log::debug;
use serde_json::Value;

/// ResponseArchiver keeps the last raw service response on disk.
///
/// Each save overwrites the previous document, so the file always holds the
/// response of the most recent invocation.
#[derive(Debug, Clone)]
pub struct ResponseArchiver {
    pub path: PathBuf,
}

impl ResponseArchiver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResponseArchiver { path: path.into() }
    }

    /// save writes the response as pretty-printed JSON.
    ///
    /// # Arguments
    /// * `response` - the raw response document
    ///
    /// # Returns
    /// * `Result<(), Error>`
    pub fn save(&self, response: &Value) -> Result<(), Error> {
        let content = serde_json::to_string_pretty(response)?;
        if let Err(e) = fs::write(&self.path, content) {
            return Err(Error::msg(format!("archive - cannot write {}: {e}", self.path.display())))
        }
        debug!("archive - response saved to {}", self.path.display());
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn load(&self) -> Result<Value, Error> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use serde_json::json;
    use crate::pipeline::archive::ResponseArchiver;

    #[test]
    fn test_save_overwrites_and_loads() {
        let path = std::env::temp_dir().join(format!("response_archive_{}.json", std::process::id()));
        let archiver = ResponseArchiver::new(&path);

        archiver.save(&json!({"Labels": [{"Name": "Car", "Confidence": 99.1}]})).unwrap();
        let second = json!({"ModerationLabels": []});
        archiver.save(&second).unwrap();

        assert_eq!(archiver.load().unwrap(), second);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"ModerationLabels\": []\n}");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let archiver = ResponseArchiver::new("/nonexistent/dir/response.json");
        assert!(archiver.save(&json!({})).is_err());
        assert!(archiver.load().is_err());
    }
}
