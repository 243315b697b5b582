//! Spray chart upload

use std::path::Path;

use scout_shared::constants::SPRAY_CHART_PREFIX;
use uuid::Uuid;

use crate::error::DomainError;

/// Accepted spray chart formats and the extension each is stored under.
const RASTER_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// An image received from a client, not yet stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: Option<String>, content_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type,
            data,
        }
    }

    /// Declared content type, or a guess from the file name when the client
    /// sent none (or a generic octet-stream).
    pub fn mime_type(&self) -> Option<String> {
        let declared = self
            .content_type
            .as_deref()
            .and_then(|c| c.split(';').next())
            .map(|c| c.trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty() && c != "application/octet-stream");

        declared.or_else(|| {
            self.file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|mime| mime.essence_str().to_string())
        })
    }

    /// Only raster formats are accepted. Both the declared type and the type
    /// implied by the file name must be on the list, so a script-capable
    /// format such as SVG cannot get through under either.
    pub fn validate(&self, max_bytes: usize) -> Result<(), DomainError> {
        if self.data.is_empty() {
            return Err(DomainError::NoFileUploaded);
        }
        if self.data.len() > max_bytes {
            return Err(DomainError::FileTooLarge { limit: max_bytes });
        }
        let mime = self.mime_type().unwrap_or_else(|| "unknown".to_string());
        if raster_extension(&mime).is_none() {
            return Err(DomainError::UnsupportedMediaType(mime));
        }
        if let Some(guessed) = self.name_mime_type() {
            if raster_extension(&guessed).is_none() {
                return Err(DomainError::UnsupportedMediaType(guessed));
            }
        }
        Ok(())
    }

    /// Unique storage name, `spray-chart-<uuid>.<ext>`. The extension follows
    /// the validated MIME type, never the client's file name.
    pub fn stored_name(&self) -> String {
        let id = Uuid::new_v4().simple();
        match self.mime_type().as_deref().and_then(raster_extension) {
            Some(ext) => format!("{}{}.{}", SPRAY_CHART_PREFIX, id, ext),
            None => format!("{}{}", SPRAY_CHART_PREFIX, id),
        }
    }

    fn name_mime_type(&self) -> Option<String> {
        self.file_name
            .as_deref()
            .filter(|name| Path::new(name).extension().is_some())
            .and_then(|name| mime_guess::from_path(name).first())
            .map(|mime| mime.essence_str().to_string())
    }
}

fn raster_extension(mime: &str) -> Option<&'static str> {
    RASTER_IMAGE_TYPES
        .iter()
        .find(|(accepted, _)| *accepted == mime)
        .map(|(_, ext)| *ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: Option<&str>, mime: Option<&str>, len: usize) -> ImageUpload {
        ImageUpload::new(name.map(String::from), mime.map(String::from), vec![7u8; len])
    }

    #[test]
    fn test_accepts_images_within_limit() {
        assert!(upload(Some("chart.png"), Some("image/png"), 10).validate(100).is_ok());
    }

    #[test]
    fn test_rejects_non_images() {
        let err = upload(Some("notes.pdf"), Some("application/pdf"), 10).validate(100).unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedMediaType(m) if m == "application/pdf"));
    }

    #[test]
    fn test_rejects_oversized_and_empty() {
        assert!(matches!(
            upload(Some("a.png"), Some("image/png"), 101).validate(100),
            Err(DomainError::FileTooLarge { limit: 100 })
        ));
        assert!(matches!(
            upload(Some("a.png"), Some("image/png"), 0).validate(100),
            Err(DomainError::NoFileUploaded)
        ));
    }

    #[test]
    fn test_guesses_mime_from_name() {
        let u = upload(Some("chart.JPG"), Some("application/octet-stream"), 1);
        assert_eq!(u.mime_type().as_deref(), Some("image/jpeg"));
        assert!(u.validate(10).is_ok());
    }

    #[test]
    fn test_stored_name_is_unique_and_sanitized() {
        let u = upload(Some("../../etc/Chart.PNG"), Some("image/png"), 1);
        let a = u.stored_name();
        let b = u.stored_name();
        assert_ne!(a, b);
        assert!(a.starts_with(SPRAY_CHART_PREFIX));
        assert!(a.ends_with(".png"));
        assert!(!a.contains('/'));

        let weird = upload(Some("chart.p/ng"), Some("image/gif"), 1);
        assert!(weird.stored_name().ends_with(".gif"));

        let jpeg = upload(Some("photo.jpeg"), Some("image/jpeg"), 1);
        assert!(jpeg.stored_name().ends_with(".jpg"));
    }

    #[test]
    fn test_rejects_svg_by_declared_type_or_name() {
        let declared = upload(Some("chart.svg"), Some("image/svg+xml"), 10).validate(100);
        assert!(matches!(declared, Err(DomainError::UnsupportedMediaType(m)) if m == "image/svg+xml"));

        let disguised = upload(Some("chart.svg"), Some("image/png"), 10).validate(100);
        assert!(matches!(disguised, Err(DomainError::UnsupportedMediaType(m)) if m == "image/svg+xml"));

        let guessed = upload(Some("chart.svg"), None, 10).validate(100);
        assert!(matches!(guessed, Err(DomainError::UnsupportedMediaType(_))));
    }

    #[test]
    fn test_accepts_each_raster_type() {
        for (name, mime) in [
            ("a.png", "image/png"),
            ("a.jpg", "image/jpeg"),
            ("a.gif", "image/gif"),
            ("a.webp", "image/webp"),
        ] {
            assert!(upload(Some(name), Some(mime), 1).validate(10).is_ok(), "{}", mime);
        }
        assert!(upload(Some("chart"), Some("image/png"), 1).validate(10).is_ok());
        let with_params = upload(Some("chart.png"), Some("Image/PNG; charset=binary"), 1);
        assert_eq!(with_params.mime_type().as_deref(), Some("image/png"));
    }
}
