//! Uploaded-file boundary.
//!
//! File bytes never reach this server. An upstream upload proxy stores them
//! and forwards the resolved filename in a request header; handlers only
//! ever see the name. Stored filenames are turned back into public links
//! under the file type's `/<prefix>/data/` route when responses are shaped;
//! the raw stored name never appears in a response.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use serde_json::Value;

use crate::error::RestError;

/// Header carrying a generic uploaded filename.
pub const UPLOADED_FILENAME: &str = "x-uploaded-filename";

/// Header carrying an uploaded care-plan PDF filename.
pub const UPLOADED_PDF_FILENAME: &str = "x-uploaded-pdf-filename";

/// Header carrying an uploaded care-plan image filename.
pub const UPLOADED_IMAGE_FILENAME: &str = "x-uploaded-image-filename";

/// The filenames the upload proxy resolved for this request.
#[derive(Debug, Clone, Default)]
pub struct UploadedFiles {
    /// The generic uploaded file, if any.
    pub file: Option<String>,
    /// The care-plan PDF, if any.
    pub pdf: Option<String>,
    /// The care-plan image, if any.
    pub image: Option<String>,
}

impl UploadedFiles {
    /// The generic filename, or a 400 naming the missing upload.
    pub fn require_file(&self, what: &str) -> Result<&str, RestError> {
        self.file
            .as_deref()
            .ok_or_else(|| RestError::bad_request(format!("An uploaded {} is required", what)))
    }
}

impl<S> FromRequestParts<S> for UploadedFiles
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let read = |name: &str| -> Result<Option<String>, RestError> {
            match parts.headers.get(name) {
                None => Ok(None),
                Some(value) => {
                    let text = value.to_str().map_err(|_| {
                        RestError::bad_request(format!("Header {} is not valid text", name))
                    })?;
                    if text.is_empty() {
                        Ok(None)
                    } else {
                        Ok(Some(text.to_string()))
                    }
                }
            }
        };

        Ok(UploadedFiles {
            file: read(UPLOADED_FILENAME)?,
            pdf: read(UPLOADED_PDF_FILENAME)?,
            image: read(UPLOADED_IMAGE_FILENAME)?,
        })
    }
}

/// Shapes a stored filename into its public link, or `null` when absent.
///
/// Each file type is served under its own route prefix, so a document and a
/// profile picture with the same stored name never collide.
pub fn public_link(base_url: &str, prefix: &str, filename: Option<&str>) -> Value {
    match filename {
        Some(name) if !name.is_empty() => {
            Value::String(format!("{}/{}/data/{}", base_url, prefix, name))
        }
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_link_shapes_filename_under_its_prefix() {
        let link = public_link("http://localhost:8080", "documents", Some("cv.pdf"));
        assert_eq!(link, "http://localhost:8080/documents/data/cv.pdf");

        let link = public_link("http://localhost:8080", "profile_picture", Some("me.png"));
        assert_eq!(link, "http://localhost:8080/profile_picture/data/me.png");
    }

    #[test]
    fn public_link_is_null_for_absent_or_empty() {
        assert!(public_link("http://x", "documents", None).is_null());
        assert!(public_link("http://x", "documents", Some("")).is_null());
    }

    #[test]
    fn require_file_names_the_upload() {
        let files = UploadedFiles::default();
        let err = files.require_file("resume").unwrap_err();
        assert!(err.to_string().contains("resume"));
    }
}
