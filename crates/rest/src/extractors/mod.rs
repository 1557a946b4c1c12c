//! Axum extractors shared by the handlers.

mod pagination;
mod upload;

pub use pagination::ListParams;
pub use upload::{
    public_link, UploadedFiles, UPLOADED_FILENAME, UPLOADED_IMAGE_FILENAME, UPLOADED_PDF_FILENAME,
};
