//! Image upload passthrough to an external media host.

pub mod cloudinary;

use async_trait::async_trait;

pub use cloudinary::{CloudinaryConfig, CloudinaryHost};

/// A single uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("media host is not configured")]
    NotConfigured,

    #[error("media host request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("media host rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("media host response carried no URL")]
    MissingUrl,
}

/// External object storage for images. Returns the public URL of the
/// stored file.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, file: UploadFile) -> Result<String, MediaError>;
}
