//! Image upload control.
//!
//! [`ImageField`] holds one image URL plus an upload state. Files are
//! validated locally before the [`Uploader`] is ever called, so a rejected
//! file costs no network round trip.

use std::fmt;

use async_trait::async_trait;
use verdant_core::StateHandle;
use verdant_storage::validate_image;

use crate::draft::FieldEdit;
use crate::path::FieldPath;
use crate::{Error, Result};

/// A file picked for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Bundle a picked file.
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Something that can store an image and hand back its public URL.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Store `file`, returning the URL to reference it by.
    async fn upload(&self, file: UploadFile) -> Result<String>;
}

/// Upload state of an [`ImageField`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// An upload is in flight.
    Busy,
    /// The last attempt failed; the message is shown next to the control.
    Failed(String),
}

impl fmt::Display for ImageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageState::Idle => write!(f, "idle"),
            ImageState::Busy => write!(f, "uploading"),
            ImageState::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// One image value with its upload affordance.
///
/// `upload` takes `&mut self`, so a second upload cannot start while one is
/// in flight. Observers see the busy period through [`ImageField::state`].
#[derive(Debug)]
pub struct ImageField {
    path: FieldPath,
    url: String,
    state: StateHandle<ImageState>,
}

impl ImageField {
    /// Control for the image at `path`, currently showing `url`.
    pub fn new(path: FieldPath, url: impl Into<String>) -> Self {
        let state = StateHandle::new(path.to_string(), ImageState::Idle);
        Self {
            path,
            url: url.into(),
            state,
        }
    }

    /// Current URL (`""` when empty).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Handle for observing upload state.
    pub fn state(&self) -> StateHandle<ImageState> {
        self.state.clone()
    }

    /// Set the value to `""`.
    pub fn clear(&mut self) {
        self.url.clear();
        self.state.set(ImageState::Idle);
    }

    /// Validate and upload one file.
    ///
    /// On success the URL is replaced. On failure the previous URL is kept
    /// and the state carries the message.
    pub async fn upload(&mut self, uploader: &dyn Uploader, file: UploadFile) -> Result<&str> {
        if let Err(rejection) = validate_image(&file.content_type, file.bytes.len() as u64) {
            let message = rejection.to_string();
            tracing::debug!(field = %self.path, file = %file.file_name, "Upload rejected: {message}");
            self.state.set(ImageState::Failed(message.clone()));
            return Err(Error::upload(message));
        }

        self.state.set(ImageState::Busy);
        match uploader.upload(file).await {
            Ok(url) => {
                tracing::info!(field = %self.path, %url, "Image uploaded");
                self.url = url;
                self.state.set(ImageState::Idle);
                Ok(&self.url)
            }
            Err(e) => {
                tracing::warn!(field = %self.path, "Image upload failed: {e}");
                self.state.set(ImageState::Failed("Failed to upload image".to_string()));
                Err(e)
            }
        }
    }

    /// Upload several files strictly one after another.
    ///
    /// Each file is attempted even if an earlier one failed; the field ends
    /// up showing the last successful upload.
    pub async fn upload_all(&mut self, uploader: &dyn Uploader, files: Vec<UploadFile>) -> Vec<Result<String>> {
        let mut results = Vec::with_capacity(files.len());
        for file in files {
            results.push(self.upload(uploader, file).await.map(str::to_string));
        }
        results
    }

    /// The draft edit that stores the current URL.
    pub fn edit(&self) -> FieldEdit {
        if self.url.is_empty() {
            FieldEdit::ClearImage {
                path: self.path.clone(),
            }
        } else {
            FieldEdit::SetImage {
                path: self.path.clone(),
                url: self.url.clone(),
            }
        }
    }
}
