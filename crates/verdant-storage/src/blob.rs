//! Uploaded image storage.
//!
//! Images land in a single directory and are served back under a public URL
//! prefix (`/uploads` by default). Stored names are
//! `<unix-millis>-<slugged stem>.<ext>` so listings sort by upload time and
//! two files with the same original name never collide.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use verdant_core::normalize_slug;

use crate::Result;

/// Largest accepted upload: 10 MB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

// ============================================================================
// Validation
// ============================================================================

/// Why an upload was refused before being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    /// The MIME type is not `image/*`.
    NotAnImage {
        /// Declared content type
        content_type: String,
    },
    /// The file exceeds [`MAX_UPLOAD_BYTES`].
    TooLarge {
        /// Size of the rejected file in bytes
        size: u64,
    },
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRejection::NotAnImage { .. } => write!(f, "Please select an image file"),
            UploadRejection::TooLarge { .. } => write!(f, "File size must be less than 10MB"),
        }
    }
}

impl std::error::Error for UploadRejection {}

/// Check an upload's declared type and size.
///
/// Shared by the editor (before any network call) and the upload endpoint.
pub fn validate_image(content_type: &str, size: u64) -> std::result::Result<(), UploadRejection> {
    if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(UploadRejection::NotAnImage {
            content_type: content_type.to_string(),
        });
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge { size });
    }
    Ok(())
}

// ============================================================================
// BlobStore
// ============================================================================

/// One stored upload, as reported by the upload listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Public URL of the file.
    pub url: String,
    /// Path of the file relative to the upload root's parent (`uploads/<name>`).
    pub pathname: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time of the stored file.
    pub uploaded_at: DateTime<Utc>,
    /// Display name: the stored name without its timestamp prefix.
    pub filename: String,
}

/// Directory-backed store for uploaded images.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
    public_prefix: String,
}

impl BlobStore {
    /// Create a store writing into `root` and serving under `public_prefix`.
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let prefix = public_prefix.into();
        Self {
            root: root.into(),
            public_prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Directory holding the uploads.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL prefix the uploads are served under.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Validate and store one image.
    pub async fn put(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<UploadedFile> {
        if let Err(rejection) = validate_image(content_type, bytes.len() as u64) {
            return Err(verdant_core::Error::validation_field("file", rejection.to_string()).into());
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| verdant_core::Error::io_with_path(e, &self.root))?;

        let base = sanitize_file_name(original_name);
        let millis = Utc::now().timestamp_millis();
        let mut stored = format!("{millis}-{base}");
        let mut attempt = 1;
        let (path, mut file) = loop {
            let path = self.root.join(&stored);
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    attempt += 1;
                    stored = format!("{millis}-{attempt}-{base}");
                }
                Err(e) => return Err(verdant_core::Error::io_with_path(e, &path).into()),
            }
        };

        let written = match file.write_all(bytes).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            drop(file);
            let _ = tokio::fs::remove_file(&path).await;
            return Err(verdant_core::Error::io_with_path(e, &path).into());
        }
        drop(file);
        log::info!("Stored upload {} ({} bytes)", path.display(), bytes.len());

        self.describe(&stored, &path).await
    }

    /// List stored uploads, newest first.
    pub async fn list(&self) -> Result<Vec<UploadedFile>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(verdant_core::Error::io_with_path(e, &self.root).into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            files.push(self.describe(&name, &entry.path()).await?);
        }
        files.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| b.pathname.cmp(&a.pathname))
        });
        Ok(files)
    }

    /// Delete the upload served at `url`.
    pub async fn delete(&self, url: &str) -> Result<()> {
        let name = self
            .stored_name_for(url)
            .ok_or_else(|| verdant_core::Error::not_found(format!("upload '{url}'")))?;
        let path = self.root.join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                log::info!("Deleted upload {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(verdant_core::Error::not_found(format!("upload '{url}'")).into())
            }
            Err(e) => Err(verdant_core::Error::io_with_path(e, &path).into()),
        }
    }

    /// Map a public URL back to a stored file name, if it is one of ours.
    fn stored_name_for<'a>(&self, url: &'a str) -> Option<&'a str> {
        let path = match url.find("://") {
            Some(scheme_end) => {
                let rest = &url[scheme_end + 3..];
                &rest[rest.find('/')?..]
            }
            None => url,
        };
        let name = path.strip_prefix(&self.public_prefix)?.strip_prefix('/')?;
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains('/')
            && !name.contains('\\');
        valid.then_some(name)
    }

    async fn describe(&self, stored: &str, path: &Path) -> Result<UploadedFile> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| verdant_core::Error::io_with_path(e, path))?;
        let uploaded_at = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        let folder = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "uploads".to_string());

        Ok(UploadedFile {
            url: format!("{}/{stored}", self.public_prefix),
            pathname: format!("{folder}/{stored}"),
            size: meta.len(),
            uploaded_at,
            filename: display_name(stored).to_string(),
        })
    }
}

/// Reduce an arbitrary client-supplied name to `<slug>.<ext>`.
fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);
    let (stem, ext) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (base, None),
    };
    let stem = match normalize_slug(stem) {
        s if s.is_empty() => "image".to_string(),
        s => s,
    };
    let ext: Option<String> = ext
        .map(|e| {
            e.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|e| !e.is_empty());
    match ext {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

/// Strip the `<millis>-` (and optional `<n>-`) prefix from a stored name.
fn display_name(stored: &str) -> &str {
    let mut rest = stored;
    for _ in 0..2 {
        match rest.split_once('-') {
            Some((prefix, tail))
                if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) =>
            {
                rest = tail;
            }
            _ => break,
        }
    }
    rest
}
