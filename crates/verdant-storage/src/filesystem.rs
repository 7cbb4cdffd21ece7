//! Filesystem section store.
//!
//! Each section lives in `<root>/<id>.json` as pretty-printed JSON. Every
//! write goes to its own sibling temp file and is renamed into place, so a
//! crashed, failed, or overlapping write never leaves half a document behind.
//! Overlapping writes to one id resolve as last rename wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use verdant_core::{Section, SectionId};

use crate::{Error, Result, SectionStore};

const EXTENSION: &str = "json";

static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Section store backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the section files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &SectionId) -> PathBuf {
        self.root.join(format!("{id}.{EXTENSION}"))
    }

    /// A temp path no other write in any process shares.
    fn temp_path_for(&self, id: &SectionId) -> PathBuf {
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        self.root.join(format!(".{id}.{}.{seq}.tmp", std::process::id()))
    }
}

#[async_trait]
impl SectionStore for FileStore {
    async fn fetch(&self, id: &SectionId) -> Result<Option<Section>> {
        let path = self.path_for(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(verdant_core::Error::io_with_path(e, &path).into()),
        };
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|source| Error::Corrupt {
                id: id.to_string(),
                source,
            })?;
        Ok(Some(Section::from_value(value)?))
    }

    async fn store(&self, id: &SectionId, section: Section) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| verdant_core::Error::io_with_path(e, &self.root))?;

        let path = self.path_for(id);
        let json = serde_json::to_vec_pretty(&section).map_err(verdant_core::Error::from)?;
        let tmp = self.temp_path_for(id);

        let written = match tokio::fs::write(&tmp, &json).await {
            Ok(()) => tokio::fs::rename(&tmp, &path)
                .await
                .map_err(|e| verdant_core::Error::io_with_path(e, &path)),
            Err(e) => Err(verdant_core::Error::io_with_path(e, &tmp)),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        log::debug!("Wrote section '{id}' to {}", path.display());
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<SectionId>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(verdant_core::Error::io_with_path(e, &self.root).into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match SectionId::new(stem) {
                Ok(id) => ids.push(id),
                Err(_) => log::warn!("Ignoring unexpected file {}", path.display()),
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
