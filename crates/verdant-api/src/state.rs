//! Shared handler state.

use std::sync::Arc;

use async_trait::async_trait;
use verdant_editor::{UploadFile, Uploader};
use verdant_schema::{ResourceRegistry, SchemaRegistry};
use verdant_storage::{BlobStore, ContentStore, FileStore, MemoryStore, SectionStore};

use crate::config::{Backend, VerdantConfig};

/// Everything a handler needs, cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Section documents.
    pub content: ContentStore,
    /// Uploaded images.
    pub blobs: BlobStore,
    /// Editable sections.
    pub schemas: Arc<SchemaRegistry>,
    /// Multi-slice admin resources.
    pub resources: Arc<ResourceRegistry>,
}

impl AppState {
    /// State over the given stores with the standard registries.
    pub fn new(content: ContentStore, blobs: BlobStore) -> Self {
        Self {
            content,
            blobs,
            schemas: Arc::new(SchemaRegistry::standard()),
            resources: Arc::new(ResourceRegistry::standard()),
        }
    }

    /// Build the stores described by `config`.
    pub fn from_config(config: &VerdantConfig) -> Self {
        let backend: Arc<dyn SectionStore> = match config.storage.backend {
            Backend::Memory => Arc::new(MemoryStore::new()),
            Backend::File => Arc::new(FileStore::new(&config.storage.data_dir)),
        };
        let blobs = BlobStore::new(
            &config.storage.uploads_dir,
            config.storage.public_upload_prefix.as_str(),
        );
        tracing::info!(
            backend = backend.backend_name(),
            uploads = %config.storage.uploads_dir.display(),
            "Storage ready"
        );
        Self::new(ContentStore::new(backend), blobs)
    }

    /// Uploader writing straight into the blob store.
    pub fn uploader(&self) -> BlobUploader {
        BlobUploader {
            blobs: self.blobs.clone(),
        }
    }
}

/// [`Uploader`] for editors running inside the server.
#[derive(Debug, Clone)]
pub struct BlobUploader {
    blobs: BlobStore,
}

#[async_trait]
impl Uploader for BlobUploader {
    async fn upload(&self, file: UploadFile) -> verdant_editor::Result<String> {
        match self
            .blobs
            .put(&file.file_name, &file.content_type, &file.bytes)
            .await
        {
            Ok(stored) => Ok(stored.url),
            Err(verdant_storage::Error::Core(verdant_core::Error::Validation { message, .. })) => {
                Err(verdant_editor::Error::upload(message))
            }
            Err(e) => Err(e.into()),
        }
    }
}
