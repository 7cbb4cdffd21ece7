//! The content store accessor.
//!
//! Pages read through [`ContentStore::get`], which never fails: a missing
//! section and a failing backend both come back as `None`, and callers
//! substitute their literal defaults. Editors use [`ContentStore::fetch`]
//! when they need to tell "not seeded yet" apart from "the store is down".

use std::sync::Arc;

use verdant_core::{Section, SectionId};

use crate::{MemoryStore, Result, SectionStore};

/// Cloneable accessor over any [`SectionStore`] backend.
#[derive(Clone)]
pub struct ContentStore {
    backend: Arc<dyn SectionStore>,
}

impl ContentStore {
    /// Wrap a backend.
    pub fn new(backend: Arc<dyn SectionStore>) -> Self {
        Self { backend }
    }

    /// Accessor over a fresh in-memory backend.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The wrapped backend.
    pub fn backend(&self) -> Arc<dyn SectionStore> {
        Arc::clone(&self.backend)
    }

    /// Read a section, treating every failure as "not configured".
    ///
    /// Invalid ids and backend errors are logged and yield `None`.
    pub async fn get(&self, id: &str) -> Option<Section> {
        let section_id = match SectionId::new(id) {
            Ok(section_id) => section_id,
            Err(e) => {
                log::warn!("Refusing to read section with invalid id '{id}': {e}");
                return None;
            }
        };
        match self.backend.fetch(&section_id).await {
            Ok(section) => section,
            Err(e) => {
                log::warn!("Failed to read section '{id}', using defaults: {e}");
                None
            }
        }
    }

    /// Read a section, propagating backend failures.
    pub async fn fetch(&self, id: &SectionId) -> Result<Option<Section>> {
        self.backend.fetch(id).await
    }

    /// Overwrite a section. Failures propagate to the caller.
    pub async fn set(&self, id: &SectionId, section: Section) -> Result<()> {
        self.backend.store(id, section).await?;
        log::info!("Saved section '{id}'");
        Ok(())
    }

    /// List every stored section id.
    pub async fn list_ids(&self) -> Result<Vec<SectionId>> {
        self.backend.list_ids().await
    }

    /// Short backend name.
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}
