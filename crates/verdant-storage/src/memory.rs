//! In-memory section store.
//!
//! Backs tests and throwaway demo instances. Reads and writes can be made to
//! fail on demand so callers can exercise their error paths without a real
//! backend going down.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use verdant_core::{Section, SectionId};

use crate::{Error, Result, SectionStore};

/// Process-local section store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sections: RwLock<BTreeMap<SectionId, Section>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given sections.
    pub fn with_sections(sections: impl IntoIterator<Item = (SectionId, Section)>) -> Self {
        Self {
            sections: RwLock::new(sections.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `fetch` calls seen, including failed ones.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `store` calls seen, including failed ones.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SectionStore for MemoryStore {
    async fn fetch(&self, id: &SectionId) -> Result<Option<Section>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::unavailable(format!("read of '{id}' refused")));
        }
        Ok(self.sections.read().await.get(id).cloned())
    }

    async fn store(&self, id: &SectionId, section: Section) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::unavailable(format!("write of '{id}' refused")));
        }
        self.sections.write().await.insert(id.clone(), section);
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<SectionId>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::unavailable("listing refused"));
        }
        Ok(self.sections.read().await.keys().cloned().collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
