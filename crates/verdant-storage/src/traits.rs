//! Storage abstraction for section documents.

use async_trait::async_trait;
use verdant_core::{Section, SectionId};

use crate::Result;

/// A document store holding section documents by id.
///
/// Implementations:
/// - [`MemoryStore`](crate::MemoryStore): process-local map, with failure injection for tests
/// - [`FileStore`](crate::FileStore): one JSON file per section
/// - `SiteClient` (verdant-client): a remote Verdant site over HTTP
///
/// # Semantics
///
/// - `fetch` returns `Ok(None)` when the section was never written. Errors are
///   reserved for the store itself failing.
/// - `store` is a full-document overwrite, never a merge. Concurrent writes to
///   the same id race and the last one to complete wins.
/// - No transactions, retries, or backoff.
#[async_trait]
pub trait SectionStore: Send + Sync {
    /// Read one section.
    async fn fetch(&self, id: &SectionId) -> Result<Option<Section>>;

    /// Replace one section wholesale.
    async fn store(&self, id: &SectionId, section: Section) -> Result<()>;

    /// List the ids of every stored section, sorted.
    async fn list_ids(&self) -> Result<Vec<SectionId>>;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}
