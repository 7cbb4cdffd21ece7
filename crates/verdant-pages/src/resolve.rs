//! Page data resolution.
//!
//! Every page declares the sections it reads in a [`PageSpec`].
//! [`resolve_page`] fetches all of them (plus the shared chrome sections) in
//! one concurrent batch and never fails: a missing section and a failed read
//! both resolve to `None`, and templates fall back to their literal defaults.

use std::collections::HashMap;

use futures::future::join_all;
use verdant_core::Section;
use verdant_storage::ContentStore;

use crate::view::SectionView;

/// Sections every page reads for its navbar, footer, and `<head>`.
pub const SHARED_SECTIONS: &[&str] = &["navbar", "footer", "branding", "seo"];

/// The sections one page reads, beyond [`SHARED_SECTIONS`].
#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    /// Page name, for logging.
    pub name: &'static str,
    /// Page-specific section ids.
    pub sections: &'static [&'static str],
}

impl PageSpec {
    /// Every id the page reads, shared sections first, without duplicates.
    pub fn section_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = SHARED_SECTIONS.to_vec();
        for &id in self.sections {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

/// Sections fetched for one render.
#[derive(Debug, Clone, Default)]
pub struct PageData {
    sections: HashMap<&'static str, Option<Section>>,
}

impl PageData {
    /// Build page data from already-fetched sections.
    pub fn new(sections: impl IntoIterator<Item = (&'static str, Option<Section>)>) -> Self {
        Self {
            sections: sections.into_iter().collect(),
        }
    }

    /// The section, if it was requested and exists.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.get(id).and_then(Option::as_ref)
    }

    /// Fallback-aware view of a section.
    pub fn view(&self, id: &str) -> SectionView<'_> {
        SectionView::section(self.section(id))
    }

    /// Number of sections that came back with content.
    pub fn configured(&self) -> usize {
        self.sections.values().filter(|s| s.is_some()).count()
    }
}

/// Fetch every section `spec` needs, concurrently.
pub async fn resolve_page(store: &ContentStore, spec: &PageSpec) -> PageData {
    let ids = spec.section_ids();
    let fetched = join_all(ids.iter().map(|id| store.get(id))).await;
    let data = PageData::new(ids.into_iter().zip(fetched));
    tracing::debug!(
        page = spec.name,
        configured = data.configured(),
        requested = data.sections.len(),
        "Resolved page data"
    );
    data
}
