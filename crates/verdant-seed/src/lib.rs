//! Default content and the seeding routine.
//!
//! Seeding overwrites every known section with its default document. It is
//! meant for first-run bootstrap or a full reset, and running it twice leaves
//! the same content as running it once.

pub mod defaults;

use verdant_core::{Section, SectionId};
use verdant_schema::{ResourceSpec, SchemaRegistry};
use verdant_storage::{ContentStore, Result};

pub use defaults::{HERO_HEADING, default_section};

/// Default documents for every section in `schemas` that has one.
pub fn default_documents(schemas: &SchemaRegistry) -> Vec<(SectionId, Section)> {
    schemas
        .iter()
        .filter_map(|schema| {
            let id = SectionId::new(schema.id.as_str()).ok()?;
            let section = default_section(&schema.id)?;
            Some((id, section))
        })
        .collect()
}

/// Overwrite every known section with its default. Returns the ids written.
///
/// Stops at the first failed write; sections written before it keep their
/// new content.
pub async fn seed_all(store: &ContentStore) -> Result<Vec<SectionId>> {
    let documents = default_documents(&SchemaRegistry::standard());
    let mut seeded = Vec::with_capacity(documents.len());
    for (id, section) in documents {
        store.set(&id, section).await?;
        seeded.push(id);
    }
    tracing::info!(count = seeded.len(), backend = store.backend_name(), "Seeded sections");
    Ok(seeded)
}

/// Overwrite the slices of one resource with their defaults.
pub async fn seed_resource(store: &ContentStore, resource: &ResourceSpec) -> Result<Vec<SectionId>> {
    let mut seeded = Vec::with_capacity(resource.slices.len());
    for slice in &resource.slices {
        let Some(section) = default_section(&slice.section_id) else {
            tracing::warn!(resource = %resource.name, slice = %slice.name, "No default content for slice");
            continue;
        };
        let id = SectionId::new(slice.section_id.as_str())?;
        store.set(&id, section).await?;
        seeded.push(id);
    }
    tracing::info!(resource = %resource.name, count = seeded.len(), "Seeded resource");
    Ok(seeded)
}
