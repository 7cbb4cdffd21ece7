//! Multi-slice resource editing.
//!
//! A [`ResourceManager`] is a set of [`SectionEditor`]s, one per slice of a
//! resource. Slices load together but save independently: a failed save of
//! one slice leaves the others' state and stored content untouched.

use std::sync::Arc;

use futures::future::join_all;
use verdant_schema::{ResourceSpec, SchemaRegistry, SliceSpec};
use verdant_storage::SectionStore;

use crate::controller::{EditorStatus, SectionEditor};
use crate::{Error, Result};

/// Editors for every slice of one resource.
#[derive(Debug)]
pub struct ResourceManager {
    spec: ResourceSpec,
    slices: Vec<(SliceSpec, SectionEditor)>,
}

impl ResourceManager {
    /// Create editors for every slice of `spec`.
    ///
    /// Fails if a slice's section has no schema.
    pub fn new(store: Arc<dyn SectionStore>, spec: ResourceSpec, schemas: &SchemaRegistry) -> Result<Self> {
        let mut slices = Vec::with_capacity(spec.slices.len());
        for slice in &spec.slices {
            let schema = schemas.lookup(&slice.section_id).cloned().ok_or_else(|| {
                Error::from(verdant_core::Error::not_found(format!(
                    "schema for slice '{}' ('{}')",
                    slice.name, slice.section_id
                )))
            })?;
            slices.push((slice.clone(), SectionEditor::new(Arc::clone(&store), schema)?));
        }
        Ok(Self { spec, slices })
    }

    /// The resource being edited.
    pub fn spec(&self) -> &ResourceSpec {
        &self.spec
    }

    /// Load every slice concurrently.
    pub async fn load_all(&mut self) -> Vec<(String, EditorStatus)> {
        let statuses = join_all(self.slices.iter_mut().map(|(_, editor)| editor.load())).await;
        self.slices
            .iter()
            .zip(statuses)
            .map(|((slice, _), status)| (slice.name.clone(), status))
            .collect()
    }

    /// Editor for one slice.
    pub fn slice(&self, name: &str) -> Option<&SectionEditor> {
        self.slices
            .iter()
            .find(|(slice, _)| slice.name == name)
            .map(|(_, editor)| editor)
    }

    /// Mutable editor for one slice.
    pub fn slice_mut(&mut self, name: &str) -> Option<&mut SectionEditor> {
        self.slices
            .iter_mut()
            .find(|(slice, _)| slice.name == name)
            .map(|(_, editor)| editor)
    }

    /// Save one slice.
    pub async fn save_slice(&mut self, name: &str) -> Result<()> {
        let resource = self.spec.name.clone();
        let editor = self.slice_mut(name).ok_or_else(|| {
            Error::from(verdant_core::Error::not_found(format!(
                "slice '{name}' of '{resource}'"
            )))
        })?;
        editor.save().await
    }

    /// Save every slice with unsaved changes, in declaration order.
    ///
    /// Each slice is attempted regardless of earlier failures.
    pub async fn save_dirty(&mut self) -> Vec<(String, Result<()>)> {
        let mut results = Vec::new();
        for (slice, editor) in &mut self.slices {
            if editor.is_dirty() {
                results.push((slice.name.clone(), editor.save().await));
            }
        }
        results
    }

    /// Status of every slice, in declaration order.
    pub fn statuses(&self) -> Vec<(String, EditorStatus)> {
        self.slices
            .iter()
            .map(|(slice, editor)| (slice.name.clone(), editor.status()))
            .collect()
    }
}
