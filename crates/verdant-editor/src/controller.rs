//! Section editor lifecycle.
//!
//! [`SectionEditor`] owns one section's draft and walks it through
//! `loading → ready → saving → success → ready`. Every transition is
//! published on an [`EditorHandle`] so views can subscribe instead of poll.
//!
//! # States
//!
//! | From | Event | To |
//! |------|-------|----|
//! | `Loading` | fetch returns a document | `Ready` |
//! | `Loading` | fetch returns nothing | `Error(NotSeeded)` |
//! | `Loading` | fetch fails | `Error(LoadFailed)` |
//! | `Ready` | save | `Saving` |
//! | `Saving` | store succeeds | `Success` |
//! | `Saving` | store fails | `Error(SaveFailed)` |
//! | `Success` | two seconds pass | `Ready` |
//! | `Error(SaveFailed)` | edit | `Ready` |

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::Instant;
use verdant_core::{Section, SectionId, StateHandle};
use verdant_schema::SectionSchema;
use verdant_storage::SectionStore;

use crate::draft::{Draft, FieldEdit};
use crate::{Error, Result};

/// How long a successful save is acknowledged before returning to ready.
pub const SUCCESS_ACK: Duration = Duration::from_secs(2);

/// Why an editor is in the error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// The section has never been written.
    NotSeeded,
    /// The store could not be read.
    LoadFailed,
    /// The last save did not reach the store. The draft is kept.
    SaveFailed,
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::NotSeeded => write!(f, "No data found, seed the database first"),
            EditorError::LoadFailed => write!(f, "Failed to load content"),
            EditorError::SaveFailed => write!(f, "Failed to save changes"),
        }
    }
}

/// Lifecycle state of a [`SectionEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    /// Fetch in progress.
    Loading,
    /// Draft available for editing.
    Ready,
    /// Store write in progress.
    Saving,
    /// Last save succeeded.
    Success,
    /// See [`EditorError`].
    Error(EditorError),
}

impl EditorStatus {
    /// Returns `true` if the editor holds a draft that can be edited.
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            EditorStatus::Ready | EditorStatus::Success | EditorStatus::Error(EditorError::SaveFailed)
        )
    }
}

impl fmt::Display for EditorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorStatus::Loading => write!(f, "loading"),
            EditorStatus::Ready => write!(f, "ready"),
            EditorStatus::Saving => write!(f, "saving"),
            EditorStatus::Success => write!(f, "saved"),
            EditorStatus::Error(e) => write!(f, "error: {e}"),
        }
    }
}

/// Observable status of one editor.
pub type EditorHandle = StateHandle<EditorStatus>;

/// Loads, edits, and saves one section.
pub struct SectionEditor {
    id: SectionId,
    schema: SectionSchema,
    store: Arc<dyn SectionStore>,
    draft: Option<Draft>,
    saved: Option<Section>,
    status: EditorHandle,
    saved_at: Option<Instant>,
    generation: Arc<AtomicU64>,
}

impl SectionEditor {
    /// Create an editor in the `Loading` state. Call [`load`](Self::load) next.
    pub fn new(store: Arc<dyn SectionStore>, schema: SectionSchema) -> Result<Self> {
        let id = SectionId::new(schema.id.clone())?;
        let status = StateHandle::new(id.to_string(), EditorStatus::Loading);
        Ok(Self {
            id,
            schema,
            store,
            draft: None,
            saved: None,
            status,
            saved_at: None,
            generation: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Create an editor and load its section.
    pub async fn open(store: Arc<dyn SectionStore>, schema: SectionSchema) -> Result<Self> {
        let mut editor = Self::new(store, schema)?;
        editor.load().await;
        Ok(editor)
    }

    /// Create a `Ready` editor around a draft that arrived with a request.
    ///
    /// Nothing is fetched, so the draft counts as unsaved.
    pub fn with_draft(store: Arc<dyn SectionStore>, schema: SectionSchema, draft: Draft) -> Result<Self> {
        let mut editor = Self::new(store, schema)?;
        editor.draft = Some(draft);
        editor.transition(EditorStatus::Ready);
        Ok(editor)
    }

    /// Section being edited.
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    /// Schema driving the form.
    pub fn schema(&self) -> &SectionSchema {
        &self.schema
    }

    /// Current draft, if loaded.
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Current status.
    pub fn status(&self) -> EditorStatus {
        self.status.get()
    }

    /// Handle for subscribing to status changes.
    pub fn handle(&self) -> EditorHandle {
        self.status.clone()
    }

    /// Returns `true` if the draft differs from what was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        match (&self.draft, &self.saved) {
            (Some(draft), Some(saved)) => draft.section() != saved,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Fetch the section, replacing any draft.
    pub async fn load(&mut self) -> EditorStatus {
        self.transition(EditorStatus::Loading);
        self.draft = None;
        self.saved = None;

        let status = match self.store.fetch(&self.id).await {
            Ok(Some(section)) => {
                self.saved = Some(section.clone());
                self.draft = Some(Draft::new(section));
                EditorStatus::Ready
            }
            Ok(None) => {
                tracing::info!(section = %self.id, "Section not seeded");
                EditorStatus::Error(EditorError::NotSeeded)
            }
            Err(e) => {
                tracing::warn!(section = %self.id, "Failed to load section: {e}");
                EditorStatus::Error(EditorError::LoadFailed)
            }
        };
        self.transition(status);
        status
    }

    /// Apply one edit to the draft. Nothing is saved.
    pub fn edit(&mut self, edit: FieldEdit) -> Result<()> {
        let draft = self.editable_draft()?;
        let next = draft.apply(&self.schema, edit)?;
        self.draft = Some(next);
        if self.status() == EditorStatus::Error(EditorError::SaveFailed) {
            self.transition(EditorStatus::Ready);
        }
        Ok(())
    }

    /// Replace the whole draft.
    pub fn replace_draft(&mut self, draft: Draft) -> Result<()> {
        self.editable_draft()?;
        self.draft = Some(draft);
        if self.status() == EditorStatus::Error(EditorError::SaveFailed) {
            self.transition(EditorStatus::Ready);
        }
        Ok(())
    }

    /// Write the draft to the store.
    ///
    /// On success the status is `Success` and returns to `Ready` after
    /// [`SUCCESS_ACK`]. On failure the status is `Error(SaveFailed)` and the
    /// draft is kept so the save can be retried.
    pub async fn save(&mut self) -> Result<()> {
        let section = self.editable_draft()?.section().clone();
        self.transition(EditorStatus::Saving);

        match self.store.store(&self.id, section.clone()).await {
            Ok(()) => {
                tracing::info!(section = %self.id, "Section saved");
                self.saved = Some(section);
                self.saved_at = Some(Instant::now());
                let generation = self.transition(EditorStatus::Success);
                self.schedule_ack(generation);
                Ok(())
            }
            Err(e) => {
                tracing::error!(section = %self.id, "Failed to save section: {e}");
                self.transition(EditorStatus::Error(EditorError::SaveFailed));
                Err(e.into())
            }
        }
    }

    /// Current status, first returning `Success` to `Ready` if the
    /// acknowledgement period has passed.
    pub fn poll_status(&mut self) -> EditorStatus {
        if self.status() == EditorStatus::Success
            && self.saved_at.is_some_and(|at| at.elapsed() >= SUCCESS_ACK)
        {
            self.transition(EditorStatus::Ready);
        }
        self.status()
    }

    fn editable_draft(&self) -> Result<&Draft> {
        let status = self.status();
        match &self.draft {
            Some(draft) if status.is_editable() => Ok(draft),
            _ => Err(Error::NotReady {
                section: self.id.to_string(),
                status: status.to_string(),
            }),
        }
    }

    /// Publish `status`, returning the generation that identifies it.
    fn transition(&self, status: EditorStatus) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.status.set(status);
        generation
    }

    fn schedule_ack(&self, generation: u64) {
        let status = self.status.clone();
        let current = Arc::clone(&self.generation);
        tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_ACK).await;
            if current.load(Ordering::SeqCst) == generation {
                status.set(EditorStatus::Ready);
            }
        });
    }
}

impl fmt::Debug for SectionEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionEditor")
            .field("id", &self.id)
            .field("status", &self.status())
            .field("dirty", &self.is_dirty())
            .field("backend", &self.store.backend_name())
            .finish()
    }
}
