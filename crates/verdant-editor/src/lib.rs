//! Schema-driven section editing.
//!
//! The admin edits every section through one generic renderer: a
//! [`SectionSchema`](verdant_schema::SectionSchema) says which keys exist
//! and how to edit them, a [`Draft`] holds the working copy, and
//! [`SectionEditor`] drives load and save against a
//! [`SectionStore`](verdant_storage::SectionStore).
//!
//! # Modules
//!
//! - [`path`]: [`FieldPath`] addresses (`items[0].title`)
//! - [`draft`]: [`Draft`] and [`FieldEdit`]; edits return new drafts
//! - [`render`]: HTML controls for a schema and draft
//! - [`form`]: Mapping submitted forms back onto drafts
//! - [`image`]: [`ImageField`] upload control and the [`Uploader`] seam
//! - [`controller`]: [`SectionEditor`] lifecycle and status broadcasting
//! - [`resource`]: [`ResourceManager`], one editor per resource slice

pub mod controller;
pub mod draft;
pub mod error;
pub mod form;
pub mod image;
pub mod path;
pub mod render;
pub mod resource;

mod proptests;

pub use controller::{EditorError, EditorHandle, EditorStatus, SUCCESS_ACK, SectionEditor};
pub use draft::{Draft, FieldEdit};
pub use error::{Error, Result};
pub use form::FormAction;
pub use image::{ImageField, ImageState, UploadFile, Uploader};
pub use path::{FieldPath, Segment};
pub use render::{render_field, render_form};
pub use resource::ResourceManager;
