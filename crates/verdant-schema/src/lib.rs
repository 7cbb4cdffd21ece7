//! Field schemas and admin resource layouts.
//!
//! Field definitions are static configuration: they describe how the admin
//! edits each key of a section, but nothing enforces them against what is
//! actually stored. [`SectionSchema::mismatches`] reports drift for
//! diagnostics only.
//!
//! # Modules
//!
//! - [`field`]: [`FieldDefinition`] and the [`FieldKind`] tagged union
//! - [`registry`]: [`SchemaRegistry`], the section id → schema lookup
//! - [`resource`]: [`ResourceRegistry`], multi-slice admin resources

pub mod field;
pub mod registry;
pub mod resource;

pub use field::{FieldDefinition, FieldKind, SectionSchema};
pub use registry::SchemaRegistry;
pub use resource::{ITEMS_KEY, ResourceRegistry, ResourceSpec, SliceKind, SliceSpec};
