//! Verdant Core: section documents, identifiers, ordering, and errors.
//!
//! This crate provides the foundational types used across all Verdant crates.
//! It has no internal Verdant dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`html`]: Escaping for server-rendered markup
//! - [`section`]: The schemaless [`Section`] document and its [`SectionId`]
//! - [`ids`]: Slug normalization
//! - [`order`]: Stable sorting of repeated items by their `order` field
//! - [`state`]: Watch-channel handle for broadcasting lifecycle states

pub mod error;
pub mod html;
pub mod ids;
pub mod order;
pub mod section;
pub mod state;

mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use ids::normalize_slug;
pub use order::{order_key, sort_by_order};
pub use section::{Section, SectionId};
pub use state::StateHandle;
