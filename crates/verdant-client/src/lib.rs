//! # verdant-client
//!
//! HTTP client for a running Verdant server.
//!
//! [`SiteClient`] wraps the JSON API (sections, uploads, seeding, and the
//! multi-slice resources) and plugs into the editor as both a
//! [`SectionStore`](verdant_storage::SectionStore) and an
//! [`Uploader`](verdant_editor::Uploader).

pub mod client;
pub mod error;

pub use client::{SectionSummary, SiteClient};
pub use error::{Error, Result};
