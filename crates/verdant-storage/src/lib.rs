//! # verdant-storage
//!
//! Storage backends for Verdant section documents and uploaded images.
//!
//! This crate provides:
//! - The [`SectionStore`] abstraction every backend implements
//! - An in-memory store (tests, ephemeral demos)
//! - A filesystem store (one JSON file per section)
//! - The [`ContentStore`] accessor used by pages and editors
//! - A [`BlobStore`] for uploaded images

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod accessor;
pub mod blob;
pub mod error;
pub mod filesystem;
pub mod memory;
pub mod traits;

pub use accessor::ContentStore;
pub use blob::{BlobStore, MAX_UPLOAD_BYTES, UploadRejection, UploadedFile, validate_image};
pub use error::{Error, Result};
pub use filesystem::FileStore;
pub use memory::MemoryStore;
pub use traits::SectionStore;
