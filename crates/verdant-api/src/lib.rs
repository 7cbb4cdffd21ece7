//! # verdant-api
//!
//! HTTP server for the Verdant site.
//!
//! One axum router serves three surfaces from the same stores:
//!
//! - the JSON content API under `/api` (sections, uploads, resources, seed,
//!   contact)
//! - the public pages, rendered from stored content with defaults for
//!   anything missing
//! - the admin under `/admin`, built on the schema-driven section editor
//!
//! The admin is unauthenticated; deploy it behind an authenticating proxy.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::VerdantConfig;
pub use error::{Error, Result};
pub use server::{build_router, serve};
pub use state::{AppState, BlobUploader};
