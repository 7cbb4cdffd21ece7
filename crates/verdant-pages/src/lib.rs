//! # verdant-pages
//!
//! Server-rendered public pages.
//!
//! Every page resolves its sections in one concurrent batch
//! ([`resolve_page`]) and renders through [`SectionView`], which substitutes
//! a literal default for anything missing. A backend outage degrades the
//! site to its default copy instead of an error page.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod contact;
pub mod layout;
pub mod pages;
pub mod resolve;
pub mod view;

pub use contact::{ContactForm, ContactSubmission, FieldErrors, record_inquiry};
pub use pages::{HERO_HEADING, RenderedPage};
pub use resolve::{PageData, PageSpec, SHARED_SECTIONS, resolve_page};
pub use view::SectionView;
