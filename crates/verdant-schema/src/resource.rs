//! Multi-slice admin resources.
//!
//! A resource (projects, sectors, careers, eco-matrix) is one conceptual
//! thing made of several independently saved slices. Each slice is stored
//! as its own section; nothing ties two slices together transactionally.
//!
//! List and entity slices are stored as `{ "items": [...] }`. Document slices
//! are stored as the section itself.

use serde::{Deserialize, Serialize};

/// Key under which list and entity slices keep their items.
pub const ITEMS_KEY: &str = "items";

/// How a slice's content is shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SliceKind {
    /// List of entities addressable by a slug field.
    Entities {
        /// Name of the slug field on each entity.
        key: String,
    },
    /// Ordered list without per-item addressing.
    List,
    /// A single document.
    Document,
}

/// One independently saved part of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceSpec {
    /// Name used as the body key in resource requests (`projects`, `pageData`).
    pub name: String,
    /// Section the slice is stored in.
    pub section_id: String,
    /// Content shape.
    #[serde(flatten)]
    pub kind: SliceKind,
}

impl SliceSpec {
    fn new(name: &str, section_id: &str, kind: SliceKind) -> Self {
        Self {
            name: name.to_string(),
            section_id: section_id.to_string(),
            kind,
        }
    }

    fn entities(name: &str, section_id: &str) -> Self {
        Self::new(
            name,
            section_id,
            SliceKind::Entities {
                key: "slug".to_string(),
            },
        )
    }

    /// Returns `true` if the slice is stored as `{ "items": [...] }`.
    pub fn is_list(&self) -> bool {
        !matches!(self.kind, SliceKind::Document)
    }

    /// The slug field name, for entity slices.
    pub fn entity_key(&self) -> Option<&str> {
        match &self.kind {
            SliceKind::Entities { key } => Some(key),
            _ => None,
        }
    }
}

/// An admin resource and its slices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// URL name (`projects`, `eco-matrix`).
    pub name: String,
    /// Human title.
    pub title: String,
    /// Slices in save order.
    pub slices: Vec<SliceSpec>,
}

impl ResourceSpec {
    /// Look up a slice by its body key.
    pub fn slice(&self, name: &str) -> Option<&SliceSpec> {
        self.slices.iter().find(|s| s.name == name)
    }

    /// The slice whose items are addressed by `/{resource}/{slug}`.
    pub fn entity_slice(&self) -> Option<&SliceSpec> {
        self.slices.iter().find(|s| s.entity_key().is_some())
    }
}

/// The set of admin resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: Vec<ResourceSpec>,
}

impl ResourceRegistry {
    /// Build a registry from explicit resources.
    pub fn new(resources: Vec<ResourceSpec>) -> Self {
        Self { resources }
    }

    /// Find a resource by URL name.
    pub fn lookup(&self, name: &str) -> Option<&ResourceSpec> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// All resources in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.resources.iter()
    }

    /// The site's resources.
    pub fn standard() -> Self {
        Self::new(vec![
            ResourceSpec {
                name: "projects".to_string(),
                title: "Projects".to_string(),
                slices: vec![
                    SliceSpec::entities("projects", "projects"),
                    SliceSpec::new("categories", "project-categories", SliceKind::List),
                    SliceSpec::new("pageData", "page-projects", SliceKind::Document),
                ],
            },
            ResourceSpec {
                name: "sectors".to_string(),
                title: "Sectors".to_string(),
                slices: vec![
                    SliceSpec::entities("sectors", "sectors"),
                    SliceSpec::new("pageData", "page-sectors", SliceKind::Document),
                ],
            },
            ResourceSpec {
                name: "careers".to_string(),
                title: "Careers".to_string(),
                slices: vec![
                    SliceSpec::entities("jobs", "careers-jobs"),
                    SliceSpec::new("pageData", "page-careers", SliceKind::Document),
                ],
            },
            ResourceSpec {
                name: "eco-matrix".to_string(),
                title: "ECO-MATRIX".to_string(),
                slices: vec![
                    SliceSpec::new("menu", "eco-matrix-menu", SliceKind::List),
                    SliceSpec::entities("dimensions", "eco-matrix-dimensions"),
                    SliceSpec::new("nature", "eco-matrix-nature", SliceKind::Document),
                    SliceSpec::new("overview", "eco-matrix-overview", SliceKind::Document),
                    SliceSpec::new("pageData", "page-eco-matrix", SliceKind::Document),
                ],
            },
        ])
    }
}
