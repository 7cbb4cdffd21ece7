//! The section id → schema lookup table.
//!
//! Every schema is declared on its own, even where two sections share a
//! shape. Sections without an entry have no generic editor.

use crate::field::{FieldDefinition as F, SectionSchema};

/// Static lookup table of section schemas, in dashboard order.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Vec<SectionSchema>,
}

impl SchemaRegistry {
    /// Build a registry from explicit schemas.
    pub fn new(schemas: Vec<SectionSchema>) -> Self {
        Self { schemas }
    }

    /// Find the schema for a section id.
    pub fn lookup(&self, id: &str) -> Option<&SectionSchema> {
        self.schemas.iter().find(|s| s.id == id)
    }

    /// All schemas in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionSchema> {
        self.schemas.iter()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns `true` if no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// The site's schemas: shared chrome, home page blocks, per-page
    /// sections, and the storage sections behind the admin resources.
    pub fn standard() -> Self {
        Self::new(vec![
            // Shared chrome
            SectionSchema::new(
                "navbar",
                "Navigation Bar",
                vec![
                    F::text("logoText", "Logo Text"),
                    F::image("logoImage", "Logo Image"),
                    F::object_array(
                        "links",
                        "Links",
                        vec![F::text("label", "Label"), F::text("href", "URL")],
                    ),
                    F::text("ctaLabel", "Button Label"),
                    F::text("ctaHref", "Button URL"),
                ],
            ),
            SectionSchema::new(
                "footer",
                "Footer",
                vec![
                    F::textarea("tagline", "Tagline"),
                    F::textarea("address", "Address"),
                    F::text("phone", "Phone"),
                    F::text("email", "Email"),
                    F::object_array(
                        "links",
                        "Quick Links",
                        vec![F::text("label", "Label"), F::text("href", "URL")],
                    ),
                    F::object_array(
                        "socials",
                        "Social Links",
                        vec![F::text("platform", "Platform"), F::text("url", "URL")],
                    ),
                    F::text("copyright", "Copyright"),
                ],
            ),
            SectionSchema::new(
                "branding",
                "Branding",
                vec![
                    F::text("siteName", "Site Name"),
                    F::text("tagline", "Tagline"),
                    F::image("logo", "Logo"),
                    F::image("favicon", "Favicon"),
                    F::text("primaryColor", "Primary Color"),
                    F::text("accentColor", "Accent Color"),
                ],
            ),
            SectionSchema::new(
                "seo",
                "SEO",
                vec![
                    F::text("title", "Default Title"),
                    F::textarea("description", "Meta Description"),
                    F::array("keywords", "Keywords"),
                    F::image("ogImage", "Social Share Image"),
                ],
            ),
            // Home page
            SectionSchema::new(
                "hero",
                "Home Hero",
                vec![
                    F::text("heading", "Heading"),
                    F::textarea("subheading", "Subheading"),
                    F::image("backgroundImage", "Background Image"),
                    F::text("primaryCtaLabel", "Primary Button Label"),
                    F::text("primaryCtaHref", "Primary Button URL"),
                    F::text("secondaryCtaLabel", "Secondary Button Label"),
                    F::text("secondaryCtaHref", "Secondary Button URL"),
                ],
            ),
            SectionSchema::new(
                "services",
                "Home Services",
                vec![
                    F::text("heading", "Heading"),
                    F::textarea("subheading", "Subheading"),
                    F::object_array(
                        "items",
                        "Services",
                        vec![
                            F::text("title", "Title"),
                            F::textarea("description", "Description"),
                            F::image("image", "Image"),
                            F::text("href", "Link"),
                        ],
                    ),
                ],
            ),
            SectionSchema::new(
                "process",
                "Home Process",
                vec![
                    F::text("heading", "Heading"),
                    F::textarea("subheading", "Subheading"),
                    F::object_array(
                        "steps",
                        "Steps",
                        vec![
                            F::text("title", "Title"),
                            F::textarea("description", "Description"),
                        ],
                    ),
                ],
            ),
            SectionSchema::new(
                "testimonials",
                "Testimonials",
                vec![
                    F::text("heading", "Heading"),
                    F::object_array(
                        "items",
                        "Testimonials",
                        vec![
                            F::textarea("quote", "Quote"),
                            F::text("author", "Author"),
                            F::text("role", "Role"),
                            F::image("photo", "Photo"),
                        ],
                    ),
                ],
            ),
            SectionSchema::new(
                "faq",
                "FAQ",
                vec![
                    F::text("heading", "Heading"),
                    F::object_array(
                        "items",
                        "Questions",
                        vec![
                            F::text("question", "Question"),
                            F::textarea("answer", "Answer"),
                        ],
                    ),
                ],
            ),
            SectionSchema::new(
                "cta",
                "Call To Action",
                vec![
                    F::text("heading", "Heading"),
                    F::textarea("body", "Body"),
                    F::text("buttonLabel", "Button Label"),
                    F::text("buttonHref", "Button URL"),
                    F::image("backgroundImage", "Background Image"),
                ],
            ),
            // Pages
            SectionSchema::new(
                "page-about",
                "About Page",
                vec![
                    F::text("heroTitle", "Hero Title"),
                    F::textarea("heroSubtitle", "Hero Subtitle"),
                    F::image("heroImage", "Hero Image"),
                    F::text("storyHeading", "Story Heading"),
                    F::textarea("story", "Story"),
                    F::array("values", "Values"),
                    F::object_array(
                        "stats",
                        "Stats",
                        vec![F::text("value", "Value"), F::text("label", "Label")],
                    ),
                    F::object_array(
                        "team",
                        "Team",
                        vec![
                            F::text("name", "Name"),
                            F::text("role", "Role"),
                            F::image("photo", "Photo"),
                            F::textarea("bio", "Bio"),
                        ],
                    ),
                ],
            ),
            SectionSchema::new(
                "page-sectors",
                "Sectors Page",
                vec![
                    F::text("heroTitle", "Hero Title"),
                    F::textarea("heroSubtitle", "Hero Subtitle"),
                    F::image("heroImage", "Hero Image"),
                    F::textarea("intro", "Introduction"),
                ],
            ),
            SectionSchema::new(
                "page-projects",
                "Projects Page",
                vec![
                    F::text("heroTitle", "Hero Title"),
                    F::textarea("heroSubtitle", "Hero Subtitle"),
                    F::image("heroImage", "Hero Image"),
                    F::text("allLabel", "All Categories Label"),
                    F::text("emptyMessage", "No Projects Message"),
                ],
            ),
            SectionSchema::new(
                "page-careers",
                "Careers Page",
                vec![
                    F::text("heroTitle", "Hero Title"),
                    F::textarea("heroSubtitle", "Hero Subtitle"),
                    F::image("heroImage", "Hero Image"),
                    F::textarea("intro", "Introduction"),
                    F::array("benefits", "Benefits"),
                    F::text("applyEmail", "Applications Email"),
                    F::text("emptyMessage", "No Openings Message"),
                ],
            ),
            SectionSchema::new(
                "page-contact",
                "Contact Page",
                vec![
                    F::text("heroTitle", "Hero Title"),
                    F::textarea("heroSubtitle", "Hero Subtitle"),
                    F::textarea("address", "Address"),
                    F::text("phone", "Phone"),
                    F::text("email", "Email"),
                    F::array("hours", "Opening Hours"),
                    F::text("mapEmbedUrl", "Map Embed URL"),
                    F::text("formHeading", "Form Heading"),
                    F::text("successMessage", "Form Success Message"),
                ],
            ),
            SectionSchema::new(
                "page-eco-matrix",
                "ECO-MATRIX Page",
                vec![
                    F::text("heroTitle", "Hero Title"),
                    F::textarea("heroSubtitle", "Hero Subtitle"),
                    F::image("heroImage", "Hero Image"),
                    F::text("tagline", "Tagline"),
                ],
            ),
            // Resource storage sections
            SectionSchema::new(
                "projects",
                "Projects",
                vec![F::object_array(
                    "items",
                    "Projects",
                    vec![
                        F::text("slug", "Slug"),
                        F::text("title", "Title"),
                        F::text("category", "Category Slug"),
                        F::text("location", "Location"),
                        F::text("year", "Year"),
                        F::textarea("summary", "Summary"),
                        F::textarea("description", "Description"),
                        F::image("coverImage", "Cover Image"),
                        F::array("gallery", "Gallery Image URLs"),
                    ],
                )],
            ),
            SectionSchema::new(
                "project-categories",
                "Project Categories",
                vec![F::object_array(
                    "items",
                    "Categories",
                    vec![F::text("slug", "Slug"), F::text("name", "Name")],
                )],
            ),
            SectionSchema::new(
                "sectors",
                "Sectors",
                vec![F::object_array(
                    "items",
                    "Sectors",
                    vec![
                        F::text("slug", "Slug"),
                        F::text("name", "Name"),
                        F::textarea("summary", "Summary"),
                        F::textarea("description", "Description"),
                        F::image("image", "Image"),
                        F::array("highlights", "Highlights"),
                    ],
                )],
            ),
            SectionSchema::new(
                "careers-jobs",
                "Job Openings",
                vec![F::object_array(
                    "items",
                    "Jobs",
                    vec![
                        F::text("slug", "Slug"),
                        F::text("title", "Title"),
                        F::text("department", "Department"),
                        F::text("location", "Location"),
                        F::text("employmentType", "Employment Type"),
                        F::text("status", "Status (open/closed)"),
                        F::textarea("description", "Description"),
                        F::array("requirements", "Requirements"),
                    ],
                )],
            ),
            SectionSchema::new(
                "eco-matrix-menu",
                "ECO-MATRIX Menu",
                vec![F::object_array(
                    "items",
                    "Menu Items",
                    vec![F::text("label", "Label"), F::text("anchor", "Anchor")],
                )],
            ),
            SectionSchema::new(
                "eco-matrix-dimensions",
                "ECO-MATRIX Dimensions",
                vec![F::object_array(
                    "items",
                    "Dimensions",
                    vec![
                        F::text("slug", "Slug"),
                        F::text("title", "Title"),
                        F::textarea("description", "Description"),
                        F::text("metric", "Metric"),
                        F::image("icon", "Icon"),
                        F::array("points", "Key Points"),
                    ],
                )],
            ),
            SectionSchema::new(
                "eco-matrix-nature",
                "ECO-MATRIX Nature",
                vec![
                    F::text("heading", "Heading"),
                    F::textarea("body", "Body"),
                    F::image("image", "Image"),
                    F::array("points", "Points"),
                ],
            ),
            SectionSchema::new(
                "eco-matrix-overview",
                "ECO-MATRIX Overview",
                vec![
                    F::text("heading", "Heading"),
                    F::textarea("body", "Body"),
                    F::image("image", "Image"),
                    F::object_array(
                        "stats",
                        "Stats",
                        vec![F::text("value", "Value"), F::text("label", "Label")],
                    ),
                ],
            ),
        ])
    }
}
