//! Default section documents.
//!
//! One document per section the admin knows about. Object-array items get
//! an `order` matching their position.

use serde_json::{Value, json};
use verdant_core::Section;

/// Heading written to the home hero by a fresh seed.
pub const HERO_HEADING: &str = "Transforming Outdoor Spaces Into Natural Beauty.";

/// Number items' `order` by position.
fn ordered(items: Vec<Value>) -> Value {
    Value::Array(
        items
            .into_iter()
            .enumerate()
            .map(|(i, mut item)| {
                if let Some(object) = item.as_object_mut() {
                    object.insert("order".to_string(), Value::from(i));
                }
                item
            })
            .collect(),
    )
}

fn link(label: &str, href: &str) -> Value {
    json!({ "label": label, "href": href })
}

fn stat(value: &str, label: &str) -> Value {
    json!({ "value": value, "label": label })
}

/// The default document for `id`, if it is a known section.
pub fn default_section(id: &str) -> Option<Section> {
    let value = match id {
        "navbar" => json!({
            "logoText": "Verdant",
            "logoImage": "",
            "links": ordered(vec![
                link("Home", "/"),
                link("About", "/about"),
                link("Sectors", "/sectors"),
                link("Projects", "/projects"),
                link("ECO-MATRIX", "/eco-matrix"),
                link("Careers", "/careers"),
            ]),
            "ctaLabel": "Get in Touch",
            "ctaHref": "/contact",
        }),
        "footer" => json!({
            "tagline": "Landscape design, construction, and care rooted in ecology.",
            "address": "12 Greenway Lane\nRiverside",
            "phone": "+1 555 0100",
            "email": "hello@verdant.example",
            "links": ordered(vec![
                link("About", "/about"),
                link("Projects", "/projects"),
                link("Careers", "/careers"),
                link("Contact", "/contact"),
            ]),
            "socials": ordered(vec![
                json!({ "platform": "Instagram", "url": "https://instagram.com/verdant" }),
                json!({ "platform": "LinkedIn", "url": "https://linkedin.com/company/verdant" }),
            ]),
            "copyright": "© Verdant Landscapes. All rights reserved.",
        }),
        "branding" => json!({
            "siteName": "Verdant Landscapes",
            "tagline": "Natural spaces, thoughtfully made.",
            "logo": "",
            "favicon": "",
            "primaryColor": "#2f5d3a",
            "accentColor": "#c8a951",
        }),
        "seo" => json!({
            "title": "Verdant Landscapes",
            "description": "Landscape architecture, construction, and maintenance for homes, businesses, and public spaces.",
            "keywords": ["landscaping", "landscape design", "garden maintenance", "sustainability"],
            "ogImage": "",
        }),
        "hero" => json!({
            "heading": HERO_HEADING,
            "subheading": "We design, build, and care for landscapes that work with nature rather than against it.",
            "backgroundImage": "",
            "primaryCtaLabel": "View Our Projects",
            "primaryCtaHref": "/projects",
            "secondaryCtaLabel": "Talk to Us",
            "secondaryCtaHref": "/contact",
        }),
        "services" => json!({
            "heading": "What We Do",
            "subheading": "From first sketch to seasonal care.",
            "items": ordered(vec![
                json!({ "title": "Landscape Design", "description": "Site analysis, planting plans, and hardscape layouts.", "image": "", "href": "/sectors" }),
                json!({ "title": "Construction", "description": "Earthworks, paving, water features, and planting.", "image": "", "href": "/projects" }),
                json!({ "title": "Maintenance", "description": "Year-round care that keeps a landscape healthy.", "image": "", "href": "/contact" }),
            ]),
        }),
        "process" => json!({
            "heading": "How We Work",
            "subheading": "A clear path from idea to finished space.",
            "steps": ordered(vec![
                json!({ "title": "Consult", "description": "We walk the site and listen to how you want to use it." }),
                json!({ "title": "Design", "description": "Concepts, then detailed drawings and a fixed quote." }),
                json!({ "title": "Build", "description": "Our own crews deliver the work on schedule." }),
                json!({ "title": "Care", "description": "Optional maintenance plans keep it thriving." }),
            ]),
        }),
        "testimonials" => json!({
            "heading": "What Clients Say",
            "items": ordered(vec![
                json!({ "quote": "They turned a bare lot into the best part of our home.", "author": "Dana R.", "role": "Homeowner", "photo": "" }),
                json!({ "quote": "Professional, tidy, and on budget.", "author": "Marcus L.", "role": "Facilities Manager", "photo": "" }),
            ]),
        }),
        "faq" => json!({
            "heading": "Frequently Asked Questions",
            "items": ordered(vec![
                json!({ "question": "Do you work on small gardens?", "answer": "Yes. No space is too small for a good design." }),
                json!({ "question": "Do you offer maintenance only?", "answer": "Yes, for landscapes we built and for existing ones." }),
            ]),
        }),
        "cta" => json!({
            "heading": "Ready to Start?",
            "body": "Tell us about your space and we will get back to you within two working days.",
            "buttonLabel": "Contact Us",
            "buttonHref": "/contact",
            "backgroundImage": "",
        }),
        "page-about" => json!({
            "heroTitle": "About Verdant",
            "heroSubtitle": "A landscape studio built around living systems.",
            "heroImage": "",
            "storyHeading": "Our Story",
            "story": "Verdant started as a two-person design practice and grew into a full design-build team.",
            "values": ["Ecology first", "Honest craft", "Long-term thinking"],
            "stats": ordered(vec![
                stat("15+", "Years"),
                stat("400+", "Projects"),
                stat("30", "Team members"),
            ]),
            "team": ordered(vec![
                json!({ "name": "Alex Moreno", "role": "Founder & Lead Designer", "photo": "", "bio": "Landscape architect with a background in restoration ecology." }),
                json!({ "name": "Priya Shah", "role": "Construction Manager", "photo": "", "bio": "Runs our build crews and keeps projects on schedule." }),
            ]),
        }),
        "page-sectors" => json!({
            "heroTitle": "Sectors",
            "heroSubtitle": "Landscapes for every kind of place.",
            "heroImage": "",
            "intro": "We bring the same care to private gardens, workplaces, and public spaces.",
        }),
        "page-projects" => json!({
            "heroTitle": "Our Projects",
            "heroSubtitle": "A selection of recent work.",
            "heroImage": "",
            "allLabel": "All",
            "emptyMessage": "No projects in this category yet.",
        }),
        "page-careers" => json!({
            "heroTitle": "Careers",
            "heroSubtitle": "Grow with us.",
            "heroImage": "",
            "intro": "We are always looking for people who care about plants, craft, and each other.",
            "benefits": ["Paid training", "Year-round work", "Tools and gear provided"],
            "applyEmail": "jobs@verdant.example",
            "emptyMessage": "There are no open positions right now.",
        }),
        "page-contact" => json!({
            "heroTitle": "Contact Us",
            "heroSubtitle": "We would love to hear about your project.",
            "address": "12 Greenway Lane\nRiverside",
            "phone": "+1 555 0100",
            "email": "hello@verdant.example",
            "hours": ["Mon-Fri 8:00-17:00", "Sat 9:00-13:00"],
            "mapEmbedUrl": "",
            "formHeading": "Send Us a Message",
            "successMessage": "Thank you. We will be in touch soon.",
        }),
        "page-eco-matrix" => json!({
            "heroTitle": "ECO-MATRIX",
            "heroSubtitle": "How we measure the ecological value of a landscape.",
            "heroImage": "",
            "tagline": "Design that gives back.",
        }),
        "projects" => json!({
            "items": ordered(vec![
                json!({
                    "slug": "riverside-garden",
                    "title": "Riverside Garden",
                    "category": "residential",
                    "location": "Riverside",
                    "year": "2024",
                    "summary": "A family garden with a rain garden and native meadow.",
                    "description": "Stormwater from the roof now feeds a planted rain garden.",
                    "coverImage": "",
                    "gallery": [],
                }),
                json!({
                    "slug": "harbour-plaza",
                    "title": "Harbour Plaza",
                    "category": "commercial",
                    "location": "Harbourside",
                    "year": "2023",
                    "summary": "A shaded public plaza for an office campus.",
                    "description": "Permeable paving and street trees cut summer surface temperatures.",
                    "coverImage": "",
                    "gallery": [],
                }),
            ]),
        }),
        "project-categories" => json!({
            "items": ordered(vec![
                json!({ "slug": "residential", "name": "Residential" }),
                json!({ "slug": "commercial", "name": "Commercial" }),
                json!({ "slug": "public", "name": "Public" }),
            ]),
        }),
        "sectors" => json!({
            "items": ordered(vec![
                json!({
                    "slug": "residential",
                    "name": "Residential",
                    "summary": "Gardens for everyday living.",
                    "description": "Private gardens, courtyards, and roof terraces.",
                    "image": "",
                    "highlights": ["Planting design", "Outdoor kitchens", "Water features"],
                }),
                json!({
                    "slug": "commercial",
                    "name": "Commercial",
                    "summary": "Workplaces people want to be in.",
                    "description": "Office campuses, retail frontages, and hospitality.",
                    "image": "",
                    "highlights": ["Green roofs", "Maintenance contracts"],
                }),
            ]),
        }),
        "careers-jobs" => json!({
            "items": ordered(vec![
                json!({
                    "slug": "landscape-gardener",
                    "title": "Landscape Gardener",
                    "department": "Maintenance",
                    "location": "Riverside",
                    "employmentType": "Full-time",
                    "status": "open",
                    "description": "Care for a portfolio of residential and commercial sites.",
                    "requirements": ["Driving licence", "Plant knowledge"],
                }),
            ]),
        }),
        "eco-matrix-menu" => json!({
            "items": ordered(vec![
                json!({ "label": "Overview", "anchor": "overview" }),
                json!({ "label": "Dimensions", "anchor": "dimensions" }),
                json!({ "label": "Nature", "anchor": "nature" }),
            ]),
        }),
        "eco-matrix-dimensions" => json!({
            "items": ordered(vec![
                json!({
                    "slug": "biodiversity",
                    "title": "Biodiversity",
                    "description": "Variety of habitats and native species supported.",
                    "metric": "Native species count",
                    "icon": "leaf",
                    "points": ["Native planting", "Habitat features"],
                }),
                json!({
                    "slug": "water",
                    "title": "Water",
                    "description": "How much rainfall is captured and reused on site.",
                    "metric": "Runoff reduction",
                    "icon": "droplet",
                    "points": ["Rain gardens", "Permeable surfaces"],
                }),
                json!({
                    "slug": "carbon",
                    "title": "Carbon",
                    "description": "Carbon stored in soil and planting over time.",
                    "metric": "Tonnes stored",
                    "icon": "cloud",
                    "points": ["Tree planting", "Low-carbon materials"],
                }),
            ]),
        }),
        "eco-matrix-nature" => json!({
            "heading": "Working With Nature",
            "body": "Every design starts from the soil, water, and species already on site.",
            "image": "",
            "points": ["Protect what exists", "Restore what was lost", "Design for change"],
        }),
        "eco-matrix-overview" => json!({
            "heading": "What Is ECO-MATRIX?",
            "body": "A scoring framework we use to set and track ecological goals for each project.",
            "image": "",
            "stats": ordered(vec![
                stat("3", "Dimensions"),
                stat("120+", "Projects scored"),
            ]),
        }),
        _ => return None,
    };
    Section::from_value(value).ok()
}
