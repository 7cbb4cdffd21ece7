//! Public page templates.
//!
//! Each page is a [`PageSpec`] naming the sections it reads plus a render
//! function. Render functions never fail: whatever [`resolve_page`] could
//! not fetch falls back to the literal defaults written here.

use std::fmt::Write;
use std::sync::LazyLock;

use serde_json::{Value, json};
use verdant_core::html::{escape, safe_href};
use verdant_storage::ContentStore;

use crate::contact::ContactForm;
use crate::layout::{document, multiline};
use crate::resolve::{PageData, PageSpec, resolve_page};
use crate::view::SectionView;

/// Home hero heading when nothing has been saved.
pub const HERO_HEADING: &str = "Transforming Outdoor Spaces Into Natural Beauty.";

const HERO_SUBHEADING: &str =
    "We design, build, and care for landscapes that work with nature, not against it.";

/// Result of rendering one public page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Complete HTML document.
    pub html: String,
    /// `false` when the requested entity does not exist (serve as 404).
    pub found: bool,
}

impl RenderedPage {
    fn found(html: String) -> Self {
        Self { html, found: true }
    }

    fn missing(html: String) -> Self {
        Self { html, found: false }
    }
}

// ============================================================================
// Page specs
// ============================================================================

/// `/`
pub const HOME: PageSpec = PageSpec {
    name: "home",
    sections: &["hero", "services", "process", "testimonials", "faq", "cta"],
};

/// `/about`
pub const ABOUT: PageSpec = PageSpec {
    name: "about",
    sections: &["page-about", "cta"],
};

/// `/sectors` and `/sectors/{slug}`
pub const SECTORS: PageSpec = PageSpec {
    name: "sectors",
    sections: &["page-sectors", "sectors", "cta"],
};

/// `/projects` and `/projects/{slug}`
pub const PROJECTS: PageSpec = PageSpec {
    name: "projects",
    sections: &["page-projects", "projects", "project-categories"],
};

/// `/careers`
pub const CAREERS: PageSpec = PageSpec {
    name: "careers",
    sections: &["page-careers", "careers-jobs"],
};

/// `/contact`
pub const CONTACT: PageSpec = PageSpec {
    name: "contact",
    sections: &["page-contact"],
};

/// `/eco-matrix`
pub const ECO_MATRIX: PageSpec = PageSpec {
    name: "eco-matrix",
    sections: &[
        "page-eco-matrix",
        "eco-matrix-menu",
        "eco-matrix-dimensions",
        "eco-matrix-nature",
        "eco-matrix-overview",
    ],
};

/// Chrome only, for 404 pages.
pub const NOT_FOUND: PageSpec = PageSpec {
    name: "not-found",
    sections: &[],
};

static DEFAULT_SERVICES: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        json!({ "title": "Landscape Design", "description": "Plans shaped around your site, soil, and the way you use it.", "href": "/sectors", "order": 0 }),
        json!({ "title": "Construction", "description": "Hardscape, planting, and drainage delivered by our own crews.", "href": "/projects", "order": 1 }),
        json!({ "title": "Maintenance", "description": "Seasonal care that keeps a landscape healthy year after year.", "href": "/contact", "order": 2 }),
    ]
});

static DEFAULT_STEPS: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        json!({ "title": "Consult", "description": "We walk the site with you and listen.", "order": 0 }),
        json!({ "title": "Design", "description": "A plan, a planting list, and a clear quote.", "order": 1 }),
        json!({ "title": "Build", "description": "Our crews build it and clean up after.", "order": 2 }),
        json!({ "title": "Care", "description": "Ongoing maintenance as the garden grows in.", "order": 3 }),
    ]
});

// ============================================================================
// Shared fragments
// ============================================================================

/// Hero banner for the inner pages (`heroTitle`, `heroSubtitle`, `heroImage`).
fn page_hero(view: SectionView<'_>, title: &str, subtitle: &str) -> String {
    let mut html = String::from(r#"<section class="page-hero""#);
    if let Some(image) = view.opt_text("heroImage") {
        let _ = write!(html, r#" style="background-image:url('{}')""#, escape(image));
    }
    let _ = write!(
        html,
        "><h1>{}</h1><p>{}</p></section>",
        escape(view.text("heroTitle", title)),
        escape(view.text("heroSubtitle", subtitle))
    );
    html
}

fn cta_block(view: SectionView<'_>) -> String {
    let mut html = String::from(r#"<section class="cta""#);
    if let Some(image) = view.opt_text("backgroundImage") {
        let _ = write!(html, r#" style="background-image:url('{}')""#, escape(image));
    }
    let _ = write!(
        html,
        r#"><h2>{}</h2><p>{}</p><a class="button" href="{}">{}</a></section>"#,
        escape(view.text("heading", "Ready to transform your outdoor space?")),
        escape(view.text("body", "Tell us about your project and we will be in touch.")),
        escape(safe_href(view.text("buttonHref", "/contact"))),
        escape(view.text("buttonLabel", "Start a Conversation"))
    );
    html
}

fn bullet_list(class: &str, items: &[&str]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut html = format!(r#"<ul class="{class}">"#);
    for item in items {
        let _ = write!(html, "<li>{}</li>", escape(item));
    }
    html.push_str("</ul>");
    html
}

fn image(src: Option<&str>, alt: &str) -> String {
    src.map(|src| format!(r#"<img src="{}" alt="{}">"#, escape(src), escape(alt)))
        .unwrap_or_default()
}

/// Entity slices are stored as `{ "items": [...] }`.
fn entities<'a>(data: &'a PageData, section: &str) -> Vec<SectionView<'a>> {
    data.view(section).items("items")
}

fn find_by_slug<'a>(data: &'a PageData, section: &str, slug: &str) -> Option<SectionView<'a>> {
    entities(data, section)
        .into_iter()
        .find(|item| item.opt_text("slug") == Some(slug))
}

// ============================================================================
// Home
// ============================================================================

/// Render `/`.
pub async fn home(store: &ContentStore) -> RenderedPage {
    let data = resolve_page(store, &HOME).await;
    RenderedPage::found(render_home(&data))
}

fn render_home(data: &PageData) -> String {
    let hero = data.view("hero");
    let mut body = String::from(r#"<section class="hero""#);
    if let Some(image) = hero.opt_text("backgroundImage") {
        let _ = write!(body, r#" style="background-image:url('{}')""#, escape(image));
    }
    let _ = write!(
        body,
        r#"><h1>{}</h1><p>{}</p><div class="actions"><a class="button" href="{}">{}</a><a class="button secondary" href="{}">{}</a></div></section>"#,
        escape(hero.text("heading", HERO_HEADING)),
        escape(hero.text("subheading", HERO_SUBHEADING)),
        escape(safe_href(hero.text("primaryCtaHref", "/contact"))),
        escape(hero.text("primaryCtaLabel", "Get a Quote")),
        escape(safe_href(hero.text("secondaryCtaHref", "/projects"))),
        escape(hero.text("secondaryCtaLabel", "View Our Work")),
    );

    let services = data.view("services");
    let _ = write!(
        body,
        r#"<section class="services"><h2>{}</h2><p>{}</p><div class="cards">"#,
        escape(services.text("heading", "What We Do")),
        escape(services.text(
            "subheading",
            "From first sketch to seasonal care, one team looks after your landscape."
        ))
    );
    for item in services.items_or("items", &DEFAULT_SERVICES) {
        let title = item.text("title", "");
        let _ = write!(
            body,
            r#"<article class="card">{}<h3>{}</h3><p>{}</p>"#,
            image(item.opt_text("image"), title),
            escape(title),
            escape(item.text("description", ""))
        );
        if let Some(href) = item.opt_text("href") {
            let _ = write!(body, r#"<a href="{}">Learn more</a>"#, escape(safe_href(href)));
        }
        body.push_str("</article>");
    }
    body.push_str("</div></section>");

    let process = data.view("process");
    let _ = write!(
        body,
        r#"<section class="process"><h2>{}</h2><p>{}</p><ol>"#,
        escape(process.text("heading", "How We Work")),
        escape(process.text("subheading", "A simple process, start to finish."))
    );
    for step in process.items_or("steps", &DEFAULT_STEPS) {
        let _ = write!(
            body,
            "<li><h3>{}</h3><p>{}</p></li>",
            escape(step.text("title", "")),
            escape(step.text("description", ""))
        );
    }
    body.push_str("</ol></section>");

    let testimonials = data.view("testimonials");
    let quotes = testimonials.items("items");
    if !quotes.is_empty() {
        let _ = write!(
            body,
            r#"<section class="testimonials"><h2>{}</h2>"#,
            escape(testimonials.text("heading", "What Our Clients Say"))
        );
        for quote in quotes {
            let author = quote.text("author", "");
            let _ = write!(
                body,
                "<figure>{}<blockquote>{}</blockquote><figcaption>{}<span>{}</span></figcaption></figure>",
                image(quote.opt_text("photo"), author),
                multiline(quote.text("quote", "")),
                escape(author),
                escape(quote.text("role", ""))
            );
        }
        body.push_str("</section>");
    }

    let faq = data.view("faq");
    let questions = faq.items("items");
    if !questions.is_empty() {
        let _ = write!(
            body,
            r#"<section class="faq"><h2>{}</h2>"#,
            escape(faq.text("heading", "Frequently Asked Questions"))
        );
        for item in questions {
            let _ = write!(
                body,
                "<details><summary>{}</summary><p>{}</p></details>",
                escape(item.text("question", "")),
                multiline(item.text("answer", ""))
            );
        }
        body.push_str("</section>");
    }

    body.push_str(&cta_block(data.view("cta")));
    document(data, "/", None, &body)
}

// ============================================================================
// About
// ============================================================================

/// Render `/about`.
pub async fn about(store: &ContentStore) -> RenderedPage {
    let data = resolve_page(store, &ABOUT).await;
    let page = data.view("page-about");

    let mut body = page_hero(
        page,
        "About Us",
        "A landscape company built on craft, care, and a respect for living systems.",
    );
    let _ = write!(
        body,
        r#"<section class="story"><h2>{}</h2><p>{}</p>{}</section>"#,
        escape(page.text("storyHeading", "Our Story")),
        multiline(page.text(
            "story",
            "We started with one truck and a belief that good landscapes should give back more than they take."
        )),
        image(page.opt_text("heroImage"), "")
    );
    let values = page.list("values", &["Craftsmanship", "Sustainability", "Integrity"]);
    let _ = write!(
        body,
        r#"<section class="values"><h2>Our Values</h2>{}</section>"#,
        bullet_list("values", &values)
    );

    let stats = page.items("stats");
    if !stats.is_empty() {
        body.push_str(r#"<section class="stats">"#);
        for stat in stats {
            let _ = write!(
                body,
                "<div><strong>{}</strong><span>{}</span></div>",
                escape(stat.text("value", "")),
                escape(stat.text("label", ""))
            );
        }
        body.push_str("</section>");
    }

    let team = page.items("team");
    if !team.is_empty() {
        body.push_str(r#"<section class="team"><h2>Our Team</h2><div class="cards">"#);
        for member in team {
            let name = member.text("name", "");
            let _ = write!(
                body,
                r#"<article class="card">{}<h3>{}</h3><p class="role">{}</p><p>{}</p></article>"#,
                image(member.opt_text("photo"), name),
                escape(name),
                escape(member.text("role", "")),
                escape(member.text("bio", ""))
            );
        }
        body.push_str("</div></section>");
    }

    body.push_str(&cta_block(data.view("cta")));
    RenderedPage::found(document(&data, "/about", Some("About"), &body))
}

// ============================================================================
// Sectors
// ============================================================================

/// Render `/sectors`.
pub async fn sectors(store: &ContentStore) -> RenderedPage {
    let data = resolve_page(store, &SECTORS).await;
    let page = data.view("page-sectors");

    let mut body = page_hero(
        page,
        "Sectors We Serve",
        "Residential, commercial, and public landscapes.",
    );
    if let Some(intro) = page.opt_text("intro") {
        let _ = write!(body, r#"<p class="intro">{}</p>"#, multiline(intro));
    }
    let items = entities(&data, "sectors");
    if items.is_empty() {
        body.push_str(r#"<p class="empty">Sector details are coming soon.</p>"#);
    } else {
        body.push_str(r#"<div class="cards">"#);
        for sector in items {
            let name = sector.text("name", "");
            let _ = write!(
                body,
                r#"<article class="card">{}<h2>{}</h2><p>{}</p><a href="/sectors/{}">Read more</a></article>"#,
                image(sector.opt_text("image"), name),
                escape(name),
                escape(sector.text("summary", "")),
                escape(sector.text("slug", ""))
            );
        }
        body.push_str("</div>");
    }
    body.push_str(&cta_block(data.view("cta")));
    RenderedPage::found(document(&data, "/sectors", Some("Sectors"), &body))
}

/// Render `/sectors/{slug}`.
pub async fn sector_detail(store: &ContentStore, slug: &str) -> RenderedPage {
    let data = resolve_page(store, &SECTORS).await;
    let Some(sector) = find_by_slug(&data, "sectors", slug) else {
        return RenderedPage::missing(render_not_found(&data));
    };

    let name = sector.text("name", "Sector");
    let mut body = format!(
        r#"<section class="page-hero"><h1>{}</h1><p>{}</p></section><article class="sector">{}"#,
        escape(name),
        escape(sector.text("summary", "")),
        image(sector.opt_text("image"), name)
    );
    if let Some(description) = sector.opt_text("description") {
        let _ = write!(body, "<p>{}</p>", multiline(description));
    }
    body.push_str(&bullet_list("highlights", &sector.list("highlights", &[])));
    body.push_str(r#"<a href="/sectors">All sectors</a></article>"#);
    body.push_str(&cta_block(data.view("cta")));
    RenderedPage::found(document(&data, "/sectors", Some(name), &body))
}

// ============================================================================
// Projects
// ============================================================================

/// Render `/projects`, optionally filtered to one category slug.
///
/// An unknown category shows the empty message rather than a 404.
pub async fn projects(store: &ContentStore, category: Option<&str>) -> RenderedPage {
    let data = resolve_page(store, &PROJECTS).await;
    let page = data.view("page-projects");
    let category = category.filter(|c| !c.is_empty());

    let mut body = page_hero(
        page,
        "Our Projects",
        "A selection of gardens, grounds, and public spaces we have built.",
    );

    body.push_str(r#"<nav class="filters">"#);
    let all_class = if category.is_none() { " active" } else { "" };
    let _ = write!(
        body,
        r#"<a class="filter{all_class}" href="/projects">{}</a>"#,
        escape(page.text("allLabel", "All"))
    );
    for cat in entities(&data, "project-categories") {
        let Some(slug) = cat.opt_text("slug") else {
            continue;
        };
        let class = if category == Some(slug) { " active" } else { "" };
        let _ = write!(
            body,
            r#"<a class="filter{class}" href="/projects?category={}">{}</a>"#,
            escape(slug),
            escape(cat.text("name", slug))
        );
    }
    body.push_str("</nav>");

    let shown: Vec<SectionView<'_>> = entities(&data, "projects")
        .into_iter()
        .filter(|p| category.is_none_or(|c| p.opt_text("category") == Some(c)))
        .collect();
    if shown.is_empty() {
        let _ = write!(
            body,
            r#"<p class="empty">{}</p>"#,
            escape(page.text("emptyMessage", "No projects to show yet."))
        );
    } else {
        body.push_str(r#"<div class="cards">"#);
        for project in shown {
            let title = project.text("title", "");
            let _ = write!(
                body,
                r#"<article class="card">{}<h2><a href="/projects/{}">{}</a></h2><p class="meta">{}</p><p>{}</p></article>"#,
                image(project.opt_text("coverImage"), title),
                escape(project.text("slug", "")),
                escape(title),
                escape(&meta(&[project.text("location", ""), project.text("year", "")])),
                escape(project.text("summary", ""))
            );
        }
        body.push_str("</div>");
    }
    RenderedPage::found(document(&data, "/projects", Some("Projects"), &body))
}

/// Render `/projects/{slug}`.
pub async fn project_detail(store: &ContentStore, slug: &str) -> RenderedPage {
    let data = resolve_page(store, &PROJECTS).await;
    let Some(project) = find_by_slug(&data, "projects", slug) else {
        return RenderedPage::missing(render_not_found(&data));
    };

    let title = project.text("title", "Project");
    let category = project.opt_text("category").map(|slug| {
        find_by_slug(&data, "project-categories", slug)
            .map(|c| c.text("name", slug))
            .unwrap_or(slug)
    });
    let mut body = format!(
        r#"<section class="page-hero"><h1>{}</h1><p class="meta">{}</p></section><article class="project">{}"#,
        escape(title),
        escape(&meta(&[
            category.unwrap_or_default(),
            project.text("location", ""),
            project.text("year", "")
        ])),
        image(project.opt_text("coverImage"), title)
    );
    let description = project.text("description", project.text("summary", ""));
    if !description.is_empty() {
        let _ = write!(body, "<p>{}</p>", multiline(description));
    }
    let gallery = project.list("gallery", &[]);
    if !gallery.is_empty() {
        body.push_str(r#"<div class="gallery">"#);
        for src in gallery {
            body.push_str(&image(Some(src), title));
        }
        body.push_str("</div>");
    }
    body.push_str(r#"<a href="/projects">All projects</a></article>"#);
    RenderedPage::found(document(&data, "/projects", Some(title), &body))
}

fn meta(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" · ")
}

// ============================================================================
// Careers
// ============================================================================

/// Jobs without a status count as open; anything but "open" is hidden.
pub fn is_open(status: Option<&str>) -> bool {
    status.is_none_or(|s| s.trim().eq_ignore_ascii_case("open"))
}

/// Render `/careers` (open jobs only).
pub async fn careers(store: &ContentStore) -> RenderedPage {
    let data = resolve_page(store, &CAREERS).await;
    let page = data.view("page-careers");

    let mut body = page_hero(
        page,
        "Careers",
        "Join a team that builds landscapes to last.",
    );
    if let Some(intro) = page.opt_text("intro") {
        let _ = write!(body, r#"<p class="intro">{}</p>"#, multiline(intro));
    }
    let benefits = page.list("benefits", &[]);
    if !benefits.is_empty() {
        let _ = write!(
            body,
            r#"<section class="benefits"><h2>Why Work With Us</h2>{}</section>"#,
            bullet_list("benefits", &benefits)
        );
    }

    let open: Vec<SectionView<'_>> = entities(&data, "careers-jobs")
        .into_iter()
        .filter(|job| is_open(job.opt_text("status")))
        .collect();
    body.push_str(r#"<section class="jobs"><h2>Open Positions</h2>"#);
    if open.is_empty() {
        let _ = write!(
            body,
            r#"<p class="empty">{}</p>"#,
            escape(page.text(
                "emptyMessage",
                "There are no open positions right now. Check back soon."
            ))
        );
    }
    let apply = page.text("applyEmail", "careers@verdant.example");
    for job in open {
        let title = job.text("title", "");
        let _ = write!(
            body,
            r#"<article class="job" id="{}"><h3>{}</h3><p class="meta">{}</p>"#,
            escape(job.text("slug", "")),
            escape(title),
            escape(&meta(&[
                job.text("department", ""),
                job.text("location", ""),
                job.text("employmentType", "")
            ]))
        );
        if let Some(description) = job.opt_text("description") {
            let _ = write!(body, "<p>{}</p>", multiline(description));
        }
        body.push_str(&bullet_list("requirements", &job.list("requirements", &[])));
        let _ = write!(
            body,
            r#"<a class="button" href="mailto:{}">Apply</a></article>"#,
            escape(apply)
        );
    }
    body.push_str("</section>");
    RenderedPage::found(document(&data, "/careers", Some("Careers"), &body))
}

// ============================================================================
// Contact
// ============================================================================

/// Render `/contact` with the given form state.
pub async fn contact(store: &ContentStore, form: &ContactForm) -> RenderedPage {
    let data = resolve_page(store, &CONTACT).await;
    let page = data.view("page-contact");
    let footer = data.view("footer");

    let mut body = format!(
        r#"<section class="page-hero"><h1>{}</h1><p>{}</p></section><div class="contact-page"><aside>"#,
        escape(page.text("heroTitle", "Contact Us")),
        escape(page.text(
            "heroSubtitle",
            "Tell us about your space and we will get back to you within two business days."
        ))
    );
    if let Some(address) = page.opt_text("address").or(footer.opt_text("address")) {
        let _ = write!(body, "<address>{}</address>", multiline(address));
    }
    if let Some(phone) = page.opt_text("phone").or(footer.opt_text("phone")) {
        let _ = write!(body, r#"<p><a href="tel:{0}">{0}</a></p>"#, escape(phone));
    }
    if let Some(email) = page.opt_text("email").or(footer.opt_text("email")) {
        let _ = write!(body, r#"<p><a href="mailto:{0}">{0}</a></p>"#, escape(email));
    }
    body.push_str(&bullet_list("hours", &page.list("hours", &[])));
    if let Some(map) = page.opt_text("mapEmbedUrl").filter(|u| u.starts_with("https://")) {
        let _ = write!(
            body,
            r#"<iframe class="map" src="{}" loading="lazy" title="Map"></iframe>"#,
            escape(map)
        );
    }
    body.push_str("</aside>");

    let _ = write!(
        body,
        r#"<section class="contact-form"><h2>{}</h2>"#,
        escape(page.text("formHeading", "Send Us a Message"))
    );
    if form.sent {
        let _ = write!(
            body,
            r#"<p class="success">{}</p>"#,
            escape(page.text(
                "successMessage",
                "Thank you! Your message has been sent."
            ))
        );
    }
    body.push_str(&field_error(form, "form"));
    body.push_str(r#"<form method="post" action="/contact">"#);
    let values = &form.values;
    for (name, label, value, kind) in [
        ("name", "Name", values.name.as_str(), "text"),
        ("email", "Email", values.email.as_str(), "email"),
        ("phone", "Phone (optional)", values.phone.as_str(), "tel"),
    ] {
        let _ = write!(
            body,
            r#"<label>{label}<input type="{kind}" name="{name}" value="{}"></label>"#,
            escape(value)
        );
        body.push_str(&field_error(form, name));
    }
    let _ = write!(
        body,
        r#"<label>Message<textarea name="message" rows="6">{}</textarea></label>{}<button type="submit">Send</button></form></section></div>"#,
        escape(&values.message),
        field_error(form, "message")
    );
    RenderedPage::found(document(&data, "/contact", Some("Contact"), &body))
}

fn field_error(form: &ContactForm, field: &str) -> String {
    form.errors
        .get(field)
        .map(|message| format!(r#"<p class="field-error">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

// ============================================================================
// ECO-MATRIX
// ============================================================================

/// Render `/eco-matrix` with one dimension selected.
///
/// An unknown or missing slug selects the first dimension.
pub async fn eco_matrix(store: &ContentStore, dimension: Option<&str>) -> RenderedPage {
    let data = resolve_page(store, &ECO_MATRIX).await;
    let page = data.view("page-eco-matrix");

    let mut body = page_hero(
        page,
        "ECO-MATRIX",
        "Our framework for measuring the ecological value of every landscape we build.",
    );
    if let Some(tagline) = page.opt_text("tagline") {
        let _ = write!(body, r#"<p class="tagline">{}</p>"#, escape(tagline));
    }

    let menu = entities(&data, "eco-matrix-menu");
    if !menu.is_empty() {
        body.push_str(r#"<nav class="eco-menu"><ul>"#);
        for item in menu {
            let _ = write!(
                body,
                "<li><a href=\"#{}\">{}</a></li>",
                escape(item.text("anchor", "")),
                escape(item.text("label", ""))
            );
        }
        body.push_str("</ul></nav>");
    }

    let overview = data.view("eco-matrix-overview");
    let _ = write!(
        body,
        r#"<section id="overview" class="overview"><h2>{}</h2><p>{}</p>{}"#,
        escape(overview.text("heading", "What is ECO-MATRIX?")),
        multiline(overview.text(
            "body",
            "ECO-MATRIX scores a landscape across the dimensions that matter for the living systems it supports."
        )),
        image(overview.opt_text("image"), "")
    );
    let stats = overview.items("stats");
    if !stats.is_empty() {
        body.push_str(r#"<div class="stats">"#);
        for stat in stats {
            let _ = write!(
                body,
                "<div><strong>{}</strong><span>{}</span></div>",
                escape(stat.text("value", "")),
                escape(stat.text("label", ""))
            );
        }
        body.push_str("</div>");
    }
    body.push_str("</section>");

    let dimensions = entities(&data, "eco-matrix-dimensions");
    if !dimensions.is_empty() {
        let selected = dimension
            .and_then(|slug| {
                dimensions
                    .iter()
                    .position(|d| d.opt_text("slug") == Some(slug))
            })
            .unwrap_or(0);
        body.push_str(r#"<section id="dimensions" class="dimensions"><nav class="tabs">"#);
        for (i, dim) in dimensions.iter().enumerate() {
            let class = if i == selected { " active" } else { "" };
            let _ = write!(
                body,
                r##"<a class="tab{class}" href="/eco-matrix?dimension={}#dimensions">{}</a>"##,
                escape(dim.text("slug", "")),
                escape(dim.text("title", ""))
            );
        }
        body.push_str("</nav>");
        let dim = dimensions[selected];
        let title = dim.text("title", "");
        let _ = write!(
            body,
            r#"<article class="dimension">{}<h3>{}</h3><p class="metric">{}</p><p>{}</p>{}</article></section>"#,
            image(dim.opt_text("icon"), title),
            escape(title),
            escape(dim.text("metric", "")),
            multiline(dim.text("description", "")),
            bullet_list("points", &dim.list("points", &[]))
        );
    }

    let nature = data.view("eco-matrix-nature");
    let _ = write!(
        body,
        r#"<section id="nature" class="nature"><h2>{}</h2><p>{}</p>{}{}</section>"#,
        escape(nature.text("heading", "Designed With Nature")),
        multiline(nature.text(
            "body",
            "Native planting, healthy soil, and clean water are the foundation of every score."
        )),
        image(nature.opt_text("image"), ""),
        bullet_list("points", &nature.list("points", &[]))
    );

    RenderedPage::found(document(&data, "/eco-matrix", Some("ECO-MATRIX"), &body))
}

// ============================================================================
// Not found
// ============================================================================

/// Render the 404 page.
pub async fn not_found(store: &ContentStore) -> RenderedPage {
    let data = resolve_page(store, &NOT_FOUND).await;
    RenderedPage::missing(render_not_found(&data))
}

fn render_not_found(data: &PageData) -> String {
    let body = r#"<section class="not-found"><h1>Page Not Found</h1><p>The page you are looking for does not exist or has moved.</p><a class="button" href="/">Back to Home</a></section>"#;
    document(data, "", Some("Page Not Found"), body)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use verdant_core::{Section, SectionId};
    use verdant_storage::MemoryStore;

    async fn store_with(sections: Vec<(&str, Value)>) -> ContentStore {
        let store = ContentStore::memory();
        for (id, value) in sections {
            store
                .set(&SectionId::new(id).unwrap(), Section::from_value(value).unwrap())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_home_hero_default() {
        let page = home(&ContentStore::memory()).await;
        assert!(page.found);
        assert!(page.html.contains("<h1>Transforming Outdoor Spaces Into Natural Beauty.</h1>"));
        assert!(page.html.contains("Landscape Design"));
    }

    #[tokio::test]
    async fn test_home_hero_override() {
        let store = store_with(vec![("hero", json!({ "heading": "Gardens & More" }))]).await;
        let page = home(&store).await;
        assert!(page.html.contains("<h1>Gardens &amp; More</h1>"));
        assert!(!page.html.contains(HERO_HEADING));
    }

    #[tokio::test]
    async fn test_failing_store_still_renders_every_page() {
        let backend = Arc::new(MemoryStore::new());
        backend.set_fail_reads(true);
        let store = ContentStore::new(backend);
        assert!(home(&store).await.html.contains(HERO_HEADING));
        assert!(about(&store).await.found);
        assert!(sectors(&store).await.found);
        assert!(projects(&store, None).await.found);
        assert!(careers(&store).await.found);
        assert!(contact(&store, &ContactForm::default()).await.found);
        assert!(eco_matrix(&store, None).await.found);
        assert!(!sector_detail(&store, "parks").await.found);
    }

    #[tokio::test]
    async fn test_home_services_sorted_by_order() {
        let store = store_with(vec![(
            "services",
            json!({ "items": [
                { "title": "Second", "order": 1 },
                { "title": "First", "order": 0 }
            ]}),
        )])
        .await;
        let html = home(&store).await.html;
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());
        assert!(!html.contains("Landscape Design"));
    }

    #[tokio::test]
    async fn test_project_filter_and_detail() {
        let store = store_with(vec![
            (
                "projects",
                json!({ "items": [
                    { "slug": "park", "title": "City Park", "category": "public", "order": 0 },
                    { "slug": "yard", "title": "Back Yard", "category": "home", "order": 1 }
                ]}),
            ),
            (
                "project-categories",
                json!({ "items": [
                    { "slug": "public", "name": "Public Spaces", "order": 0 },
                    { "slug": "home", "name": "Residential", "order": 1 }
                ]}),
            ),
        ])
        .await;

        let all = projects(&store, None).await.html;
        assert!(all.contains("City Park") && all.contains("Back Yard"));

        let filtered = projects(&store, Some("home")).await.html;
        assert!(filtered.contains("Back Yard"));
        assert!(!filtered.contains("City Park"));
        assert!(filtered.contains(r#"<a class="filter active" href="/projects?category=home">"#));

        let none = projects(&store, Some("unknown")).await;
        assert!(none.found);
        assert!(none.html.contains("No projects to show yet."));

        let detail = project_detail(&store, "park").await;
        assert!(detail.found);
        assert!(detail.html.contains("Public Spaces"));
        assert!(!project_detail(&store, "missing").await.found);
    }

    #[tokio::test]
    async fn test_careers_only_open_jobs() {
        let store = store_with(vec![(
            "careers-jobs",
            json!({ "items": [
                { "slug": "a", "title": "Crew Lead", "status": "Open", "order": 0 },
                { "slug": "b", "title": "Designer", "status": "closed", "order": 1 },
                { "slug": "c", "title": "Arborist", "order": 2 }
            ]}),
        )])
        .await;
        let html = careers(&store).await.html;
        assert!(html.contains("Crew Lead"));
        assert!(html.contains("Arborist"));
        assert!(!html.contains("Designer"));
    }

    #[test]
    fn test_is_open() {
        assert!(is_open(None));
        assert!(is_open(Some(" OPEN ")));
        assert!(!is_open(Some("closed")));
        assert!(!is_open(Some("")));
    }

    #[tokio::test]
    async fn test_contact_form_state() {
        let store = ContentStore::memory();
        let mut form = ContactForm::default();
        form.values.name = "<Ada>".into();
        form.errors.insert("email".into(), "Email is required".into());
        let html = contact(&store, &form).await.html;
        assert!(html.contains(r#"value="&lt;Ada&gt;""#));
        assert!(html.contains(r#"<p class="field-error">Email is required</p>"#));
        assert!(!html.contains(r#"class="success""#));

        let html = contact(&store, &ContactForm::sent()).await.html;
        assert!(html.contains("Thank you! Your message has been sent."));
    }

    #[tokio::test]
    async fn test_eco_matrix_dimension_selection() {
        let store = store_with(vec![(
            "eco-matrix-dimensions",
            json!({ "items": [
                { "slug": "water", "title": "Water", "metric": "Litres saved", "order": 0 },
                { "slug": "soil", "title": "Soil", "metric": "Carbon stored", "order": 1 }
            ]}),
        )])
        .await;

        let first = eco_matrix(&store, None).await.html;
        assert!(first.contains("Litres saved"));
        assert!(!first.contains("Carbon stored"));

        let soil = eco_matrix(&store, Some("soil")).await.html;
        assert!(soil.contains("Carbon stored"));

        let unknown = eco_matrix(&store, Some("air")).await.html;
        assert!(unknown.contains("Litres saved"));
    }

    #[tokio::test]
    async fn test_not_found_keeps_chrome() {
        let store = store_with(vec![("navbar", json!({ "logoText": "GreenCo" }))]).await;
        let page = not_found(&store).await;
        assert!(!page.found);
        assert!(page.html.contains("GreenCo"));
        assert!(page.html.contains("Page Not Found"));
    }
}
