//! Shared page chrome: `<head>`, navbar, and footer.

use std::fmt::Write;

use verdant_core::html::{escape, safe_href};

use crate::resolve::PageData;
use crate::view::SectionView;

const SITE_NAME: &str = "Verdant Landscapes";
const DEFAULT_DESCRIPTION: &str =
    "Landscape architecture, construction, and maintenance for homes, businesses, and public spaces.";
const DEFAULT_PRIMARY: &str = "#2f5d3a";
const DEFAULT_ACCENT: &str = "#c8a951";

const DEFAULT_NAV: &[(&str, &str)] = &[
    ("Home", "/"),
    ("About", "/about"),
    ("Sectors", "/sectors"),
    ("Projects", "/projects"),
    ("ECO-MATRIX", "/eco-matrix"),
    ("Careers", "/careers"),
];

const DEFAULT_FOOTER_LINKS: &[(&str, &str)] = &[
    ("About", "/about"),
    ("Projects", "/projects"),
    ("Careers", "/careers"),
    ("Contact", "/contact"),
];

/// `(label, href)` pairs from an object array, or `defaults` when empty.
pub(crate) fn links<'a>(
    items: Vec<SectionView<'a>>,
    label_key: &str,
    href_key: &str,
    defaults: &[(&'a str, &'a str)],
) -> Vec<(&'a str, &'a str)> {
    let links: Vec<(&'a str, &'a str)> = items
        .iter()
        .filter_map(|item| Some((item.opt_text(label_key)?, item.text(href_key, "#"))))
        .collect();
    if links.is_empty() {
        defaults.to_vec()
    } else {
        links
    }
}

/// Wrap `body` in the full document with head, navbar, and footer.
///
/// `title` is the page's own title; the site title from `seo` is appended.
pub fn document(data: &PageData, current_path: &str, title: Option<&str>, body: &str) -> String {
    let seo = data.view("seo");
    let branding = data.view("branding");
    let site_title = seo.text("title", branding.text("siteName", SITE_NAME));
    let full_title = match title {
        Some(t) if t != site_title => format!("{t} | {site_title}"),
        _ => site_title.to_string(),
    };

    let mut html = String::with_capacity(body.len() + 4096);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
    let _ = write!(html, "<title>{}</title>", escape(&full_title));
    let _ = write!(
        html,
        r#"<meta name="description" content="{}">"#,
        escape(seo.text("description", DEFAULT_DESCRIPTION))
    );
    let keywords = seo.list("keywords", &[]);
    if !keywords.is_empty() {
        let _ = write!(
            html,
            r#"<meta name="keywords" content="{}">"#,
            escape(&keywords.join(", "))
        );
    }
    if let Some(image) = seo.opt_text("ogImage") {
        let _ = write!(html, r#"<meta property="og:image" content="{}">"#, escape(image));
    }
    if let Some(favicon) = branding.opt_text("favicon") {
        let _ = write!(html, r#"<link rel="icon" href="{}">"#, escape(favicon));
    }
    let _ = write!(
        html,
        "<style>:root{{--primary:{};--accent:{}}}</style>",
        css_color(branding.text("primaryColor", DEFAULT_PRIMARY), DEFAULT_PRIMARY),
        css_color(branding.text("accentColor", DEFAULT_ACCENT), DEFAULT_ACCENT),
    );
    html.push_str("</head><body>");
    html.push_str(&navbar(data, current_path));
    let _ = write!(html, "<main>{body}</main>");
    html.push_str(&footer(data));
    html.push_str("</body></html>");
    html
}

fn navbar(data: &PageData, current_path: &str) -> String {
    let nav = data.view("navbar");
    let branding = data.view("branding");
    let mut html = String::from(r#"<header class="navbar"><a class="logo" href="/">"#);

    let logo_text = nav.text("logoText", branding.text("siteName", SITE_NAME));
    match nav.opt_text("logoImage").or_else(|| branding.opt_text("logo")) {
        Some(src) => {
            let _ = write!(html, r#"<img src="{}" alt="{}">"#, escape(src), escape(logo_text));
        }
        None => html.push_str(&escape(logo_text)),
    }
    html.push_str("</a><nav><ul>");

    for (label, href) in links(nav.items("links"), "label", "href", DEFAULT_NAV) {
        let class = if href == current_path { r#" class="active""# } else { "" };
        let _ = write!(
            html,
            r#"<li><a href="{}"{class}>{}</a></li>"#,
            escape(safe_href(href)),
            escape(label)
        );
    }
    let _ = write!(
        html,
        r#"</ul></nav><a class="button" href="{}">{}</a></header>"#,
        escape(safe_href(nav.text("ctaHref", "/contact"))),
        escape(nav.text("ctaLabel", "Get in Touch"))
    );
    html
}

fn footer(data: &PageData) -> String {
    let footer = data.view("footer");
    let branding = data.view("branding");
    let mut html = String::from(r#"<footer class="footer"><div class="brand">"#);

    let _ = write!(
        html,
        "<strong>{}</strong><p>{}</p></div>",
        escape(branding.text("siteName", SITE_NAME)),
        escape(footer.text(
            "tagline",
            "Landscape design, construction, and care rooted in ecology."
        ))
    );

    html.push_str(r#"<div class="contact">"#);
    if let Some(address) = footer.opt_text("address") {
        let _ = write!(html, "<address>{}</address>", multiline(address));
    }
    if let Some(phone) = footer.opt_text("phone") {
        let _ = write!(html, r#"<a href="tel:{0}">{0}</a>"#, escape(phone));
    }
    if let Some(email) = footer.opt_text("email") {
        let _ = write!(html, r#"<a href="mailto:{0}">{0}</a>"#, escape(email));
    }
    html.push_str(r#"</div><ul class="links">"#);

    for (label, href) in links(footer.items("links"), "label", "href", DEFAULT_FOOTER_LINKS) {
        let _ = write!(
            html,
            r#"<li><a href="{}">{}</a></li>"#,
            escape(safe_href(href)),
            escape(label)
        );
    }
    html.push_str(r#"</ul><ul class="socials">"#);
    for (platform, url) in links(footer.items("socials"), "platform", "url", &[]) {
        let _ = write!(
            html,
            r#"<li><a href="{}" rel="noopener">{}</a></li>"#,
            escape(safe_href(url)),
            escape(platform)
        );
    }
    let _ = write!(
        html,
        r#"</ul><p class="copyright">{}</p></footer>"#,
        escape(footer.text("copyright", "© Verdant Landscapes. All rights reserved."))
    );
    html
}

/// Escape text and turn newlines into `<br>`.
pub(crate) fn multiline(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

/// Accept `#rgb`/`#rrggbb` colors only; anything else gets `default`.
fn css_color<'a>(value: &'a str, default: &'a str) -> &'a str {
    let hex = value.strip_prefix('#').unwrap_or_default();
    if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        value
    } else {
        default
    }
}
