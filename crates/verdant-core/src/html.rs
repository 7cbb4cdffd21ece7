//! HTML escaping.
//!
//! Every piece of section content reaching markup goes through [`escape`];
//! content is authored by admins but is still untrusted text.

/// Escape text for use in HTML element content and quoted attributes.
///
/// # Examples
///
/// ```
/// use verdant_core::html::escape;
///
/// assert_eq!(escape(r#"<a href="x">Tom & Jerry's</a>"#),
///            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Returns `href` if it is safe to place in a link, otherwise `"#"`.
///
/// Relative paths, fragments, `http(s)`, `mailto`, and `tel` are accepted;
/// anything else (notably `javascript:`) is replaced.
pub fn safe_href(href: &str) -> &str {
    let trimmed = href.trim();
    let lower = trimmed.to_ascii_lowercase();
    let allowed = trimmed.starts_with('/')
        || trimmed.starts_with('#')
        || ["http://", "https://", "mailto:", "tel:"]
            .iter()
            .any(|scheme| lower.starts_with(scheme))
        || !lower.contains(':');
    if allowed && !trimmed.is_empty() {
        trimmed
    } else {
        "#"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape("Natural Beauty."), "Natural Beauty.");
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a\"b'c"), "a&quot;b&#39;c");
    }

    #[test]
    fn test_safe_href() {
        assert_eq!(safe_href("/about"), "/about");
        assert_eq!(safe_href("#contact"), "#contact");
        assert_eq!(safe_href("https://example.com"), "https://example.com");
        assert_eq!(safe_href("mailto:hello@example.com"), "mailto:hello@example.com");
        assert_eq!(safe_href("projects/riverside"), "projects/riverside");
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href(" JavaScript:alert(1)"), "#");
        assert_eq!(safe_href(""), "#");
    }
}
